//! Serverless handler wrapper.
//!
//! A [`Controller`] turns an incoming HTTP [`Event`] into a [`Response`]:
//! it answers warm-up pings, parses the JSON body, validates it against the
//! endpoint's schema, and only then calls the wrapped handler. Any error on the
//! way becomes a 500 response; validation failures become a 400 response.

use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ControllerConfig;
use crate::registry::SchemaRegistry;
use crate::request::RequestValidator;
use crate::response::{failure_response, response, Response, StatusCode};
use crate::schema::SchemaNode;

/// `source` of the keep-warm pings sent by the scheduler.
pub const WARMUP_SOURCE: &str = "serverless-plugin-warmup";

/// An API gateway proxy event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub authorizer: Option<Authorizer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorizer {
    #[serde(default)]
    pub principal_id: Option<String>,
    #[serde(default)]
    pub claims: Option<Value>,
}

impl Event {
    /// Returns true for keep-warm pings.
    pub fn is_warmup(&self) -> bool {
        self.source.as_deref() == Some(WARMUP_SOURCE)
    }

    /// Returns `"<METHOD> <resource>"`, used to label log lines.
    pub fn route(&self) -> String {
        format!("{} {}", self.http_method, self.resource)
    }

    /// Returns the principal set by the authorizer.
    pub fn principal(&self) -> Option<&str> {
        self.authorizer()?.principal_id.as_deref()
    }

    /// Returns the token claims set by the authorizer.
    pub fn claims(&self) -> Option<&Value> {
        self.authorizer()?.claims.as_ref()
    }

    fn authorizer(&self) -> Option<&Authorizer> {
        self.request_context.as_ref()?.authorizer.as_ref()
    }
}

/// What a handler receives once the request has been validated.
#[derive(Debug, Clone, Copy)]
pub struct HandlerRequest<'a> {
    pub event: &'a Event,
    /// The parsed body, or `None` if no body was sent.
    pub body: Option<&'a Value>,
    pub principal: Option<&'a str>,
    pub claims: Option<&'a Value>,
}

/// Wraps a handler with body parsing, validation and error mapping.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use bodyguard::{response, Controller, Event, HandlerRequest, Response, Schema, StatusCode};
/// use serde_json::json;
///
/// let schema = Schema::object().required().property("name", Schema::string().required());
/// let controller = Controller::new(
///     Some(Arc::new(schema)),
///     |req: &HandlerRequest<'_>| -> anyhow::Result<Response> {
///         let name = req.body.map(|body| body["name"].clone());
///         Ok(response(&json!({ "hello": name }), StatusCode::Ok))
///     },
/// );
///
/// let event = Event { body: Some(r#"{"name":"Ada"}"#.to_string()), ..Event::default() };
/// assert_eq!(controller.handle(&event).status_code, 200);
///
/// let event = Event { body: Some("{}".to_string()), ..Event::default() };
/// assert_eq!(controller.handle(&event).status_code, 400);
/// ```
pub struct Controller<H> {
    schema: Option<Arc<SchemaNode>>,
    config: ControllerConfig,
    validator: RequestValidator,
    handler: H,
}

impl<H> Controller<H>
where
    H: Fn(&HandlerRequest<'_>) -> anyhow::Result<Response>,
{
    /// Creates a controller. With no schema, bodies are passed through unchecked.
    pub fn new(schema: Option<Arc<SchemaNode>>, handler: H) -> Self {
        Self {
            schema,
            config: ControllerConfig::default(),
            validator: RequestValidator::new(),
            handler,
        }
    }

    /// Creates a controller whose schema is the one `config` names in `registry`.
    pub fn from_registry(registry: &SchemaRegistry, config: ControllerConfig, handler: H) -> Self {
        let schema = config
            .request_schema
            .as_deref()
            .and_then(|name| registry.get(name));
        Self::new(schema, handler).with_config(config)
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_validator(mut self, validator: RequestValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Handles one event. Never fails; errors are mapped to responses.
    pub fn handle(&self, event: &Event) -> Response {
        if event.is_warmup() {
            log::debug!("{}", WARMUP_SOURCE);
            return response(&json!(WARMUP_SOURCE), StatusCode::Ok);
        }

        let route = event.route();
        let principal = event.principal().unwrap_or("-");

        match self.dispatch(event, &route, principal) {
            Ok(response) => response,
            Err(e) => {
                log::error!(
                    "[500] Controller failed to execute with an exception for path {}, principal: {}: {:#}",
                    route,
                    principal,
                    e
                );
                internal_server_error()
            }
        }
    }

    fn dispatch(&self, event: &Event, route: &str, principal: &str) -> anyhow::Result<Response> {
        let schema_name = self.config.request_schema.as_deref();
        log::debug!(
            "Using request schema: {} - {}",
            schema_name.unwrap_or("-"),
            route
        );

        let body = parse_body(event.body.as_deref())?;

        if let (Some(name), None) = (schema_name, &self.schema) {
            log::error!(
                "[500] The request schema was not found for path: {}, schema: {}",
                route,
                name
            );
            return Ok(internal_server_error());
        }

        if let Some(schema) = &self.schema {
            let outcome = self
                .validator
                .validate(schema, body.as_ref())
                .with_context(|| format!("request schema for {} is malformed", route))?;
            if let Some(errors) = &outcome.errors {
                let response = failure_response(errors);
                log::warn!(
                    "[{}] Validation failed for execution for path: {}, principal: {}",
                    response.status_code,
                    route,
                    principal
                );
                return Ok(response);
            }
        }

        let request = HandlerRequest {
            event,
            body: body.as_ref(),
            principal: event.principal(),
            claims: event.claims(),
        };
        let response = (self.handler)(&request)?;
        log::debug!(
            "[{}] Controller execution for path: {}, principal: {}",
            response.status_code,
            route,
            principal
        );
        Ok(response)
    }
}

/// An absent or empty body is no body at all.
fn parse_body(text: Option<&str>) -> anyhow::Result<Option<Value>> {
    match text {
        None | Some("") => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .context("request body is not valid JSON"),
    }
}

fn internal_server_error() -> Response {
    response(
        &json!({ "message": "[500] Internal Server Error" }),
        StatusCode::InternalServerError,
    )
}
