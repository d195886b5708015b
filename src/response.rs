//! HTTP response envelope for serverless handlers.
//!
//! Responses carry a numeric status code, a JSON-encoded body and a fixed set of
//! CORS headers.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ErrorMap;

/// Status codes used by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    TooManyRequests = 429,
    InternalServerError = 500,
}

impl StatusCode {
    /// Returns the numeric code.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// A transport-level response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub headers: IndexMap<String, String>,
}

impl Response {
    /// Parses the body back into JSON.
    pub fn body_json(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

fn default_headers() -> IndexMap<String, String> {
    let mut headers = IndexMap::new();
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers
}

/// Builds a response with `body` serialized as JSON.
pub fn response(body: &Value, status: StatusCode) -> Response {
    Response {
        status_code: status.as_u16(),
        body: Some(body.to_string()),
        headers: default_headers(),
    }
}

/// Builds a response whose body is `{"statusCode": .., "message": ..}`.
pub fn message_response(message: &str, status: StatusCode) -> Response {
    response(
        &json!({ "statusCode": status.as_u16(), "message": message }),
        status,
    )
}

/// Builds the 400 response listing every validation error.
///
/// # Example
///
/// ```rust
/// use bodyguard::{failure_response, ErrorMap};
/// use serde_json::json;
///
/// let response = failure_response(&ErrorMap::from([("a", "is required")]));
/// assert_eq!(response.status_code, 400);
/// assert_eq!(
///     response.body_json().unwrap(),
///     json!({"message": "Validation Errors", "validationErrors": {"a": "is required"}})
/// );
/// ```
pub fn failure_response(errors: &ErrorMap) -> Response {
    response(
        &json!({ "message": "Validation Errors", "validationErrors": errors.to_json() }),
        StatusCode::BadRequest,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_carries_cors_header() {
        let response = response(&json!({"ok": true}), StatusCode::Ok);
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers.get("Access-Control-Allow-Origin").map(String::as_str),
            Some("*")
        );
        assert_eq!(response.body.as_deref(), Some(r#"{"ok":true}"#));
    }

    #[test]
    fn test_message_response_body() {
        let response = message_response("no access", StatusCode::Forbidden);
        assert_eq!(response.status_code, 403);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"statusCode": 403, "message": "no access"})
        );
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let value = serde_json::to_value(response(&json!(null), StatusCode::NotFound)).unwrap();
        assert_eq!(value["statusCode"], json!(404));
        assert_eq!(value["body"], json!("null"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusCode::Created.as_u16(), 201);
        assert_eq!(StatusCode::Unauthorized.as_u16(), 401);
        assert_eq!(StatusCode::TooManyRequests.as_u16(), 429);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    }
}
