//! Controller configuration.

/// Environment variable naming the request schema of a handler.
pub const REQUEST_SCHEMA_VAR: &str = "REQUEST_SCHEMA";

/// Settings for a [`Controller`](crate::Controller).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Name of the schema the handler's requests must satisfy. When set, a
    /// missing schema is a server error rather than "no validation".
    pub request_schema: Option<String>,
}

impl ControllerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bodyguard::ControllerConfig;
    ///
    /// let config = ControllerConfig::from_lookup(|key| match key {
    ///     "REQUEST_SCHEMA" => Some("createUser".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.request_schema.as_deref(), Some("createUser"));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            request_schema: lookup(REQUEST_SCHEMA_VAR).filter(|name| !name.is_empty()),
        }
    }

    /// Sets the request schema name.
    pub fn with_request_schema(mut self, name: impl Into<String>) -> Self {
        self.request_schema = Some(name.into());
        self
    }
}
