//! Session coordinator configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionConfig` is built at startup and handed to `Session::new`.
//! Every field has a default matching the wallet backend, so an empty JSON
//! object or an empty environment yields a working configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// How the backend session indicator travels with each request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// HttpOnly cookie managed by the browser; nothing is attached or stored.
    #[default]
    Cookie,
    /// Bearer token kept in the durable client record.
    Bearer,
}

impl CredentialMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cookie" => Some(Self::Cookie),
            "bearer" | "token" => Some(Self::Bearer),
            _ => None,
        }
    }
}

/// Static access class of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Always reachable; the guard does not read session state.
    Public,
    /// Reachable only with an authenticated session.
    Protected,
    /// The login form. Authenticated principals are sent to the landing route.
    LoginEntry,
    /// `/`: forwards to the landing route or the login route.
    Index,
}

/// A route pattern such as `/contacts/:id` with its access class.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RouteSpec {
    pub pattern: String,
    pub access: RouteAccess,
}

impl RouteSpec {
    pub fn new(pattern: impl Into<String>, access: RouteAccess) -> Self {
        Self { pattern: pattern.into(), access }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prefix for every API path. Empty means same-origin.
    pub api_base_url: String,
    pub identity_endpoint: String,
    pub logout_endpoint: String,
    pub request_timeout_ms: u64,
    pub logout_timeout_ms: u64,
    pub login_route: String,
    pub landing_route: String,
    pub credentials: CredentialMode,
    pub routes: Vec<RouteSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            identity_endpoint: "/api/wallet/me".to_owned(),
            logout_endpoint: "/api/wallet/logout".to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            logout_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            login_route: "/login".to_owned(),
            landing_route: "/dashboard".to_owned(),
            credentials: CredentialMode::Cookie,
            routes: default_routes(),
        }
    }
}

fn default_routes() -> Vec<RouteSpec> {
    vec![
        RouteSpec::new("/", RouteAccess::Index),
        RouteSpec::new("/login", RouteAccess::LoginEntry),
        RouteSpec::new("/dashboard", RouteAccess::Protected),
        RouteSpec::new("/contacts", RouteAccess::Protected),
        RouteSpec::new("/contacts/:id", RouteAccess::Protected),
        RouteSpec::new("/analytics", RouteAccess::Protected),
        RouteSpec::new("/settings", RouteAccess::Protected),
    ]
}

impl SessionConfig {
    /// Parse a JSON config blob. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the blob is not a valid config object,
    /// and `ConfigError::InvalidValue` for a zero timeout.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every request fail.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, ms) in [
            ("request_timeout_ms", self.request_timeout_ms),
            ("logout_timeout_ms", self.logout_timeout_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::InvalidValue { key, value: ms.to_string() });
            }
        }
        Ok(())
    }

    /// Load overrides from `SESSION_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparseable variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup("SESSION_API_BASE_URL") {
            config.api_base_url = base.trim().trim_end_matches('/').to_owned();
        }
        if let Some(raw) = lookup("SESSION_CREDENTIALS") {
            config.credentials = CredentialMode::parse(&raw)
                .ok_or(ConfigError::InvalidValue { key: "SESSION_CREDENTIALS", value: raw })?;
        }
        if let Some(raw) = lookup("SESSION_TIMEOUT_MS") {
            config.request_timeout_ms = parse_millis("SESSION_TIMEOUT_MS", raw)?;
        }
        if let Some(raw) = lookup("SESSION_LOGOUT_TIMEOUT_MS") {
            config.logout_timeout_ms = parse_millis("SESSION_LOGOUT_TIMEOUT_MS", raw)?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn logout_timeout(&self) -> Duration {
        Duration::from_millis(self.logout_timeout_ms)
    }
}

fn parse_millis(key: &'static str, raw: String) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}
