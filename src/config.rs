//! 客户端配置：基础地址、超时、代理和凭据，可由环境变量覆盖。
//!
//! Client configuration.
//!
//! Defaults are minimal and env-overridable; explicit builder settings always win
//! over environment values.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `CAMPUS_API_BASE_URL` | Base URL of the backend | required |
//! | `CAMPUS_HTTP_TIMEOUT_SECS` | Transport-wide timeout | 30 |
//! | `CAMPUS_HTTP_POOL_MAX_IDLE_PER_HOST` | Idle connections kept per host | 8 |
//! | `CAMPUS_PROXY_URL` | Proxy for all requests | none |
//! | `CAMPUS_API_TOKEN` | Bearer token | none |
//! | `CAMPUS_CREDENTIAL_SERVICE` | OS keyring service holding the token | none |
//! | `CAMPUS_ROUTES_FILE` | YAML route table | built-in routes |

use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const ENV_BASE_URL: &str = "CAMPUS_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CAMPUS_HTTP_TIMEOUT_SECS";
pub const ENV_POOL_MAX_IDLE: &str = "CAMPUS_HTTP_POOL_MAX_IDLE_PER_HOST";
pub const ENV_PROXY_URL: &str = "CAMPUS_PROXY_URL";
pub const ENV_API_TOKEN: &str = "CAMPUS_API_TOKEN";
pub const ENV_CREDENTIAL_SERVICE: &str = "CAMPUS_CREDENTIAL_SERVICE";
pub const ENV_ROUTES_FILE: &str = "CAMPUS_ROUTES_FILE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POOL_MAX_IDLE: usize = 8;
const KEYRING_ACCOUNT: &str = "api-token";

/// Resolved transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
    pub bearer_token: Option<String>,
    pub credential_service: Option<String>,
    pub routes_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE,
            proxy_url: None,
            bearer_token: None,
            credential_service: None,
            routes_file: None,
        }
    }

    /// Build a configuration purely from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = env_string(ENV_BASE_URL).ok_or_else(|| {
            Error::configuration_with_context(
                "base URL is not configured",
                ErrorContext::new()
                    .with_field_path(ENV_BASE_URL)
                    .with_source("config"),
            )
        })?;
        let mut config = Self::new(base_url);
        config.apply_env();
        Ok(config)
    }

    /// Overwrite settings with the environment values that are present.
    ///
    /// Callers apply explicit settings after this, so they win over env.
    pub(crate) fn apply_env(&mut self) {
        if let Some(secs) = env_parse::<u64>(ENV_TIMEOUT_SECS) {
            self.timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(n) = env_parse::<usize>(ENV_POOL_MAX_IDLE) {
            self.pool_max_idle_per_host = n;
        }
        if let Some(proxy) = env_string(ENV_PROXY_URL) {
            self.proxy_url = Some(proxy);
        }
        if let Some(token) = env_string(ENV_API_TOKEN) {
            self.bearer_token = Some(token);
        }
        if let Some(service) = env_string(ENV_CREDENTIAL_SERVICE) {
            self.credential_service = Some(service);
        }
        if let Some(path) = env_string(ENV_ROUTES_FILE) {
            self.routes_file = Some(PathBuf::from(path));
        }
    }

    /// Parse and check the base URL. Only `http` and `https` are accepted.
    pub fn validated_base_url(&self) -> Result<Url> {
        let ctx = || {
            ErrorContext::new()
                .with_field_path("base_url")
                .with_source("config")
        };
        let url = Url::parse(self.base_url.trim()).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL '{}': {}", self.base_url, e),
                ctx(),
            )
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::configuration_with_context(
                format!("unsupported URL scheme '{}'", other),
                ctx(),
            )),
        }
    }

    /// Token to send as bearer auth: explicit (or env) first, then the OS keyring.
    pub(crate) fn resolve_token(&self) -> Option<String> {
        if let Some(token) = &self.bearer_token {
            return Some(token.clone());
        }
        let service = self.credential_service.as_deref()?;
        let entry = Entry::new(service, KEYRING_ACCOUNT).ok()?;
        match entry.get_password() {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::debug!(service, error = %e, "no token in keyring");
                None
            }
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_string(name).and_then(|s| s.parse::<T>().ok())
}
