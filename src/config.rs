//! Backend connection settings resolved from the environment.
//!
//! Resolution is a pure function of an [`EnvSnapshot`]; only
//! [`EnvSnapshot::from_process`] touches the process environment.

use crate::api::{DEFAULT_HEADERS, endpoints};
use std::collections::HashMap;
use std::time::Duration;

pub const API_BASE_URL_VAR: &str = "CV_SCREENER_API_BASE_URL";
pub const DEBUG_MODE_VAR: &str = "CV_SCREENER_DEBUG_MODE";
pub const MODE_VAR: &str = "CV_SCREENER_MODE";
pub const PROXY_TARGET_VAR: &str = "CV_SCREENER_PROXY_TARGET";

/// Path served by the development proxy.
pub const DEV_PROXY_PATH: &str = "/api/v1";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_PROXY_TARGET: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_RETRIES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Mode::Development
        } else {
            Mode::Production
        }
    }
}

/// Explicit copy of the variables the resolver looks at.
#[derive(Clone, Debug)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
    mode: Mode,
}

impl EnvSnapshot {
    pub fn new(mode: Mode) -> Self {
        Self {
            vars: HashMap::new(),
            mode,
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn from_process() -> Self {
        let vars: HashMap<String, String> = [API_BASE_URL_VAR, DEBUG_MODE_VAR, MODE_VAR, PROXY_TARGET_VAR]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();
        let mode = match vars.get(MODE_VAR).map(|m| m.trim().to_ascii_lowercase()) {
            Some(m) if m == "development" || m == "dev" => Mode::Development,
            Some(m) if m == "production" || m == "prod" => Mode::Production,
            _ => Mode::from_build(),
        };
        Self { vars, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Non-empty value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

/// Resolved backend connection parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Declared for parity with the backend contract; no call path retries.
    pub retries: u32,
    pub debug: bool,
    pub mode: Mode,
    pub proxy_target: String,
}

impl ApiConfig {
    pub fn resolve(env: &EnvSnapshot) -> Self {
        let is_development = env.mode() == Mode::Development;
        let override_url = env.get(API_BASE_URL_VAR);

        let base_url = match override_url {
            None if is_development => DEV_PROXY_PATH.to_string(),
            Some(url) => url.to_string(),
            None => DEFAULT_BASE_URL.to_string(),
        };

        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            debug: env.get(DEBUG_MODE_VAR) == Some("true") || is_development,
            mode: env.mode(),
            proxy_target: env
                .get(PROXY_TARGET_VAR)
                .unwrap_or(DEFAULT_PROXY_TARGET)
                .to_string(),
        }
    }

    /// Joins the base URL and `endpoint` with exactly one slash between them.
    pub fn build_url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    /// Absolute URL for the transport; proxy-relative bases are served from
    /// `proxy_target`.
    pub fn request_url(&self, endpoint: &str) -> String {
        let url = self.build_url(endpoint);
        if url.starts_with('/') {
            format!("{}{}", self.proxy_target.trim_end_matches('/'), url)
        } else {
            url
        }
    }

    pub fn proxy_enabled(&self) -> bool {
        self.base_url.starts_with('/')
    }

    pub fn debug_info(&self, env: &EnvSnapshot) -> DebugInfo {
        DebugInfo {
            environment: env.mode().name().to_string(),
            is_development: env.mode() == Mode::Development,
            is_production: env.mode() == Mode::Production,
            base_url: self.base_url.clone(),
            backend_url: env
                .get(API_BASE_URL_VAR)
                .unwrap_or("Not configured")
                .to_string(),
            proxy_enabled: self.proxy_enabled(),
        }
    }
}

fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if endpoint.starts_with('/') {
        format!("{base}{endpoint}")
    } else {
        format!("{base}/{endpoint}")
    }
}

/// Snapshot shown by the development debug panel.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugInfo {
    pub environment: String,
    pub is_development: bool,
    pub is_production: bool,
    pub base_url: String,
    pub backend_url: String,
    pub proxy_enabled: bool,
}

/// Probes the health endpoint; any failure reads as unreachable.
pub async fn check_backend_health(config: &ApiConfig) -> bool {
    let client = reqwest::Client::new();
    let mut request = client.get(config.request_url(endpoints::HEALTH));
    for &(name, value) in DEFAULT_HEADERS {
        request = request.header(name, value);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        request = request.timeout(config.timeout);
    }

    match request.send().await {
        Ok(response) => response.status().is_success(),
        Err(err) => {
            tracing::warn!(error = %err, "backend health check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_slash() {
        assert_eq!(join_url("/api/v1/", "/health"), "/api/v1/health");
        assert_eq!(join_url("/api/v1", "health"), "/api/v1/health");
        assert_eq!(join_url("/api/v1/", "health"), "/api/v1/health");
        assert_eq!(join_url("/api/v1", "/health"), "/api/v1/health");
    }

    #[test]
    fn proxy_paths_are_made_absolute() {
        let env = EnvSnapshot::new(Mode::Development).with_var(PROXY_TARGET_VAR, "http://127.0.0.1:9000/");
        let config = ApiConfig::resolve(&env);
        assert_eq!(config.request_url("/chat"), "http://127.0.0.1:9000/api/v1/chat");
    }

    #[test]
    fn blank_override_is_ignored() {
        let env = EnvSnapshot::new(Mode::Production).with_var(API_BASE_URL_VAR, "  ");
        assert_eq!(ApiConfig::resolve(&env).base_url, DEFAULT_BASE_URL);
    }
}
