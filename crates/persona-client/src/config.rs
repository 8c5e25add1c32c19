// crates/persona-client/src/config.rs
//! Client settings

use mentorscroll_resilience::{CircuitBreakerConfig, RetryPolicy};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.sensay.io/v1";
pub const DEFAULT_API_VERSION: &str = "2025-03-25";

/// Environment variable the CLI reads the API key from
pub const API_KEY_ENV: &str = "MENTORSCROLL_PERSONA_API_KEY";

/// HTTP client configuration
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_version: String,
    /// Deadline for each request, retries included separately
    pub timeout: Duration,
    pub user_agent: String,
    /// `None` sends every request once
    pub retry_policy: Option<RetryPolicy>,
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("MentorScroll/{}", env!("CARGO_PKG_VERSION")),
            retry_policy: Some(RetryPolicy::new(3)),
            circuit_breaker: Some(CircuitBreakerConfig::new(5, Duration::from_secs(30))),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, policy: Option<RetryPolicy>) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_circuit_breaker(mut self, config: Option<CircuitBreakerConfig>) -> Self {
        self.circuit_breaker = config;
        self
    }
}

// The API key stays out of debug output and logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("retry_policy", &self.retry_policy)
            .field("circuit_breaker", &self.circuit_breaker)
            .finish()
    }
}
