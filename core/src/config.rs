//! Manager configuration: target base URL and request timeout.

use std::time::Duration;

use crate::error::ApiError;

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "VEHICLE_API_URL";

/// Environment variable holding the request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "VEHICLE_API_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ManagerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `VEHICLE_API_URL` and, optionally, `VEHICLE_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{ENV_BASE_URL} is not set")))?;

        let mut config = Self::new(base_url);
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {raw}")))?;
            if secs == 0 {
                return Err(ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be positive")));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
