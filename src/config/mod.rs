#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Everything needed to reach the verification backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub headers: HashMap<String, String>,
}

impl ApiSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            headers: HashMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl ConfigProvider for ApiSettings {
    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.endpoint)?;
        validate_range(
            "api.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        for name in self.headers.keys() {
            validate_non_empty_string("api.headers", name)?;
        }
        Ok(())
    }
}
