use crate::config::{ApiSettings, DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
use crate::utils::error::{Result, SecuritelError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SecuritelError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SecuritelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SECURITEL_TOKEN})
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Settings from the file alone. `endpoint_override` stands in for a
    /// missing or overridden `api.endpoint`.
    pub fn api_settings(&self, endpoint_override: Option<&str>) -> Result<ApiSettings> {
        let endpoint = endpoint_override
            .map(str::to_string)
            .or_else(|| self.api.endpoint.clone());

        Ok(ApiSettings {
            endpoint: validate_required_field("api.endpoint", &endpoint)?.clone(),
            timeout_seconds: self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            headers: self.api.headers.clone().unwrap_or_default(),
        })
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

// The endpoint may come from the command line instead, so it is only
// checked here when the file sets it.
impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.api.endpoint {
            validate_url("api.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        for name in self.api.headers.iter().flat_map(|h| h.keys()) {
            validate_non_empty_string("api.headers", name)?;
        }
        Ok(())
    }
}
