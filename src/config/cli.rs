use crate::config::toml_config::TomlConfig;
use crate::config::ApiSettings;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "securitel")]
#[command(about = "Sanitize, validate and verify device IMEIs against SecuriTel")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Base URL of the SecuriTel API")]
    pub api_endpoint: Option<String>,

    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the input with non-digits stripped and capped at 15 digits
    Sanitize { input: String },

    /// Exit with 0 if the sanitized input is a well-formed IMEI
    Check { input: String },

    /// Replay key names (e.g. 3 5 a Backspace Home) through an IMEI field
    Keys {
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// Look the IMEI up in the SecuriTel registry
    Verify {
        input: String,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
}

impl CliConfig {
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }

    /// Flags win over the config file.
    pub fn api_settings(&self, file: Option<&TomlConfig>) -> Result<ApiSettings> {
        let mut settings = match file {
            Some(file) => file.api_settings(self.api_endpoint.as_deref())?,
            None => ApiSettings::new(
                validate_required_field("api.endpoint", &self.api_endpoint)?.clone(),
            ),
        };

        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }

        Ok(settings)
    }
}
