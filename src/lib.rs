pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::HttpVerifier;
pub use config::{toml_config::TomlConfig, ApiSettings};
pub use core::field::{ImeiField, KeyOutcome, KeyStep};
pub use core::imei::{filter_keystroke, handle_paste, is_valid, sanitize, IMEI_LENGTH};
pub use core::verify::VerificationEngine;
pub use domain::model::{
    FieldState, Imei, PhoneRecord, PhoneStatus, VerificationOutcome, VerificationReport,
};
pub use domain::ports::{ConfigProvider, Verifier};
pub use utils::error::{Result, SecuritelError};
