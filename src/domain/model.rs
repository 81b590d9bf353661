use crate::core::imei::{is_valid, sanitize, IMEI_LENGTH};
use crate::utils::error::{Result, SecuritelError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A device identifier that is exactly 15 ASCII digits.
///
/// The check digit is not verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Imei(String);

impl Imei {
    /// Accepts `candidate` only if it is already in canonical form.
    pub fn parse(candidate: &str) -> Result<Self> {
        if is_valid(candidate) {
            return Ok(Self(candidate.to_string()));
        }

        let reason = if candidate.len() != IMEI_LENGTH {
            format!(
                "expected {} digits, got {} characters",
                IMEI_LENGTH,
                candidate.chars().count()
            )
        } else {
            "only the digits 0-9 are allowed".to_string()
        };
        Err(SecuritelError::invalid_imei(candidate, reason))
    }

    /// Sanitizes free-form input first, then parses.
    pub fn from_input(raw: &str) -> Result<Self> {
        let digits = sanitize(raw);
        if is_valid(&digits) {
            Ok(Self(digits))
        } else {
            Err(SecuritelError::invalid_imei(
                raw,
                format!("expected {} digits, found {}", IMEI_LENGTH, digits.len()),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type Allocation Code: the first eight digits, identifying the model.
    pub fn tac(&self) -> &str {
        &self.0[..8]
    }

    pub fn serial(&self) -> &str {
        &self.0[8..14]
    }

    pub fn check_digit(&self) -> char {
        char::from(self.0.as_bytes()[14])
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Imei {
    type Error = SecuritelError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Imei> for String {
    fn from(imei: Imei) -> Self {
        imei.0
    }
}

impl AsRef<str> for Imei {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Empty,
    Partial,
    Complete,
}

impl FieldState {
    pub fn for_length(len: usize) -> Self {
        match len {
            0 => Self::Empty,
            n if n < IMEI_LENGTH => Self::Partial,
            _ => Self::Complete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneStatus {
    Legitimate,
    Stolen,
    Lost,
    Recovered,
}

impl PhoneStatus {
    /// Stolen and lost devices should not change hands.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Stolen | Self::Lost)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Legitimate => "legitimate",
            Self::Stolen => "stolen",
            Self::Lost => "lost",
            Self::Recovered => "recovered",
        }
    }
}

impl fmt::Display for PhoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub imei: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    pub status: PhoneStatus,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", content = "phone", rename_all = "snake_case")]
pub enum VerificationOutcome {
    NotFound,
    Found(PhoneRecord),
}

impl VerificationOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn status(&self) -> Option<PhoneStatus> {
        match self {
            Self::Found(phone) => Some(phone.status),
            Self::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub imei: Imei,
    pub outcome: VerificationOutcome,
    pub checked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imei_parse_rejects_wrong_shape() {
        assert!(Imei::parse("352099001761481").is_ok());
        assert!(Imei::parse("35209900176148").is_err());
        assert!(Imei::parse("35209900176148x").is_err());
        assert!(Imei::parse("35-2099001761481").is_err());
    }

    #[test]
    fn test_imei_from_input_sanitizes() {
        let imei = Imei::from_input("35-209900-176148-1").unwrap();
        assert_eq!(imei.as_str(), "352099001761481");
        assert!(Imei::from_input("12a3-45b").is_err());
    }

    #[test]
    fn test_imei_parts() {
        let imei = Imei::parse("352099001761481").unwrap();
        assert_eq!(imei.tac(), "35209900");
        assert_eq!(imei.serial(), "176148");
        assert_eq!(imei.check_digit(), '1');
    }

    #[test]
    fn test_imei_serde_round_trip_rejects_bad_values() {
        let imei: Imei = serde_json::from_str("\"352099001761481\"").unwrap();
        assert_eq!(serde_json::to_string(&imei).unwrap(), "\"352099001761481\"");
        assert!(serde_json::from_str::<Imei>("\"12345\"").is_err());
    }

    #[test]
    fn test_field_state_for_length() {
        assert_eq!(FieldState::for_length(0), FieldState::Empty);
        assert_eq!(FieldState::for_length(1), FieldState::Partial);
        assert_eq!(FieldState::for_length(14), FieldState::Partial);
        assert_eq!(FieldState::for_length(15), FieldState::Complete);
    }

    #[test]
    fn test_phone_record_keeps_unknown_fields() {
        let phone: PhoneRecord = serde_json::from_value(serde_json::json!({
            "imei": "352099001761481",
            "brand": "Samsung",
            "model": "Galaxy S21",
            "status": "stolen",
            "reportedAt": "2024-03-02"
        }))
        .unwrap();

        assert_eq!(phone.status, PhoneStatus::Stolen);
        assert!(phone.status.is_flagged());
        assert_eq!(phone.owner_name, None);
        assert_eq!(phone.extra["reportedAt"], "2024-03-02");
    }

    #[test]
    fn test_phone_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<PhoneStatus>("\"recovered\"").is_ok());
        assert!(serde_json::from_str::<PhoneStatus>("\"blacklisted\"").is_err());
    }
}
