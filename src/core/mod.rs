pub mod field;
pub mod imei;
pub mod verify;

pub use crate::domain::model::{FieldState, Imei, VerificationOutcome, VerificationReport};
pub use crate::domain::ports::{ConfigProvider, Verifier};
pub use crate::utils::error::Result;
