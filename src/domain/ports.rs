use crate::domain::model::{Imei, VerificationOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn headers(&self) -> &HashMap<String, String>;
}

/// The backend collaborator that knows which devices are registered.
///
/// Callers only ever hand it an [`Imei`], so it never sees malformed input.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, imei: &Imei) -> Result<VerificationOutcome>;
}
