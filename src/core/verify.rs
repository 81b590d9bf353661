use crate::core::field::ImeiField;
use crate::core::imei::IMEI_LENGTH;
use crate::core::Verifier;
use crate::domain::model::{Imei, VerificationOutcome, VerificationReport};
use crate::utils::error::{Result, SecuritelError};
use chrono::Utc;

/// Hands validated IMEIs to a [`Verifier`] and stamps the result.
pub struct VerificationEngine<V: Verifier> {
    verifier: V,
}

impl<V: Verifier> VerificationEngine<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Runs free-form input through a paste into a fresh field and verifies
    /// the result. The verifier is not called unless the field is valid.
    pub async fn verify_input(&self, raw: &str) -> Result<VerificationReport> {
        let mut field = ImeiField::new();
        field.paste(raw);

        let imei = field.submit().ok_or_else(|| {
            SecuritelError::invalid_imei(
                raw,
                format!("expected {} digits, found {}", IMEI_LENGTH, field.len()),
            )
        })?;

        self.verify(&imei).await
    }

    pub async fn verify(&self, imei: &Imei) -> Result<VerificationReport> {
        tracing::debug!("Verifying IMEI {}", imei);
        let outcome = self.verifier.verify(imei).await?;

        match &outcome {
            VerificationOutcome::Found(phone) if phone.status.is_flagged() => {
                tracing::warn!("IMEI {} is reported {}", imei, phone.status);
            }
            VerificationOutcome::Found(phone) => {
                tracing::info!("IMEI {} is registered ({})", imei, phone.status);
            }
            VerificationOutcome::NotFound => {
                tracing::info!("IMEI {} is not registered", imei);
            }
        }

        Ok(VerificationReport {
            imei: imei.clone(),
            outcome,
            checked_at: Utc::now(),
        })
    }
}
