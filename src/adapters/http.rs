use crate::core::{ConfigProvider, Verifier};
use crate::domain::model::{Imei, PhoneRecord, VerificationOutcome};
use crate::utils::error::{Result, SecuritelError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    found: bool,
    #[serde(default)]
    phone: Option<PhoneRecord>,
}

/// Talks to the backend's `GET /phones/verify/{imei}` route.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: Client,
    base_url: String,
}

impl HttpVerifier {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in config.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                SecuritelError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: name.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                SecuritelError::InvalidConfigValueError {
                    field: format!("api.headers.{}", name),
                    value: "<redacted>".to_string(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_endpoint().trim_end_matches('/').to_string(),
        })
    }

    pub fn verify_url(&self, imei: &Imei) -> String {
        format!("{}/phones/verify/{}", self.base_url, imei)
    }
}

#[async_trait]
impl Verifier for HttpVerifier {
    async fn verify(&self, imei: &Imei) -> Result<VerificationOutcome> {
        let url = self.verify_url(imei);
        tracing::debug!("Making verification request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("Verification response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(VerificationOutcome::NotFound);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SecuritelError::UnexpectedResponse {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown status").to_string()
                } else {
                    body
                },
            });
        }

        let body = response.bytes().await?;
        let parsed: VerifyResponse = serde_json::from_slice(&body)?;

        match (parsed.found, parsed.phone) {
            (false, _) => Ok(VerificationOutcome::NotFound),
            (true, Some(phone)) => {
                if phone.imei != imei.as_str() {
                    tracing::warn!(
                        "Verification service answered for {} when asked about {}",
                        phone.imei,
                        imei
                    );
                }
                Ok(VerificationOutcome::Found(phone))
            }
            (true, None) => Err(SecuritelError::UnexpectedResponse {
                status: status.as_u16(),
                message: "found=true but no phone details".to_string(),
            }),
        }
    }
}
