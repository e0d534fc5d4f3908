//! HTTP transport for the encryption service contract.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use cryptshare_core::types::{DecryptedPayload, EncryptReceipt};
use cryptshare_core::{CryptshareError, CryptshareResult};

use crate::disposition::parse_filename;
use crate::EncryptionService;

/// Failure body the backend returns on any non-OK status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// `EncryptionService` implementation over the backend's HTTP contract.
#[derive(Debug, Clone)]
pub struct HttpEncryptionService {
    endpoint: String,
    client: Client,
}

impl HttpEncryptionService {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Extract the service-reported `detail`, falling back to the HTTP status
/// when the body is not the expected JSON shape.
async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => format!("service returned HTTP {status}"),
    }
}

#[async_trait]
impl EncryptionService for HttpEncryptionService {
    async fn encrypt(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        password: &str,
    ) -> CryptshareResult<EncryptReceipt> {
        let url = format!("{}/encrypt/", self.endpoint);
        let size = bytes.len();

        let file_part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new()
            .part("file", file_part)
            .text("password", password.to_string());

        debug!(url = %url, file = %filename, bytes = size, "sending encrypt request");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CryptshareError::Transport(format!("POST {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(CryptshareError::Encryption(error_detail(response).await));
        }

        let receipt: EncryptReceipt = response
            .json()
            .await
            .map_err(|e| CryptshareError::Transport(format!("decoding encrypt response: {e}")))?;

        info!(
            file_id = %receipt.file_id,
            chunks = receipt.num_chunks,
            "backend stored encrypted blob"
        );

        Ok(receipt)
    }

    async fn decrypt(&self, file_id: &str, password: &str) -> CryptshareResult<DecryptedPayload> {
        let url = format!("{}/decrypt/", self.endpoint);

        let form = Form::new()
            .text("file_id", file_id.to_string())
            .text("password", password.to_string());

        debug!(url = %url, file_id = %file_id, "sending decrypt request");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CryptshareError::Transport(format!("POST {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(CryptshareError::Decryption(error_detail(response).await));
        }

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_filename);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CryptshareError::Transport(format!("reading decrypt body: {e}")))?
            .to_vec();

        info!(
            file_id = %file_id,
            bytes = bytes.len(),
            filename = filename.as_deref().unwrap_or("(none)"),
            "backend returned decrypted bytes"
        );

        Ok(DecryptedPayload { filename, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let svc = HttpEncryptionService::new("http://localhost:8000/");
        assert_eq!(svc.endpoint(), "http://localhost:8000");
    }

    #[test]
    fn test_error_body_parses_backend_failure() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "invalid password"}"#).unwrap();
        assert_eq!(body.detail, "invalid password");
    }
}
