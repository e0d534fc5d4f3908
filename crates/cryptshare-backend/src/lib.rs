//! cryptshare-backend: client for the external encryption service
//!
//! The backend performs the actual cryptographic transform and blob storage;
//! this crate only speaks its HTTP contract:
//!   - `POST /encrypt/` multipart(file, password) → JSON receipt
//!   - `POST /decrypt/` multipart(file_id, password) → binary + Content-Disposition
//!
//! The `EncryptionService` trait is the narrow capability the orchestration
//! core is written against, so tests can substitute an in-memory fake.

pub mod disposition;
pub mod http;

pub use disposition::parse_filename;
pub use http::HttpEncryptionService;

use async_trait::async_trait;
use cryptshare_core::types::{DecryptedPayload, EncryptReceipt};
use cryptshare_core::CryptshareResult;

/// Capability to call the backend encryption service.
///
/// Obtained once and reused across operations; never mutated.
#[async_trait]
pub trait EncryptionService: Send + Sync {
    /// Encrypt `bytes` under `password` and store the resulting blob.
    ///
    /// A service-reported failure (non-OK status with a `detail` body)
    /// surfaces as `CryptshareError::Encryption`.
    async fn encrypt(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        password: &str,
    ) -> CryptshareResult<EncryptReceipt>;

    /// Fetch and decrypt the blob previously stored under `file_id`.
    ///
    /// Wrong password or any other service-reported failure surfaces as
    /// `CryptshareError::Decryption` carrying the service's `detail`.
    async fn decrypt(&self, file_id: &str, password: &str) -> CryptshareResult<DecryptedPayload>;
}
