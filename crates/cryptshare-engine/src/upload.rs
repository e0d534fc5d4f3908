//! Upload orchestration: encrypt on the backend, then register on the ledger.
//!
//! The two legs form a two-phase commit with no rollback: once the backend
//! has stored the encrypted blob, a failed registration leaves that blob
//! orphaned (present in storage, absent from the ledger). The orphan is
//! reported — the error carries its `file_id` — and never reconciled here.

use tracing::{debug, info, warn};

use cryptshare_backend::EncryptionService;
use cryptshare_core::types::TxReceipt;
use cryptshare_core::{CryptshareError, CryptshareResult};
use cryptshare_ledger::LedgerRegistry;

use crate::validate::validate_encrypt;
use crate::{report, ProgressFn};

/// Where an upload gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    /// Local validation rejected the input; nothing was sent anywhere.
    Validation,
    /// No ledger capability; nothing was sent anywhere.
    Capability,
    /// The backend refused or the transport failed; no blob was stored.
    Encrypt,
    /// The ledger refused after the blob was stored: the orphan case.
    Register,
}

/// Progress of the two-phase upload sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    NotStarted,
    /// Blob stored by the backend, ledger record not yet committed. A
    /// `file_id` in this phase is not retrievable system state.
    Encrypted,
    /// Both legs committed; the `file_id` is now retrievable.
    Registered,
    Failed(FailurePoint),
}

/// Outcome of a fully committed upload.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub file_id: String,
    pub uploadcare_file_id: String,
    pub num_chunks: u64,
    pub tx: TxReceipt,
}

/// A single upload operation. Create one per attempt; the phase it reached
/// stays observable after `run` returns.
pub struct Upload<'a> {
    backend: &'a dyn EncryptionService,
    ledger: Option<&'a dyn LedgerRegistry>,
    phase: UploadPhase,
}

impl<'a> Upload<'a> {
    pub fn new(
        backend: &'a dyn EncryptionService,
        ledger: Option<&'a dyn LedgerRegistry>,
    ) -> Self {
        Self {
            backend,
            ledger,
            phase: UploadPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Run the full sequence: validate, encrypt, register.
    ///
    /// Registration is never attempted before the backend has confirmed the
    /// encrypt leg. On a registration failure the returned error names the
    /// orphaned `file_id` and `phase()` reads `Failed(Register)`.
    pub async fn run(
        &mut self,
        filename: &str,
        bytes: Vec<u8>,
        password: &str,
        progress: Option<&ProgressFn>,
    ) -> CryptshareResult<UploadReport> {
        if let Err(e) = validate_encrypt(Some((filename, bytes.len() as u64)), password) {
            self.phase = UploadPhase::Failed(FailurePoint::Validation);
            return Err(e.into());
        }

        let Some(ledger) = self.ledger else {
            self.phase = UploadPhase::Failed(FailurePoint::Capability);
            return Err(CryptshareError::CapabilityUnavailable(
                "no registry account connected".into(),
            ));
        };

        report(progress, "encrypting");
        debug!(file = %filename, bytes = bytes.len(), "starting encrypt leg");

        let receipt = match self.backend.encrypt(filename, bytes, password).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.phase = UploadPhase::Failed(FailurePoint::Encrypt);
                return Err(match e {
                    CryptshareError::Encryption(detail) => CryptshareError::Encryption(detail),
                    other => CryptshareError::Encryption(other.to_string()),
                });
            }
        };

        self.phase = UploadPhase::Encrypted;
        let file_id = receipt.file_id.clone();
        let record = receipt.into_record(filename);

        report(progress, "registering on ledger");

        match ledger.register_file(&record).await {
            Ok(tx) => {
                self.phase = UploadPhase::Registered;
                info!(file_id = %file_id, tx = %tx.transaction_hash, "upload committed");
                Ok(UploadReport {
                    file_id,
                    uploadcare_file_id: record.uploadcare_file_id,
                    num_chunks: record.num_chunks,
                    tx,
                })
            }
            Err(e) => {
                self.phase = UploadPhase::Failed(FailurePoint::Register);
                warn!(
                    file_id = %file_id,
                    "registration failed after encrypt: blob is orphaned in backend storage"
                );
                Err(CryptshareError::Registration {
                    file_id,
                    detail: e.to_string(),
                })
            }
        }
    }
}
