//! cryptshare-engine: the encrypt/decrypt orchestration core
//!
//! Drives two workflows across the backend encryption service and the ledger
//! registry, both injected as capability references:
//!   - `upload`: validate → encrypt (backend) → register (ledger), an
//!     explicit two-phase sequence whose intermediate state is observable
//!   - `retrieve`: ledger lookup gate → decrypt (backend) → atomic local
//!     materialization under the restored filename
//!
//! Nothing here retries: every failure surfaces as one taxonomy variant and
//! control returns to the caller.

pub mod retrieve;
pub mod upload;
pub mod validate;

pub use retrieve::{decrypt_and_download, DownloadedArtifact, FALLBACK_FILENAME};
pub use upload::{FailurePoint, Upload, UploadPhase, UploadReport};
pub use validate::{password_strength, validate_decrypt, validate_encrypt, PasswordStrength};

/// Progress callback: invoked with a phase label at each suspension point.
pub type ProgressFn = Box<dyn Fn(&str) + Send + Sync>;

fn report(progress: Option<&ProgressFn>, label: &str) {
    if let Some(cb) = progress {
        cb(label);
    }
}
