//! Retrieval orchestration: ledger lookup gate, backend decrypt, local save.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use cryptshare_backend::EncryptionService;
use cryptshare_core::{CryptshareError, CryptshareResult};
use cryptshare_ledger::LedgerRegistry;

use crate::validate::validate_decrypt;
use crate::{report, ProgressFn};

/// Save name used when the backend provides no usable filename.
pub const FALLBACK_FILENAME: &str = "decrypted-file";

/// A decrypted file materialized on local disk.
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    pub path: PathBuf,
    /// Restored display name (sanitized header filename or the fallback).
    pub filename: String,
    pub bytes: u64,
}

/// Look up `file_id` on the ledger, decrypt it via the backend, and write the
/// plaintext under its restored filename inside `dest_dir`.
///
/// The lookup is an existence gate: a `file_id` the ledger does not know
/// fails with `FileNotFound` before any backend round trip. The write goes
/// through a temp file and an atomic rename; the temp file is removed on
/// every failure path.
pub async fn decrypt_and_download(
    ledger: Option<&dyn LedgerRegistry>,
    backend: &dyn EncryptionService,
    file_id: &str,
    password: &str,
    dest_dir: &Path,
    progress: Option<&ProgressFn>,
) -> CryptshareResult<DownloadedArtifact> {
    validate_decrypt(file_id, password)?;

    let Some(ledger) = ledger else {
        return Err(CryptshareError::CapabilityUnavailable(
            "no registry account connected".into(),
        ));
    };

    report(progress, "looking up ledger record");

    let meta = ledger
        .lookup_file(file_id)
        .await?
        .ok_or_else(|| CryptshareError::FileNotFound(file_id.to_string()))?;

    debug!(
        file_id = %file_id,
        owner = %meta.owner,
        registered_as = %meta.original_filename,
        "ledger record found"
    );

    report(progress, "decrypting");

    let payload = match backend.decrypt(file_id, password).await {
        Ok(payload) => payload,
        Err(CryptshareError::Decryption(detail)) => {
            return Err(CryptshareError::Decryption(detail))
        }
        Err(other) => return Err(CryptshareError::Decryption(other.to_string())),
    };

    let filename = payload
        .filename
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string());

    // Atomic write: temp sibling then rename
    tokio::fs::create_dir_all(dest_dir).await?;
    let dest = dest_dir.join(&filename);
    let tmp = dest.with_extension("cryptshare_tmp");

    if let Err(e) = tokio::fs::write(&tmp, &payload.bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&tmp, &dest).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    info!(
        file_id = %file_id,
        path = %dest.display(),
        bytes = payload.bytes.len(),
        "decrypted file saved"
    );

    Ok(DownloadedArtifact {
        path: dest,
        filename,
        bytes: payload.bytes.len() as u64,
    })
}
