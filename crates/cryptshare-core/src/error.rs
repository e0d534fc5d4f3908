use thiserror::Error;

pub type CryptshareResult<T> = Result<T, CryptshareError>;

/// Pre-flight input validation failures.
///
/// These are local and never cause partial state: no network call has been
/// issued when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("file is {size} bytes, which exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("no file ID provided")]
    NoFileId,

    #[error("no password provided")]
    NoPasswordProvided,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// The full failure taxonomy of a cryptshare operation.
///
/// Remote failures are converted into exactly one of these variants at the
/// orchestrator boundary; nothing propagates past it and nothing is retried.
#[derive(Debug, Error)]
pub enum CryptshareError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The second phase of the upload failed after the backend already stored
    /// the encrypted blob. `file_id` names the orphan: present in backend
    /// storage, absent from the ledger. The client never reconciles it.
    #[error("ledger registration failed for file {file_id}: {detail}")]
    Registration { file_id: String, detail: String },

    #[error("no ledger record for file ID: {0}")]
    FileNotFound(String),

    #[error("ledger capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_names_the_orphan() {
        let err = CryptshareError::Registration {
            file_id: "abc123".into(),
            detail: "transaction rejected".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("transaction rejected"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: CryptshareError = ValidationError::NoPasswordProvided.into();
        assert!(matches!(
            err,
            CryptshareError::Validation(ValidationError::NoPasswordProvided)
        ));
    }
}
