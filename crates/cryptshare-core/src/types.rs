use serde::{Deserialize, Serialize};

/// Arguments of the ledger's committing call: everything the client knows
/// about a file at registration time.
///
/// `salt`, `uploadcare_file_id`, and `num_chunks` are opaque to the client
/// beyond passthrough — the backend needs them to reverse the encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file_id: String,
    pub original_filename: String,
    pub salt: String,
    pub uploadcare_file_id: String,
    pub num_chunks: u64,
}

/// A ledger metadata record as returned by `registry_getFile`.
///
/// Valid (lookupable and decryptable) only once both legs exist: the
/// encrypted blob in backend storage and the confirmed registration on the
/// ledger. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_id: String,
    /// Account that registered the file; set at registration, immutable.
    pub owner: String,
    pub original_filename: String,
    pub salt: String,
    pub uploadcare_file_id: String,
    pub num_chunks: u64,
    /// Registration time, set once by the ledger.
    pub timestamp: u64,
}

impl FileMetadata {
    pub fn record(&self) -> FileRecord {
        FileRecord {
            file_id: self.file_id.clone(),
            original_filename: self.original_filename.clone(),
            salt: self.salt.clone(),
            uploadcare_file_id: self.uploadcare_file_id.clone(),
            num_chunks: self.num_chunks,
        }
    }
}

/// Success payload of the backend's `POST /encrypt/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptReceipt {
    pub file_id: String,
    pub salt: String,
    pub uploadcare_file_id: String,
    pub num_chunks: u64,
    /// CDN URL of the stored blob — informational passthrough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploadcare_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EncryptReceipt {
    /// Attach the original filename to form the ledger registration record.
    pub fn into_record(self, original_filename: &str) -> FileRecord {
        FileRecord {
            file_id: self.file_id,
            original_filename: original_filename.to_string(),
            salt: self.salt,
            uploadcare_file_id: self.uploadcare_file_id,
            num_chunks: self.num_chunks,
        }
    }
}

/// Success payload of the backend's `POST /decrypt/`: the plaintext bytes
/// plus whatever filename the `Content-Disposition` header carried.
#[derive(Debug, Clone)]
pub struct DecryptedPayload {
    /// Filename parsed from the response header, if any. A display/save
    /// label only — never trusted as a path.
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// Confirmation of a committed ledger registration transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
}
