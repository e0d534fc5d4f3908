#![allow(dead_code)] // each test binary uses a different subset of the fakes

//! In-memory fakes for the two remote capabilities.
//!
//! Both record call counts and append to a shared call log so tests can
//! assert not just *whether* a remote operation ran, but in what order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cryptshare_backend::EncryptionService;
use cryptshare_core::types::{
    DecryptedPayload, EncryptReceipt, FileMetadata, FileRecord, TxReceipt,
};
use cryptshare_core::{CryptshareError, CryptshareResult};
use cryptshare_ledger::LedgerRegistry;

pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn log_entries(log: &CallLog) -> Vec<&'static str> {
    log.lock().unwrap().clone()
}

pub struct StoredBlob {
    pub filename: String,
    pub password: String,
    pub bytes: Vec<u8>,
}

/// Fake backend: "encrypts" by remembering the plaintext keyed by a fixed
/// file ID, "decrypts" by checking the password and handing it back.
pub struct MockBackend {
    next_file_id: String,
    pub blobs: Mutex<HashMap<String, StoredBlob>>,
    pub encrypt_calls: AtomicUsize,
    pub decrypt_calls: AtomicUsize,
    /// When set, encrypt fails with this service detail.
    pub fail_encrypt: Option<String>,
    /// When true, decrypt responses carry no filename (missing
    /// Content-Disposition case).
    pub omit_filename: bool,
    log: CallLog,
}

impl MockBackend {
    pub fn new(next_file_id: &str, log: CallLog) -> Self {
        Self {
            next_file_id: next_file_id.to_string(),
            blobs: Mutex::new(HashMap::new()),
            encrypt_calls: AtomicUsize::new(0),
            decrypt_calls: AtomicUsize::new(0),
            fail_encrypt: None,
            omit_filename: false,
            log,
        }
    }
}

#[async_trait]
impl EncryptionService for MockBackend {
    async fn encrypt(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        password: &str,
    ) -> CryptshareResult<EncryptReceipt> {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push("encrypt");

        if let Some(detail) = &self.fail_encrypt {
            return Err(CryptshareError::Encryption(detail.clone()));
        }

        self.blobs.lock().unwrap().insert(
            self.next_file_id.clone(),
            StoredBlob {
                filename: filename.to_string(),
                password: password.to_string(),
                bytes,
            },
        );

        Ok(EncryptReceipt {
            file_id: self.next_file_id.clone(),
            salt: "s1".into(),
            uploadcare_file_id: "uc1".into(),
            num_chunks: 1,
            uploadcare_url: None,
            message: None,
        })
    }

    async fn decrypt(&self, file_id: &str, password: &str) -> CryptshareResult<DecryptedPayload> {
        self.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push("decrypt");

        let blobs = self.blobs.lock().unwrap();
        let blob = blobs
            .get(file_id)
            .ok_or_else(|| CryptshareError::Decryption("Metadata not found".into()))?;

        if blob.password != password {
            return Err(CryptshareError::Decryption("invalid password".into()));
        }

        Ok(DecryptedPayload {
            filename: if self.omit_filename {
                None
            } else {
                Some(blob.filename.clone())
            },
            bytes: blob.bytes.clone(),
        })
    }
}

/// Fake ledger: a HashMap of committed records.
pub struct MockLedger {
    pub records: Mutex<HashMap<String, FileMetadata>>,
    pub register_calls: AtomicUsize,
    pub lookup_calls: AtomicUsize,
    /// When set, register_file fails with this detail.
    pub fail_register: Option<String>,
    log: CallLog,
}

impl MockLedger {
    pub fn new(log: CallLog) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            register_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
            fail_register: None,
            log,
        }
    }
}

#[async_trait]
impl LedgerRegistry for MockLedger {
    async fn register_file(&self, record: &FileRecord) -> CryptshareResult<TxReceipt> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push("register");

        if let Some(detail) = &self.fail_register {
            return Err(CryptshareError::Transport(detail.clone()));
        }

        self.records.lock().unwrap().insert(
            record.file_id.clone(),
            FileMetadata {
                file_id: record.file_id.clone(),
                owner: "0xmockowner".into(),
                original_filename: record.original_filename.clone(),
                salt: record.salt.clone(),
                uploadcare_file_id: record.uploadcare_file_id.clone(),
                num_chunks: record.num_chunks,
                timestamp: 1_700_000_000,
            },
        );

        Ok(TxReceipt {
            transaction_hash: "0xtx1".into(),
            block_number: 1,
        })
    }

    async fn lookup_file(&self, file_id: &str) -> CryptshareResult<Option<FileMetadata>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push("lookup");
        Ok(self.records.lock().unwrap().get(file_id).cloned())
    }

    async fn user_files(&self) -> CryptshareResult<Vec<String>> {
        Ok(self.records.lock().unwrap().keys().cloned().collect())
    }
}
