//! cryptshare-ledger: client for the on-chain file metadata registry
//!
//! The registry is reached through a node speaking JSON-RPC 2.0; the contract
//! runtime behind it is opaque. Three operations exist:
//!   - `registry_addFile`      committing call, confirms the transaction
//!   - `registry_getFile`      read call, not-found is RPC error -32004
//!   - `registry_getUserFiles` enumeration of the caller's files
//!
//! The capability is acquired once at connect time: the node is asked for an
//! account (`registry_requestAccounts`), and without one every registry
//! operation is impossible — callers see `CapabilityUnavailable`.

pub mod rpc;

pub use rpc::JsonRpcLedger;

use async_trait::async_trait;
use cryptshare_core::types::{FileMetadata, FileRecord, TxReceipt};
use cryptshare_core::CryptshareResult;

/// Capability to call the metadata registry.
///
/// Obtained once and reused across operations; never mutated.
#[async_trait]
pub trait LedgerRegistry: Send + Sync {
    /// Commit a file record to the ledger. Returns only after the
    /// registration transaction is confirmed.
    async fn register_file(&self, record: &FileRecord) -> CryptshareResult<TxReceipt>;

    /// Read a file's metadata record. `Ok(None)` when the ledger holds no
    /// record for `file_id`.
    async fn lookup_file(&self, file_id: &str) -> CryptshareResult<Option<FileMetadata>>;

    /// Enumerate the file IDs registered by the connected account.
    async fn user_files(&self) -> CryptshareResult<Vec<String>>;
}
