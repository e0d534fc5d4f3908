//! JSON-RPC 2.0 transport for the registry node.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use cryptshare_core::types::{FileMetadata, FileRecord, TxReceipt};
use cryptshare_core::{CryptshareError, CryptshareResult};

use crate::LedgerRegistry;

/// RPC error code the registry node uses for a missing record.
const CODE_NOT_FOUND: i64 = -32004;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// A registry call failure, split so callers can treat not-found specially.
#[derive(Debug)]
enum CallError {
    NotFound,
    Rpc { code: i64, message: String },
    Transport(String),
}

impl CallError {
    fn into_message(self, method: &str) -> String {
        match self {
            CallError::NotFound => format!("{method}: not found"),
            CallError::Rpc { code, message } => format!("{method}: {message} (code {code})"),
            CallError::Transport(msg) => format!("{method}: {msg}"),
        }
    }
}

/// `LedgerRegistry` implementation over a registry node's JSON-RPC endpoint.
///
/// Holds the account granted at connect time; the account is the transaction
/// sender for committing calls and the subject of enumeration calls.
#[derive(Debug)]
pub struct JsonRpcLedger {
    rpc_url: String,
    contract_address: String,
    account: String,
    client: Client,
    next_id: AtomicU64,
}

impl JsonRpcLedger {
    /// Acquire the ledger capability: ask the node for an account and bind
    /// the client to it. Fails with `CapabilityUnavailable` when the node is
    /// unreachable or grants no account.
    pub async fn connect(rpc_url: &str, contract_address: &str) -> CryptshareResult<Self> {
        let ledger = Self {
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            contract_address: contract_address.to_string(),
            account: String::new(),
            client: Client::new(),
            next_id: AtomicU64::new(1),
        };

        let accounts: Vec<String> = ledger
            .call("registry_requestAccounts", json!([]))
            .await
            .map_err(|e| {
                CryptshareError::CapabilityUnavailable(e.into_message("registry_requestAccounts"))
            })?;

        let account = accounts.into_iter().next().ok_or_else(|| {
            CryptshareError::CapabilityUnavailable("registry node granted no account".into())
        })?;

        info!(account = %account, rpc_url = %ledger.rpc_url, "ledger capability acquired");

        Ok(Self { account, ..ledger })
    }

    /// The account this capability is bound to.
    pub fn account(&self) -> &str {
        &self.account
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, CallError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!(method = %method, id = request.id, "registry RPC");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CallError::Transport(format!("POST {}: {e}", self.rpc_url)))?;

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| CallError::Transport(format!("decoding RPC response: {e}")))?;

        if let Some(err) = body.error {
            if err.code == CODE_NOT_FOUND {
                return Err(CallError::NotFound);
            }
            warn!(method = %method, code = err.code, message = %err.message, "registry RPC error");
            return Err(CallError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        body.result
            .ok_or_else(|| CallError::Transport("RPC response had neither result nor error".into()))
    }
}

#[async_trait]
impl LedgerRegistry for JsonRpcLedger {
    async fn register_file(&self, record: &FileRecord) -> CryptshareResult<TxReceipt> {
        let receipt: TxReceipt = self
            .call(
                "registry_addFile",
                json!([self.contract_address, self.account, record]),
            )
            .await
            .map_err(|e| CryptshareError::Transport(e.into_message("registry_addFile")))?;

        info!(
            file_id = %record.file_id,
            tx = %receipt.transaction_hash,
            block = receipt.block_number,
            "registration confirmed"
        );

        Ok(receipt)
    }

    async fn lookup_file(&self, file_id: &str) -> CryptshareResult<Option<FileMetadata>> {
        match self
            .call::<FileMetadata>("registry_getFile", json!([self.contract_address, file_id]))
            .await
        {
            Ok(meta) => Ok(Some(meta)),
            Err(CallError::NotFound) => Ok(None),
            Err(e) => Err(CryptshareError::Transport(
                e.into_message("registry_getFile"),
            )),
        }
    }

    async fn user_files(&self) -> CryptshareResult<Vec<String>> {
        self.call(
            "registry_getUserFiles",
            json!([self.contract_address, self.account]),
        )
        .await
        .map_err(|e| CryptshareError::Transport(e.into_message("registry_getUserFiles")))
    }
}
