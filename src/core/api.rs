//! The normalized capability set every provider profile satisfies

use async_trait::async_trait;
use serde_json::Value;

use super::error::{ErrorHook, ProxyError};
use super::method::{Params, RpcMethod};

/// Three-valued receipt outcome. Block inclusion and transaction success are
/// independent facts; collapsing them into one bool loses the pending case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    /// The transaction hash is unknown to the backend.
    NotFound,
    /// Known but not yet mined: no block number assigned.
    Pending,
    /// Mined; the flag is the receipt's status field.
    Mined(bool),
}

/// Common surface of all provider backends. Callers depend on this trait
/// only; which backend answers is a construction-time choice.
///
/// Every fallible operation returns a [`ProxyError`] carrying the classified
/// kind and a human-readable message. If an advisory hook is registered via
/// [`error_handle`](Self::error_handle) it fires synchronously before the
/// `Err` is returned; registering none changes nothing about the return.
#[async_trait]
pub trait ProxyApi: Send + Sync {
    /// Configured network tag (`mainnet` or a named testnet). Never fails.
    fn network(&self) -> &str;

    /// Register the advisory error hook. A second registration replaces the
    /// first; at most one hook is ever active.
    fn error_handle(&self, hook: ErrorHook);

    /// Escape hatch: one backend call for an arbitrary logical method.
    /// Returns the envelope's `result` field verbatim.
    async fn send(&self, method: RpcMethod, params: Params) -> Result<Value, ProxyError>;

    /// Current gas price as a hex quantity.
    async fn gas_price(&self) -> Result<String, ProxyError>;

    /// Native-asset balance as a decimal display amount (wei / 10^18,
    /// trailing zeros trimmed).
    async fn bnb_balance(&self, address: &str) -> Result<String, ProxyError>;

    async fn receipt_status(&self, tx_hash: &str) -> Result<ReceiptStatus, ProxyError>;

    /// Raw receipt lookup. The shape is the backend's own and is not
    /// normalized further.
    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Value, ProxyError>;

    /// Raw transaction lookup; shape as the backend returns it.
    async fn transaction_by_hash(&self, tx_hash: &str) -> Result<Value, ProxyError>;

    /// Broadcast a signed raw transaction; returns the transaction hash.
    async fn send_raw_transaction(&self, raw: &str) -> Result<String, ProxyError>;

    /// Transaction count at the latest block.
    async fn nonce(&self, address: &str) -> Result<u64, ProxyError>;

    /// `eth_call` returning hex data. `from` is forwarded when given (some
    /// providers want it); `tag` defaults to `latest`.
    async fn eth_call(
        &self,
        to: &str,
        data: &str,
        from: Option<&str>,
        tag: Option<&str>,
    ) -> Result<String, ProxyError>;

    async fn block_number(&self) -> Result<u64, ProxyError>;

    /// Block lookup; the height travels as a `0x`-hex tag.
    async fn block_by_number(
        &self,
        height: u64,
        include_transactions: bool,
    ) -> Result<Value, ProxyError>;

    /// Transaction count of a block, as the hex quantity off the wire.
    async fn block_transaction_count(&self, height: u64) -> Result<String, ProxyError>;

    async fn transaction_by_block_and_index(
        &self,
        height: u64,
        index: u64,
    ) -> Result<Value, ProxyError>;

    /// Gas estimate; numeric fields are hex-encoded before transmission.
    async fn estimate_gas(
        &self,
        data: &str,
        to: &str,
        value: u64,
        gas: u64,
        gas_price: u64,
    ) -> Result<String, ProxyError>;

    /// Install a log filter; returns the filter id.
    async fn new_filter(
        &self,
        address: &str,
        from_block: Option<&str>,
        to_block: Option<&str>,
        topics: &[String],
    ) -> Result<String, ProxyError>;

    async fn new_block_filter(&self) -> Result<String, ProxyError>;

    async fn new_pending_transaction_filter(&self) -> Result<String, ProxyError>;

    /// Poll a filter for changes since the last poll.
    async fn filter_changes(&self, filter_id: &str) -> Result<Value, ProxyError>;

    /// Fetch logs; `block_hash` overrides the from/to range when given.
    async fn filter_logs(
        &self,
        from_block: Option<&str>,
        to_block: Option<&str>,
        address: Option<&str>,
        topics: &[String],
        block_hash: Option<&str>,
    ) -> Result<Value, ProxyError>;

    async fn uninstall_filter(&self, filter_id: &str) -> Result<bool, ProxyError>;
}
