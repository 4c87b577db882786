//! The one adapter type: a profile plus a transport
//!
//! Backend differences live entirely in [`Profile`]; the method list, hex
//! conversions, and receipt semantics below are identical for every backend.

use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::{
    decode_envelope, EnvelopeKind, ErrorHook, ErrorKind, Params, ProxyApi, ProxyError,
    ReceiptStatus, RpcMethod,
};
use crate::transport::{HttpTransport, Transport};
use crate::units;

use super::Profile;

/// Client for one configured backend. Construct once with static
/// credentials/network; stateless afterwards except the advisory hook slot.
pub struct ProxyClient<T = HttpTransport> {
    profile: Profile,
    transport: T,
    hook: RwLock<Option<ErrorHook>>,
}

impl ProxyClient<HttpTransport> {
    /// Generic JSON-RPC gateway with optional basic auth.
    pub fn node(
        gateway: impl Into<String>,
        auth: Option<(String, String)>,
        network: impl Into<String>,
    ) -> Self {
        Self::with_transport(Profile::node(gateway, auth, network), HttpTransport::new())
    }

    pub fn alchemy(api_key: &str, network: &str) -> Self {
        Self::with_transport(Profile::alchemy(api_key, network), HttpTransport::new())
    }

    pub fn infura(api_key: &str, network: &str) -> Self {
        Self::with_transport(Profile::infura(api_key, network), HttpTransport::new())
    }

    pub fn bscscan(api_key: impl Into<String>, network: impl Into<String>) -> Self {
        Self::with_transport(Profile::bscscan(api_key, network), HttpTransport::new())
    }

    pub fn etherscan(api_key: impl Into<String>, chain_id: u64) -> Self {
        Self::with_transport(Profile::etherscan(api_key, chain_id), HttpTransport::new())
    }
}

impl<T: Transport> ProxyClient<T> {
    /// Pair a profile with any transport. Tests drive this with a canned one.
    pub fn with_transport(profile: Profile, transport: T) -> Self {
        Self {
            profile,
            transport,
            hook: RwLock::new(None),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Classify, notify the hook if one is registered, and build the error.
    /// Every failure path funnels through here so the hook contract holds
    /// uniformly.
    fn fail(&self, kind: ErrorKind, message: String) -> ProxyError {
        tracing::warn!(kind = %kind, %message, "provider call failed");
        if let Ok(slot) = self.hook.read() {
            if let Some(hook) = slot.as_ref() {
                hook(kind, &message);
            }
        }
        ProxyError::new(kind, message)
    }

    async fn dispatch(&self, method: RpcMethod, params: Params) -> Result<Value, ProxyError> {
        let request = self.profile.build_request(method, &params);
        tracing::debug!(
            method = method.logical_name(),
            url = %request.url,
            "outbound provider request"
        );
        let payload = match self.transport.request(request).await {
            Ok(payload) => payload,
            Err(err) => {
                return Err(self.fail(ErrorKind::Unknown, format!("transport failure: {err}")))
            }
        };
        decode_envelope(self.profile.envelope(), &payload)
            .map_err(|(kind, message)| self.fail(kind, message))
    }

    fn expect_string(&self, method: RpcMethod, value: Value) -> Result<String, ProxyError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(self.fail(
                ErrorKind::Unknown,
                format!(
                    "{} returned a non-string result: {other}",
                    method.logical_name()
                ),
            )),
        }
    }

    fn expect_hex_u64(&self, method: RpcMethod, value: Value) -> Result<u64, ProxyError> {
        let hex = self.expect_string(method, value)?;
        units::parse_hex_u64(&hex).map_err(|err| {
            self.fail(
                ErrorKind::Unknown,
                format!("{}: {err}", method.logical_name()),
            )
        })
    }
}

#[async_trait]
impl<T: Transport> ProxyApi for ProxyClient<T> {
    fn network(&self) -> &str {
        self.profile.network()
    }

    fn error_handle(&self, hook: ErrorHook) {
        if let Ok(mut slot) = self.hook.write() {
            *slot = Some(hook);
        }
    }

    async fn send(&self, method: RpcMethod, params: Params) -> Result<Value, ProxyError> {
        self.dispatch(method, params).await
    }

    async fn gas_price(&self) -> Result<String, ProxyError> {
        let result = self.dispatch(RpcMethod::GasPrice, Params::new()).await?;
        self.expect_string(RpcMethod::GasPrice, result)
    }

    async fn bnb_balance(&self, address: &str) -> Result<String, ProxyError> {
        // Gateways answer eth_getBalance in hex wei; explorers answer the
        // account module in decimal wei. Both funnel through the same codec.
        let params = match self.profile.envelope() {
            EnvelopeKind::JsonRpc => Params::new().push("address", address).push("tag", "latest"),
            EnvelopeKind::Explorer => Params::new()
                .push("module", "account")
                .push("address", address),
        };
        let raw = self.dispatch(RpcMethod::Balance, params).await?;
        let raw = self.expect_string(RpcMethod::Balance, raw)?;
        units::wei_to_display(&raw, 18)
            .map_err(|err| self.fail(ErrorKind::Unknown, format!("balance {raw:?}: {err}")))
    }

    async fn receipt_status(&self, tx_hash: &str) -> Result<ReceiptStatus, ProxyError> {
        let tx = self
            .dispatch(
                RpcMethod::TransactionByHash,
                Params::new().push("txhash", tx_hash),
            )
            .await?;
        let Some(tx) = tx.as_object() else {
            return Ok(ReceiptStatus::NotFound);
        };
        let mined = matches!(tx.get("blockNumber"), Some(Value::String(s)) if !s.is_empty());
        if !mined {
            return Ok(ReceiptStatus::Pending);
        }

        match self.profile.envelope() {
            EnvelopeKind::JsonRpc => {
                let receipt = self
                    .dispatch(
                        RpcMethod::TransactionReceipt,
                        Params::new().push("txhash", tx_hash),
                    )
                    .await?;
                let flag = receipt
                    .get("status")
                    .and_then(Value::as_str)
                    .and_then(|s| units::parse_hex_u64(s).ok())
                    .ok_or_else(|| {
                        self.fail(
                            ErrorKind::Unknown,
                            format!("receipt for {tx_hash} has no status flag"),
                        )
                    })?;
                Ok(ReceiptStatus::Mined(flag != 0))
            }
            EnvelopeKind::Explorer => {
                let result = self
                    .dispatch(
                        RpcMethod::ReceiptStatus,
                        Params::new()
                            .push("module", "transaction")
                            .push("txhash", tx_hash),
                    )
                    .await?;
                let flag = result.get("status").and_then(Value::as_str).ok_or_else(|| {
                    self.fail(
                        ErrorKind::Unknown,
                        format!("receipt status for {tx_hash} has no status flag"),
                    )
                })?;
                Ok(ReceiptStatus::Mined(flag == "1"))
            }
        }
    }

    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Value, ProxyError> {
        self.dispatch(
            RpcMethod::TransactionReceipt,
            Params::new().push("txhash", tx_hash),
        )
        .await
    }

    async fn transaction_by_hash(&self, tx_hash: &str) -> Result<Value, ProxyError> {
        self.dispatch(
            RpcMethod::TransactionByHash,
            Params::new().push("txhash", tx_hash),
        )
        .await
    }

    async fn send_raw_transaction(&self, raw: &str) -> Result<String, ProxyError> {
        let result = self
            .dispatch(
                RpcMethod::SendRawTransaction,
                Params::new().push("hex", raw),
            )
            .await?;
        self.expect_string(RpcMethod::SendRawTransaction, result)
    }

    async fn nonce(&self, address: &str) -> Result<u64, ProxyError> {
        let result = self
            .dispatch(
                RpcMethod::Nonce,
                Params::new().push("address", address).push("tag", "latest"),
            )
            .await?;
        self.expect_hex_u64(RpcMethod::Nonce, result)
    }

    async fn eth_call(
        &self,
        to: &str,
        data: &str,
        from: Option<&str>,
        tag: Option<&str>,
    ) -> Result<String, ProxyError> {
        let mut params = Params::new();
        if let Some(from) = from {
            params = params.push("from", from);
        }
        params = params
            .push("to", to)
            .push("data", data)
            .push("tag", tag.unwrap_or("latest"));
        let result = self.dispatch(RpcMethod::Call, params).await?;
        self.expect_string(RpcMethod::Call, result)
    }

    async fn block_number(&self) -> Result<u64, ProxyError> {
        let result = self.dispatch(RpcMethod::BlockNumber, Params::new()).await?;
        self.expect_hex_u64(RpcMethod::BlockNumber, result)
    }

    async fn block_by_number(
        &self,
        height: u64,
        include_transactions: bool,
    ) -> Result<Value, ProxyError> {
        self.dispatch(
            RpcMethod::BlockByNumber,
            Params::new()
                .push("tag", units::to_hex(height))
                .push("boolean", include_transactions),
        )
        .await
    }

    async fn block_transaction_count(&self, height: u64) -> Result<String, ProxyError> {
        let result = self
            .dispatch(
                RpcMethod::BlockTransactionCount,
                Params::new().push("tag", units::to_hex(height)),
            )
            .await?;
        self.expect_string(RpcMethod::BlockTransactionCount, result)
    }

    async fn transaction_by_block_and_index(
        &self,
        height: u64,
        index: u64,
    ) -> Result<Value, ProxyError> {
        self.dispatch(
            RpcMethod::TransactionByBlockAndIndex,
            Params::new()
                .push("tag", units::to_hex(height))
                .push("index", units::to_hex(index)),
        )
        .await
    }

    async fn estimate_gas(
        &self,
        data: &str,
        to: &str,
        value: u64,
        gas: u64,
        gas_price: u64,
    ) -> Result<String, ProxyError> {
        let result = self
            .dispatch(
                RpcMethod::EstimateGas,
                Params::new()
                    .push("data", data)
                    .push("to", to)
                    .push("value", units::to_hex(value))
                    .push("gas", units::to_hex(gas))
                    .push("gasPrice", units::to_hex(gas_price)),
            )
            .await?;
        self.expect_string(RpcMethod::EstimateGas, result)
    }

    async fn new_filter(
        &self,
        address: &str,
        from_block: Option<&str>,
        to_block: Option<&str>,
        topics: &[String],
    ) -> Result<String, ProxyError> {
        let mut params = Params::new()
            .push("address", address)
            .push("fromBlock", from_block.unwrap_or("latest"))
            .push("toBlock", to_block.unwrap_or("latest"));
        if !topics.is_empty() {
            params = params.push("topics", json!(topics));
        }
        let result = self.dispatch(RpcMethod::NewFilter, params).await?;
        self.expect_string(RpcMethod::NewFilter, result)
    }

    async fn new_block_filter(&self) -> Result<String, ProxyError> {
        let result = self
            .dispatch(RpcMethod::NewBlockFilter, Params::new())
            .await?;
        self.expect_string(RpcMethod::NewBlockFilter, result)
    }

    async fn new_pending_transaction_filter(&self) -> Result<String, ProxyError> {
        let result = self
            .dispatch(RpcMethod::NewPendingTransactionFilter, Params::new())
            .await?;
        self.expect_string(RpcMethod::NewPendingTransactionFilter, result)
    }

    async fn filter_changes(&self, filter_id: &str) -> Result<Value, ProxyError> {
        self.dispatch(
            RpcMethod::FilterChanges,
            Params::new().push("filter_id", filter_id),
        )
        .await
    }

    async fn filter_logs(
        &self,
        from_block: Option<&str>,
        to_block: Option<&str>,
        address: Option<&str>,
        topics: &[String],
        block_hash: Option<&str>,
    ) -> Result<Value, ProxyError> {
        let mut params = Params::new();
        if let Some(hash) = block_hash {
            // A concrete block hash replaces the range entirely.
            params = params.push("blockHash", hash);
        } else {
            if let Some(from) = from_block {
                params = params.push("fromBlock", from);
            }
            if let Some(to) = to_block {
                params = params.push("toBlock", to);
            }
        }
        if let Some(address) = address {
            params = params.push("address", address);
        }
        if !topics.is_empty() {
            params = params.push("topics", json!(topics));
        }
        self.dispatch(RpcMethod::FilterLogs, params).await
    }

    async fn uninstall_filter(&self, filter_id: &str) -> Result<bool, ProxyError> {
        let result = self
            .dispatch(
                RpcMethod::UninstallFilter,
                Params::new().push("filter_id", filter_id),
            )
            .await?;
        result.as_bool().ok_or_else(|| {
            self.fail(
                ErrorKind::Unknown,
                format!("uninstall-filter returned a non-boolean result: {result}"),
            )
        })
    }
}
