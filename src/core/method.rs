//! Logical method names and named-parameter lists

use serde_json::Value;

/// The fixed set of logical operations every provider profile understands.
///
/// Profiles translate a method to their own wire vocabulary: JSON-RPC
/// gateways use [`rpc_name`](Self::rpc_name), explorer proxies use
/// [`action_name`](Self::action_name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    GasPrice,
    Balance,
    Nonce,
    SendRawTransaction,
    Call,
    BlockNumber,
    BlockByNumber,
    BlockTransactionCount,
    TransactionByHash,
    TransactionReceipt,
    ReceiptStatus,
    TransactionByBlockAndIndex,
    EstimateGas,
    NewFilter,
    NewBlockFilter,
    NewPendingTransactionFilter,
    FilterChanges,
    FilterLogs,
    UninstallFilter,
}

impl RpcMethod {
    /// JSON-RPC wire name for node-style gateways.
    pub fn rpc_name(self) -> &'static str {
        match self {
            RpcMethod::GasPrice => "eth_gasPrice",
            RpcMethod::Balance => "eth_getBalance",
            RpcMethod::Nonce => "eth_getTransactionCount",
            RpcMethod::SendRawTransaction => "eth_sendRawTransaction",
            RpcMethod::Call => "eth_call",
            RpcMethod::BlockNumber => "eth_blockNumber",
            RpcMethod::BlockByNumber => "eth_getBlockByNumber",
            RpcMethod::BlockTransactionCount => "eth_getBlockTransactionCountByNumber",
            RpcMethod::TransactionByHash => "eth_getTransactionByHash",
            // A receipt-status probe on a bare gateway reads the receipt itself.
            RpcMethod::TransactionReceipt | RpcMethod::ReceiptStatus => {
                "eth_getTransactionReceipt"
            }
            RpcMethod::TransactionByBlockAndIndex => "eth_getTransactionByBlockNumberAndIndex",
            RpcMethod::EstimateGas => "eth_estimateGas",
            RpcMethod::NewFilter => "eth_newFilter",
            RpcMethod::NewBlockFilter => "eth_newBlockFilter",
            RpcMethod::NewPendingTransactionFilter => "eth_newPendingTransactionFilter",
            RpcMethod::FilterChanges => "eth_getFilterChanges",
            RpcMethod::FilterLogs => "eth_getFilterLogs",
            RpcMethod::UninstallFilter => "eth_uninstallFilter",
        }
    }

    /// `action` value for explorer-style endpoints. Mostly the JSON-RPC name
    /// passed through `module=proxy`; balance and receipt status have
    /// explorer-native actions under other modules.
    pub fn action_name(self) -> &'static str {
        match self {
            RpcMethod::Balance => "balance",
            RpcMethod::ReceiptStatus => "gettxreceiptstatus",
            other => other.rpc_name(),
        }
    }

    /// Backend-independent name, used by the CLI and in log events.
    pub fn logical_name(self) -> &'static str {
        match self {
            RpcMethod::GasPrice => "gas-price",
            RpcMethod::Balance => "balance",
            RpcMethod::Nonce => "nonce",
            RpcMethod::SendRawTransaction => "send-raw-transaction",
            RpcMethod::Call => "call",
            RpcMethod::BlockNumber => "block-number",
            RpcMethod::BlockByNumber => "block-by-number",
            RpcMethod::BlockTransactionCount => "block-transaction-count",
            RpcMethod::TransactionByHash => "transaction-by-hash",
            RpcMethod::TransactionReceipt => "transaction-receipt",
            RpcMethod::ReceiptStatus => "receipt-status",
            RpcMethod::TransactionByBlockAndIndex => "transaction-by-block-and-index",
            RpcMethod::EstimateGas => "estimate-gas",
            RpcMethod::NewFilter => "new-filter",
            RpcMethod::NewBlockFilter => "new-block-filter",
            RpcMethod::NewPendingTransactionFilter => "new-pending-transaction-filter",
            RpcMethod::FilterChanges => "filter-changes",
            RpcMethod::FilterLogs => "filter-logs",
            RpcMethod::UninstallFilter => "uninstall-filter",
        }
    }

    /// Parse a logical name. `None` means the method is not part of the
    /// recognized set and must not be sent anywhere.
    pub fn from_logical(name: &str) -> Option<Self> {
        const ALL: [RpcMethod; 19] = [
            RpcMethod::GasPrice,
            RpcMethod::Balance,
            RpcMethod::Nonce,
            RpcMethod::SendRawTransaction,
            RpcMethod::Call,
            RpcMethod::BlockNumber,
            RpcMethod::BlockByNumber,
            RpcMethod::BlockTransactionCount,
            RpcMethod::TransactionByHash,
            RpcMethod::TransactionReceipt,
            RpcMethod::ReceiptStatus,
            RpcMethod::TransactionByBlockAndIndex,
            RpcMethod::EstimateGas,
            RpcMethod::NewFilter,
            RpcMethod::NewBlockFilter,
            RpcMethod::NewPendingTransactionFilter,
            RpcMethod::FilterChanges,
            RpcMethod::FilterLogs,
            RpcMethod::UninstallFilter,
        ];
        ALL.into_iter().find(|method| method.logical_name() == name)
    }
}

/// Named parameters with stable insertion order.
///
/// JSON-RPC profiles transmit only the values, positionally, in the order
/// they were pushed; explorer profiles transmit `name=value` query pairs.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, Value)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one named parameter.
    pub fn push(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values only, in insertion order, for a JSON-RPC `params` array.
    pub fn positional(&self) -> Vec<Value> {
        self.0.iter().map(|(_, value)| value.clone()).collect()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_names_round_trip() {
        for name in ["gas-price", "balance", "receipt-status", "uninstall-filter"] {
            let method = RpcMethod::from_logical(name).unwrap();
            assert_eq!(method.logical_name(), name);
        }
        assert_eq!(RpcMethod::from_logical("eth_gasPrice"), None);
    }

    #[test]
    fn test_explorer_actions() {
        assert_eq!(RpcMethod::Balance.action_name(), "balance");
        assert_eq!(RpcMethod::ReceiptStatus.action_name(), "gettxreceiptstatus");
        assert_eq!(RpcMethod::GasPrice.action_name(), "eth_gasPrice");
    }

    #[test]
    fn test_positional_preserves_order() {
        let params = Params::new()
            .push("tag", "0x2a")
            .push("boolean", true);
        assert_eq!(
            params.positional(),
            vec![Value::from("0x2a"), Value::from(true)]
        );
        assert!(params.contains("tag"));
        assert!(!params.contains("module"));
    }
}
