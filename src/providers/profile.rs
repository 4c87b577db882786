//! Provider profiles: URL template, credential placement, envelope kind
//!
//! A profile is the whole difference between backends. Request building is
//! pure so the exact outbound shape is testable without a transport.

use serde_json::{json, Value};
use url::form_urlencoded;

use crate::core::{EnvelopeKind, Params, RpcMethod};
use crate::transport::{HttpMethod, HttpRequest};

/// Explorer query defaults, filled only when the caller has not supplied the
/// key itself.
const EXPLORER_DEFAULTS: [(&str, &str); 2] = [("module", "proxy"), ("tag", "latest")];

#[derive(Debug, Clone)]
enum Backend {
    Node {
        gateway: String,
        auth: Option<(String, String)>,
    },
    BscScan {
        api_key: String,
    },
    Etherscan {
        api_key: String,
        chain_id: u64,
    },
}

/// One backend's wiring: where requests go, how the credential rides along,
/// and which envelope the response uses.
#[derive(Debug, Clone)]
pub struct Profile {
    backend: Backend,
    network: String,
}

impl Profile {
    /// Generic JSON-RPC gateway with optional HTTP basic auth.
    pub fn node(
        gateway: impl Into<String>,
        auth: Option<(String, String)>,
        network: impl Into<String>,
    ) -> Self {
        Self {
            backend: Backend::Node {
                gateway: gateway.into(),
                auth,
            },
            network: network.into(),
        }
    }

    /// Alchemy BNB gateway; the key is path-embedded.
    pub fn alchemy(api_key: &str, network: &str) -> Self {
        let gateway = format!("https://bnb-{network}.g.alchemy.com/v2/{api_key}");
        Self::node(gateway, None, network)
    }

    /// Infura BSC gateway; the key is path-embedded.
    pub fn infura(api_key: &str, network: &str) -> Self {
        let gateway = format!("https://bsc-{network}.infura.io/v3/{api_key}");
        Self::node(gateway, None, network)
    }

    /// BscScan explorer. Testnets move to an `api-<network>` host; the key
    /// travels in the query string.
    pub fn bscscan(api_key: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            backend: Backend::BscScan {
                api_key: api_key.into(),
            },
            network: network.into(),
        }
    }

    /// Etherscan v2 explorer; the chain is selected by a `chainid` query
    /// parameter instead of a network tag.
    pub fn etherscan(api_key: impl Into<String>, chain_id: u64) -> Self {
        Self {
            backend: Backend::Etherscan {
                api_key: api_key.into(),
                chain_id,
            },
            network: "mainnet".into(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn envelope(&self) -> EnvelopeKind {
        match self.backend {
            Backend::Node { .. } => EnvelopeKind::JsonRpc,
            Backend::BscScan { .. } | Backend::Etherscan { .. } => EnvelopeKind::Explorer,
        }
    }

    /// Build the one outbound HTTP request for a logical call.
    pub fn build_request(&self, method: RpcMethod, params: &Params) -> HttpRequest {
        match &self.backend {
            Backend::Node { gateway, auth } => {
                let body = json!({
                    "jsonrpc": "2.0",
                    "method": method.rpc_name(),
                    "params": params.positional(),
                    "id": 1,
                });
                HttpRequest {
                    method: HttpMethod::Post,
                    url: gateway.clone(),
                    headers: vec![("Content-Type".into(), "application/json".into())],
                    body: Some(body.to_string()),
                    basic_auth: auth.clone(),
                }
            }
            Backend::BscScan { api_key } => {
                let host = if self.network == "mainnet" {
                    "https://api.bscscan.com/api".to_string()
                } else {
                    format!("https://api-{}.bscscan.com/api", self.network)
                };
                explorer_request(&host, None, api_key, method, params)
            }
            Backend::Etherscan { api_key, chain_id } => explorer_request(
                "https://api.etherscan.io/v2/api",
                Some(*chain_id),
                api_key,
                method,
                params,
            ),
        }
    }
}

fn explorer_request(
    base: &str,
    chain_id: Option<u64>,
    api_key: &str,
    method: RpcMethod,
    params: &Params,
) -> HttpRequest {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(id) = chain_id {
        query.append_pair("chainid", &id.to_string());
    }
    query.append_pair("action", method.action_name());
    query.append_pair("apikey", api_key);
    for (name, value) in EXPLORER_DEFAULTS {
        if !params.contains(name) {
            query.append_pair(name, value);
        }
    }
    for (name, value) in params.pairs() {
        query.append_pair(name, &query_value(value));
    }

    HttpRequest {
        method: HttpMethod::Get,
        url: format!("{base}?{}", query.finish()),
        headers: Vec::new(),
        body: None,
        basic_auth: None,
    }
}

/// Query-string rendering of a parameter value. Strings go bare; anything
/// structured falls back to its JSON text.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Params;

    #[test]
    fn test_node_request_shape() {
        let profile = Profile::node("http://localhost:8545", None, "mainnet");
        let params = Params::new().push("tag", "0x2a").push("boolean", true);
        let request = profile.build_request(RpcMethod::BlockByNumber, &params);

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://localhost:8545");
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "eth_getBlockByNumber");
        assert_eq!(body["params"], json!(["0x2a", true]));
        assert_eq!(body["id"], 1);
    }

    #[test]
    fn test_node_basic_auth() {
        let auth = Some(("rpcuser".to_string(), "secret".to_string()));
        let profile = Profile::node("http://localhost:8545", auth, "mainnet");
        let request = profile.build_request(RpcMethod::GasPrice, &Params::new());
        assert_eq!(
            request.basic_auth,
            Some(("rpcuser".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_alchemy_and_infura_gateways() {
        let profile = Profile::alchemy("KEY", "mainnet");
        let request = profile.build_request(RpcMethod::GasPrice, &Params::new());
        assert_eq!(request.url, "https://bnb-mainnet.g.alchemy.com/v2/KEY");
        assert_eq!(profile.envelope(), EnvelopeKind::JsonRpc);

        let profile = Profile::infura("KEY", "testnet");
        let request = profile.build_request(RpcMethod::GasPrice, &Params::new());
        assert_eq!(request.url, "https://bsc-testnet.infura.io/v3/KEY");
    }

    #[test]
    fn test_bscscan_defaults_fill_absent_keys() {
        let profile = Profile::bscscan("KEY", "mainnet");
        let request = profile.build_request(RpcMethod::GasPrice, &Params::new());
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.url.starts_with("https://api.bscscan.com/api?"));
        assert!(request.url.contains("action=eth_gasPrice"));
        assert!(request.url.contains("apikey=KEY"));
        assert!(request.url.contains("module=proxy"));
        assert!(request.url.contains("tag=latest"));
    }

    #[test]
    fn test_bscscan_defaults_do_not_override() {
        let profile = Profile::bscscan("KEY", "mainnet");
        let params = Params::new().push("module", "account").push("address", "0xabc");
        let request = profile.build_request(RpcMethod::Balance, &params);
        assert!(request.url.contains("action=balance"));
        assert!(request.url.contains("module=account"));
        assert!(!request.url.contains("module=proxy"));
        // tag was not supplied, so the default still lands
        assert!(request.url.contains("tag=latest"));
    }

    #[test]
    fn test_bscscan_testnet_host_prefix() {
        let profile = Profile::bscscan("KEY", "testnet");
        let request = profile.build_request(RpcMethod::BlockNumber, &Params::new());
        assert!(request.url.starts_with("https://api-testnet.bscscan.com/api?"));
    }

    #[test]
    fn test_etherscan_chain_id_selection() {
        let profile = Profile::etherscan("KEY", 56);
        let request = profile.build_request(RpcMethod::BlockNumber, &Params::new());
        assert!(request.url.starts_with("https://api.etherscan.io/v2/api?"));
        assert!(request.url.contains("chainid=56"));
        assert_eq!(profile.network(), "mainnet");
        assert_eq!(profile.envelope(), EnvelopeKind::Explorer);
    }

    #[test]
    fn test_block_height_travels_as_hex() {
        let params = Params::new().push("tag", crate::units::to_hex(42));
        for profile in [
            Profile::node("http://localhost:8545", None, "mainnet"),
            Profile::bscscan("KEY", "mainnet"),
            Profile::etherscan("KEY", 1),
        ] {
            let request = profile.build_request(RpcMethod::BlockTransactionCount, &params);
            let sent = request.body.unwrap_or(request.url);
            assert!(sent.contains("0x2a"), "missing hex tag in {sent}");
        }
    }
}
