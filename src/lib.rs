//! One client surface over EVM data providers.
//!
//! A [`ProxyClient`] pairs a provider [`Profile`] (where requests go, how the
//! credential rides along, which response envelope comes back) with a
//! [`Transport`] (the HTTP collaborator). Callers talk to the [`ProxyApi`]
//! trait and never see backend-specific shapes: every call returns a
//! normalized result or a classified [`ProxyError`].
//!
//! Supported backends: any JSON-RPC gateway (plus Alchemy and Infura, which
//! are gateways with a path-embedded key) and the BscScan/Etherscan explorer
//! REST proxies.

pub mod config;
pub mod core;
pub mod providers;
pub mod transport;
pub mod units;

pub use crate::core::{
    decode_envelope, EnvelopeKind, ErrorHook, ErrorKind, Params, ProxyApi, ProxyError,
    ReceiptStatus, RpcMethod,
};
pub use crate::providers::{Profile, ProxyClient};
pub use crate::transport::{HttpRequest, HttpTransport, Transport, TransportError};
