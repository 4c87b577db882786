//! Provider-agnostic request/response model
//!
//! Everything here is backend-independent: the logical method set, ordered
//! named parameters, the error taxonomy with its classifiers, and the
//! envelope decoder. Provider specifics live in `providers`.

pub mod api;
pub mod envelope;
pub mod error;
pub mod method;

pub use api::{ProxyApi, ReceiptStatus};
pub use envelope::{decode_envelope, EnvelopeKind};
pub use error::{ErrorHook, ErrorKind, ProxyError};
pub use method::{Params, RpcMethod};
