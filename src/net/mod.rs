//! Networking modules for the wallet REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the transport seam, `api` the client every caller uses,
//! `types` the identity wire schema, and `browser`/`native` the concrete
//! transports for WASM and non-browser builds.

pub mod api;
#[cfg(feature = "csr")]
pub mod browser;
pub mod http;
#[cfg(feature = "native")]
pub mod native;
pub mod timeout;
pub mod types;
