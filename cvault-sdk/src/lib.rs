//! Wire types shared between the Corporate Vault relay and its callers.
//!
//! The [`objects`] module mirrors the relay's JSON request and response
//! bodies. The optional `client` feature adds a typed HTTP client.

#![deny(clippy::unwrap_used)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
