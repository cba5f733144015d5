//! Core of the Corporate Vault relay: unit conversion, the ledger seam and
//! the relay operations built on it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ledger;
pub mod relay;
pub mod units;
