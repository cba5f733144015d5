//! Configuration types for the Corporate Vault relay.
//!
//! These types represent the validated runtime configuration. Loading and
//! parsing (TOML, environment, CLI) is handled by the server crate.

mod ledger;
mod server;

pub use ledger::LedgerConfig;
pub use server::ServerConfig;
