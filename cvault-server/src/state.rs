//! Application state shared across all request handlers.

use cvault_core::relay::RelayProcessor;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (the ledger is behind an Arc).
#[derive(Clone)]
pub struct AppState {
    /// Runs relay commands against the configured ledger.
    pub relay: RelayProcessor,
}

impl AppState {
    /// Create a new AppState around the given relay.
    pub fn new(relay: RelayProcessor) -> Self {
        Self { relay }
    }
}
