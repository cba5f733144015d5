//! HTTP server configuration.

use std::net::SocketAddr;

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The address and port to listen on.
    pub listen: SocketAddr,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
}
