//! HTTP listener configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Configuration for the gateway's own HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen")]
    #[validate(custom = "validation::validate_socket_addr")]
    pub listen: String,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub graceful_shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            graceful_shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}
