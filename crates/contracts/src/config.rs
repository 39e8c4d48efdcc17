//! DispatcherConfig - structured constructor parameters

use serde::{Deserialize, Serialize};

use crate::{ContractError, LogLevel};

/// Dispatcher configuration
///
/// Mirrors the four constructor parameters plus the datagram queue size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Prefixed to every record
    pub tag: String,

    /// `host:port` of the datagram collector; empty disables the network sink
    #[serde(default)]
    pub network_addr: String,

    /// Write records to stderr
    #[serde(default = "default_console")]
    pub console: bool,

    /// Minimum level name (case-insensitive)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Pending datagrams before new ones are dropped
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_console() -> bool {
    true
}

fn default_min_level() -> String {
    LogLevel::Info.as_str().to_string()
}

fn default_queue_capacity() -> usize {
    1024
}

impl DispatcherConfig {
    /// Create a config with defaults for everything but the tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            network_addr: String::new(),
            console: default_console(),
            min_level: default_min_level(),
            queue_capacity: default_queue_capacity(),
        }
    }

    /// Whether a network sink is requested
    pub fn has_network(&self) -> bool {
        !self.network_addr.is_empty()
    }

    /// Check field-level constraints
    ///
    /// Address resolution and level parsing happen at construction.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.tag.is_empty() {
            return Err(ContractError::config_validation("tag", "tag must not be empty"));
        }
        if self.queue_capacity == 0 {
            return Err(ContractError::config_validation(
                "queue_capacity",
                "queue_capacity must be > 0",
            ));
        }
        Ok(())
    }
}
