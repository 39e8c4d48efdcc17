//! Dispatcher error types
//!
//! Only construction can fail; logging never returns an error.

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Invalid level or config field
    #[error("invalid dispatcher configuration: {0}")]
    Contract(#[from] contracts::ContractError),

    /// Network address could not be resolved
    #[error("cannot resolve udp address '{addr}': {message}")]
    AddressResolution { addr: String, message: String },

    /// Sink creation error (socket bind/connect)
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// A process-wide dispatcher was already installed
    #[error("a process-wide dispatcher is already installed")]
    AlreadyInstalled,
}

impl DispatcherError {
    /// Create an address resolution error
    pub fn address_resolution(addr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AddressResolution {
            addr: addr.into(),
            message: message.into(),
        }
    }

    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
