//! LogSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use crate::ContractError;

/// Log line output trait
///
/// All sink implementations must implement this trait. `write` is called on
/// the logging thread and must not block on network I/O.
pub trait LogSink: Send + Sync {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one rendered line (without trailing newline)
    ///
    /// # Errors
    /// Returns write error (should include context). The dispatcher counts
    /// and discards it.
    fn write(&self, line: &str) -> Result<(), ContractError>;
}
