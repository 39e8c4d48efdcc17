//! # Dispatcher
//!
//! Leveled log dispatch to a console sink and a UDP sink.
//!
//! Responsibilities:
//! - Filter records below the minimum level before any formatting
//! - Render `[tag] [timestamp] [LEVEL] message` plus caller position for WARN/ERROR
//! - Write the console line synchronously
//! - Hand the datagram to a background worker, never waiting on the network

pub mod dispatcher;
pub mod error;
pub mod global;
pub mod handle;
#[doc(hidden)]
pub mod macros;
pub mod metrics;
pub mod sinks;

pub use contracts::{CallSite, ContractError, DispatcherConfig, LogLevel, LogRecord, LogSink};
pub use dispatcher::{LogDispatcher, LogDispatcherBuilder};
pub use error::DispatcherError;
pub use handle::{SinkHandle, Transport};
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{CaptureBuffer, ConsoleSink, NetworkSink};
