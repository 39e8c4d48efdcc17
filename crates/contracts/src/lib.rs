//! # Contracts
//!
//! Shared types between the dispatcher, its sinks and the host program.
//!
//! ## Record Model
//! - Severity is one of `INFO < WARN < ERROR`
//! - A record is rendered once and the same text goes to every sink
//! - WARN/ERROR records carry the caller position, INFO records do not

mod call_site;
mod config;
mod error;
mod level;
mod record;
mod sink;

pub use call_site::CallSite;
pub use config::DispatcherConfig;
pub use error::*;
pub use level::LogLevel;
pub use record::{LogRecord, FORMAT_ERROR_MARKER, TIMESTAMP_FORMAT};
pub use sink::LogSink;
