//! Sink implementations
//!
//! Contains ConsoleSink and NetworkSink.

mod console;
mod network;

pub use self::console::{CaptureBuffer, ConsoleSink, CONSOLE_SINK_NAME};
pub use self::network::{NetworkSink, NETWORK_SINK_NAME};
