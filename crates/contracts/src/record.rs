//! LogRecord - one formatted log line
//!
//! Layout: `[<tag>] [<YYYY-MM-DD HH:MM:SS.mmm>] [<LEVEL>] <message><position>`

use std::fmt;

use chrono::{DateTime, Local};

use crate::{CallSite, LogLevel};

/// Timestamp layout of the record head (local time, millisecond precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Appended to the message when a `Display` impl fails mid-format
pub const FORMAT_ERROR_MARKER: &str = "%!(FORMAT ERROR)";

/// A rendered record, ready to hand to the sinks
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    tag: &'a str,
    timestamp: DateTime<Local>,
    level: LogLevel,
    message: String,
    position: String,
}

impl<'a> LogRecord<'a> {
    /// Render a record stamped with the current local time
    ///
    /// The position annotation is only produced for WARN and ERROR.
    pub fn new(tag: &'a str, level: LogLevel, site: &CallSite, args: fmt::Arguments<'_>) -> Self {
        let position = if level.needs_call_site() {
            site.annotation()
        } else {
            String::new()
        };

        Self {
            tag,
            timestamp: Local::now(),
            level,
            message: render_message(args),
            position,
        }
    }

    /// Override the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Rendered message body
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Caller-position annotation (empty for INFO)
    pub fn position(&self) -> &str {
        &self.position
    }

    /// `"[<tag>] [<timestamp>] [<LEVEL>] "`
    pub fn head(&self) -> String {
        format!(
            "[{}] [{}] [{}] ",
            self.tag,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level
        )
    }

    /// Full line: head + message + position
    pub fn render(&self) -> String {
        let head = self.head();
        let mut line =
            String::with_capacity(head.len() + self.message.len() + self.position.len());
        line.push_str(&head);
        line.push_str(&self.message);
        line.push_str(&self.position);
        line
    }
}

fn render_message(args: fmt::Arguments<'_>) -> String {
    if let Some(s) = args.as_str() {
        return s.to_string();
    }

    let mut message = String::new();
    if fmt::write(&mut message, args).is_err() {
        message.push_str(FORMAT_ERROR_MARKER);
    }
    message
}
