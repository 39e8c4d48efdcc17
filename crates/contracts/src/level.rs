//! Severity levels
//!
//! Ordered `Info < Warn < Error`; the dispatcher drops records below its
//! configured minimum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Record severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Routine traffic
    #[default]
    Info,
    /// Something unexpected, still running
    Warn,
    /// Failure
    Error,
}

impl LogLevel {
    /// All levels in ascending severity
    pub const ALL: [LogLevel; 3] = [LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    /// Upper-case name used in the record head
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Whether records at this level carry a caller-position annotation
    pub const fn needs_call_site(self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ContractError;

    /// Case-insensitive parse of `INFO`, `WARN` or `ERROR`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContractError::invalid_level(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("Warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("ERROR".parse::<LogLevel>().unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["DEBUG", "", "warning", " INFO"] {
            let err = bad.parse::<LogLevel>().unwrap_err();
            assert!(matches!(err, ContractError::InvalidLevel { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_call_site_only_for_warn_and_error() {
        assert!(!LogLevel::Info.needs_call_site());
        assert!(LogLevel::Warn.needs_call_site());
        assert!(LogLevel::Error.needs_call_site());
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");
        let level: LogLevel = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(level, LogLevel::Error);
    }
}
