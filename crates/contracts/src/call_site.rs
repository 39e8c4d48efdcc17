//! CallSite - where a log call was made
//!
//! Captured at the call boundary (macro or `#[track_caller]`), never by
//! walking the stack.

use std::panic::Location;

/// Source position of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Fully qualified path of the enclosing function, when known
    pub function: Option<&'static str>,
    /// Source file
    pub file: &'static str,
    /// Line number
    pub line: u32,
}

impl CallSite {
    /// Create a call site with a known function path
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function: Some(function),
            file,
            line,
        }
    }

    /// Create a call site from a `Location` (function unknown)
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            function: None,
            file: location.file(),
            line: location.line(),
        }
    }

    /// Call site of whoever called the enclosing `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    /// Trailing annotation: `" <function>@<file>:<line> "`
    pub fn annotation(&self) -> String {
        match self.function {
            Some(function) => format!(" {}@{}:{} ", function, self.file, self.line),
            None => format!(" {}:{} ", self.file, self.line),
        }
    }
}
