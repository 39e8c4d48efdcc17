//! Process-wide dispatcher
//!
//! Installed at most once. Passing a `LogDispatcher` down explicitly is
//! preferred; this is for hosts that need access from anywhere.

use std::sync::OnceLock;

use crate::dispatcher::LogDispatcher;
use crate::error::DispatcherError;

static GLOBAL: OnceLock<LogDispatcher> = OnceLock::new();

/// Install the process-wide dispatcher
///
/// # Errors
/// `AlreadyInstalled` if one was installed before; the argument is dropped.
pub fn install(dispatcher: LogDispatcher) -> Result<&'static LogDispatcher, DispatcherError> {
    GLOBAL
        .set(dispatcher)
        .map_err(|_| DispatcherError::AlreadyInstalled)?;
    GLOBAL.get().ok_or(DispatcherError::AlreadyInstalled)
}

/// The installed dispatcher, if any
pub fn get() -> Option<&'static LogDispatcher> {
    GLOBAL.get()
}
