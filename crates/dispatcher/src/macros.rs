//! Logging macros
//!
//! Each macro checks the level first, then captures the enclosing function
//! path, `file!()` and `line!()` as the record's call site.
//!
//! ```ignore
//! use dispatcher::{log_error, log_info, LogDispatcher};
//!
//! let logger = LogDispatcher::new("svc", "127.0.0.1:9999", true, "INFO").await?;
//! log_info!(logger, "Hello, {}", "world");
//! log_error!(logger, "boom {}", 42);
//! ```

/// Strip the helper item and closure segments from a `type_name` path
#[doc(hidden)]
pub fn __function_path(raw: &'static str) -> &'static str {
    let mut path = raw.strip_suffix("::__here").unwrap_or(raw);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path
}

/// Fully qualified path of the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! __function {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::macros::__function_path(__type_name_of(__here))
    }};
}

/// Log at an explicit level
#[macro_export]
macro_rules! log_at {
    ($dispatcher:expr, $level:expr, $($arg:tt)+) => {{
        let dispatcher = &$dispatcher;
        let level: $crate::LogLevel = $level;
        if dispatcher.enabled(level) {
            let site = $crate::CallSite::new($crate::__function!(), file!(), line!());
            dispatcher.log(level, &site, format_args!($($arg)+));
        }
    }};
}

/// Log at INFO
#[macro_export]
macro_rules! log_info {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log at WARN
#[macro_export]
macro_rules! log_warn {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log at ERROR
#[macro_export]
macro_rules! log_error {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use super::__function_path;
    use crate::sinks::CaptureBuffer;
    use crate::{LogDispatcher, LogLevel};
    use std::sync::Arc;

    #[test]
    fn test_function_path_trimming() {
        assert_eq!(__function_path("app::run::__here"), "app::run");
        assert_eq!(
            __function_path("app::run::{{closure}}::{{closure}}::__here"),
            "app::run"
        );
        assert_eq!(__function_path("odd"), "odd");
    }

    #[test]
    fn test_function_macro_names_enclosing_fn() {
        let name = crate::__function!();
        assert!(name.ends_with("macros::tests::test_function_macro_names_enclosing_fn"));
    }

    async fn capturing() -> (LogDispatcher, CaptureBuffer) {
        let capture = CaptureBuffer::new();
        let dispatcher = LogDispatcher::builder("svc")
            .console_writer(capture.clone())
            .build()
            .await
            .unwrap();
        (dispatcher, capture)
    }

    #[tokio::test]
    async fn test_error_macro_annotation() {
        let (logger, capture) = capturing().await;

        let line = line!() + 1;
        crate::log_error!(logger, "boom {}", 42);

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        let expected = format!(
            "boom 42 dispatcher::macros::tests::test_error_macro_annotation@{}:{} ",
            file!(),
            line
        );
        assert!(lines[0].ends_with(&expected), "{}", lines[0]);
    }

    #[tokio::test]
    async fn test_info_macro_has_no_annotation() {
        let (logger, capture) = capturing().await;

        crate::log_info!(logger, "Hello, {}", "world");

        let lines = capture.lines();
        assert!(lines[0].contains("[svc]"));
        assert!(lines[0].ends_with("[INFO] Hello, world"));
    }

    #[tokio::test]
    async fn test_macros_accept_arc_and_explicit_level() {
        let (logger, capture) = capturing().await;
        let logger = Arc::new(logger);

        crate::log_warn!(logger, "careful");
        crate::log_at!(logger, LogLevel::Error, "plain");

        let lines = capture.lines();
        assert!(lines[0].contains("[WARN] careful "));
        assert!(lines[1].contains("[ERROR] plain "));
    }
}
