//! LogDispatcher - level filtering, formatting and dual-sink dispatch

use std::fmt;
use std::io::Write;
use std::net::SocketAddr;

use contracts::{CallSite, DispatcherConfig, LogLevel, LogRecord, LogSink};
use tracing::{info, instrument, trace, warn};

use crate::error::DispatcherError;
use crate::metrics::MetricsSnapshot;
use crate::sinks::{ConsoleSink, NetworkSink, CONSOLE_SINK_NAME, NETWORK_SINK_NAME};

/// Builder for creating a LogDispatcher
pub struct LogDispatcherBuilder {
    config: DispatcherConfig,
    console_writer: Option<Box<dyn Write + Send>>,
}

impl LogDispatcherBuilder {
    /// Create a builder with default settings for `tag`
    pub fn new(tag: impl Into<String>) -> Self {
        Self::from_config(DispatcherConfig::new(tag))
    }

    /// Create a builder from a config
    pub fn from_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            console_writer: None,
        }
    }

    /// `host:port` of the datagram collector (empty disables the network sink)
    pub fn network_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.network_addr = addr.into();
        self
    }

    /// Enable or disable the console sink
    pub fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Minimum level name, parsed at build time
    pub fn min_level(mut self, level: impl Into<String>) -> Self {
        self.config.min_level = level.into();
        self
    }

    /// Pending datagram limit
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Write console lines here instead of stderr
    pub fn console_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console_writer = Some(Box::new(writer));
        self
    }

    /// Validate, resolve, open the socket and start the datagram worker
    ///
    /// Without a network address the level string is not consulted and the
    /// minimum level is INFO.
    #[instrument(
        name = "log_dispatcher_build",
        skip(self),
        fields(tag = %self.config.tag, network_addr = %self.config.network_addr)
    )]
    pub async fn build(self) -> Result<LogDispatcher, DispatcherError> {
        let Self {
            config,
            console_writer,
        } = self;

        config.validate()?;

        let console = config.console.then(|| match console_writer {
            Some(writer) => ConsoleSink::with_writer(CONSOLE_SINK_NAME, writer),
            None => ConsoleSink::stderr(),
        });

        if !config.has_network() {
            return Ok(LogDispatcher {
                tag: config.tag,
                min_level: LogLevel::Info,
                console,
                network: None,
            });
        }

        let min_level = config.min_level.parse::<LogLevel>().inspect_err(|e| {
            warn!(level = %config.min_level, error = %e, "Rejecting dispatcher level");
        })?;

        let network =
            NetworkSink::connect(NETWORK_SINK_NAME, &config.network_addr, config.queue_capacity)
                .await
                .inspect_err(|e| {
                    warn!(addr = %config.network_addr, error = %e, "Network sink unavailable");
                })?;

        info!(
            tag = %config.tag,
            target = %network.target(),
            console = console.is_some(),
            min_level = %min_level,
            "LogDispatcher ready"
        );

        Ok(LogDispatcher {
            tag: config.tag,
            min_level,
            console,
            network: Some(network),
        })
    }
}

/// Leveled logger with an optional console sink and an optional UDP sink
///
/// Immutable after construction; share it by reference or `Arc` across
/// threads. Logging never blocks on the network and never fails.
pub struct LogDispatcher {
    tag: String,
    min_level: LogLevel,
    console: Option<ConsoleSink>,
    network: Option<NetworkSink>,
}

impl LogDispatcher {
    /// Create a dispatcher from the four constructor parameters
    ///
    /// # Errors
    /// With a non-empty `network_addr`: unknown level, unresolvable address
    /// or socket failure.
    pub async fn new(
        tag: impl Into<String>,
        network_addr: impl Into<String>,
        console: bool,
        min_level: impl Into<String>,
    ) -> Result<Self, DispatcherError> {
        LogDispatcherBuilder::new(tag)
            .network_addr(network_addr)
            .console(console)
            .min_level(min_level)
            .build()
            .await
    }

    /// Same as [`LogDispatcher::new`] with the minimum level fixed to INFO
    pub async fn with_default_level(
        tag: impl Into<String>,
        network_addr: impl Into<String>,
        console: bool,
    ) -> Result<Self, DispatcherError> {
        Self::new(tag, network_addr, console, LogLevel::Info.as_str()).await
    }

    /// Create a dispatcher from a config
    pub async fn from_config(config: &DispatcherConfig) -> Result<Self, DispatcherError> {
        LogDispatcherBuilder::from_config(config.clone())
            .build()
            .await
    }

    pub fn builder(tag: impl Into<String>) -> LogDispatcherBuilder {
        LogDispatcherBuilder::new(tag)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn console_enabled(&self) -> bool {
        self.console.is_some()
    }

    /// Resolved collector endpoint, if the network sink is active
    pub fn network_target(&self) -> Option<SocketAddr> {
        self.network.as_ref().map(NetworkSink::target)
    }

    /// Whether a record at `level` would reach any sink
    pub fn enabled(&self, level: LogLevel) -> bool {
        (self.console.is_some() || self.network.is_some()) && level >= self.min_level
    }

    /// Emit a record with an explicit call site
    ///
    /// Filtering happens before any formatting. The console write is
    /// synchronous; the datagram is queued for the background worker.
    pub fn log(&self, level: LogLevel, site: &CallSite, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        let line = LogRecord::new(&self.tag, level, site, args).render();

        if let Some(console) = &self.console {
            deliver(console, &line);
        }
        if let Some(network) = &self.network {
            deliver(network, &line);
        }
    }

    /// Emit a record, taking the call site from the caller's location
    #[track_caller]
    pub fn log_at(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.log(level, &CallSite::caller(), args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log_at(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log_at(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log_at(LogLevel::Error, args);
    }

    /// Get metrics for all active sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        let console = self
            .console
            .iter()
            .map(|s| (s.name().to_string(), s.metrics().snapshot()));
        let network = self
            .network
            .iter()
            .map(|s| (s.name().to_string(), s.metrics().snapshot()));
        console.chain(network).collect()
    }

    /// Wait for queued datagrams to be sent
    ///
    /// Optional: dropping the dispatcher also lets the worker drain and exit.
    pub async fn shutdown(self) {
        if let Some(network) = self.network {
            network.shutdown().await;
        }
    }
}

impl fmt::Debug for LogDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogDispatcher")
            .field("tag", &self.tag)
            .field("min_level", &self.min_level)
            .field("console", &self.console.is_some())
            .field("network_target", &self.network_target())
            .finish()
    }
}

fn deliver(sink: &impl LogSink, line: &str) {
    if let Err(e) = sink.write(line) {
        trace!(sink = sink.name(), error = %e, "Sink write dropped");
    }
}
