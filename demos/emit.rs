//! Emit Example
//!
//! Builds a dispatcher from flags and logs one record per level.
//!
//! Run with: cargo run -p demos --bin emit -- --addr 127.0.0.1:9999 --level warn

use anyhow::Result;
use clap::Parser;
use dispatcher::{global, log_error, log_info, log_warn, LogDispatcher};
use observability::{LogFormat, ObservabilityConfig};

/// Send a few log records to the console and/or a UDP collector
#[derive(Parser, Debug)]
#[command(name = "emit", version, about)]
struct Args {
    /// Tag prefixed to every record
    #[arg(long, default_value = "demo", env = "LOGCAST_TAG")]
    tag: String,

    /// Collector address (host:port); empty disables the network sink
    #[arg(long, default_value = "", env = "LOGCAST_ADDR")]
    addr: String,

    /// Disable the console sink
    #[arg(long)]
    no_console: bool,

    /// Minimum level (INFO, WARN, ERROR)
    #[arg(long, default_value = "INFO", env = "LOGCAST_LEVEL")]
    level: String,

    /// Message body
    #[arg(long, default_value = "hello from emit")]
    message: String,

    /// Number of rounds
    #[arg(long, default_value = "1")]
    count: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    observability::init_with_config(ObservabilityConfig {
        log_format: LogFormat::Compact,
        default_log_level: "warn".to_string(),
        ..Default::default()
    })?;

    let logger = global::install(
        LogDispatcher::new(args.tag, args.addr, !args.no_console, args.level).await?,
    )?;

    for round in 0..args.count {
        log_info!(logger, "{} (round {})", args.message, round);
        log_warn!(logger, "{} (round {})", args.message, round);
        report(round);
    }

    observability::record_dispatcher_metrics(logger);
    for (sink, snapshot) in logger.metrics() {
        tracing::info!(sink = %sink, ?snapshot, "Sink metrics");
    }

    // give the datagram worker a moment before the runtime goes away
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    Ok(())
}

/// Deep in the call tree, without the logger passed down
fn report(round: u32) {
    if let Some(logger) = global::get() {
        log_error!(logger, "simulated failure in round {}", round);
    }
}
