//! Collector Example
//!
//! Prints every datagram received on a UDP port, one per line.
//!
//! Run with: cargo run -p demos --bin collector -- --bind 127.0.0.1:9999

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::UdpSocket;

/// Print raw log datagrams
#[derive(Parser, Debug)]
#[command(name = "collector", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:9999", env = "LOGCAST_BIND")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    observability::init_with_config(observability::ObservabilityConfig {
        log_format: observability::LogFormat::Pretty,
        ..Default::default()
    })?;

    let socket = UdpSocket::bind(&args.bind)
        .await
        .with_context(|| format!("cannot bind {}", args.bind))?;
    tracing::info!(addr = %socket.local_addr()?, "Collector listening");

    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let (n, peer) = socket.recv_from(&mut buf).await?;
        println!("{} {}", peer, String::from_utf8_lossy(&buf[..n]));
    }
}
