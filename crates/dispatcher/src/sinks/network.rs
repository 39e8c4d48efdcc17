//! NetworkSink - UDP fire-and-forget streaming

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use bytes::Bytes;
use contracts::{ContractError, LogSink};
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, instrument};

use crate::error::DispatcherError;
use crate::handle::{SinkHandle, Transport};
use crate::metrics::SinkMetrics;

/// Default network sink name
pub const NETWORK_SINK_NAME: &str = "network";

impl Transport for UdpSocket {
    async fn send(&self, payload: &[u8]) -> std::io::Result<usize> {
        UdpSocket::send(self, payload).await
    }
}

/// Sink that sends each line as one UDP datagram
///
/// `write` only queues the payload; a detached worker performs the send.
pub struct NetworkSink {
    target: SocketAddr,
    handle: SinkHandle,
}

impl NetworkSink {
    /// Resolve `addr`, open a socket connected to it and start the worker
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(name = "network_sink_connect", skip(name))]
    pub async fn connect(
        name: impl Into<String>,
        addr: &str,
        queue_capacity: usize,
    ) -> Result<Self, DispatcherError> {
        let name = name.into();
        let target = resolve(addr).await?;
        let socket = open_socket(target)
            .await
            .map_err(|e| DispatcherError::sink_creation(&name, e.to_string()))?;

        debug!(sink = %name, target = %target, "NetworkSink connected");

        Ok(Self {
            target,
            handle: SinkHandle::spawn(name, socket, queue_capacity),
        })
    }

    /// Resolved collector endpoint
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        self.handle.metrics()
    }

    /// Wait for queued datagrams to be sent, then stop the worker
    pub async fn shutdown(self) {
        self.handle.shutdown().await;
    }
}

impl LogSink for NetworkSink {
    fn name(&self) -> &str {
        self.handle.name()
    }

    fn write(&self, line: &str) -> Result<(), ContractError> {
        if self.handle.try_send(Bytes::copy_from_slice(line.as_bytes())) {
            Ok(())
        } else {
            Err(ContractError::sink_write(self.name(), "datagram dropped"))
        }
    }
}

/// Resolve `host:port` to the first address returned
async fn resolve(addr: &str) -> Result<SocketAddr, DispatcherError> {
    let mut addrs = lookup_host(addr)
        .await
        .map_err(|e| DispatcherError::address_resolution(addr, e.to_string()))?;

    addrs
        .next()
        .ok_or_else(|| DispatcherError::address_resolution(addr, "no addresses found"))
}

/// Bind an ephemeral port of the target's family and connect it
async fn open_socket(target: SocketAddr) -> std::io::Result<UdpSocket> {
    let local: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(local).await?;
    socket.connect(target).await?;
    Ok(socket)
}
