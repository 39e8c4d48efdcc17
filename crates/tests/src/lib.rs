//! # Integration Tests
//!
//! Cross-crate tests over real loopback UDP.
//!
//! Covers:
//! - Console/datagram scenarios end to end
//! - Concurrent logging from plain threads
//! - Macros used from a downstream crate

#[cfg(test)]
mod e2e_tests {
    use std::time::Duration;

    use contracts::LogLevel;
    use dispatcher::{log_error, log_info, CaptureBuffer, LogDispatcher};
    use tokio::net::UdpSocket;
    use tokio::time::timeout;

    async fn collector() -> (UdpSocket, String) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap().to_string();
        (socket, addr)
    }

    async fn next_datagram(socket: &UdpSocket, wait: Duration) -> Option<String> {
        let mut buf = vec![0u8; 64 * 1024];
        let n = timeout(wait, socket.recv(&mut buf)).await.ok()?.ok()?;
        Some(String::from_utf8(buf[..n].to_vec()).unwrap())
    }

    /// `New("svc", "", true, "INFO")` + `LogInfo("Hello, %s", "world")`
    #[tokio::test]
    async fn test_console_hello_world_without_network() {
        let capture = CaptureBuffer::new();
        let logger = LogDispatcher::builder("svc")
            .console(true)
            .min_level("INFO")
            .console_writer(capture.clone())
            .build()
            .await
            .unwrap();

        log_info!(logger, "Hello, {}", "world");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[svc]"));
        assert!(lines[0].contains("[INFO]"));
        assert!(lines[0].contains("Hello, world"));
        assert!(logger.network_target().is_none());
        assert!(logger
            .metrics()
            .iter()
            .all(|(sink, _)| sink.as_str() != "network"));
    }

    /// `New("svc", "127.0.0.1:<port>", true, "WARN")`, then INFO and ERROR
    #[tokio::test]
    async fn test_warn_threshold_with_collector() {
        let (collector, addr) = collector().await;
        let capture = CaptureBuffer::new();
        let logger = LogDispatcher::builder("svc")
            .network_addr(addr)
            .console(true)
            .min_level("WARN")
            .console_writer(capture.clone())
            .build()
            .await
            .unwrap();

        log_info!(logger, "x");
        assert!(capture.lines().is_empty());
        assert!(next_datagram(&collector, Duration::from_millis(300))
            .await
            .is_none());

        log_error!(logger, "boom {}", 42);

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[ERROR]"));
        assert!(lines[0].contains("boom 42"));
        assert!(lines[0].contains("tests::e2e_tests::test_warn_threshold_with_collector@"));

        let datagram = next_datagram(&collector, Duration::from_secs(2))
            .await
            .expect("datagram not received");
        assert_eq!(datagram, lines[0]);
    }

    #[tokio::test]
    async fn test_every_level_below_minimum_is_silent() {
        for min in LogLevel::ALL {
            let (collector, addr) = collector().await;
            let capture = CaptureBuffer::new();
            let logger = LogDispatcher::builder("svc")
                .network_addr(addr)
                .min_level(min.as_str())
                .console_writer(capture.clone())
                .build()
                .await
                .unwrap();

            for level in LogLevel::ALL.into_iter().filter(|l| *l < min) {
                logger.log_at(level, format_args!("hidden"));
            }

            assert!(capture.lines().is_empty(), "min={min}");
            assert!(next_datagram(&collector, Duration::from_millis(100))
                .await
                .is_none());
        }
    }

    #[tokio::test]
    async fn test_network_only_dispatcher() {
        let (collector, addr) = collector().await;
        let logger = LogDispatcher::new("edge", addr, false, "info").await.unwrap();

        logger.info(format_args!("ping"));

        let datagram = next_datagram(&collector, Duration::from_secs(2))
            .await
            .expect("datagram not received");
        assert!(datagram.starts_with("[edge] ["));
        assert!(datagram.ends_with("[INFO] ping"));
    }
}

#[cfg(test)]
mod concurrency_tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use dispatcher::{log_warn, CaptureBuffer, LogDispatcher};
    use observability::MetricsSummary;
    use tokio::net::UdpSocket;
    use tokio::time::timeout;

    const THREADS: usize = 16;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_threads_produce_whole_lines() {
        let collector = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = collector.local_addr().unwrap().to_string();
        let capture = CaptureBuffer::new();
        let logger = Arc::new(
            LogDispatcher::builder("svc")
                .network_addr(addr)
                .console_writer(capture.clone())
                .build()
                .await
                .unwrap(),
        );

        let workers: Vec<_> = (0..THREADS)
            .map(|i| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    log_warn!(logger, "worker {} says {}", i, "x".repeat(200));
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let lines = capture.lines();
        assert_eq!(lines.len(), THREADS);

        let mut seen = HashSet::new();
        for line in &lines {
            assert!(line.starts_with("[svc] ["), "{line}");
            assert!(line.contains("[WARN] worker "), "{line}");
            assert!(line.ends_with(' '), "{line}");
            let id: usize = line
                .split("worker ")
                .nth(1)
                .and_then(|rest| rest.split(' ').next())
                .and_then(|n| n.parse().ok())
                .unwrap();
            seen.insert(id);
        }
        assert_eq!(seen.len(), THREADS);

        let mut buf = vec![0u8; 64 * 1024];
        let mut received = 0;
        while received < THREADS {
            match timeout(Duration::from_secs(2), collector.recv(&mut buf)).await {
                Ok(Ok(_)) => received += 1,
                _ => break,
            }
        }
        assert_eq!(received, THREADS);

        // the worker counts a send after it completes, so poll briefly
        let expected = 2 * THREADS as u64;
        let mut summary = MetricsSummary::default();
        for _ in 0..100 {
            let snapshots: Vec<_> = logger.metrics().into_iter().map(|(_, s)| s).collect();
            summary = MetricsSummary::from_snapshots(&snapshots);
            if summary.writes == expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(summary.writes, expected);
        assert_eq!(summary.loss_ratio(), 0.0);
    }
}
