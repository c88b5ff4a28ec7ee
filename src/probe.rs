//! TCP reachability probing

use crate::models::ProbeReport;
use chrono::Local;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::{lookup_host, TcpStream};
use tracing::debug;

/// Default connect deadline, in seconds
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Returns true iff a TCP connection to (host, port) can be opened within
/// the deadline. DNS failure, refusal, and timeout all report as false;
/// the underlying cause is only visible in debug logs.
pub async fn can_connect(host: &str, port: u16, timeout: Duration) -> bool {
    try_connect(host, port, timeout).await
}

/// Runs a reachability check and records timing for reporting
pub async fn probe(host: &str, port: u16, timeout: Duration) -> ProbeReport {
    let started = Instant::now();
    let reachable = try_connect(host, port, timeout).await;

    ProbeReport {
        host: host.to_string(),
        port,
        reachable,
        elapsed_ms: started.elapsed().as_millis() as u64,
        checked_at: Local::now(),
    }
}

async fn try_connect(host: &str, port: u16, timeout: Duration) -> bool {
    let addr = format!("{host}:{port}");

    // Resolution and connect share one deadline, like the connect timeout
    // of socket.create_connection.
    let attempt = async {
        let addrs: Vec<SocketAddr> = lookup_host(addr.as_str()).await?.collect();
        if addrs.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no addresses resolved",
            ));
        }

        let mut last_error = None;
        for candidate in addrs {
            match TcpStream::connect(candidate).await {
                Ok(_stream) => return Ok(()),
                Err(e) => {
                    debug!("connect to {candidate} failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no addresses resolved")))
    };

    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!("probe of {addr} failed: {e}");
            false
        }
        Err(_) => {
            debug!("probe of {addr} timed out after {timeout:?}");
            false
        }
    }
}
