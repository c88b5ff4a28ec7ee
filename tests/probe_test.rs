//! Integration tests for the TCP reachability probe

use achilles::probe::{can_connect, probe};
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_can_connect_to_live_listener() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let port = listener.local_addr().expect("no local addr").port();

    assert!(can_connect("127.0.0.1", port, Duration::from_secs(1)).await);
}

#[tokio::test]
async fn test_refused_port_reports_false() {
    // Bind and immediately drop to find a port with no listener behind it
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);

    assert!(!can_connect("127.0.0.1", port, Duration::from_secs(1)).await);
}

#[tokio::test]
async fn test_dns_failure_reports_false() {
    // .invalid is reserved (RFC 2606) and never resolves
    assert!(!can_connect("host.invalid", 80, Duration::from_secs(2)).await);
}

#[tokio::test]
async fn test_probe_report_fields() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let port = listener.local_addr().expect("no local addr").port();

    let report = probe("127.0.0.1", port, Duration::from_secs(1)).await;
    assert_eq!(report.host, "127.0.0.1");
    assert_eq!(report.port, port);
    assert!(report.reachable);
    assert!(report.elapsed_ms < 1000);
}

#[tokio::test]
async fn test_probe_report_serializes_to_json() {
    let report = probe("127.0.0.1", 1, Duration::from_millis(200)).await;
    let json = serde_json::to_string(&report).expect("report should serialize");
    assert!(json.contains("\"reachable\""));
    assert!(json.contains("\"elapsed_ms\""));
}
