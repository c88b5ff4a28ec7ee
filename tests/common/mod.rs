//! Common test utilities

use achilles::apps::{self, DemoApp};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Binds an ephemeral port, serves the app in the background, and returns
/// the base URL.
pub async fn spawn_app(app: Arc<dyn DemoApp>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    tokio::spawn(async move {
        let _ = apps::serve_on(listener, app).await;
    });

    format!("http://{addr}")
}
