//! Paired demo web apps and the shared HTTP server loop
//!
//! Both apps expose the same three routes and differ only in internal
//! handling: `GET /` (banner), `GET /search?q=` (reflected fragment),
//! `POST /config` (YAML body).

pub mod hardened;
pub mod vulnerable;

use crate::error::{AchillesError, Result};
use crate::models::Variant;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Route handlers for one behavioral profile
pub trait DemoApp: Send + Sync {
    /// Which profile this app runs with
    fn variant(&self) -> Variant;

    /// Body of the static home page
    fn home(&self) -> String;

    /// Renders the search-results fragment for a query
    fn search(&self, query: &str) -> Result<String>;

    /// Parses a YAML request body and returns the rendered configuration
    fn load_config(&self, body: &[u8]) -> Result<String>;

    /// Whether handler errors are echoed verbatim in responses
    fn verbose_errors(&self) -> bool {
        false
    }
}

/// Returns the app implementation for a variant
pub fn app_for(variant: Variant) -> Arc<dyn DemoApp> {
    match variant {
        Variant::Vulnerable => Arc::new(vulnerable::VulnerableApp),
        Variant::Hardened => Arc::new(hardened::HardenedApp),
    }
}

/// Binds the address and serves the app until Ctrl+C
pub async fn serve(app: Arc<dyn DemoApp>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AchillesError::ServerError(format!("failed to bind {addr}: {e}")))?;

    let variant = app.variant();
    info!("{variant} app listening on http://{addr}");

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            return;
        }
        info!("Shutting down {variant} app");
        std::process::exit(0);
    });

    serve_on(listener, app).await
}

/// Serves the app on an already-bound listener
pub async fn serve_on(listener: TcpListener, app: Arc<dyn DemoApp>) -> Result<()> {
    loop {
        let (stream, remote_addr) = listener
            .accept()
            .await
            .map_err(|e| AchillesError::ServerError(format!("accept failed: {e}")))?;

        let io = TokioIo::new(stream);
        let app = Arc::clone(&app);

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let app = Arc::clone(&app);
                async move { handle_request(req, app).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("connection error from {remote_addr}: {e}");
            }
        });
    }
}

async fn handle_request(
    req: Request<Incoming>,
    app: Arc<dyn DemoApp>,
) -> std::result::Result<Response<String>, hyper::Error> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();

    let response = match (&method, path.as_str()) {
        (&Method::GET, "/") => html_response(StatusCode::OK, app.home()),

        (&Method::GET, "/search") => {
            let query = query_param(&uri, "q").unwrap_or_default();
            match app.search(&query) {
                Ok(fragment) => html_response(StatusCode::OK, fragment),
                Err(e) => error_response(app.as_ref(), &e, "invalid query"),
            }
        }

        (&Method::POST, "/config") => {
            let body = req.into_body().collect().await?.to_bytes();
            match app.load_config(&body) {
                Ok(rendered) => text_response(StatusCode::OK, rendered),
                Err(e) => error_response(app.as_ref(), &e, "invalid configuration"),
            }
        }

        (_, "/") | (_, "/search") | (_, "/config") => text_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        ),

        _ => text_response(StatusCode::NOT_FOUND, "not found".to_string()),
    };

    debug!("{method} {path} -> {}", response.status());
    Ok(response)
}

fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn error_response(app: &dyn DemoApp, err: &AchillesError, generic: &str) -> Response<String> {
    if app.verbose_errors() {
        // Debug-mode behavior: hand the caller the full error detail.
        text_response(StatusCode::INTERNAL_SERVER_ERROR, format!("error: {err}"))
    } else {
        debug!("handler error suppressed: {err}");
        text_response(StatusCode::BAD_REQUEST, generic.to_string())
    }
}

fn html_response(status: StatusCode, body: String) -> Response<String> {
    with_content_type(status, body, "text/html; charset=utf-8")
}

fn text_response(status: StatusCode, body: String) -> Response<String> {
    with_content_type(status, body, "text/plain; charset=utf-8")
}

fn with_content_type(
    status: StatusCode,
    body: String,
    content_type: &'static str,
) -> Response<String> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
