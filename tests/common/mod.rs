//! Fake upstreams for integration tests.
//!
//! `FakeUpstream::start` spins up one `axum` server on a random 127.0.0.1 port
//! that plays both outside services:
//! - `GET /cdx/:index_id` is the CDX index and answers with the configured body/status
//! - `GET /data/*filename` is the capture store and answers per filename
//!
//! Every request is counted and the `Range` headers seen by the store are kept,
//! so tests can assert on what the service under test sent.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Request, StatusCode, header::RANGE},
    response::{IntoResponse, Response},
    routing::get,
};
use qikseek::api::create_router;
use qikseek::config::Config;
use qikseek::search::SearchService;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const INDEX_ID: &str = "CC-TEST-index";

#[derive(Clone)]
pub enum CaptureReply {
    Ok(String),
    Status(StatusCode, String),
    /// Sleeps before answering; pair with a short upstream timeout.
    Slow(Duration, String),
}

struct UpstreamState {
    cdx_status: StatusCode,
    cdx_body: String,
    captures: HashMap<String, CaptureReply>,
    cdx_queries: Vec<String>,
    ranges: Vec<(String, String)>,
}

pub struct FakeUpstream {
    addr: SocketAddr,
    state: Arc<Mutex<UpstreamState>>,
    hits: Arc<AtomicUsize>,
}

impl FakeUpstream {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(UpstreamState {
            cdx_status: StatusCode::OK,
            cdx_body: String::new(),
            captures: HashMap::new(),
            cdx_queries: Vec::new(),
            ranges: Vec::new(),
        }));
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let app = Router::new()
            .route("/data/*filename", get(serve_capture))
            .route("/cdx/:index_id", get(serve_cdx))
            .with_state(state.clone())
            .layer(axum::middleware::from_fn(
                move |req: Request<Body>, next: axum::middleware::Next| {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        next.run(req).await
                    }
                },
            ));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state, hits })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Config pointing both outbound services at this fake.
    pub fn config(&self) -> Config {
        Config {
            cdx_base_url: format!("{}/cdx", self.base_url()),
            cdx_index_id: INDEX_ID.to_string(),
            capture_base_url: format!("{}/data", self.base_url()),
            ..Config::default()
        }
    }

    pub async fn set_cdx(&self, status: StatusCode, body: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.cdx_status = status;
        state.cdx_body = body.into();
    }

    pub async fn set_capture(&self, filename: &str, reply: CaptureReply) {
        let mut state = self.state.lock().await;
        state.captures.insert(filename.to_string(), reply);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn cdx_queries(&self) -> Vec<String> {
        self.state.lock().await.cdx_queries.clone()
    }

    /// (filename, Range header) pairs in the order the store saw them.
    pub async fn ranges(&self) -> Vec<(String, String)> {
        self.state.lock().await.ranges.clone()
    }
}

async fn serve_cdx(
    Path(index_id): Path<String>,
    RawQuery(query): RawQuery,
    State(state): State<Arc<Mutex<UpstreamState>>>,
) -> Response {
    let mut state = state.lock().await;
    if index_id != INDEX_ID {
        return (StatusCode::NOT_FOUND, "unknown index").into_response();
    }
    state.cdx_queries.push(query.unwrap_or_default());
    (state.cdx_status, state.cdx_body.clone()).into_response()
}

async fn serve_capture(
    Path(filename): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<Mutex<UpstreamState>>>,
) -> Response {
    let filename = filename.trim_start_matches('/').to_string();
    let reply = {
        let mut state = state.lock().await;
        let range = headers
            .get(RANGE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        state.ranges.push((filename.clone(), range));
        state.captures.get(&filename).cloned()
    };

    match reply {
        Some(CaptureReply::Ok(body)) => (StatusCode::PARTIAL_CONTENT, body).into_response(),
        Some(CaptureReply::Status(status, body)) => (status, body).into_response(),
        Some(CaptureReply::Slow(delay, body)) => {
            tokio::time::sleep(delay).await;
            (StatusCode::PARTIAL_CONTENT, body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "NoSuchKey").into_response(),
    }
}

/// One CDX JSON line the way index.commoncrawl.org writes it.
pub fn cdx_line(url: &str, filename: &str, offset: u64, length: u64) -> String {
    serde_json::json!({
        "urlkey": "com,example)/",
        "timestamp": "20260115120000",
        "url": url,
        "mime": "text/html",
        "status": "200",
        "digest": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        "length": length.to_string(),
        "offset": offset.to_string(),
        "filename": filename,
    })
    .to_string()
}

pub fn capture_html(title: Option<&str>, body: &str) -> String {
    let head = title
        .map(|t| format!("<head><title>{t}</title></head>"))
        .unwrap_or_default();
    format!(
        "WARC/1.0\r\nWARC-Type: response\r\n\r\nHTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<html>{head}<body>{body}</body></html>"
    )
}

/// Run a GET against the router and return (status, parsed JSON body).
pub async fn get_json(config: &Config, uri: &str) -> (StatusCode, serde_json::Value) {
    let service = Arc::new(SearchService::new(config).unwrap());
    let res = create_router(service)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}
