/*!
 * Mock language detection server.
 *
 * Imitates the external detection service: `POST /detect` with a plain-text body,
 * answered with `{"lang": "<tag>"}`. The answer can be switched to an error status or
 * an undecodable body to exercise the failure paths of `HttpLanguageDetector`.
 */

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use log::info;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::providers::http::LanguageResponse;

/// What the mock server answers to every detection request
#[derive(Debug, Clone, PartialEq)]
pub enum MockServerResponse {
    /// 200 with `{"lang": tag}`
    Language(String),
    /// Empty response with this status code
    Status(u16),
    /// 200 with this body verbatim
    Raw(String),
}

impl Default for MockServerResponse {
    fn default() -> Self {
        Self::Language("en-US".to_string())
    }
}

/// Shared state of a running mock server
#[derive(Debug, Default)]
pub struct MockServerState {
    response: MockServerResponse,
    received: Mutex<Vec<String>>,
}

impl MockServerState {
    pub fn new(response: MockServerResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            received: Mutex::new(Vec::new()),
        })
    }

    /// Bodies of all requests received so far
    pub fn received(&self) -> Vec<String> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Build the router serving `POST /detect`
pub fn build_router(state: Arc<MockServerState>) -> Router {
    Router::new()
        .route("/detect", post(detect_handler))
        .with_state(state)
}

/// Bind `addr` and serve until the task is dropped
pub async fn spawn(
    addr: &str,
    state: Arc<MockServerState>,
) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = build_router(state);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("Mock language server stopped: {}", e);
        }
    });

    Ok((local_addr, handle))
}

async fn detect_handler(State(state): State<Arc<MockServerState>>, body: String) -> Response {
    info!("Received text: {}", body);
    if let Ok(mut received) = state.received.lock() {
        received.push(body);
    }

    match &state.response {
        MockServerResponse::Language(tag) => Json(LanguageResponse { lang: tag.clone() }).into_response(),
        MockServerResponse::Status(code) => StatusCode::from_u16(*code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        MockServerResponse::Raw(raw) => {
            ([(header::CONTENT_TYPE, "application/json")], raw.clone()).into_response()
        }
    }
}
