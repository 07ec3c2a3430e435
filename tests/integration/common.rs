//! Shared helpers: a local stand-in for the upstream dictionary site.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use dashmap::DashMap;
use kamoes::test_utils::fixtures;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

/// Upstream stub serving entry pages at `/entri/{word}`.
///
/// Words not registered answer `404`, `sibuk` answers `429`.
pub struct Upstream {
    pub addr: SocketAddr,
    hits: Arc<DashMap<String, usize>>,
}

#[derive(Clone)]
struct UpstreamState {
    pages: Arc<HashMap<String, String>>,
    hits: Arc<DashMap<String, usize>>,
}

impl Upstream {
    /// Serve the standard fixtures.
    pub async fn start() -> Self {
        Self::with_pages([
            ("rumah", fixtures::RUMAH.to_string()),
            ("zaman", fixtures::ZAMAN.to_string()),
            ("jaman", fixtures::JAMAN.to_string()),
            ("bisa", fixtures::BISA.to_string()),
            ("juang", fixtures::JUANG.to_string()),
            ("kosong", fixtures::NOT_FOUND.to_string()),
        ])
        .await
    }

    pub async fn with_pages<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let pages: HashMap<String, String> =
            pages.into_iter().map(|(word, html)| (word.to_string(), html)).collect();
        let hits = Arc::new(DashMap::new());
        let state = UpstreamState {
            pages: Arc::new(pages),
            hits: hits.clone(),
        };

        let app = Router::new().route("/entri/:word", get(entry)).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            hits,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received for `word`.
    pub fn hits(&self, word: &str) -> usize {
        self.hits.get(word).map_or(0, |h| *h)
    }
}

async fn entry(State(state): State<UpstreamState>, Path(word): Path<String>) -> Response {
    *state.hits.entry(word.clone()).or_insert(0) += 1;

    if word == "sibuk" {
        return (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response();
    }
    match state.pages.get(&word) {
        Some(html) => Html(html.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
