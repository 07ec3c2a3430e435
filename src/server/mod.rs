//! HTTP front end.
//!
//! One route, `GET /{word}`, answering with the JSON array of definitions.
//! Every other path is a `404`.
//!
//! | Outcome              | Status | Body                                                      |
//! |----------------------|--------|-----------------------------------------------------------|
//! | definitions found    | 200    | `[Definition, ...]`                                       |
//! | unknown / no entries | 404    | `{"message":"Not Found"}`                                 |
//! | lookup failed        | 500    | `{"message":"Internal Server Error"}`                     |
//! | over the rate limit  | 429    | `{"message":"Too many requests, please try again later."}`|
//!
//! Layers, outermost first: security headers (`X-Content-Type-Options`,
//! `X-Frame-Options` and friends), permissive CORS, request tracing, response
//! timing (`X-Response-Time: <ms>ms` plus a log line), the fixed-window rate
//! limiter (`X-RateLimit-Limit` / `X-RateLimit-Remaining` on every response).

pub mod middleware;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::constants::SECURITY_HEADERS;
use crate::fetcher::HttpFetcher;
use crate::lookup::LookupService;
use crate::models::Definition;
use crate::resolver::Resolver;
use crate::vocabulary::Vocabulary;
use middleware::{RateLimiter, rate_limit, response_time};

/// Error responses of the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Word unknown or without entries, or path not routed
    NotFound,
    /// Lookup failed
    Internal,
    /// Client exceeded the rate limit
    TooManyRequests,
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            Self::TooManyRequests => {
                (StatusCode::TOO_MANY_REQUESTS, "Too many requests, please try again later.")
            }
        };
        (
            status,
            Json(MessageBody {
                message,
            }),
        )
            .into_response()
    }
}

/// Shared state of the router.
#[derive(Debug, Clone)]
pub struct AppState {
    lookup: LookupService,
}

/// Build the router around a lookup service.
pub fn router(lookup: LookupService, limiter: Arc<RateLimiter>) -> Router {
    let router = Router::new()
        .route("/:word", get(get_word))
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(limiter, rate_limit))
        .layer(axum::middleware::from_fn(response_time))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    SECURITY_HEADERS
        .iter()
        .fold(router, |router, &(name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
        .with_state(AppState {
            lookup,
        })
}

async fn get_word(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> Result<Json<Vec<Definition>>, ApiError> {
    match state.lookup.lookup(&word).await {
        Ok(Some(definitions)) => Ok(Json(definitions)),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => {
            error!("Lookup of '{word}' failed: {e:#}");
            Err(ApiError::Internal)
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// The assembled service: configuration plus a ready lookup service.
#[derive(Debug, Clone)]
pub struct App {
    config: Config,
    lookup: LookupService,
}

impl App {
    /// Open the cache, load the word list and build the upstream fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved, the word
    /// list cannot be loaded, or the cache directory cannot be opened.
    pub async fn init(config: Config) -> Result<Self> {
        let cache = CacheStore::open(config.dictionary_dir()?).await?;
        let vocabulary = Vocabulary::load(&config.word_list_path()?)?;
        let fetcher = HttpFetcher::new(&config.upstream_url, config.request_timeout())?;
        let resolver = Resolver::new(Arc::new(fetcher), config.max_redirect_depth);

        info!(
            "Loaded {} word(s) and {} cached artifact(s)",
            vocabulary.len(),
            cache.len()
        );

        let lookup =
            LookupService::new(cache, Arc::new(vocabulary), resolver, config.single_flight);
        Ok(Self {
            config,
            lookup,
        })
    }

    /// The lookup service.
    pub fn lookup(&self) -> &LookupService {
        &self.lookup
    }

    /// Router with the configured rate limit.
    pub fn router(&self) -> Router {
        let limiter =
            RateLimiter::new(self.config.rate_limit_max, self.config.rate_limit_window());
        router(self.lookup.clone(), Arc::new(limiter))
    }

    /// Serve on the configured port until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails.
    pub async fn serve(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Listening at http://localhost:{}", self.config.port);

        axum::serve(listener, self.router().into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down");
            })
            .await
            .context("Server error")
    }
}
