//! Request middleware: rate limiting and response timing.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::ApiError;
use crate::constants::{
    RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER, RESPONSE_TIME_HEADER,
};

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Whether the request fits the client's budget
    pub allowed: bool,
    /// Requests left in the client's current window
    pub remaining: u32,
}

/// Fixed-window request counter per client address.
///
/// Each client may make `max` requests per `window`; the window restarts on
/// the first request after it elapses. Requests without a known peer address
/// share one window. Expired windows are dropped at most once per window
/// length.
#[derive(Debug)]
pub struct RateLimiter {
    max: u32,
    window: Duration,
    windows: DashMap<Option<IpAddr>, (Instant, u32)>,
    last_sweep: Mutex<Instant>,
}

impl RateLimiter {
    /// Allow `max` requests per `window`.
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            windows: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Requests admitted per window.
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Count a request from `client`.
    pub fn check(&self, client: Option<IpAddr>) -> Admission {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: Option<IpAddr>, now: Instant) -> Admission {
        self.sweep(now);

        let mut entry = self.windows.entry(client).or_insert((now, 0));
        let (started, count) = &mut *entry;

        if now.saturating_duration_since(*started) >= self.window {
            *started = now;
            *count = 0;
        }
        if *count >= self.max {
            return Admission {
                allowed: false,
                remaining: 0,
            };
        }
        *count += 1;
        Admission {
            allowed: true,
            remaining: self.max - *count,
        }
    }

    // Must not run while an entry of `windows` is held.
    fn sweep(&self, now: Instant) {
        {
            let mut last = self.last_sweep.lock().unwrap_or_else(PoisonError::into_inner);
            if now.saturating_duration_since(*last) < self.window {
                return;
            }
            *last = now;
        }

        let before = self.windows.len();
        self.windows.retain(|_, (started, _)| now.saturating_duration_since(*started) < self.window);
        let dropped = before.saturating_sub(self.windows.len());
        if dropped > 0 {
            debug!("Dropped {dropped} expired rate limit window(s)");
        }
    }
}

/// Reject requests over the limit with `429`; stamp the budget headers on
/// every response.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client =
        request.extensions().get::<ConnectInfo<SocketAddr>>().map(|ConnectInfo(addr)| addr.ip());

    let admission = limiter.check(client);
    let mut response = if admission.allowed {
        next.run(request).await
    } else {
        debug!("Rate limit exceeded for {client:?}");
        ApiError::TooManyRequests.into_response()
    };

    let headers = response.headers_mut();
    headers.insert(RATE_LIMIT_LIMIT_HEADER, HeaderValue::from(limiter.max()));
    headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from(admission.remaining));
    response
}

/// Stamp `X-Response-Time` on every response and log the request.
pub async fn response_time(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let elapsed = format!("{}ms", start.elapsed().as_millis());
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
    }
    info!("{method} {uri} {} - {elapsed}", response.status().as_u16());
    response
}
