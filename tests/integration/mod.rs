//! Integration test suite for Kamoes
//!
//! End-to-end tests that drive the public API: the lookup pipeline over an
//! in-memory fetcher, the HTTP API over a local stand-in for the upstream
//! site, and artifact persistence across restarts.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **lookup_flow**: cache, vocabulary and resolver working together
//! - **http_api**: `App` wired to a local upstream, exercised through the router
//! - **upstream**: `HttpFetcher` against a local upstream

mod common;
mod http_api;
mod lookup_flow;
mod upstream;
