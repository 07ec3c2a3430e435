//! Global constants used throughout the Kamoes codebase.
//!
//! Upstream request headers, default limits and file names live here so the
//! fetcher, server and config modules agree on them.

use std::time::Duration;

/// Default upstream dictionary site.
pub const DEFAULT_UPSTREAM_URL: &str = "https://kbbi.kemdikbud.go.id";

/// Path prefix of entry pages on the upstream site.
pub const ENTRY_PATH: &str = "entri";

/// Browser user agent; the upstream site rejects non-browser clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36";

/// `Accept` header sent with every entry page request.
pub const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";

/// `Accept-Encoding` header sent with every entry page request.
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// `Accept-Language` header sent with every entry page request.
pub const ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.9";

/// Default HTTP port of the server.
pub const DEFAULT_PORT: u16 = 8000;

/// Default timeout for one upstream request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of redirects followed while resolving one word.
///
/// Upstream cross-references are not guaranteed acyclic; chains longer than
/// this are cut with empty senses.
pub const DEFAULT_MAX_REDIRECT_DEPTH: usize = 5;

/// Requests admitted per rate limit window.
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 5;

/// Length of the rate limit window.
pub const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_millis(1000);

/// Response header carrying the handling time.
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

/// Response header carrying the per-window request budget.
pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Response header carrying the requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Security headers stamped on every response unless a handler set them.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-xss-protection", "1; mode=block"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
];

/// Directory (under the data dir) holding one JSON artifact per word.
pub const DICTIONARY_DIR: &str = "dictionary";

/// Bootstrap word list file name (under the data dir).
pub const WORD_LIST_FILE: &str = "words.json";

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "kamoes.toml";
