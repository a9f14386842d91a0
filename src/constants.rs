//! Global constants used throughout the genx codebase.
//!
//! This module contains the freshness window, HTTP timeout, endpoint paths
//! and other defaults that are used across multiple modules. Defining them
//! centrally improves maintainability and makes magic numbers more
//! discoverable.

use std::time::Duration;

/// Freshness window for non-forced artifact fetches (5 seconds).
///
/// Two `fetch(force = false)` calls inside this window hit the network only
/// once; the second is served from the cached artifact set. The window
/// exists to absorb duplicate UI-triggered refresh bursts, not to provide
/// strong caching guarantees.
pub const FRESHNESS_WINDOW_SECS: u64 = 5;

/// Default timeout for HTTP requests against the generation service (30 seconds).
pub fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Legacy constant for backwards compatibility - prefer `default_request_timeout()`.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default base URL of the generation service.
///
/// The backend dev server binds here; override via `genx config set-url`
/// or the `--server` flag.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Endpoint returning the flat `path -> content` mapping of generated files.
pub const GENERATED_FILES_ENDPOINT: &str = "/generated-files";

/// Endpoint returning the packaged archive of the generated file set.
pub const GENERATED_CODE_ENDPOINT: &str = "/generated-code";

/// Fallback filename for exported bundles when the response carries no
/// parseable content-disposition header.
pub const DEFAULT_BUNDLE_FILENAME: &str = "generated_package.zip";
