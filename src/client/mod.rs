//! HTTP transport for the generation service.
//!
//! [`GenerationApi`] is the seam between the session layer and the network:
//! the production implementation is [`HttpApi`] (a thin [`reqwest`] client),
//! while tests inject an in-memory fake. The trait deliberately returns the
//! raw wire data - content normalization and caching policy belong to the
//! store, not the transport.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::constants::{GENERATED_CODE_ENDPOINT, GENERATED_FILES_ENDPOINT};
use crate::core::GenxError;

/// Raw response of the bundle endpoint: the archive bytes plus the filename
/// parsed from the content-disposition header, if any.
#[derive(Debug, Clone)]
pub struct BundleResponse {
    /// Filename advertised by the server, already percent-decoded.
    pub filename: Option<String>,
    /// The archive body, saved verbatim (never re-encoded client-side).
    pub bytes: Vec<u8>,
}

/// Remote operations the artifact session needs from the generation
/// service.
pub trait GenerationApi {
    /// `GET /generated-files`: the flat mapping of generated file paths to
    /// raw content. Non-success statuses are errors.
    fn generated_files(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, String>, GenxError>>;

    /// `GET /generated-code`: the packaged archive of the current artifact
    /// set.
    fn generated_code(&self) -> impl Future<Output = Result<BundleResponse, GenxError>>;
}

/// [`reqwest`]-backed implementation of [`GenerationApi`].
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for `base_url` with the given request timeout. A
    /// trailing slash on the URL is tolerated.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GenxError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl GenerationApi for HttpApi {
    async fn generated_files(&self) -> Result<BTreeMap<String, String>, GenxError> {
        let url = self.endpoint(GENERATED_FILES_ENDPOINT);
        debug!("fetching generated files from {url}");

        let response = self
            .http
            .get(&url)
            .header("Cache-Control", "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenxError::ApiStatus {
                endpoint: GENERATED_FILES_ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let files: BTreeMap<String, String> = response.json().await?;
        debug!("received {} generated files", files.len());
        Ok(files)
    }

    async fn generated_code(&self) -> Result<BundleResponse, GenxError> {
        let url = self.endpoint(GENERATED_CODE_ENDPOINT);
        debug!("downloading artifact bundle from {url}");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenxError::ApiStatus {
                endpoint: GENERATED_CODE_ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition);

        let bytes = response.bytes().await?.to_vec();
        Ok(BundleResponse { filename, bytes })
    }
}

/// RFC 5987 encoded-filename parameter (`filename*=UTF-8''...`).
static ENCODED_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"filename\*=UTF-8''([^;\s]+)").expect("valid filename* regex"));

/// Plain quoted filename parameter (`filename="..."`).
static QUOTED_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"filename="([^"]+)""#).expect("valid filename regex"));

/// Extract a filename from a content-disposition header value.
///
/// The encoded `filename*` form is preferred over the quoted form when both
/// are present; its value is percent-decoded. Returns `None` when neither
/// form matches.
pub(crate) fn parse_content_disposition(header: &str) -> Option<String> {
    if let Some(captures) = ENCODED_FILENAME.captures(header) {
        return Some(percent_decode(&captures[1]));
    }
    QUOTED_FILENAME
        .captures(header)
        .map(|captures| captures[1].to_string())
}

/// Minimal percent-decoding for header filename values. Invalid escape
/// sequences pass through literally; decoded bytes are interpreted as UTF-8
/// with lossy replacement.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = &input[i + 1..i + 3];
            if let Ok(byte) = u8::from_str_radix(hex, 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
