//! Artifact storage: fetching, normalization, freshness throttling and the
//! stale-response guard.
//!
//! [`ArtifactStore`] exclusively owns the [`ArtifactSet`] and the fetch
//! bookkeeping around it. It is generic over the [`GenerationApi`]
//! transport so the session logic can be exercised against an in-memory
//! fake.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::client::{BundleResponse, GenerationApi};
use crate::constants::DEFAULT_BUNDLE_FILENAME;
use crate::content::strip_code_fence;
use crate::core::{ArtifactSet, GenxError};
use crate::tree::canonical_path;

/// What a call to [`ArtifactStore::fetch`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A network response replaced the artifact set.
    Updated,
    /// The call was absorbed by the freshness window; the cached set was
    /// served unchanged and no request was issued.
    Throttled,
    /// The response (or failure) was older than one already applied and was
    /// dropped without touching any state.
    Stale,
}

/// A downloaded artifact bundle ready to be written to disk.
#[derive(Debug, Clone)]
pub struct BundleArchive {
    /// Save filename: the server-advertised name, or the fixed fallback.
    pub filename: String,
    /// Raw archive bytes.
    pub bytes: Vec<u8>,
}

/// Owner of the artifact set for the current browsing session.
///
/// The store enforces three policies on top of the raw transport:
///
/// - **Freshness throttling**: a non-forced fetch inside the freshness
///   window is a no-op serving the cached set, absorbing UI-triggered
///   refresh bursts.
/// - **Normalization**: every fetched value has a chat-style code-fence
///   wrapper stripped before storage.
/// - **Stale-response sequencing**: each issued request carries a
///   monotonically increasing sequence number, and a completion that is
///   older than the newest applied one is discarded, so a slow early
///   request can never overwrite a faster later one.
///
/// On fetch failure the set is cleared to empty and the failure surfaced;
/// the fetch timestamp is dropped rather than advanced, so a retry is never
/// throttled after a failure.
pub struct ArtifactStore<A> {
    api: A,
    artifacts: ArtifactSet,
    fetched_at: Option<DateTime<Utc>>,
    freshness_window: chrono::Duration,
    issued_seq: u64,
    applied_seq: u64,
    in_flight: bool,
}

impl<A> ArtifactStore<A> {
    /// Create an empty store over the given transport.
    pub fn new(api: A, freshness_window: chrono::Duration) -> Self {
        Self {
            api,
            artifacts: ArtifactSet::new(),
            fetched_at: None,
            freshness_window,
            issued_seq: 0,
            applied_seq: 0,
            in_flight: false,
        }
    }

    /// The current artifact set.
    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Content of a single artifact, if present.
    pub fn content(&self, path: &str) -> Option<&str> {
        self.artifacts.get(path).map(String::as_str)
    }

    /// Whether `path` exists in the current set.
    pub fn contains(&self, path: &str) -> bool {
        self.artifacts.contains_key(path)
    }

    /// Number of artifacts in the current set.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the current set is empty.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Completion time of the last applied successful fetch.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Whether a request is currently in flight.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the last successful fetch is still inside the freshness
    /// window.
    fn is_fresh(&self) -> bool {
        self.fetched_at
            .is_some_and(|at| Utc::now() - at < self.freshness_window)
    }

    /// Reserve a sequence number for a request about to be issued.
    fn begin_request(&mut self) -> u64 {
        self.issued_seq += 1;
        self.in_flight = true;
        self.issued_seq
    }

    /// Apply a successful response. Returns [`FetchOutcome::Stale`] and
    /// leaves all state untouched when a newer response has already been
    /// applied; otherwise normalizes every value, replaces the set
    /// wholesale and stamps the fetch time.
    fn apply_response(&mut self, seq: u64, raw: BTreeMap<String, String>) -> FetchOutcome {
        if seq < self.applied_seq {
            debug!("dropping stale fetch response (seq {seq} < {})", self.applied_seq);
            return FetchOutcome::Stale;
        }
        self.applied_seq = seq;
        // Keys are canonicalized so they always match the full paths the
        // tree builder derives; duplicates collapsing onto one canonical
        // path keep the last value, mirroring the JSON feed's behavior.
        self.artifacts = raw
            .into_iter()
            .map(|(path, content)| {
                let path = canonical_path(&path).unwrap_or(path);
                let normalized = strip_code_fence(&content);
                (path, normalized.into_owned())
            })
            .collect();
        self.fetched_at = Some(Utc::now());
        info!("artifact set replaced: {} files", self.artifacts.len());
        FetchOutcome::Updated
    }

    /// Apply a failed fetch. Returns `false` (drop silently) when a newer
    /// response has already been applied; otherwise clears the set, drops
    /// the fetch timestamp so no retry is ever throttled after a failure,
    /// and returns `true`.
    fn apply_failure(&mut self, seq: u64) -> bool {
        if seq < self.applied_seq {
            debug!("dropping stale fetch failure (seq {seq} < {})", self.applied_seq);
            return false;
        }
        self.applied_seq = seq;
        self.artifacts.clear();
        self.fetched_at = None;
        true
    }
}

impl<A: GenerationApi> ArtifactStore<A> {
    /// Fetch the artifact set from the generation service.
    ///
    /// With `force == false` a call inside the freshness window issues no
    /// network request and returns [`FetchOutcome::Throttled`]. Otherwise a
    /// request is issued and, on success, the whole set is replaced
    /// atomically. On failure the set is reset to empty and the error is
    /// surfaced as [`GenxError::FetchFailed`].
    pub async fn fetch(&mut self, force: bool) -> Result<FetchOutcome, GenxError> {
        if !force && self.is_fresh() {
            debug!("fetch absorbed by freshness window");
            return Ok(FetchOutcome::Throttled);
        }

        let seq = self.begin_request();
        let result = self.api.generated_files().await;
        self.in_flight = false;

        match result {
            Ok(raw) => Ok(self.apply_response(seq, raw)),
            Err(err) => {
                if self.apply_failure(seq) {
                    warn!("fetch failed, artifact set cleared: {err}");
                    Err(GenxError::FetchFailed {
                        reason: err.to_string(),
                    })
                } else {
                    Ok(FetchOutcome::Stale)
                }
            }
        }
    }

    /// Download the packaged archive of the current server-side artifact
    /// set. No local state is mutated, success or failure; a failure is
    /// surfaced as [`GenxError::ExportFailed`].
    pub async fn export_bundle(&self) -> Result<BundleArchive, GenxError> {
        let BundleResponse { filename, bytes } =
            self.api
                .generated_code()
                .await
                .map_err(|err| GenxError::ExportFailed {
                    reason: err.to_string(),
                })?;

        let filename = filename.unwrap_or_else(|| {
            debug!("no filename in response, using {DEFAULT_BUNDLE_FILENAME}");
            DEFAULT_BUNDLE_FILENAME.to_string()
        });
        Ok(BundleArchive { filename, bytes })
    }
}
