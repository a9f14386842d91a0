//! Test utilities for genx.
//!
//! Available to unit tests and, via the `test-utils` feature, to the
//! integration suite. The centerpiece is [`FakeApi`], a scripted in-memory
//! [`GenerationApi`] implementation: tests queue responses up front and the
//! fake replays them in order, counting calls so throttling behavior can be
//! asserted without a network.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

use tracing_subscriber::EnvFilter;

use crate::client::{BundleResponse, GenerationApi};
use crate::core::GenxError;

/// Initialize logging for tests, honoring `RUST_LOG` when set.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_test_writer()
        .try_init();
}

/// Scripted [`GenerationApi`] for tests.
///
/// Responses are queued with the builder methods and consumed
/// first-in-first-out, one per call. Running past the end of a queue panics
/// with a clear message - a test that issues more requests than it scripted
/// is a broken test.
#[derive(Default)]
pub struct FakeApi {
    files_responses: RefCell<VecDeque<Result<BTreeMap<String, String>, String>>>,
    bundle_responses: RefCell<VecDeque<Result<BundleResponse, String>>>,
    files_calls: Cell<usize>,
    bundle_calls: Cell<usize>,
}

impl FakeApi {
    /// An empty fake with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful `/generated-files` response.
    #[must_use]
    pub fn with_files(self, files: BTreeMap<String, String>) -> Self {
        self.files_responses.borrow_mut().push_back(Ok(files));
        self
    }

    /// Queue a failing `/generated-files` response.
    #[must_use]
    pub fn with_files_error(self, message: &str) -> Self {
        self.files_responses
            .borrow_mut()
            .push_back(Err(message.to_string()));
        self
    }

    /// Queue a successful `/generated-code` response.
    #[must_use]
    pub fn with_bundle(self, filename: Option<&str>, bytes: Vec<u8>) -> Self {
        self.bundle_responses.borrow_mut().push_back(Ok(BundleResponse {
            filename: filename.map(str::to_string),
            bytes,
        }));
        self
    }

    /// Queue a failing `/generated-code` response.
    #[must_use]
    pub fn with_bundle_error(self, message: &str) -> Self {
        self.bundle_responses
            .borrow_mut()
            .push_back(Err(message.to_string()));
        self
    }

    /// How many `/generated-files` requests have been issued.
    pub fn files_calls(&self) -> usize {
        self.files_calls.get()
    }

    /// How many `/generated-code` requests have been issued.
    pub fn bundle_calls(&self) -> usize {
        self.bundle_calls.get()
    }
}

impl GenerationApi for FakeApi {
    async fn generated_files(&self) -> Result<BTreeMap<String, String>, GenxError> {
        self.files_calls.set(self.files_calls.get() + 1);
        self.files_responses
            .borrow_mut()
            .pop_front()
            .expect("FakeApi: no scripted response left for /generated-files")
            .map_err(|message| GenxError::Io(std::io::Error::other(message)))
    }

    async fn generated_code(&self) -> Result<BundleResponse, GenxError> {
        self.bundle_calls.set(self.bundle_calls.get() + 1);
        self.bundle_responses
            .borrow_mut()
            .pop_front()
            .expect("FakeApi: no scripted response left for /generated-code")
            .map_err(|message| GenxError::Io(std::io::Error::other(message)))
    }
}
