//! Integration test suite for genx.
//!
//! End-to-end tests over the public library surface plus a smoke test of
//! the compiled binary.
//!
//! # Running
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **session**: full browsing-session flows against a scripted in-memory
//!   transport (fetch, normalization, throttling, selection repair, export)
//! - **cli**: binary-level behavior (help, config round-trip, error paths)

mod cli;
mod session;
