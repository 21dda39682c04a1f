//! ChartMuseum client for the chartship CI resource
//!
//! Talks to a single configured chart repository over HTTP: version
//! listings, per-version metadata, dialect-shaped uploads, and archive
//! downloads with digest verification.

pub mod client;
pub mod error;

pub use client::{
    MuseumClient, compute_digest, digest_matches, entry_digest, entry_version,
    resolve_download_url,
};
pub use error::{RepoError, Result};
