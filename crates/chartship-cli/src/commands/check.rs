//! Check operation - discover published versions
//!
//! Fetches the tracked chart's version listing, filters it through the
//! configured version range, and reports everything at or above the
//! current version (or just the latest when there is no current one).

use chartship_core::{CheckRequest, ResourceVersion, version};
use chartship_repo::{MuseumClient, RepoError, entry_digest, entry_version};

use crate::error::Result;
use crate::io;

pub async fn run() -> Result<()> {
    let request: CheckRequest = io::read_request()?;

    let client = MuseumClient::new(&request.source)?;
    let listing = match client.list_chart().await {
        Ok(listing) => listing,
        // a chart with no published versions yet is not an error
        Err(RepoError::Http { status: 404, .. }) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    let published: Vec<String> = listing
        .iter()
        .filter_map(entry_version)
        .map(String::from)
        .collect();

    let selected = version::select_candidates(
        &published,
        request.source.version_range.as_deref(),
        request.version.as_ref().map(|v| v.version.as_str()),
    )?;

    let versions: Vec<ResourceVersion> = selected
        .into_iter()
        .map(|selected_version| {
            let digest = listing
                .iter()
                .find(|entry| entry_version(entry) == Some(selected_version.as_str()))
                .and_then(entry_digest)
                .map(String::from);
            ResourceVersion {
                version: selected_version,
                digest,
            }
        })
        .collect();

    io::emit_response(&versions)
}
