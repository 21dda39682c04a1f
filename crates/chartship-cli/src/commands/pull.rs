//! In operation - materialize one published version onto disk
//!
//! Writes the version's metadata document, a bare version file, the
//! chart archive, and (when published) its detached signature into the
//! destination directory.

use console::style;
use std::path::Path;

use chartship_core::{InRequest, OperationResponse, ResourceVersion};
use chartship_repo::{MuseumClient, RepoError, resolve_download_url};

use crate::error::{CliError, Result};
use crate::io;

pub async fn run(destination: &Path) -> Result<()> {
    let request: InRequest = io::read_request()?;
    let requested = request.version.version.clone();

    let client = MuseumClient::new(&request.source)?;
    let dialect = client.dialect();

    eprintln!(
        "{} {} {}",
        style("Fetching").cyan().bold(),
        request.source.chart_name,
        requested
    );

    let body = client.fetch_version(&requested).await?;

    let reported = dialect
        .extract_version(&body)
        .ok_or_else(|| CliError::verify("chart metadata carries no version"))?;
    if reported != requested {
        return Err(CliError::verify(format!(
            "requested version {} but server reported {}",
            requested, reported
        )));
    }
    let digest = dialect.extract_digest(&body).map(String::from);

    std::fs::create_dir_all(destination)?;
    std::fs::write(
        destination.join("chart.json"),
        serde_json::to_vec_pretty(&body).map_err(|e| CliError::Other {
            message: format!("failed to serialize chart metadata: {}", e),
        })?,
    )?;
    std::fs::write(destination.join("version"), format!("{}\n", requested))?;

    let archive_name = format!("{}-{}.tgz", request.source.chart_name, requested);
    let reference = dialect
        .extract_urls(&body)
        .into_iter()
        .next()
        .unwrap_or_else(|| format!("charts/{}", archive_name));
    let archive_url = resolve_download_url(&request.source.server_url, &reference)?;

    let archive = client.download(&archive_url, digest.as_deref()).await?;
    std::fs::write(destination.join(&archive_name), &archive)?;

    // detached signature, best-effort: unsigned charts are the common case
    let signature_url = format!("{}.prov", archive_url);
    match client.download(&signature_url, None).await {
        Ok(signature) => {
            std::fs::write(destination.join(format!("{}.prov", archive_name)), &signature)?;
        }
        Err(RepoError::Http { status: 404, .. }) => {}
        Err(e) => return Err(e.into()),
    }

    eprintln!(
        "{} {} to {}",
        style("Fetched").green().bold(),
        archive_name,
        destination.display()
    );

    let response = OperationResponse {
        version: ResourceVersion {
            version: requested,
            digest,
        },
        metadata: dialect.metadata_entries(&body),
    };
    io::emit_response(&response)
}
