//! Out operation - build, optionally sign, upload, and verify
//!
//! The stages run strictly in order: version resolution, auxiliary
//! repository registration, packaging (with key import when signing),
//! version re-inspection, upload, round-trip verification. Each stage's
//! failure aborts the invocation with its own exit code.

use console::style;
use std::path::Path;

use chartship_core::{OperationResponse, OutRequest, ResourceVersion, version};
use chartship_repo::MuseumClient;

use crate::error::{CliError, Result};
use crate::io;
use crate::keyring;
use crate::package::{self, BuiltArtifact, ChartSource, PackageOptions};
use crate::repos;
use crate::tools::{ProcessRunner, ToolRunner};

pub async fn run(build_root: &Path) -> Result<()> {
    let request: OutRequest = io::read_request()?;
    let source = &request.source;
    let params = &request.params;
    let runner = ProcessRunner;

    // ---- version resolution ----
    let version_file = params.version_file.as_ref().map(|p| build_root.join(p));
    let requested = version::resolve_requested(params.version.as_deref(), version_file.as_deref())?;
    if let Some(candidate) = &requested {
        version::check_range(candidate, source.version_range.as_deref())?;
    }

    // signing configuration is validated before anything is spawned
    let material = keyring::signing_material(params)?;

    // ---- auxiliary repositories ----
    if !params.dependency_repos.is_empty() {
        repos::register_all(&runner, &params.dependency_repos).await?;
    }

    // ---- packaging ----
    let chart_path = build_root.join(&params.chart);
    let chart_source = ChartSource::classify(&chart_path)?;

    // scoped output directory; lives until the upload has read the archive
    let output_dir = tempfile::TempDir::new()?;

    let artifact = match &chart_source {
        ChartSource::File(path) => BuiltArtifact::from_file(path)?,
        ChartSource::Directory(dir) => {
            let key_id = match &material {
                Some(material) => {
                    Some(keyring::import_signing_key(&runner, material, output_dir.path()).await?)
                }
                None => None,
            };
            let options = PackageOptions {
                version: requested.as_deref(),
                dependency_update: params.dependency_update,
                key_id: key_id.as_deref(),
            };
            package::package_directory(&runner, dir, output_dir.path(), &options).await?
        }
    };

    // ---- effective version ----
    let effective = resolve_effective(&runner, &chart_source, &artifact, requested, source).await?;

    // ---- upload ----
    let client = MuseumClient::new(source)?;
    eprintln!(
        "{} {} {} ({} bytes)",
        style("Uploading").cyan().bold(),
        source.chart_name,
        effective,
        artifact.size
    );
    client.upload(&artifact.path, params.force).await?;

    // ---- round-trip verification ----
    let body = client
        .fetch_version(&effective)
        .await
        .map_err(|e| CliError::verify(e.to_string()))?;

    let dialect = client.dialect();
    let reported = dialect
        .extract_version(&body)
        .ok_or_else(|| CliError::verify("published chart metadata carries no version"))?;
    if reported != effective {
        return Err(CliError::verify(format!(
            "published {} but server reports {}",
            effective, reported
        )));
    }
    let digest = dialect.extract_digest(&body).map(String::from);

    eprintln!(
        "{} {} {}",
        style("Published").green().bold(),
        source.chart_name,
        effective
    );

    let response = OperationResponse {
        version: ResourceVersion {
            version: effective,
            digest,
        },
        metadata: dialect.metadata_entries(&body),
    };
    io::emit_response(&response)
}

/// Settle the version the upload will publish
///
/// Archives packaged from a directory are re-inspected: their own
/// metadata is authoritative and must agree with any requested version.
/// File sources are inspected only when no version was resolved earlier;
/// a version first learned here still has to pass the range gate.
async fn resolve_effective(
    runner: &dyn ToolRunner,
    chart_source: &ChartSource,
    artifact: &BuiltArtifact,
    requested: Option<String>,
    source: &chartship_core::Source,
) -> Result<String> {
    match chart_source {
        ChartSource::Directory(_) => {
            let inspected = package::inspect_version(runner, &artifact.path).await?;
            match requested {
                Some(requested) if requested != inspected => Err(CliError::package(format!(
                    "packaged archive reports version {} but {} was requested",
                    inspected, requested
                ))),
                Some(requested) => Ok(requested),
                None => {
                    version::check_range(&inspected, source.version_range.as_deref())?;
                    Ok(inspected)
                }
            }
        }
        ChartSource::File(_) => match requested {
            Some(requested) => Ok(requested),
            None => {
                let inspected = package::inspect_version(runner, &artifact.path).await?;
                version::check_range(&inspected, source.version_range.as_deref())?;
                Ok(inspected)
            }
        },
    }
}
