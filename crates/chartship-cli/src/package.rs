//! Chart packaging and archive inspection
//!
//! Directory sources are packaged by the external tool into a scoped
//! output directory; file sources are used verbatim. The archive path is
//! predicted from the chart's own metadata and confirmed by a stat after
//! the tool exits.

use console::style;
use std::path::{Path, PathBuf};

use chartship_core::{ChartDefinition, CoreError, toolout};

use crate::error::{CliError, Result};
use crate::tools::{HELM, ToolInvocation, ToolRunner};

/// The archive a publish uploads
#[derive(Debug, Clone)]
pub struct BuiltArtifact {
    pub path: PathBuf,
    pub size: u64,
}

impl BuiltArtifact {
    /// Use an already-built archive verbatim
    pub fn from_file(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }
}

/// What kind of chart source the request names
#[derive(Debug, Clone)]
pub enum ChartSource {
    Directory(PathBuf),
    File(PathBuf),
}

impl ChartSource {
    pub fn classify(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Ok(ChartSource::Directory(path.to_path_buf()))
        } else if path.is_file() {
            Ok(ChartSource::File(path.to_path_buf()))
        } else {
            Err(CliError::input(format!(
                "chart source not found: {}",
                path.display()
            )))
        }
    }
}

/// Switches for one packaging run
#[derive(Debug, Default)]
pub struct PackageOptions<'a> {
    /// Explicit version; the chart's declared version applies when absent
    pub version: Option<&'a str>,
    pub dependency_update: bool,
    /// Key identifier from a completed import; enables signing switches
    pub key_id: Option<&'a str>,
}

/// Package a chart directory into `output_dir`
pub async fn package_directory(
    runner: &dyn ToolRunner,
    chart_dir: &Path,
    output_dir: &Path,
    options: &PackageOptions<'_>,
) -> Result<BuiltArtifact> {
    let definition = ChartDefinition::load(chart_dir)?;
    let archive_name = definition.archive_file_name(options.version)?;

    eprintln!(
        "{} {} from {}",
        style("Packaging").cyan().bold(),
        definition.name,
        chart_dir.display()
    );

    let invocation = build_package_invocation(chart_dir, output_dir, options);
    let output = runner
        .run(invocation)
        .await
        .map_err(|e| CliError::package(e.to_string()))?;

    if !output.success() {
        return Err(CliError::package(output.stderr.trim().to_string()));
    }

    let path = output_dir.join(&archive_name);
    let metadata = std::fs::metadata(&path).map_err(|_| {
        CliError::package(format!(
            "expected archive missing after packaging: {}",
            path.display()
        ))
    })?;

    Ok(BuiltArtifact {
        path,
        size: metadata.len(),
    })
}

fn build_package_invocation(
    chart_dir: &Path,
    output_dir: &Path,
    options: &PackageOptions<'_>,
) -> ToolInvocation {
    let mut invocation = ToolInvocation::new(HELM).arg("package");

    if options.dependency_update {
        invocation = invocation.arg("--dependency-update");
    }
    if let Some(key_id) = options.key_id {
        invocation = invocation.arg("--sign").arg("--key").arg(key_id);
    }
    if let Some(version) = options.version {
        invocation = invocation.arg("--version").arg(version);
    }

    invocation
        .arg("--destination")
        .arg(output_dir.to_string_lossy())
        .arg(chart_dir.to_string_lossy())
}

/// Ask the packaging tool which version an archive carries
pub async fn inspect_version(runner: &dyn ToolRunner, archive: &Path) -> Result<String> {
    let invocation = ToolInvocation::new(HELM)
        .arg("inspect")
        .arg("chart")
        .arg(archive.to_string_lossy());

    let output = runner
        .run(invocation)
        .await
        .map_err(|e| CliError::package(e.to_string()))?;

    if !output.success() {
        return Err(CliError::package(output.stderr.trim().to_string()));
    }

    toolout::parse_inspected_version(&output.stdout)
        .ok_or_else(|| CoreError::VersionNotReported.into())
}
