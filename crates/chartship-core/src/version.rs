//! Version resolution and range gating
//!
//! The effective version for a publish comes, in priority order, from the
//! version file, the explicit parameter, or post-package inspection of the
//! built archive. The configured range constraint gates the candidate the
//! moment it becomes known.

use semver::{Version, VersionReq};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Resolve the requested version before packaging
///
/// The trimmed contents of `version_file` are authoritative and override
/// the `version` parameter. `Ok(None)` means resolution is deferred to
/// post-package inspection.
pub fn resolve_requested(
    version: Option<&str>,
    version_file: Option<&Path>,
) -> Result<Option<String>> {
    if let Some(path) = version_file {
        let contents = std::fs::read_to_string(path).map_err(|_| {
            CoreError::VersionFileUnreadable {
                path: path.display().to_string(),
            }
        })?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Err(CoreError::VersionFileUnreadable {
                path: path.display().to_string(),
            });
        }
        return Ok(Some(trimmed.to_string()));
    }

    Ok(version.map(String::from))
}

/// Gate a candidate version against the configured range constraint
///
/// No configured range accepts everything. A violation is terminal for
/// the invocation, never retried.
pub fn check_range(candidate: &str, range: Option<&str>) -> Result<()> {
    let Some(range) = range else {
        return Ok(());
    };

    let requirement = VersionReq::parse(range).map_err(|e| CoreError::InvalidRange {
        range: range.to_string(),
        reason: e.to_string(),
    })?;
    let version = Version::parse(candidate).map_err(|e| CoreError::InvalidVersion {
        version: candidate.to_string(),
        reason: e.to_string(),
    })?;

    if requirement.matches(&version) {
        Ok(())
    } else {
        Err(CoreError::RangeViolation {
            version: candidate.to_string(),
            range: range.to_string(),
        })
    }
}

/// Select the versions `check` should report
///
/// Unparseable candidates are skipped; the range constraint filters the
/// rest; survivors sort ascending. Without a current version only the
/// latest survivor is reported, otherwise every survivor at or above the
/// current one.
pub fn select_candidates(
    published: &[String],
    range: Option<&str>,
    current: Option<&str>,
) -> Result<Vec<String>> {
    let requirement = range
        .map(|r| {
            VersionReq::parse(r).map_err(|e| CoreError::InvalidRange {
                range: r.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let mut survivors: Vec<Version> = published
        .iter()
        .filter_map(|raw| Version::parse(raw).ok())
        .filter(|v| requirement.as_ref().map(|r| r.matches(v)).unwrap_or(true))
        .collect();
    survivors.sort();

    let floor = current.and_then(|c| Version::parse(c).ok());

    let selected: Vec<String> = match floor {
        Some(floor) => survivors
            .into_iter()
            .filter(|v| *v >= floor)
            .map(|v| v.to_string())
            .collect(),
        None => survivors
            .pop()
            .map(|v| vec![v.to_string()])
            .unwrap_or_default(),
    };

    Ok(selected)
}
