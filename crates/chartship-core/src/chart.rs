//! Chart definition loading
//!
//! Only the fields the pipeline needs from a chart source directory's
//! `Chart.yaml`: the name (to predict the packaged archive filename) and
//! the declared version (the packaging tool's default when no explicit
//! version is supplied).

use serde::Deserialize;
use std::path::Path;

use crate::error::{CoreError, Result};

/// The subset of `Chart.yaml` the pipeline reads
#[derive(Debug, Clone, Deserialize)]
pub struct ChartDefinition {
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,
}

impl ChartDefinition {
    /// Load the definition from a chart source directory
    pub fn load(chart_dir: &Path) -> Result<Self> {
        let path = chart_dir.join("Chart.yaml");
        if !path.is_file() {
            return Err(CoreError::ChartDefinitionNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&path)?;
        let definition: ChartDefinition =
            serde_yaml::from_str(&contents).map_err(|e| CoreError::ChartMetadata {
                message: format!("{}: {}", path.display(), e),
            })?;

        if definition.name.trim().is_empty() {
            return Err(CoreError::ChartMetadata {
                message: format!("{}: chart name is empty", path.display()),
            });
        }

        Ok(definition)
    }

    /// Predict the archive filename the packaging tool will produce
    ///
    /// An explicit version overrides the declared one; with neither the
    /// tool has nothing to version the archive with and packaging cannot
    /// proceed.
    pub fn archive_file_name(&self, explicit_version: Option<&str>) -> Result<String> {
        let version = explicit_version
            .or(self.version.as_deref())
            .ok_or_else(|| CoreError::ChartMetadata {
                message: format!(
                    "chart '{}' declares no version and none was supplied",
                    self.name
                ),
            })?;

        Ok(format!("{}-{}.tgz", self.name, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_chart_yaml(dir: &Path, contents: &str) {
        std::fs::write(dir.join("Chart.yaml"), contents).unwrap();
    }

    #[test]
    fn test_load_definition() {
        let temp = TempDir::new().unwrap();
        write_chart_yaml(
            temp.path(),
            "apiVersion: v2\nname: app\nversion: 1.4.0\ndescription: demo\n",
        );

        let definition = ChartDefinition::load(temp.path()).unwrap();
        assert_eq!(definition.name, "app");
        assert_eq!(definition.version.as_deref(), Some("1.4.0"));
    }

    #[test]
    fn test_load_missing_definition() {
        let temp = TempDir::new().unwrap();
        let err = ChartDefinition::load(temp.path()).unwrap_err();
        assert!(matches!(err, CoreError::ChartDefinitionNotFound { .. }));
    }

    #[test]
    fn test_archive_name_prefers_explicit_version() {
        let definition = ChartDefinition {
            name: "app".to_string(),
            version: Some("1.0.0".to_string()),
        };

        assert_eq!(
            definition.archive_file_name(Some("2.0.0")).unwrap(),
            "app-2.0.0.tgz"
        );
        assert_eq!(definition.archive_file_name(None).unwrap(), "app-1.0.0.tgz");
    }

    #[test]
    fn test_archive_name_without_any_version() {
        let definition = ChartDefinition {
            name: "app".to_string(),
            version: None,
        };

        assert!(definition.archive_file_name(None).is_err());
    }
}
