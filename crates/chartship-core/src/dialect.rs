//! Chart API dialect strategy
//!
//! The same underlying server speaks two wire formats: plain ChartMuseum
//! and the Harbor-hosted variant. The dialect is selected once per
//! invocation from the `harbor_api` source flag and consulted for upload
//! body shaping and for extracting fields from the two response shapes
//! (flat for plain, nested under `metadata` for Harbor).

use serde_json::Value;

use crate::response::MetadataEntry;

/// Which wire format the configured server speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiDialect {
    /// Plain ChartMuseum: flat responses, raw-stream uploads
    Plain,

    /// Harbor-hosted ChartMuseum: nested responses, multipart uploads
    Harbor,
}

impl ApiDialect {
    pub fn from_harbor_flag(harbor_api: bool) -> Self {
        if harbor_api {
            ApiDialect::Harbor
        } else {
            ApiDialect::Plain
        }
    }

    /// Whether uploads are multipart forms rather than raw byte streams
    pub fn uses_multipart_upload(&self) -> bool {
        matches!(self, ApiDialect::Harbor)
    }

    /// The chart object inside a single-version metadata response
    fn chart_object<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        match self {
            ApiDialect::Plain => Some(body),
            ApiDialect::Harbor => body.get("metadata"),
        }
    }

    /// Version reported by a single-version metadata response
    pub fn extract_version<'a>(&self, body: &'a Value) -> Option<&'a str> {
        self.chart_object(body)?.get("version")?.as_str()
    }

    /// Content digest reported by a single-version metadata response
    pub fn extract_digest<'a>(&self, body: &'a Value) -> Option<&'a str> {
        self.chart_object(body)?.get("digest")?.as_str()
    }

    /// Download references reported by a single-version metadata response
    pub fn extract_urls(&self, body: &Value) -> Vec<String> {
        self.chart_object(body)
            .and_then(|chart| chart.get("urls"))
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Project the dialect's metadata fields into ordered entries
    ///
    /// Both dialects expose `appVersion`, `created`, and `description`;
    /// the plain dialect additionally exposes `home` and the legacy
    /// `tillerVersion` field.
    pub fn metadata_entries(&self, body: &Value) -> Vec<MetadataEntry> {
        let fields: &[&str] = match self {
            ApiDialect::Plain => &[
                "appVersion",
                "created",
                "description",
                "home",
                "tillerVersion",
            ],
            ApiDialect::Harbor => &["appVersion", "created", "description"],
        };

        let Some(chart) = self.chart_object(body) else {
            return Vec::new();
        };

        fields
            .iter()
            .filter_map(|field| {
                chart
                    .get(*field)
                    .and_then(Value::as_str)
                    .map(|value| MetadataEntry::new(*field, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain_body() -> Value {
        json!({
            "name": "app",
            "version": "1.2.3",
            "appVersion": "2.0",
            "created": "2024-01-01T00:00:00Z",
            "description": "demo chart",
            "digest": "sha256:abc",
            "home": "https://example.com",
            "tillerVersion": ">=2.12.0",
            "urls": ["charts/app-1.2.3.tgz"]
        })
    }

    fn harbor_body() -> Value {
        json!({
            "metadata": {
                "name": "app",
                "version": "1.2.3",
                "appVersion": "2.0",
                "created": "2024-01-01T00:00:00Z",
                "description": "demo chart",
                "digest": "sha256:abc",
                "urls": ["charts/app-1.2.3.tgz"]
            },
            "security": {"signature": {"signed": false}}
        })
    }

    #[test]
    fn test_dialect_from_flag() {
        assert_eq!(ApiDialect::from_harbor_flag(false), ApiDialect::Plain);
        assert_eq!(ApiDialect::from_harbor_flag(true), ApiDialect::Harbor);
        assert!(!ApiDialect::Plain.uses_multipart_upload());
        assert!(ApiDialect::Harbor.uses_multipart_upload());
    }

    #[test]
    fn test_extract_version_and_digest() {
        assert_eq!(
            ApiDialect::Plain.extract_version(&plain_body()),
            Some("1.2.3")
        );
        assert_eq!(
            ApiDialect::Harbor.extract_version(&harbor_body()),
            Some("1.2.3")
        );
        assert_eq!(
            ApiDialect::Plain.extract_digest(&plain_body()),
            Some("sha256:abc")
        );
        assert_eq!(
            ApiDialect::Harbor.extract_digest(&harbor_body()),
            Some("sha256:abc")
        );

        // A plain reader pointed at a Harbor body finds nothing
        assert_eq!(ApiDialect::Plain.extract_version(&harbor_body()), None);
    }

    #[test]
    fn test_plain_metadata_includes_home_and_tiller() {
        let entries = ApiDialect::Plain.metadata_entries(&plain_body());
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["appVersion", "created", "description", "home", "tillerVersion"]
        );
    }

    #[test]
    fn test_harbor_metadata_omits_plain_only_fields() {
        let entries = ApiDialect::Harbor.metadata_entries(&harbor_body());
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["appVersion", "created", "description"]);
        assert!(!names.contains(&"home"));
        assert!(!names.contains(&"tillerVersion"));
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let body = json!({"name": "app", "version": "1.0.0"});
        let entries = ApiDialect::Plain.metadata_entries(&body);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_extract_urls() {
        assert_eq!(
            ApiDialect::Plain.extract_urls(&plain_body()),
            vec!["charts/app-1.2.3.tgz".to_string()]
        );
        assert_eq!(
            ApiDialect::Harbor.extract_urls(&harbor_body()),
            vec!["charts/app-1.2.3.tgz".to_string()]
        );
    }
}
