//! Resource protocol response model
//!
//! `in` and `out` emit the same payload shape: the resolved version pair
//! plus an ordered list of metadata entries. `check` emits a bare list of
//! version pairs.

use serde::{Deserialize, Serialize};

use crate::request::ResourceVersion;

/// One named metadata entry shown by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Success payload of `in` and `out`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub version: ResourceVersion,
    pub metadata: Vec<MetadataEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serialization() {
        let response = OperationResponse {
            version: ResourceVersion {
                version: "1.2.3".to_string(),
                digest: Some("sha256:abc".to_string()),
            },
            metadata: vec![MetadataEntry::new("home", "https://example.com")],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["version"]["version"], "1.2.3");
        assert_eq!(json["version"]["digest"], "sha256:abc");
        assert_eq!(json["metadata"][0]["name"], "home");
        assert_eq!(json["metadata"][0]["value"], "https://example.com");
    }
}
