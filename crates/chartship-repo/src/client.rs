//! ChartMuseum HTTP client
//!
//! One client per invocation, built from the resource's `source`
//! configuration. The upload body is shaped by the configured API
//! dialect: Harbor takes a multipart form, plain ChartMuseum takes the
//! raw archive stream with explicit length and disposition headers.

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use url::Url;

use chartship_core::{ApiDialect, Source};

use crate::error::{RepoError, Result};

/// HTTP client for a single configured chart repository
pub struct MuseumClient {
    http: reqwest::Client,
    base_url: String,
    chart_name: String,
    dialect: ApiDialect,
    basic_auth: Option<(String, String)>,
}

impl MuseumClient {
    /// Build a client from the resource source configuration
    ///
    /// Installs the custom CA and client identity into the TLS stack when
    /// configured. No request timeout is set: a chart upload has no
    /// useful upper bound and the invocation is expected to run to
    /// completion or be killed by the orchestrator.
    pub fn new(source: &Source) -> Result<Self> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if let Some(ca) = &source.tls_ca_cert {
            let certificate = reqwest::Certificate::from_pem(ca.as_bytes()).map_err(|e| {
                RepoError::InvalidConfig {
                    message: format!("tls_ca_cert is not valid PEM: {}", e),
                }
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        match (&source.tls_client_cert, &source.tls_client_key) {
            (Some(cert), Some(key)) => {
                let mut pem = Vec::with_capacity(cert.len() + key.len() + 1);
                pem.extend_from_slice(cert.as_bytes());
                pem.push(b'\n');
                pem.extend_from_slice(key.as_bytes());
                let identity =
                    reqwest::Identity::from_pem(&pem).map_err(|e| RepoError::InvalidConfig {
                        message: format!("client certificate/key pair is not valid PEM: {}", e),
                    })?;
                builder = builder.identity(identity);
            }
            (None, None) => {}
            _ => {
                return Err(RepoError::InvalidConfig {
                    message: "tls_client_cert and tls_client_key must be supplied together"
                        .to_string(),
                });
            }
        }

        let http = builder.build().map_err(|e| RepoError::Network {
            message: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: source.base_url().to_string(),
            chart_name: source.chart_name.clone(),
            dialect: ApiDialect::from_harbor_flag(source.harbor_api),
            basic_auth: source
                .basic_auth()
                .map(|(u, p)| (u.to_string(), p.to_string())),
        })
    }

    pub fn dialect(&self) -> ApiDialect {
        self.dialect
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorized(self.http.get(url))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.basic_auth {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        }
    }

    /// Fetch the full version listing for the tracked chart
    pub async fn list_chart(&self) -> Result<Vec<Value>> {
        let url = format!("{}/{}", self.base_url, self.chart_name);
        let response = self.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RepoError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let listing: Vec<Value> = serde_json::from_str(&body)?;
        Ok(listing)
    }

    /// Fetch the metadata document for one published version
    pub async fn fetch_version(&self, version: &str) -> Result<Value> {
        let url = format!("{}/{}/{}", self.base_url, self.chart_name, version);
        let response = self.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RepoError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Upload a built archive, shaping the payload per dialect
    ///
    /// Expects HTTP 201. The 201 body is inspected further: a present
    /// `error` field or a `saved` field that is not exactly `true` both
    /// reject the upload even though the transport accepted it.
    pub async fn upload(&self, archive: &Path, force: bool) -> Result<()> {
        let data = tokio::fs::read(archive).await?;
        let size = data.len() as u64;
        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| RepoError::InvalidConfig {
                message: format!("archive path has no file name: {}", archive.display()),
            })?;

        let mut url = Url::parse(&self.base_url).map_err(|e| RepoError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if force {
            url.query_pairs_mut().append_pair("force", "true");
        }

        let request = self.authorized(self.http.post(url));
        let request = if self.dialect.uses_multipart_upload() {
            let part = Part::bytes(data).file_name(file_name);
            request.multipart(Form::new().part("chart", part))
        } else {
            request
                .header(CONTENT_LENGTH, size)
                .header(
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name),
                )
                .body(data)
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() != 201 {
            return Err(RepoError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: Value = serde_json::from_str(&body).map_err(|e| RepoError::InvalidResponse {
            message: format!("upload response is not JSON: {}", e),
        })?;

        if let Some(error) = decoded.get("error").and_then(Value::as_str) {
            return Err(RepoError::UploadRejected {
                message: error.to_string(),
            });
        }
        if decoded.get("saved").and_then(Value::as_bool) != Some(true) {
            return Err(RepoError::NotSaved);
        }

        Ok(())
    }

    /// Download an archive or signature file
    ///
    /// Verifies the SHA-256 digest when the caller has one from the
    /// version metadata.
    pub async fn download(&self, url: &str, expected_digest: Option<&str>) -> Result<Vec<u8>> {
        let response = self.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(RepoError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data = response.bytes().await?.to_vec();

        match expected_digest {
            Some(expected) => {
                let actual = compute_digest(&data);
                if !digest_matches(expected, &actual) {
                    return Err(RepoError::IntegrityCheckFailed {
                        expected: expected.to_string(),
                        actual,
                    });
                }
            }
            None => {
                tracing::warn!("no digest in version metadata, skipping integrity check");
            }
        }

        Ok(data)
    }
}

/// Version field of one listing entry, tolerating both dialect shapes
pub fn entry_version(entry: &Value) -> Option<&str> {
    entry
        .get("version")
        .or_else(|| entry.get("metadata").and_then(|m| m.get("version")))
        .and_then(Value::as_str)
}

/// Digest field of one listing entry, tolerating both dialect shapes
pub fn entry_digest(entry: &Value) -> Option<&str> {
    entry
        .get("digest")
        .or_else(|| entry.get("metadata").and_then(|m| m.get("digest")))
        .and_then(Value::as_str)
}

/// Resolve an archive reference from version metadata to a fetchable URL
///
/// Absolute references are used verbatim. Relative references resolve to
/// a sibling of the chart API path with the `api` segment stripped:
/// `https://host/api/charts` serves archives from `https://host/charts/`.
pub fn resolve_download_url(server_url: &str, reference: &str) -> Result<String> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Ok(reference.to_string());
    }

    let base = Url::parse(server_url.trim_end_matches('/')).map_err(|e| RepoError::InvalidUrl {
        url: server_url.to_string(),
        reason: e.to_string(),
    })?;

    let file_name = reference.rsplit('/').next().unwrap_or(reference);
    let kept: Vec<String> = base
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty() && *s != "api")
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let mut path = String::new();
    for segment in &kept {
        path.push('/');
        path.push_str(segment);
    }
    path.push('/');
    path.push_str(file_name);

    let mut resolved = base;
    resolved.set_path(&path);
    resolved.set_query(None);
    Ok(resolved.to_string())
}

/// Compute SHA256 digest of data
pub fn compute_digest(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("sha256:{}", hex::encode(result))
}

/// Check if two digests match (supports various formats)
pub fn digest_matches(expected: &str, actual: &str) -> bool {
    let normalize = |digest: &str| {
        digest
            .trim()
            .to_lowercase()
            .replace("sha256:", "")
            .replace("sha256-", "")
    };

    normalize(expected) == normalize(actual)
}
