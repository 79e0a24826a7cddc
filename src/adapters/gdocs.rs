use crate::domain::ports::{DocumentEditor, DocumentExporter};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Bearer credentials for the document service, loaded from the local
/// credentials file. Token minting is handled outside this process.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsCredentials {
    pub access_token: String,
}

impl DocsCredentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ReportError::CredentialsError {
            message: format!("cannot read credentials file '{}': {}", path.display(), e),
        })?;
        serde_json::from_str(&raw).map_err(|e| ReportError::CredentialsError {
            message: format!("invalid credentials file '{}': {}", path.display(), e),
        })
    }
}

#[derive(Debug, Serialize)]
struct BatchUpdateBody {
    requests: Vec<EditRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum EditRequest {
    InsertText { location: Location, text: String },
}

#[derive(Debug, Serialize)]
struct Location {
    index: u32,
}

/// Client for the document edit and export APIs.
pub struct GoogleDocsClient {
    client: Client,
    base_url: Url,
    credentials: DocsCredentials,
}

impl GoogleDocsClient {
    pub fn new(api_url: &str, credentials: DocsCredentials) -> Result<Self> {
        let base_url = Url::parse(api_url).map_err(|e| ReportError::ConfigError {
            message: format!("invalid document API URL '{}': {}", api_url, e),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        ))
        .map_err(|e| ReportError::ConfigError {
            message: format!("invalid document API path '{}': {}", path, e),
        })
    }
}

#[async_trait]
impl DocumentEditor for GoogleDocsClient {
    async fn insert_text(&self, doc_id: &str, text: &str) -> Result<()> {
        let endpoint = self.endpoint(&format!("v1/documents/{}:batchUpdate", doc_id))?;
        let body = BatchUpdateBody {
            requests: vec![EditRequest::InsertText {
                location: Location { index: 1 },
                text: text.to_string(),
            }],
        };

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.credentials.access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::DocumentError {
                message: format!(
                    "document update for '{}' failed with status: {}",
                    doc_id,
                    response.status()
                ),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentExporter for GoogleDocsClient {
    async fn export_pdf(&self, doc_id: &str) -> Result<Vec<u8>> {
        let mut endpoint = self.endpoint(&format!("drive/v3/files/{}/export", doc_id))?;
        endpoint
            .query_pairs_mut()
            .append_pair("mimeType", "application/pdf");

        let response = self
            .client
            .get(endpoint)
            .bearer_auth(&self.credentials.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::DocumentError {
                message: format!(
                    "document export for '{}' failed with status: {}",
                    doc_id,
                    response.status()
                ),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
