use crate::domain::model::{RecordPage, TreeRecord};
use crate::domain::ports::RecordSource;
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the tabular store's REST API.
pub struct AirtableClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl AirtableClient {
    pub fn new(api_url: &str, api_key: &str, base_id: &str, table_name: &str) -> Result<Self> {
        let mut endpoint = Url::parse(api_url).map_err(|e| ReportError::ConfigError {
            message: format!("invalid tabular store URL '{}': {}", api_url, e),
        })?;
        endpoint
            .path_segments_mut()
            .map_err(|_| ReportError::ConfigError {
                message: format!("tabular store URL '{}' cannot be a base", api_url),
            })?
            .pop_if_empty()
            .push(base_id)
            .push(table_name);

        Ok(Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            endpoint,
        })
    }
}

#[async_trait]
impl RecordSource for AirtableClient {
    async fn fetch_page(&self, offset: Option<&str>) -> Result<RecordPage> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .timeout(FETCH_TIMEOUT);

        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        tracing::debug!("📡 Requesting records page from {}", self.endpoint);
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ReportError::ProcessingError {
                message: format!("record fetch failed with status: {}", response.status()),
            });
        }

        let payload: serde_json::Value = response.json().await?;

        let records = payload
            .get("records")
            .and_then(|v| v.as_array())
            .map(|rows| rows.iter().map(TreeRecord::from_row).collect())
            .unwrap_or_default();

        let next_offset = payload
            .get("offset")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Ok(RecordPage {
            records,
            offset: next_offset,
        })
    }
}
