use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::config::DataServiceConfig;

use super::models::QueryPayload;
use super::{DataService, Query, QueryResponse, ServiceError};

/// `DataService` that posts every query to `{server_url}/query`.
pub struct HttpDataService {
    endpoint: String,
    project_id: Option<String>,
    client: Client,
    headers: HeaderMap,
}

impl HttpDataService {
    pub fn new(config: &DataServiceConfig) -> Result<Self> {
        let server_url = config
            .server_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow!("data service needs a server_url"))?;
        let endpoint = format!("{}/query", server_url.trim_end_matches('/'));

        let headers = build_headers(
            config.resolved_api_key().as_deref(),
            config.project_id.as_deref(),
            &config.extra_headers,
        )?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            endpoint,
            project_id: config.project_id.clone(),
            client,
            headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DataService for HttpDataService {
    fn name(&self) -> &str {
        "http"
    }

    async fn execute(&self, query: Query) -> Result<QueryResponse, ServiceError> {
        let payload = QueryPayload::new(self.project_id.as_deref(), &query);
        debug!(
            "POST {} ({:?} on {})",
            self.endpoint, query.operation, query.table
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Data service answered {} for {}", status, query.table);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn invalid(err: impl std::fmt::Display) -> ServiceError {
    ServiceError::InvalidHeader(err.to_string())
}

/// Content type, bearer token, project id and any configured extras.
fn build_headers(
    api_key: Option<&str>,
    project_id: Option<&str>,
    extra: &BTreeMap<String, String>,
) -> Result<HeaderMap, ServiceError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        let value = format!("Bearer {}", key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value).map_err(invalid)?,
        );
    }
    if let Some(project) = project_id {
        headers.insert(
            "x-project-id",
            HeaderValue::from_str(project).map_err(invalid)?,
        );
    }
    for (key, value) in extra {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(invalid)?;
        headers.insert(name, HeaderValue::from_str(value).map_err(invalid)?);
    }
    Ok(headers)
}
