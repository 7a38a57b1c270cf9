//! Remote data service access.
//!
//! Agent records live in a remote row-store. This module describes the
//! table-scoped queries the dashboard issues against it (`select`/`order`,
//! `delete`/`eq`), the `(data, error)` envelope every call returns, and the
//! `DataService` trait that hides the transport.

/// `http` module: JSON-over-HTTP implementation talking to the query endpoint.
pub mod http;
/// `memory` module: in-process table with scripted failures.
pub mod memory;
/// `models` module: wire payloads of the HTTP transport.
mod models;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DataServiceConfig;

pub use http::HttpDataService;
pub use memory::MemoryDataService;

/// Every backend the dashboard can read agents from implements this trait.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Name used in logs and the status bar.
    fn name(&self) -> &str;

    /// False when the service is a stand-in for a missing remote configuration.
    fn is_configured(&self) -> bool {
        true
    }

    /// Runs one query and returns the store's `(data, error)` envelope.
    ///
    /// Transport failures surface as `Err`; failures reported by the store
    /// itself arrive as `Ok` with `error` set.
    async fn execute(&self, query: Query) -> Result<QueryResponse, ServiceError>;
}

/// Builds the service described by the configuration.
///
/// Without a server URL the dashboard still starts, backed by
/// `UnconfiguredDataService`.
pub fn connect(config: &DataServiceConfig) -> Result<Arc<dyn DataService>> {
    match config.server_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            let service = HttpDataService::new(config)?;
            info!("Data service configured at {}", url);
            Ok(Arc::new(service))
        }
        _ => {
            info!("No data service URL configured");
            Ok(Arc::new(UnconfiguredDataService))
        }
    }
}

/// Starts a table-scoped query, e.g. `from("agents").select("*")`.
pub fn from(table: impl Into<String>) -> Table {
    Table {
        name: table.into(),
    }
}

/// A table reference waiting for its operation.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
}

impl Table {
    pub fn select(self, columns: impl Into<String>) -> Query {
        Query {
            table: self.name,
            operation: Operation::Select,
            columns: Some(columns.into()),
            order: None,
            filters: Vec::new(),
        }
    }

    pub fn delete(self) -> Query {
        Query {
            table: self.name,
            operation: Operation::Delete,
            columns: None,
            order: None,
            filters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Select,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Equality filter; the only comparison the dashboard needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

/// A fully built query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub operation: Operation,
    pub columns: Option<String>,
    pub order: Option<Order>,
    pub filters: Vec<Filter>,
}

impl Query {
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.into(),
        });
        self
    }
}

/// Error details reported by the store inside a response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
        }
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

/// The `(data, error)` envelope returned for every query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

impl QueryResponse {
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn error(error: ErrorInfo) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Folds a store-reported error into `ServiceError::Remote`.
    pub fn into_result(self) -> Result<Option<Value>, ServiceError> {
        match self.error {
            Some(error) => Err(ServiceError::Remote(error)),
            None => Ok(self.data),
        }
    }
}

/// Failures of a data service call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("data service is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("store error: {0}")]
    Remote(ErrorInfo),
    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

/// Stand-in used when no server URL is configured. Every call fails.
pub struct UnconfiguredDataService;

#[async_trait]
impl DataService for UnconfiguredDataService {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn is_configured(&self) -> bool {
        false
    }

    async fn execute(&self, query: Query) -> Result<QueryResponse, ServiceError> {
        debug!("Rejecting {:?} on {}: no data service", query.operation, query.table);
        Err(ServiceError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_builder_keeps_columns_and_order() {
        let query = from("agents").select("*").order("created_at", false);
        assert_eq!(query.table, "agents");
        assert_eq!(query.operation, Operation::Select);
        assert_eq!(query.columns.as_deref(), Some("*"));
        assert_eq!(
            query.order,
            Some(Order {
                column: "created_at".into(),
                ascending: false
            })
        );
        assert!(query.filters.is_empty());
    }

    #[test]
    fn delete_builder_collects_eq_filters() {
        let query = from("agents").delete().eq("id", "42");
        assert_eq!(query.operation, Operation::Delete);
        assert_eq!(query.columns, None);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].column, "id");
        assert_eq!(query.filters[0].value, json!("42"));
    }

    #[test]
    fn store_error_becomes_remote_error() {
        let response = QueryResponse::error(ErrorInfo::new("permission denied"));
        match response.into_result() {
            Err(ServiceError::Remote(info)) => assert_eq!(info.message, "permission denied"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn envelope_parses_null_members() {
        let response: QueryResponse =
            serde_json::from_str(r#"{"data": null, "error": null}"#).unwrap();
        assert_eq!(response, QueryResponse::empty());
        assert_eq!(response.into_result().unwrap(), None);
    }

    #[test]
    fn connect_without_url_is_unconfigured() {
        let service = connect(&DataServiceConfig::default()).unwrap();
        assert!(!service.is_configured());
        assert_eq!(service.name(), "unconfigured");
    }

    #[tokio::test]
    async fn unconfigured_service_rejects_everything() {
        let result = UnconfiguredDataService
            .execute(from("agents").select("*"))
            .await;
        assert!(matches!(result, Err(ServiceError::NotConfigured)));
    }
}
