//! In-process row store.
//!
//! Holds tables of JSON rows and answers the same queries as the remote
//! service. Failures can be scripted per operation, and every executed query is
//! recorded so callers can assert on what was sent.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::{DataService, ErrorInfo, Operation, Query, QueryResponse, ServiceError};

/// How a scripted call should fail.
#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    /// The store answers with `error` set.
    Remote(ErrorInfo),
    /// The server answers with a non-success status.
    Status(u16),
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Value>>,
    failures: VecDeque<(Operation, ScriptedFailure)>,
    log: Vec<Query>,
}

#[derive(Default)]
pub struct MemoryDataService {
    inner: Mutex<Inner>,
}

impl MemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with `rows` stored in `table`.
    pub fn with_rows(table: impl Into<String>, rows: Vec<Value>) -> Self {
        let service = Self::new();
        service.replace_rows(table, rows);
        service
    }

    pub fn replace_rows(&self, table: impl Into<String>, rows: Vec<Value>) {
        self.lock().tables.insert(table.into(), rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// The next query of kind `operation` fails with `failure`.
    pub fn fail_next(&self, operation: Operation, failure: ScriptedFailure) {
        self.lock().failures.push_back((operation, failure));
    }

    pub fn executed_count(&self, operation: Operation) -> usize {
        self.lock()
            .log
            .iter()
            .filter(|query| query.operation == operation)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DataService for MemoryDataService {
    fn name(&self) -> &str {
        "memory"
    }

    async fn execute(&self, query: Query) -> Result<QueryResponse, ServiceError> {
        let mut inner = self.lock();
        inner.log.push(query.clone());

        if let Some(pos) = inner
            .failures
            .iter()
            .position(|(operation, _)| *operation == query.operation)
            && let Some((_, failure)) = inner.failures.remove(pos)
        {
            debug!("Scripted failure for {:?}: {:?}", query.operation, failure);
            return match failure {
                ScriptedFailure::Remote(info) => Ok(QueryResponse::error(info)),
                ScriptedFailure::Status(status) => Err(ServiceError::Status {
                    status,
                    body: String::from("scripted failure"),
                }),
            };
        }

        match query.operation {
            Operation::Select => {
                let mut rows = inner.tables.get(&query.table).cloned().unwrap_or_default();
                if let Some(order) = &query.order {
                    rows.sort_by(|a, b| {
                        let ordering = compare_values(&a[&order.column], &b[&order.column]);
                        if order.ascending {
                            ordering
                        } else {
                            ordering.reverse()
                        }
                    });
                }
                Ok(QueryResponse::data(Value::Array(rows)))
            }
            Operation::Delete => {
                if query.filters.is_empty() {
                    return Ok(QueryResponse::error(ErrorInfo::new(
                        "delete requires at least one filter",
                    )));
                }
                if let Some(rows) = inner.tables.get_mut(&query.table) {
                    rows.retain(|row| {
                        !query
                            .filters
                            .iter()
                            .all(|filter| row[&filter.column] == filter.value)
                    });
                }
                Ok(QueryResponse::empty())
            }
        }
    }
}

/// Orders strings lexically (ISO 8601 timestamps sort correctly that way),
/// numbers numerically, and anything else as equal.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::from;
    use serde_json::json;

    fn seeded() -> MemoryDataService {
        MemoryDataService::with_rows(
            "agents",
            vec![
                json!({"id": "a", "created_at": "2024-01-01T00:00:00.000Z"}),
                json!({"id": "b", "created_at": "2024-03-01T00:00:00.000Z"}),
                json!({"id": "c", "created_at": "2024-02-01T00:00:00.000Z"}),
            ],
        )
    }

    fn ids(response: QueryResponse) -> Vec<String> {
        response
            .data
            .and_then(|data| data.as_array().cloned())
            .unwrap_or_default()
            .into_iter()
            .map(|row| row["id"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn select_orders_descending() {
        let service = seeded();
        let response = service
            .execute(from("agents").select("*").order("created_at", false))
            .await
            .unwrap();
        assert_eq!(ids(response), vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn delete_removes_matching_rows_only() {
        let service = seeded();
        service
            .execute(from("agents").delete().eq("id", "c"))
            .await
            .unwrap();
        let remaining: Vec<_> = service
            .rows("agents")
            .iter()
            .map(|row| row["id"].clone())
            .collect();
        assert_eq!(remaining, vec![json!("a"), json!("b")]);
    }

    #[tokio::test]
    async fn scripted_failures_apply_once_per_operation() {
        let service = seeded();
        service.fail_next(Operation::Delete, ScriptedFailure::Status(500));
        service.fail_next(
            Operation::Select,
            ScriptedFailure::Remote(ErrorInfo::new("boom")),
        );

        let select = service.execute(from("agents").select("*")).await.unwrap();
        assert_eq!(select.error.map(|e| e.message), Some("boom".to_string()));

        let delete = service.execute(from("agents").delete().eq("id", "a")).await;
        assert!(matches!(delete, Err(ServiceError::Status { status: 500, .. })));
        assert_eq!(service.rows("agents").len(), 3);

        let again = service.execute(from("agents").select("*")).await.unwrap();
        assert!(again.error.is_none());
        assert_eq!(service.executed_count(Operation::Select), 2);
        assert_eq!(service.executed_count(Operation::Delete), 1);
    }

    #[tokio::test]
    async fn unfiltered_delete_is_refused() {
        let service = seeded();
        let response = service.execute(from("agents").delete()).await.unwrap();
        assert!(response.into_result().is_err());
        assert_eq!(service.rows("agents").len(), 3);
    }

    #[tokio::test]
    async fn unknown_table_selects_nothing() {
        let service = MemoryDataService::new();
        let response = service.execute(from("voices").select("*")).await.unwrap();
        assert_eq!(response.data, Some(json!([])));
    }
}
