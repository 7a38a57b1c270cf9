//! Request payloads for the HTTP query endpoint.

use serde::Serialize;
use serde_json::Value;

use super::{Operation, Query};

#[derive(Serialize)]
pub struct QueryPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<&'a str>,
    pub table: &'a str,
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderPayload<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterPayload<'a>>,
}

#[derive(Serialize)]
pub struct OrderPayload<'a> {
    pub column: &'a str,
    pub ascending: bool,
}

#[derive(Serialize)]
pub struct FilterPayload<'a> {
    pub column: &'a str,
    pub op: &'static str,
    pub value: &'a Value,
}

impl<'a> QueryPayload<'a> {
    pub fn new(project_id: Option<&'a str>, query: &'a Query) -> Self {
        Self {
            project_id,
            table: &query.table,
            operation: query.operation,
            columns: query.columns.as_deref(),
            order: query.order.as_ref().map(|order| OrderPayload {
                column: &order.column,
                ascending: order.ascending,
            }),
            filters: query
                .filters
                .iter()
                .map(|filter| FilterPayload {
                    column: &filter.column,
                    op: "eq",
                    value: &filter.value,
                })
                .collect(),
        }
    }
}
