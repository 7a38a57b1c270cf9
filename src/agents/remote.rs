use serde_json::Value;

use crate::data::{self, DataService, ServiceError};

use super::Agent;

/// Table holding the agent rows.
pub const TABLE: &str = "agents";

/// All agents, newest first. `Ok(None)` when the store returned no data.
pub async fn list_agents(service: &dyn DataService) -> Result<Option<Vec<Agent>>, ServiceError> {
    let query = data::from(TABLE).select("*").order("created_at", false);
    match service.execute(query).await?.into_result()? {
        Some(Value::Null) | None => Ok(None),
        Some(rows) => Ok(Some(serde_json::from_value(rows)?)),
    }
}

pub async fn delete_agent(service: &dyn DataService, id: &str) -> Result<(), ServiceError> {
    let query = data::from(TABLE).delete().eq("id", id);
    service.execute(query).await?.into_result()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::ScriptedFailure;
    use crate::data::{ErrorInfo, MemoryDataService, Operation, QueryResponse};
    use async_trait::async_trait;
    use serde_json::json;

    #[tokio::test]
    async fn lists_rows_as_agents() {
        let service = MemoryDataService::with_rows(
            TABLE,
            vec![
                json!({"id": "1", "name": "Agent 1", "status": "active", "created_at": "2024-01-01T00:00:00.000Z"}),
                json!({"id": "2", "name": "Agent 2", "status": "draft", "created_at": "2024-02-01T00:00:00.000Z"}),
            ],
        );
        let agents = list_agents(&service).await.unwrap().unwrap();
        let ids: Vec<_> = agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn non_list_payload_is_a_decode_error() {
        struct Scalar;

        #[async_trait]
        impl DataService for Scalar {
            fn name(&self) -> &str {
                "scalar"
            }

            async fn execute(
                &self,
                _query: data::Query,
            ) -> Result<QueryResponse, ServiceError> {
                Ok(QueryResponse::data(json!({"id": "1"})))
            }
        }

        assert!(matches!(
            list_agents(&Scalar).await,
            Err(ServiceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn delete_surfaces_store_errors() {
        let service = MemoryDataService::new();
        service.fail_next(
            Operation::Delete,
            ScriptedFailure::Remote(ErrorInfo::new("row is locked")),
        );
        assert!(matches!(
            delete_agent(&service, "1").await,
            Err(ServiceError::Remote(_))
        ));
        assert!(delete_agent(&service, "1").await.is_ok());
    }
}
