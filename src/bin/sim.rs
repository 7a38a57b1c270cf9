//! One-shot agents fetch against the configured data service.
//!
//! `voicecraft-sim --mock` runs the same query against an in-process store
//! seeded with two agents.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use log::{error, info};
use serde_json::json;
use voicecraft::agents::remote::{TABLE, list_agents};
use voicecraft::config::Settings;
use voicecraft::data::{self, DataService, MemoryDataService};

fn mock_service() -> Arc<dyn DataService> {
    let now = Utc::now().to_rfc3339();
    Arc::new(MemoryDataService::with_rows(
        TABLE,
        vec![
            json!({"id": "1", "name": "Agent 1", "status": "active", "created_at": now}),
            json!({"id": "2", "name": "Agent 2", "status": "draft", "created_at": now}),
        ],
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mock = env::args().skip(1).any(|arg| arg == "--mock");
    let service = if mock {
        mock_service()
    } else {
        let root = env::current_dir().context("failed to resolve working directory")?;
        let settings = Settings::load(&root)?;
        data::connect(&settings.data_service)?
    };

    info!("Starting agents fetch simulation against {}", service.name());
    let agents = match list_agents(service.as_ref()).await {
        Ok(Some(agents)) => agents,
        Ok(None) => {
            error!("Simulation failed: no data returned");
            bail!("agents query returned no data");
        }
        Err(err) => {
            error!("Simulation failed: {}", err);
            return Err(err).context("agents query failed");
        }
    };

    info!("Simulation success: fetched {} agents", agents.len());
    if let Some(first) = agents.first() {
        info!("First agent: {}", serde_json::to_string(first)?);
    }
    Ok(())
}
