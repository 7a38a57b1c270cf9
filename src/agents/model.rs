use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A configured voice assistant as stored in the `agents` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AgentStatus,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Lifecycle state of an agent.
///
/// Unknown values coming from the store are kept verbatim so they can still
/// be shown; they are treated like drafts everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum AgentStatus {
    #[default]
    Draft,
    Active,
    Archived,
    Unrecognized(String),
}

impl AgentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<Option<String>> for AgentStatus {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None | Some("") | Some("draft") => Self::Draft,
            Some("active") => Self::Active,
            Some("archived") => Self::Archived,
            Some(other) => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<AgentStatus> for String {
    fn from(status: AgentStatus) -> Self {
        status.as_str().to_string()
    }
}

/// The three records shown when a fetch fails in demo mode.
pub fn sample_agents(now: DateTime<Utc>) -> Vec<Agent> {
    let stamp = |at: DateTime<Utc>| at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let updated = stamp(now);
    let sample = |id: &str, name: &str, description: &str, status, days_ago: i64| Agent {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        status,
        created_at: stamp(now - Duration::days(days_ago)),
        updated_at: updated.clone(),
    };

    vec![
        sample(
            "1",
            "Customer Support Bot",
            "Handles general inquiries and FAQs",
            AgentStatus::Active,
            2,
        ),
        sample(
            "2",
            "Sales Assistant",
            "Qualifies leads and schedules appointments",
            AgentStatus::Draft,
            5,
        ),
        sample(
            "3",
            "Legacy Voice Bot",
            "Old version of the main assistant",
            AgentStatus::Archived,
            30,
        ),
    ]
}
