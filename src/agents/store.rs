//! Immutable snapshots of the agents page and the reducer that produces them.

use std::sync::Arc;

use super::Agent;

/// What the agents page renders: the cached collection and the loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentListState {
    agents: Arc<[Agent]>,
    loading: bool,
}

impl Default for AgentListState {
    fn default() -> Self {
        Self {
            agents: Arc::from(Vec::new()),
            loading: true,
        }
    }
}

impl AgentListState {
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn contains(&self, id: &str) -> bool {
        self.agents.iter().any(|agent| agent.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.agents.iter().position(|agent| agent.id == id)
    }
}

/// State transitions of the agents page.
#[derive(Debug, Clone)]
pub enum AgentAction {
    FetchStarted,
    FetchSettled,
    /// Replace the collection verbatim.
    Replace(Vec<Agent>),
    /// Optimistic removal.
    Remove { id: String },
    /// Inverse of `Remove`: put `agent` back at `index` unless it is already present.
    Restore { agent: Agent, index: usize },
}

/// Produces the next snapshot. Never mutates `state`.
pub fn reduce(state: &AgentListState, action: AgentAction) -> AgentListState {
    match action {
        AgentAction::FetchStarted => AgentListState {
            agents: Arc::clone(&state.agents),
            loading: true,
        },
        AgentAction::FetchSettled => AgentListState {
            agents: Arc::clone(&state.agents),
            loading: false,
        },
        AgentAction::Replace(agents) => AgentListState {
            agents: Arc::from(agents),
            loading: state.loading,
        },
        AgentAction::Remove { id } => {
            if !state.contains(&id) {
                return state.clone();
            }
            let agents: Vec<Agent> = state
                .agents
                .iter()
                .filter(|agent| agent.id != id)
                .cloned()
                .collect();
            AgentListState {
                agents: Arc::from(agents),
                loading: state.loading,
            }
        }
        AgentAction::Restore { agent, index } => {
            if state.contains(&agent.id) {
                return state.clone();
            }
            let mut agents = state.agents.to_vec();
            let index = index.min(agents.len());
            agents.insert(index, agent);
            AgentListState {
                agents: Arc::from(agents),
                loading: state.loading,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentStatus;

    fn agent(id: &str) -> Agent {
        Agent {
            id: id.into(),
            name: format!("Agent {id}"),
            description: None,
            status: AgentStatus::Active,
            created_at: String::from("2024-03-15T00:00:00.000Z"),
            updated_at: String::new(),
        }
    }

    fn ids(state: &AgentListState) -> Vec<&str> {
        state.agents().iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = AgentListState::default();
        assert!(state.loading());
        assert!(state.agents().is_empty());
    }

    #[test]
    fn replace_keeps_given_order() {
        let state = reduce(
            &AgentListState::default(),
            AgentAction::Replace(vec![agent("b"), agent("a"), agent("c")]),
        );
        assert_eq!(ids(&state), vec!["b", "a", "c"]);
        assert!(state.loading());
        let settled = reduce(&state, AgentAction::FetchSettled);
        assert!(!settled.loading());
        assert_eq!(ids(&settled), vec!["b", "a", "c"]);
    }

    #[test]
    fn remove_leaves_previous_snapshot_untouched() {
        let before = reduce(
            &AgentListState::default(),
            AgentAction::Replace(vec![agent("a"), agent("b")]),
        );
        let after = reduce(&before, AgentAction::Remove { id: "a".into() });
        assert_eq!(ids(&before), vec!["a", "b"]);
        assert_eq!(ids(&after), vec!["b"]);
    }

    #[test]
    fn restore_is_inverse_of_remove() {
        let before = reduce(
            &AgentListState::default(),
            AgentAction::Replace(vec![agent("a"), agent("b"), agent("c")]),
        );
        let removed = reduce(&before, AgentAction::Remove { id: "b".into() });
        let restored = reduce(
            &removed,
            AgentAction::Restore {
                agent: agent("b"),
                index: 1,
            },
        );
        assert_eq!(restored, before);

        let twice = reduce(
            &restored,
            AgentAction::Restore {
                agent: agent("b"),
                index: 0,
            },
        );
        assert_eq!(ids(&twice), vec!["a", "b", "c"]);
    }

    #[test]
    fn restore_clamps_index() {
        let state = reduce(
            &AgentListState::default(),
            AgentAction::Restore {
                agent: agent("z"),
                index: 10,
            },
        );
        assert_eq!(ids(&state), vec!["z"]);
    }
}
