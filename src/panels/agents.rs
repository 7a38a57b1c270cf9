use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::agents::{Agent, AgentStatus};

pub const TITLE: &str = "My Agents";
pub const DESCRIPTION: &str = "Manage your AI voice agents here.";
pub const SEARCH_PLACEHOLDER: &str = "Search agents...";
pub const EMPTY_MESSAGE: &str = "No agents found. Create your first one!";

/// Badge styles, named after the web component variants they replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
}

pub fn badge_variant(status: &AgentStatus) -> BadgeVariant {
    match status {
        AgentStatus::Active => BadgeVariant::Default,
        AgentStatus::Draft => BadgeVariant::Secondary,
        AgentStatus::Archived => BadgeVariant::Outline,
        AgentStatus::Unrecognized(_) => BadgeVariant::Secondary,
    }
}

/// `active` -> `Active`.
pub fn status_label(status: &AgentStatus) -> String {
    let raw = status.as_str();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats a stored timestamp as `Mar 15, 2024`; unparsable input comes back as is.
pub fn format_created_at(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Case-insensitive match on name or description. Keeps the input order.
pub fn filter_agents<'a>(agents: &'a [Agent], query: &str) -> Vec<&'a Agent> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return agents.iter().collect();
    }
    agents
        .iter()
        .filter(|agent| {
            agent.name.to_lowercase().contains(&needle)
                || agent
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

/// One table row, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub badge: BadgeVariant,
    pub created: String,
}

impl AgentRow {
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.name.clone(),
            description: agent.description.clone().filter(|d| !d.is_empty()),
            status: status_label(&agent.status),
            badge: badge_variant(&agent.status),
            created: format_created_at(&agent.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ViewDetails,
    EditAgent,
    DeleteAgent,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [Self::ViewDetails, Self::EditAgent, Self::DeleteAgent];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ViewDetails => "View Details",
            Self::EditAgent => "Edit Agent",
            Self::DeleteAgent => "Delete Agent",
        }
    }
}

/// Search box and selection of the agents table.
#[derive(Debug, Default)]
pub struct AgentsPanel {
    search: String,
    searching: bool,
    selected: usize,
}

impl AgentsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn stop_search(&mut self) {
        self.searching = false;
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.selected = 0;
    }

    /// Rows matching the current search.
    pub fn rows(&self, agents: &[Agent]) -> Vec<AgentRow> {
        filter_agents(agents, &self.search)
            .into_iter()
            .map(AgentRow::from_agent)
            .collect()
    }

    /// Selected index clamped to `len` visible rows.
    pub fn selected_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.selected.min(len - 1))
        }
    }

    pub fn selected_agent<'a>(&self, agents: &'a [Agent]) -> Option<&'a Agent> {
        let visible = filter_agents(agents, &self.search);
        self.selected_index(visible.len()).map(|idx| visible[idx])
    }

    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(len - 1) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }
}
