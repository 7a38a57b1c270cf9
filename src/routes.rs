//! Route table and sidebar navigation.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Agents,
    NewAgent,
    AgentDetail(String),
    EditAgent(String),
    Voices,
    Analytics,
    Settings,
    NotFound(String),
}

impl Route {
    /// Resolves a path such as `/agents/42/edit`.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Dashboard,
            ["agents"] => Self::Agents,
            ["agents", "new"] => Self::NewAgent,
            ["agents", id] => Self::AgentDetail((*id).to_string()),
            ["agents", id, "edit"] => Self::EditAgent((*id).to_string()),
            ["voices"] => Self::Voices,
            ["analytics"] => Self::Analytics,
            ["settings"] => Self::Settings,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => String::from("/"),
            Self::Agents => String::from("/agents"),
            Self::NewAgent => String::from("/agents/new"),
            Self::AgentDetail(id) => format!("/agents/{}", id),
            Self::EditAgent(id) => format!("/agents/{}/edit", id),
            Self::Voices => String::from("/voices"),
            Self::Analytics => String::from("/analytics"),
            Self::Settings => String::from("/settings"),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Text shown for routes whose page is not built yet.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::Dashboard | Self::Agents => None,
            Self::NewAgent => Some(String::from("Agent Builder Coming Soon")),
            Self::AgentDetail(id) => Some(format!("Agent {} Details Coming Soon", id)),
            Self::EditAgent(id) => Some(format!("Agent {} Editor Coming Soon", id)),
            Self::Voices => Some(String::from("Voice Library Coming Soon")),
            Self::Analytics => Some(String::from("Analytics Module Coming Soon")),
            Self::Settings => Some(String::from("Settings Module Coming Soon")),
            Self::NotFound(path) => Some(format!("Nothing lives at {}", path)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    Exact,
    Prefix,
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub matching: Matching,
}

impl NavItem {
    pub fn route(&self) -> Route {
        Route::parse(self.path)
    }

    pub fn is_active(&self, current: &str) -> bool {
        match self.matching {
            Matching::Exact => current == self.path,
            Matching::Prefix => current.starts_with(self.path),
        }
    }
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        label: "Dashboard",
        path: "/",
        icon: "▦",
        matching: Matching::Exact,
    },
    NavItem {
        label: "My Agents",
        path: "/agents",
        icon: "☺",
        matching: Matching::Prefix,
    },
    NavItem {
        label: "Voice Library",
        path: "/voices",
        icon: "♪",
        matching: Matching::Prefix,
    },
    NavItem {
        label: "Analytics",
        path: "/analytics",
        icon: "▤",
        matching: Matching::Prefix,
    },
    NavItem {
        label: "Settings",
        path: "/settings",
        icon: "⚙",
        matching: Matching::Prefix,
    },
];

/// Index of the sidebar entry highlighted for `route`.
pub fn active_nav_index(route: &Route) -> Option<usize> {
    let path = route.path();
    NAV_ITEMS.iter().position(|item| item.is_active(&path))
}
