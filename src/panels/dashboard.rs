//! Static overview content. None of these numbers are computed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy)]
pub struct ActivityItem {
    pub title: &'static str,
    pub time: &'static str,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Copy)]
pub struct SystemStatus {
    pub component: &'static str,
    pub state: &'static str,
}

pub const HEADLINE: &str = "Dashboard";
pub const SUBTITLE: &str = "Overview of your voice agents and performance.";

pub const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        title: "Total Active Agents",
        value: "12",
        change: "+24%",
        trend: Trend::Up,
    },
    StatCard {
        title: "Voice Generations",
        value: "8,542",
        change: "+12%",
        trend: Trend::Up,
    },
    StatCard {
        title: "Avg. Response Time",
        value: "1.2s",
        change: "-8%",
        trend: Trend::Up,
    },
    StatCard {
        title: "API Usage",
        value: "84%",
        change: "+4%",
        trend: Trend::Down,
    },
];

pub const RECENT_ACTIVITY: [ActivityItem; 5] = [
    ActivityItem {
        title: "Customer Support Bot generated 450 responses",
        time: "2 minutes ago",
        kind: ActivityKind::Success,
    },
    ActivityItem {
        title: "Sales Agent V2 triggered a high latency warning",
        time: "1 hour ago",
        kind: ActivityKind::Warning,
    },
    ActivityItem {
        title: "New voice 'Sarah - Professional' added to library",
        time: "3 hours ago",
        kind: ActivityKind::Info,
    },
    ActivityItem {
        title: "Billing threshold reached for current plan",
        time: "5 hours ago",
        kind: ActivityKind::Warning,
    },
    ActivityItem {
        title: "Weekly analytics report generated",
        time: "1 day ago",
        kind: ActivityKind::Success,
    },
];

/// Activity window choices shown above the feed.
pub const ACTIVITY_WINDOWS: [&str; 2] = ["Last 24 Hours", "Last 7 Days"];

pub const UPGRADE_TITLE: &str = "Upgrade Plan";
pub const UPGRADE_BODY: &str =
    "Unlock unlimited voice generations and advanced analytics features.";
pub const UPGRADE_ACTION: &str = "Upgrade to Pro";

pub const SYSTEM_STATUS: [SystemStatus; 3] = [
    SystemStatus {
        component: "Voice Engine",
        state: "Operational",
    },
    SystemStatus {
        component: "API Gateway",
        state: "Operational",
    },
    SystemStatus {
        component: "Database",
        state: "Operational",
    },
];
