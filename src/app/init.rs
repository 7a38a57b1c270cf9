use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;

use super::App;
use crate::agents::AgentListController;
use crate::config::Settings;
use crate::data::DataService;
use crate::notify::ToastCenter;
use crate::panels::agents::AgentsPanel;
use crate::routes::Route;

impl App {
    /// Creates the application state on the dashboard route.
    ///
    /// Nothing is fetched until the agents page is first shown.
    pub fn new(settings: &Settings, service: Arc<dyn DataService>) -> Self {
        let fallback_allowed = settings.allows_sample_fallback(service.is_configured());
        debug!(
            "Initializing App ({}, service {}, sample fallback {})",
            settings.environment.label(),
            service.name(),
            fallback_allowed
        );

        let (remote_tx, remote_rx) = mpsc::unbounded_channel();
        let status_message = if service.is_configured() {
            String::from("Tab to switch pages, / to search, q to quit")
        } else {
            String::from("No data service configured: showing sample agents")
        };

        Self {
            should_quit: false,
            route: Route::Dashboard,
            history: Vec::new(),
            agents: AgentListController::new(fallback_allowed),
            agents_panel: AgentsPanel::new(),
            status_message,
            toasts: ToastCenter::new(Duration::from_secs(settings.toast_duration_secs.max(1))),
            overlay: None,
            activity_window: 0,
            environment: settings.environment,
            service,
            remote_tx,
            remote_rx,
            tick_rate: Duration::from_millis(settings.tick_rate_ms.max(10)),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }
}
