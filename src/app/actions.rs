use log::debug;

use super::{App, OverlayState, RowActionMenu};
use crate::panels::agents::RowAction;
use crate::panels::dashboard::ACTIVITY_WINDOWS;
use crate::routes::{NAV_ITEMS, Route, active_nav_index};

/// Routes remembered for `Back`; the oldest are forgotten first.
pub(crate) const HISTORY_LIMIT: usize = 32;

/// Everything the user can ask the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Navigate(Route),
    Back,
    NextPage,
    PreviousPage,
    Refresh,
    OpenRowActions,
    RunRowAction(RowAction),
    DeleteSelected,
    DismissToasts,
    CycleActivityWindow,
    Quit,
}

impl App {
    /// The single source of truth for executing an `AppAction`.
    pub fn execute_action(&mut self, action: AppAction) {
        debug!("Executing action {:?}", action);
        match action {
            AppAction::Navigate(route) => self.navigate(route),
            AppAction::Back => self.go_back(),
            AppAction::NextPage => self.cycle_page(1),
            AppAction::PreviousPage => self.cycle_page(-1),
            AppAction::Refresh => {
                if self.route == Route::Agents {
                    self.start_fetch();
                }
            }
            AppAction::OpenRowActions => self.open_row_actions(),
            AppAction::RunRowAction(action) => self.run_row_action(action),
            AppAction::DeleteSelected => {
                if let Some(id) = self.selected_agent_id() {
                    self.start_delete(&id);
                }
            }
            AppAction::DismissToasts => {
                self.toasts.dismiss_all();
                self.toasts.mark_read();
            }
            AppAction::CycleActivityWindow => {
                self.activity_window = (self.activity_window + 1) % ACTIVITY_WINDOWS.len();
            }
            AppAction::Quit => self.should_quit = true,
        }
    }

    /// Shows `route`. Entering the agents page loads the list.
    pub(crate) fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = std::mem::replace(&mut self.route, route);
        if self.history.len() >= HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(previous);
        self.overlay = None;
        self.agents_panel.stop_search();
        self.status_message = format!("Opened {}", self.route);
        if self.route == Route::Agents {
            self.start_fetch();
        }
    }

    fn go_back(&mut self) {
        let Some(previous) = self.history.pop() else {
            return;
        };
        self.route = previous;
        self.overlay = None;
        self.status_message = format!("Back to {}", self.route);
        if self.route == Route::Agents {
            self.start_fetch();
        }
    }

    fn cycle_page(&mut self, delta: isize) {
        let len = NAV_ITEMS.len() as isize;
        let current = active_nav_index(&self.route).map_or(-1, |idx| idx as isize);
        let next = if current < 0 && delta < 0 {
            len - 1
        } else {
            (current + delta).rem_euclid(len)
        };
        self.navigate(NAV_ITEMS[next as usize].route());
    }

    pub(crate) fn selected_agent_id(&self) -> Option<String> {
        self.agents_panel
            .selected_agent(self.agents.agents())
            .map(|agent| agent.id.clone())
    }

    fn open_row_actions(&mut self) {
        if let Some(agent) = self.agents_panel.selected_agent(self.agents.agents()) {
            self.overlay = Some(OverlayState::RowActions(RowActionMenu::new(agent)));
        }
    }

    fn run_row_action(&mut self, action: RowAction) {
        let target = match self.overlay.take() {
            Some(OverlayState::RowActions(menu)) => Some(menu.agent_id),
            None => self.selected_agent_id(),
        };
        let Some(id) = target else {
            return;
        };
        match action {
            RowAction::ViewDetails => self.navigate(Route::AgentDetail(id)),
            RowAction::EditAgent => self.navigate(Route::EditAgent(id)),
            RowAction::DeleteAgent => self.start_delete(&id),
        }
    }
}
