use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, AppAction, OverlayState};
use crate::panels::agents::RowAction;
use crate::routes::{NAV_ITEMS, Route};

impl App {
    /// The main entry point for handling keyboard events.
    ///
    /// Overlays capture all input, then the agents search box, then global
    /// shortcuts, and finally the keys of the current page.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.execute_action(AppAction::Quit);
            return;
        }

        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return;
        }

        if self.route == Route::Agents && self.agents_panel.is_searching() {
            self.handle_search_key(key);
            return;
        }

        if let Some(action) = global_action(key) {
            self.execute_action(action);
            return;
        }

        match self.route {
            Route::Agents => self.handle_agents_key(key),
            Route::Dashboard => self.handle_dashboard_key(key),
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        let Some(OverlayState::RowActions(menu)) = self.overlay.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.overlay = None,
            KeyCode::Up | KeyCode::Char('k') => menu.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => menu.move_selection(1),
            KeyCode::Enter => {
                let action = menu.highlighted();
                self.execute_action(AppAction::RunRowAction(action));
            }
            KeyCode::Char('v') => self.execute_action(AppAction::RunRowAction(RowAction::ViewDetails)),
            KeyCode::Char('e') => self.execute_action(AppAction::RunRowAction(RowAction::EditAgent)),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.execute_action(AppAction::RunRowAction(RowAction::DeleteAgent))
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.agents_panel.clear_search();
                self.agents_panel.stop_search();
            }
            KeyCode::Enter => self.agents_panel.stop_search(),
            KeyCode::Backspace => self.agents_panel.pop_search_char(),
            KeyCode::Char(ch) => self.agents_panel.push_search_char(ch),
            _ => {}
        }
    }

    fn handle_agents_key(&mut self, key: KeyEvent) {
        let visible = self.agents_panel.rows(self.agents.agents()).len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.agents_panel.move_selection(-1, visible),
            KeyCode::Down | KeyCode::Char('j') => self.agents_panel.move_selection(1, visible),
            KeyCode::Home => self.agents_panel.move_selection(-(visible as isize), visible),
            KeyCode::End => self.agents_panel.move_selection(visible as isize, visible),
            KeyCode::Enter => self.execute_action(AppAction::OpenRowActions),
            KeyCode::Char('/') => self.agents_panel.start_search(),
            KeyCode::Char('r') => self.execute_action(AppAction::Refresh),
            KeyCode::Char('n') => self.execute_action(AppAction::Navigate(Route::NewAgent)),
            KeyCode::Char('v') => self.execute_action(AppAction::RunRowAction(RowAction::ViewDetails)),
            KeyCode::Char('e') => self.execute_action(AppAction::RunRowAction(RowAction::EditAgent)),
            KeyCode::Char('d') | KeyCode::Delete => self.execute_action(AppAction::DeleteSelected),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('w') => self.execute_action(AppAction::CycleActivityWindow),
            KeyCode::Char('n') => self.execute_action(AppAction::Navigate(Route::NewAgent)),
            _ => {}
        }
    }
}

/// Shortcuts available on every page.
fn global_action(key: KeyEvent) -> Option<AppAction> {
    match key.code {
        KeyCode::Char('q') => Some(AppAction::Quit),
        KeyCode::Tab => Some(AppAction::NextPage),
        KeyCode::BackTab => Some(AppAction::PreviousPage),
        KeyCode::Esc => Some(AppAction::Back),
        KeyCode::Char('x') => Some(AppAction::DismissToasts),
        KeyCode::Char(ch @ '1'..='5') => {
            let index = ch as usize - '1' as usize;
            NAV_ITEMS
                .get(index)
                .map(|item| AppAction::Navigate(item.route()))
        }
        _ => None,
    }
}
