use std::time::Instant;

use super::App;

// Implementation block for tick-related logic in the App.
impl App {
    /// Called on every tick of the event loop: applies finished background
    /// calls and expires old toasts.
    pub fn on_tick(&mut self) {
        self.drain_remote_events();
        self.toasts.prune(Instant::now());
    }
}
