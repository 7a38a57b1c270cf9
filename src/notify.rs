//! Transient user-facing notifications.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Toasts currently on screen. Each one disappears after `lifetime`.
pub struct ToastCenter {
    lifetime: Duration,
    active: Vec<(Instant, Toast)>,
    unread: usize,
}

impl ToastCenter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            active: Vec::new(),
            unread: 0,
        }
    }

    pub fn push(&mut self, toast: Toast) {
        self.push_at(toast, Instant::now());
    }

    pub fn push_at(&mut self, toast: Toast, now: Instant) {
        self.active.push((now, toast));
        self.unread += 1;
    }

    /// Drops expired toasts.
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.active
            .retain(|(shown_at, _)| now.saturating_duration_since(*shown_at) < lifetime);
    }

    /// Visible toasts, newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().rev().map(|(_, toast)| toast)
    }

    pub fn dismiss_all(&mut self) {
        self.active.clear();
    }

    /// Notifications raised since the counter was last cleared.
    pub fn unread(&self) -> usize {
        self.unread
    }

    pub fn mark_read(&mut self) {
        self.unread = 0;
    }
}
