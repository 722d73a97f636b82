use std::collections::VecDeque;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// A transient, auto-dismissing notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: Level,
    /// Tick at which the toast was pushed.
    pub born: usize,
}

/// Toasts live this many ticks (~100ms each) before being pruned.
pub const TOAST_TTL_TICKS: usize = 40;

/// The notification sink: a bounded queue of toasts with tick-based expiry.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    toasts: VecDeque<Toast>,
}

impl NotificationState {
    pub fn info(&mut self, message: impl Into<String>, tick: usize) {
        self.push(message.into(), Level::Info, tick);
    }

    pub fn warn(&mut self, message: impl Into<String>, tick: usize) {
        self.push(message.into(), Level::Warn, tick);
    }

    pub fn error(&mut self, message: impl Into<String>, tick: usize) {
        self.push(message.into(), Level::Error, tick);
    }

    fn push(&mut self, message: String, level: Level, tick: usize) {
        tracing::debug!(%message, ?level, "toast");
        if self.toasts.len() >= 8 {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            message,
            level,
            born: tick,
        });
    }

    /// Drop expired toasts. Called from the tick handler.
    pub fn prune(&mut self, tick: usize) {
        self.toasts
            .retain(|t| tick.wrapping_sub(t.born) < TOAST_TTL_TICKS);
    }

    /// Most recent toasts first, capped for display.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev().take(4)
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }
}
