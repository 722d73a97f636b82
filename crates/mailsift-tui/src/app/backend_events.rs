use super::{App, Screen};
use crate::tui_event::BackendEvent;

impl App {
    /// Apply an event from the backend task.
    ///
    /// Overlapping extractions are allowed and not reconciled: each request
    /// delivers one terminal event and the last one applied wins the result
    /// set.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::ExtractionStarted => {
                self.loading = true;
            }
            BackendEvent::ExtractionComplete(outcome) => {
                self.loading = false;
                self.cached = outcome.cached;
                let stats = outcome.stats.clone();
                let count = outcome.count;
                self.table.ingest(outcome.emails);
                self.cursor_row = 0;
                // A stale detail row may now be out of range.
                if matches!(self.screen, Screen::Detail(_)) {
                    self.screen = Screen::Results;
                }

                let mut msg = format!(
                    "{} emails from {} URL{} in {:.2}s",
                    count,
                    stats.urls_processed,
                    if stats.urls_processed == 1 { "" } else { "s" },
                    stats.processing_time
                );
                if self.cached {
                    msg.push_str(" (cached)");
                }
                self.stats = Some(stats);
                self.notifications.info(msg, self.tick);
            }
            BackendEvent::ExtractionFailed(message) => {
                // Prior result set is preserved; only the indicator is cleared.
                self.loading = false;
                self.notifications.error(message, self.tick);
            }
            BackendEvent::ExportComplete { path } => {
                if self.export_state.active {
                    self.export_state.message = Some(format!("Saved to {path}"));
                }
                self.notifications
                    .info(format!("Exported to {path}"), self.tick);
            }
            BackendEvent::ExportFailed(message) => {
                if self.export_state.active {
                    self.export_state.message = Some(format!("Error: {message}"));
                }
                self.notifications.error(message, self.tick);
            }
        }
    }
}
