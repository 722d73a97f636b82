mod backend_events;
mod update;
mod util;

use std::path::Path;

use tokio::sync::mpsc;

use mailsift_core::{EmailTable, ExtractionStats, parse_url_lines};

use crate::model::notify::NotificationState;
use crate::model::settings::Settings;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;
use crate::view::export::{ExportDestination, ExportState};

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    UrlEntry,
    Results,
    /// Record detail for a 0-based row of the current page.
    Detail(usize),
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    TextInput,
    UrlEntry,
}

/// Editing state of the URL entry screen: a tiny line-based text editor,
/// one URL per line. `col` is a char offset within the current line.
#[derive(Debug, Clone)]
pub struct UrlEntryState {
    pub lines: Vec<String>,
    pub row: usize,
    pub col: usize,
}

impl Default for UrlEntryState {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }
}

impl UrlEntryState {
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        Self { lines, row, col }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Count of non-blank entries, for the header badge.
    pub fn url_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.trim().is_empty()).count()
    }

    fn byte_col(&self) -> usize {
        self.lines[self.row]
            .char_indices()
            .nth(self.col)
            .map(|(i, _)| i)
            .unwrap_or(self.lines[self.row].len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_col();
        self.lines[self.row].insert(at, c);
        self.col += 1;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_col();
            self.lines[self.row].remove(at);
        } else if self.row > 0 {
            // Join with the previous line.
            let tail = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].chars().count();
            self.lines[self.row].push_str(&tail);
        }
    }

    pub fn newline(&mut self) {
        let at = self.byte_col();
        let tail = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, tail);
        self.row += 1;
        self.col = 0;
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.lines[self.row].chars().count();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.lines[self.row].chars().count() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.lines[self.row].chars().count());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.lines[self.row].chars().count());
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.lines[self.row].chars().count();
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub settings: Settings,

    /// The latest extraction's result set plus the derived table view.
    pub table: EmailTable,
    pub stats: Option<ExtractionStats>,
    pub cached: bool,

    pub url_entry: UrlEntryState,
    /// True while an extraction request is in flight.
    pub loading: bool,
    /// Cursor within the current page (0-based row).
    pub cursor_row: usize,

    pub notifications: NotificationState,
    pub export_state: ExportState,
    pub show_help: bool,
    pub confirm_quit: bool,
    pub should_quit: bool,

    pub tick: usize,
    /// Height of the visible table area (set on resize).
    pub visible_rows: usize,

    /// Channel to the backend listener; absent in unit tests.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let theme = Theme::by_name(&settings.theme_name);
        let table = EmailTable::new(settings.rows_per_page);
        Self {
            screen: Screen::UrlEntry,
            input_mode: InputMode::UrlEntry,
            theme,
            settings,
            table,
            stats: None,
            cached: false,
            url_entry: UrlEntryState::default(),
            loading: false,
            cursor_row: 0,
            notifications: NotificationState::default(),
            export_state: ExportState::default(),
            show_help: false,
            confirm_quit: false,
            should_quit: false,
            tick: 0,
            visible_rows: 20,
            backend_cmd_tx: None,
        }
    }

    /// Validate the URL editor contents and dispatch an extraction request.
    ///
    /// Validation failures stay local: a toast is shown, no command is sent,
    /// the loading flag and the current result set are untouched.
    pub fn submit_urls(&mut self) {
        let text = self.url_entry.text();
        let urls = match parse_url_lines(&text) {
            Ok(urls) => urls,
            Err(e) => {
                self.notifications.warn(e.to_string(), self.tick);
                return;
            }
        };

        let count = urls.len();
        self.loading = true;
        self.screen = Screen::Results;
        self.input_mode = InputMode::Normal;
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::Extract {
                urls,
                filter: self.settings.filter_mode,
                scan_mode: self.settings.scan_mode,
            });
        }
        self.notifications.info(
            format!(
                "Extracting from {count} URL{} ({} scan)...",
                if count == 1 { "" } else { "s" },
                self.settings.scan_mode.label()
            ),
            self.tick,
        );
    }

    /// Copy the full ingested address list (not the export subset).
    pub fn copy_all_to_clipboard(&mut self) {
        if self.table.is_empty() {
            self.notifications.warn("Nothing to copy", self.tick);
            return;
        }
        let addresses = self.table.all_addresses();
        let count = addresses.len();
        let text = addresses.join("\n");
        match util::osc52_copy(&text) {
            Ok(()) => self
                .notifications
                .info(format!("Copied {count} addresses to clipboard"), self.tick),
            Err(e) => self
                .notifications
                .error(format!("Clipboard copy failed: {e}"), self.tick),
        }
    }

    /// Execute the export modal's confirm action.
    pub fn run_export(&mut self) {
        let format = self.export_state.format;
        let destination = self.export_state.destination;
        let path = format!("{}.{}", self.export_state.output_path, format.extension());

        let records = self.table.export_set();
        if records.is_empty() {
            self.export_state.message = Some("Nothing to export".to_string());
            self.notifications.warn("Nothing to export", self.tick);
            return;
        }

        match destination {
            ExportDestination::LocalFile => {
                match mailsift_reporting::write_export(&records, format, Path::new(&path)) {
                    Ok(()) => {
                        self.export_state.message = Some(format!("Saved to {path}"));
                        self.notifications
                            .info(format!("Exported {} addresses to {path}", records.len()), self.tick);
                    }
                    Err(e) => {
                        self.export_state.message = Some(format!("Error: {e}"));
                        self.notifications.error(e.to_string(), self.tick);
                    }
                }
            }
            ExportDestination::Server => {
                let emails: Vec<String> = records.iter().map(|r| r.email.clone()).collect();
                drop(records);
                if let Some(tx) = &self.backend_cmd_tx {
                    let _ = tx.send(BackendCommand::RemoteExport {
                        emails,
                        format,
                        output_path: path,
                    });
                    self.export_state.message = Some("Rendering on server...".to_string());
                } else {
                    self.export_state.message = Some("No server connection".to_string());
                }
            }
        }
    }

    /// Drop the result set and go back to the URL editor.
    pub fn clear_results(&mut self) {
        self.table.clear();
        self.stats = None;
        self.cached = false;
        self.cursor_row = 0;
        self.screen = Screen::UrlEntry;
        self.input_mode = InputMode::UrlEntry;
        self.notifications.info("Results cleared", self.tick);
    }

    /// Number of rows on the current page.
    pub fn page_rows(&self) -> usize {
        self.table.page_info().page_len
    }

    pub(super) fn clamp_cursor_row(&mut self) {
        self.cursor_row = self.cursor_row.min(self.page_rows().saturating_sub(1));
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        // Full-width footer row below everything else.
        let footer_area = ratatui::layout::Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1.min(area.height),
        };
        let body_area = ratatui::layout::Rect {
            height: area.height.saturating_sub(1),
            ..area
        };

        match self.screen {
            Screen::UrlEntry => crate::view::url_entry::render_in(f, self, body_area, footer_area),
            Screen::Results | Screen::Detail(_) => {
                crate::view::results::render_in(f, self, body_area, footer_area);
            }
        }

        if let Screen::Detail(row) = self.screen {
            crate::view::detail::render(f, self, row);
        }

        if self.export_state.active {
            crate::view::export::render(f, self);
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }

        crate::view::notify::render(f, self);
    }
}

#[cfg(test)]
mod tests;
