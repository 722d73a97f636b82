use super::{App, InputMode, Screen};
use crate::action::Action;
use crate::view::export::ExportDestination;

use mailsift_core::Column;
use mailsift_reporting::ExportFormat;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Quit confirmation modal — q confirms, Esc cancels.
        // InputChar('q') covers confirmation reached from a text-input mode.
        if self.confirm_quit {
            match action {
                Action::Quit | Action::InputChar('q') => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack | Action::InputCancel => {
                    self.confirm_quit = false;
                }
                Action::Tick => self.handle_tick(),
                Action::Resize(_w, h) => {
                    self.visible_rows = (h as usize).saturating_sub(8);
                }
                _ => {}
            }
            return false;
        }

        // Export modal intercepts
        if self.export_state.active {
            self.update_export_modal(action);
            return false;
        }

        // Help overlay
        if self.show_help {
            match action {
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::ToggleHelp | Action::NavigateBack | Action::InputCancel => {
                    self.show_help = false;
                }
                Action::Tick => self.handle_tick(),
                Action::Resize(_w, h) => {
                    self.visible_rows = (h as usize).saturating_sub(8);
                }
                _ => {}
            }
            return false;
        }

        // URL entry screen has its own input mode
        if self.screen == Screen::UrlEntry {
            self.update_url_entry(action);
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::NavigateBack => match self.screen {
                Screen::Detail(_) => {
                    self.screen = Screen::Results;
                }
                Screen::Results => {
                    if !self.table.filter_query().is_empty() {
                        self.table.set_filter("");
                        self.cursor_row = 0;
                    } else {
                        self.screen = Screen::UrlEntry;
                        self.input_mode = InputMode::UrlEntry;
                    }
                }
                Screen::UrlEntry => {}
            },
            Action::DrillIn => {
                if self.screen == Screen::Results && self.page_rows() > 0 {
                    self.screen = Screen::Detail(self.cursor_row);
                }
            }
            Action::MoveDown => match self.screen {
                Screen::Detail(row) => {
                    if row + 1 < self.page_rows() {
                        self.screen = Screen::Detail(row + 1);
                        self.cursor_row = row + 1;
                    }
                }
                _ => {
                    if self.cursor_row + 1 < self.page_rows() {
                        self.cursor_row += 1;
                    } else if self.table.current_page() < self.table.page_count() {
                        // Fall through to the next page.
                        self.table.next_page();
                        self.cursor_row = 0;
                    }
                }
            },
            Action::MoveUp => match self.screen {
                Screen::Detail(row) => {
                    if row > 0 {
                        self.screen = Screen::Detail(row - 1);
                        self.cursor_row = row - 1;
                    }
                }
                _ => {
                    if self.cursor_row > 0 {
                        self.cursor_row -= 1;
                    } else if self.table.current_page() > 1 {
                        self.table.prev_page();
                        self.cursor_row = self.page_rows().saturating_sub(1);
                    }
                }
            },
            Action::NextPage => {
                self.table.next_page();
                self.cursor_row = 0;
            }
            Action::PrevPage => {
                self.table.prev_page();
                self.cursor_row = 0;
            }
            Action::FirstPage => {
                self.table.first_page();
                self.cursor_row = 0;
            }
            Action::LastPage => {
                self.table.last_page();
                self.cursor_row = 0;
            }
            Action::CycleRowsPerPage => {
                let rows = self.settings.next_rows_per_page();
                self.settings.rows_per_page = rows;
                self.table.set_rows_per_page(rows);
                self.clamp_cursor_row();
                self.notifications
                    .info(format!("{rows} rows per page"), self.tick);
            }
            Action::SortColumn(idx) => {
                if let Some(&column) = Column::all().get(idx) {
                    self.table.sort_by(column);
                    self.cursor_row = 0;
                }
            }
            Action::StartSearch => {
                self.input_mode = InputMode::Search;
                self.table.set_filter("");
                self.cursor_row = 0;
            }
            Action::InputChar(c) => {
                if self.input_mode == InputMode::Search {
                    let mut query = self.table.filter_query().to_string();
                    if c == '\x08' {
                        query.pop();
                    } else {
                        query.push(c);
                    }
                    self.table.set_filter(&query);
                    self.cursor_row = 0;
                }
            }
            Action::InputConfirm => {
                if self.input_mode == InputMode::Search {
                    self.input_mode = InputMode::Normal;
                }
            }
            Action::InputCancel => {
                if self.input_mode == InputMode::Search {
                    self.input_mode = InputMode::Normal;
                    self.table.set_filter("");
                    self.cursor_row = 0;
                }
            }
            Action::ToggleSelect => {
                if self.screen == Screen::Results {
                    self.table.toggle_select(self.cursor_row);
                }
            }
            Action::ToggleSelectAllPage => {
                if self.screen == Screen::Results {
                    self.table.toggle_select_all_page();
                }
            }
            Action::SubmitUrls => {
                self.submit_urls();
            }
            Action::CycleScanMode => {
                self.settings.scan_mode = self.settings.scan_mode.next();
                self.notifications.info(
                    format!("Scan mode: {}", self.settings.scan_mode.label()),
                    self.tick,
                );
            }
            Action::CycleFilterMode => {
                self.settings.filter_mode = self.settings.filter_mode.next();
                self.notifications.info(
                    format!("Server filter: {}", self.settings.filter_mode.label()),
                    self.tick,
                );
            }
            Action::EditUrls => {
                self.screen = Screen::UrlEntry;
                self.input_mode = InputMode::UrlEntry;
            }
            Action::ClearResults => {
                self.clear_results();
            }
            Action::Export => {
                self.export_state.active = true;
                self.export_state.cursor = 0;
                self.export_state.message = None;
            }
            Action::CopyToClipboard => {
                self.copy_all_to_clipboard();
            }
            Action::Tick => self.handle_tick(),
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(8);
            }
            Action::InputNewline
            | Action::CursorLeft
            | Action::CursorRight
            | Action::CursorUp
            | Action::CursorDown
            | Action::CursorHome
            | Action::CursorEnd
            | Action::None => {}
        }
        false
    }

    fn handle_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.notifications.prune(self.tick);
    }

    fn update_url_entry(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::SubmitUrls => {
                self.submit_urls();
            }
            Action::CycleScanMode => {
                self.settings.scan_mode = self.settings.scan_mode.next();
                self.notifications.info(
                    format!("Scan mode: {}", self.settings.scan_mode.label()),
                    self.tick,
                );
            }
            Action::CycleFilterMode => {
                self.settings.filter_mode = self.settings.filter_mode.next();
                self.notifications.info(
                    format!("Server filter: {}", self.settings.filter_mode.label()),
                    self.tick,
                );
            }
            Action::InputCancel => {
                // Esc returns to results when there are any; otherwise asks to quit.
                if !self.table.is_empty() {
                    self.screen = Screen::Results;
                    self.input_mode = InputMode::Normal;
                } else {
                    self.confirm_quit = true;
                }
            }
            Action::InputChar('\x08') => self.url_entry.backspace(),
            Action::InputChar(c) => self.url_entry.insert_char(c),
            Action::InputNewline => self.url_entry.newline(),
            Action::CursorLeft => self.url_entry.move_left(),
            Action::CursorRight => self.url_entry.move_right(),
            Action::CursorUp => self.url_entry.move_up(),
            Action::CursorDown => self.url_entry.move_down(),
            Action::CursorHome => self.url_entry.move_home(),
            Action::CursorEnd => self.url_entry.move_end(),
            Action::Tick => self.handle_tick(),
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(8);
            }
            _ => {}
        }
    }

    fn update_export_modal(&mut self, action: Action) {
        // If editing the output path, handle text input first.
        if self.export_state.editing_path {
            match action {
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::InputCancel => {
                    self.export_state.editing_path = false;
                    self.input_mode = InputMode::Normal;
                }
                Action::InputConfirm => {
                    let buf = self.export_state.edit_buffer.clone();
                    if !buf.is_empty() {
                        self.export_state.output_path = buf;
                    }
                    self.export_state.editing_path = false;
                    self.input_mode = InputMode::Normal;
                }
                Action::InputChar('\x08') => {
                    if self.export_state.edit_cursor > 0 {
                        let prev = self.export_state.edit_buffer[..self.export_state.edit_cursor]
                            .char_indices()
                            .next_back()
                            .map(|(i, _)| i)
                            .unwrap_or(0);
                        self.export_state
                            .edit_buffer
                            .drain(prev..self.export_state.edit_cursor);
                        self.export_state.edit_cursor = prev;
                    }
                }
                Action::InputChar(c) => {
                    self.export_state
                        .edit_buffer
                        .insert(self.export_state.edit_cursor, c);
                    self.export_state.edit_cursor += c.len_utf8();
                }
                Action::CursorLeft => {
                    let cur = &mut self.export_state.edit_cursor;
                    *cur = self.export_state.edit_buffer[..*cur]
                        .char_indices()
                        .next_back()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                Action::CursorRight => {
                    let cur = &mut self.export_state.edit_cursor;
                    if *cur < self.export_state.edit_buffer.len() {
                        *cur += self.export_state.edit_buffer[*cur..]
                            .chars()
                            .next()
                            .map(|c| c.len_utf8())
                            .unwrap_or(0);
                    }
                }
                Action::CursorHome => {
                    self.export_state.edit_cursor = 0;
                }
                Action::CursorEnd => {
                    self.export_state.edit_cursor = self.export_state.edit_buffer.len();
                }
                Action::Tick => self.handle_tick(),
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::NavigateBack | Action::InputCancel => {
                self.export_state.active = false;
            }
            Action::MoveDown => {
                self.export_state.cursor = (self.export_state.cursor + 1).min(3);
            }
            Action::MoveUp => {
                self.export_state.cursor = self.export_state.cursor.saturating_sub(1);
            }
            Action::DrillIn => match self.export_state.cursor {
                0 => {
                    let formats = ExportFormat::all();
                    let idx = formats
                        .iter()
                        .position(|&f| f == self.export_state.format)
                        .unwrap_or(0);
                    self.export_state.format = formats[(idx + 1) % formats.len()];
                }
                1 => {
                    self.export_state.destination = match self.export_state.destination {
                        ExportDestination::LocalFile => ExportDestination::Server,
                        ExportDestination::Server => ExportDestination::LocalFile,
                    };
                }
                2 => {
                    self.export_state.editing_path = true;
                    self.export_state.edit_buffer = self.export_state.output_path.clone();
                    self.export_state.edit_cursor = self.export_state.edit_buffer.len();
                    self.input_mode = InputMode::TextInput;
                }
                3 => {
                    self.run_export();
                }
                _ => {}
            },
            Action::Tick => self.handle_tick(),
            _ => {}
        }
    }
}
