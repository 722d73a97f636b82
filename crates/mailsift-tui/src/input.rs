use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to an action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Search => map_key_search(key),
                InputMode::TextInput => map_key_text_input(key),
                InputMode::UrlEntry => map_key_url_entry(key),
            }
        }
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::DrillIn,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
        KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
        KeyCode::Char('H') | KeyCode::Home => Action::FirstPage,
        KeyCode::Char('L') | KeyCode::End => Action::LastPage,
        KeyCode::Char('z') => Action::CycleRowsPerPage,
        KeyCode::Char(c @ '1'..='4') => Action::SortColumn(c as usize - '1' as usize),
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Char('a') => Action::ToggleSelectAllPage,
        KeyCode::Char('r') => Action::SubmitUrls,
        KeyCode::Char('d') => Action::CycleScanMode,
        KeyCode::Char('f') => Action::CycleFilterMode,
        KeyCode::Char('o') => Action::EditUrls,
        KeyCode::Char('c') => Action::ClearResults,
        KeyCode::Char('e') => Action::Export,
        KeyCode::Char('y') => Action::CopyToClipboard,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_key_search(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::InputCancel,
        KeyCode::Enter => Action::InputConfirm,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputChar('\x08'), // sentinel for backspace
        _ => Action::None,
    }
}

fn map_key_text_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::InputCancel,
        KeyCode::Enter => Action::InputConfirm,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputChar('\x08'),
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        _ => Action::None,
    }
}

/// The URL editor takes free text, so command keys live on Ctrl.
fn map_key_url_entry(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('r') => Action::SubmitUrls,
            KeyCode::Char('d') => Action::CycleScanMode,
            KeyCode::Char('f') => Action::CycleFilterMode,
            _ => Action::None,
        };
    }
    match key.code {
        KeyCode::Esc => Action::InputCancel,
        KeyCode::Enter => Action::InputNewline,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputChar('\x08'),
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Up => Action::CursorUp,
        KeyCode::Down => Action::CursorDown,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        _ => Action::None,
    }
}
