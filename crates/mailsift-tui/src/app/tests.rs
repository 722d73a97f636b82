use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;
use crate::view::export::ExportDestination;

use mailsift_core::{
    EmailRecord, EmailStatus, ExtractionOutcome, ExtractionStats, ScanMode,
};

/// Create a minimal App for testing (no backend, no terminal).
fn test_app() -> App {
    App::new(Settings::default())
}

fn record(email: &str, status: EmailStatus, domain: &str) -> EmailRecord {
    EmailRecord {
        email: email.to_string(),
        status,
        domain: domain.to_string(),
        source: format!("https://{domain}"),
    }
}

fn outcome(emails: Vec<EmailRecord>) -> Box<ExtractionOutcome> {
    let valid = emails
        .iter()
        .filter(|r| r.status == EmailStatus::Valid)
        .count();
    let invalid = emails.len() - valid;
    Box::new(ExtractionOutcome {
        count: emails.len(),
        emails,
        stats: ExtractionStats {
            scan_mode: ScanMode::Fast,
            urls_processed: 2,
            processing_time: 0.5,
            valid_emails: valid,
            invalid_emails: invalid,
        },
        cached: false,
    })
}

/// App with three ingested records, sitting on the Results screen.
fn app_with_results() -> App {
    let mut app = test_app();
    app.handle_backend_event(BackendEvent::ExtractionComplete(outcome(vec![
        record("info@alpha.com", EmailStatus::Valid, "alpha.com"),
        record("sales@beta.org", EmailStatus::Invalid, "beta.org"),
        record("bob@gamma.net", EmailStatus::Valid, "gamma.net"),
    ])));
    app.screen = Screen::Results;
    app.input_mode = InputMode::Normal;
    app
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        app.update(Action::InputChar(c));
    }
}

// ── URL entry & validation ──────────────────────────────────────

#[test]
fn starts_on_url_entry_screen() {
    let app = test_app();
    assert_eq!(app.screen, Screen::UrlEntry);
    assert_eq!(app.input_mode, InputMode::UrlEntry);
}

#[test]
fn typing_builds_url_lines() {
    let mut app = test_app();
    type_str(&mut app, "a.com");
    app.update(Action::InputNewline);
    type_str(&mut app, "b.com");
    assert_eq!(app.url_entry.text(), "a.com\nb.com");
    assert_eq!(app.url_entry.url_count(), 2);
}

#[test]
fn backspace_joins_lines() {
    let mut app = test_app();
    type_str(&mut app, "a.com");
    app.update(Action::InputNewline);
    app.update(Action::InputChar('\x08'));
    assert_eq!(app.url_entry.text(), "a.com");
}

#[test]
fn empty_submit_warns_and_stays_local() {
    let mut app = test_app();
    app.update(Action::SubmitUrls);

    assert_eq!(app.screen, Screen::UrlEntry);
    assert!(!app.loading);
    assert!(app.table.is_empty());
    assert_eq!(
        app.notifications.latest().unwrap().message,
        "no URLs provided"
    );
}

#[test]
fn over_limit_submit_is_rejected_without_request() {
    let mut app = test_app();
    let text = (0..11)
        .map(|i| format!("site{i}.com"))
        .collect::<Vec<_>>()
        .join("\n");
    app.url_entry = UrlEntryState::from_text(&text);

    app.update(Action::SubmitUrls);

    assert!(!app.loading);
    assert_eq!(app.screen, Screen::UrlEntry);
    assert!(
        app.notifications
            .latest()
            .unwrap()
            .message
            .contains("too many URLs")
    );
}

#[test]
fn valid_submit_sets_loading_and_moves_to_results() {
    let mut app = test_app();
    app.url_entry = UrlEntryState::from_text("a.com\nb.com");

    app.update(Action::SubmitUrls);

    assert!(app.loading);
    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn failed_extraction_clears_loading_and_keeps_results() {
    let mut app = app_with_results();
    app.loading = true;

    app.handle_backend_event(BackendEvent::ExtractionFailed("boom".to_string()));

    assert!(!app.loading);
    assert_eq!(app.table.len(), 3);
    assert_eq!(app.notifications.latest().unwrap().message, "boom");
}

#[test]
fn completed_extraction_replaces_results_and_clears_loading() {
    let mut app = app_with_results();
    app.loading = true;

    app.handle_backend_event(BackendEvent::ExtractionComplete(outcome(vec![record(
        "x@z.io",
        EmailStatus::Valid,
        "z.io",
    )])));

    assert!(!app.loading);
    assert_eq!(app.table.len(), 1);
    assert!(app.stats.is_some());
}

// ── Search ──────────────────────────────────────────────────────

#[test]
fn incremental_search_filters_table() {
    let mut app = app_with_results();
    app.update(Action::StartSearch);
    assert_eq!(app.input_mode, InputMode::Search);

    type_str(&mut app, "alpha");
    assert_eq!(app.table.page_info().total_filtered, 1);

    app.update(Action::InputConfirm);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.table.filter_query(), "alpha");
}

#[test]
fn search_cancel_restores_full_table() {
    let mut app = app_with_results();
    app.update(Action::StartSearch);
    type_str(&mut app, "alpha");
    app.update(Action::InputCancel);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.table.page_info().total_filtered, 3);
}

#[test]
fn esc_clears_confirmed_filter_before_leaving_results() {
    let mut app = app_with_results();
    app.update(Action::StartSearch);
    type_str(&mut app, "alpha");
    app.update(Action::InputConfirm);

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.table.filter_query(), "");

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::UrlEntry);
}

// ── Sorting & pagination keys ───────────────────────────────────

#[test]
fn sort_key_toggles_direction_on_repeat() {
    let mut app = app_with_results();
    app.update(Action::SortColumn(0));
    assert_eq!(app.table.sort().map(|(_, asc)| asc), Some(true));
    app.update(Action::SortColumn(0));
    assert_eq!(app.table.sort().map(|(_, asc)| asc), Some(false));
}

#[test]
fn cursor_falls_through_page_boundaries() {
    let mut app = test_app();
    let records: Vec<EmailRecord> = (0..25)
        .map(|i| record(&format!("u{i:02}@s.com"), EmailStatus::Valid, "s.com"))
        .collect();
    app.handle_backend_event(BackendEvent::ExtractionComplete(outcome(records)));
    app.screen = Screen::Results;
    app.input_mode = InputMode::Normal;

    // Walk off the bottom of page 1.
    app.cursor_row = 19;
    app.update(Action::MoveDown);
    assert_eq!(app.table.current_page(), 2);
    assert_eq!(app.cursor_row, 0);

    // And back up off the top of page 2.
    app.update(Action::MoveUp);
    assert_eq!(app.table.current_page(), 1);
    assert_eq!(app.cursor_row, 19);
}

#[test]
fn rows_per_page_cycle_updates_table_and_settings() {
    let mut app = app_with_results();
    assert_eq!(app.settings.rows_per_page, 20);
    app.update(Action::CycleRowsPerPage);
    assert_eq!(app.settings.rows_per_page, 50);
    assert_eq!(app.table.rows_per_page(), 50);
}

// ── Selection & export ──────────────────────────────────────────

#[test]
fn space_marks_cursor_row() {
    let mut app = app_with_results();
    app.cursor_row = 1;
    app.update(Action::ToggleSelect);
    assert_eq!(app.table.selected_count(), 1);
    assert!(app.table.is_row_selected(1));
}

#[test]
fn export_modal_intercepts_navigation() {
    let mut app = app_with_results();
    app.update(Action::Export);
    assert!(app.export_state.active);

    app.update(Action::MoveDown);
    assert_eq!(app.export_state.cursor, 1);
    assert_eq!(app.cursor_row, 0);

    app.update(Action::NavigateBack);
    assert!(!app.export_state.active);
}

#[test]
fn export_modal_cycles_format_and_destination() {
    let mut app = app_with_results();
    app.update(Action::Export);

    app.update(Action::DrillIn);
    assert_eq!(app.export_state.format, mailsift_reporting::ExportFormat::Csv);

    app.update(Action::MoveDown);
    app.update(Action::DrillIn);
    assert_eq!(app.export_state.destination, ExportDestination::Server);
}

#[test]
fn export_path_editing_roundtrip() {
    let mut app = app_with_results();
    app.update(Action::Export);
    app.update(Action::MoveDown);
    app.update(Action::MoveDown); // cursor on path
    app.update(Action::DrillIn);
    assert!(app.export_state.editing_path);
    assert_eq!(app.input_mode, InputMode::TextInput);

    type_str(&mut app, "-run1");
    app.update(Action::InputConfirm);
    assert!(!app.export_state.editing_path);
    assert_eq!(app.export_state.output_path, "mailsift-emails-run1");
}

#[test]
fn export_with_empty_table_reports_nothing_to_export() {
    let mut app = test_app();
    app.screen = Screen::Results;
    app.input_mode = InputMode::Normal;

    app.update(Action::Export);
    app.export_state.cursor = 3;
    app.update(Action::DrillIn);

    assert_eq!(
        app.export_state.message.as_deref(),
        Some("Nothing to export")
    );
    assert_eq!(
        app.notifications.latest().unwrap().message,
        "Nothing to export"
    );
}

#[test]
fn local_export_writes_valid_before_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("emails").display().to_string();

    let mut app = app_with_results();
    app.update(Action::Export);
    app.export_state.output_path = stem.clone();
    app.export_state.cursor = 3;
    app.update(Action::DrillIn);

    let path = format!("{stem}.txt");
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "info@alpha.com\nbob@gamma.net\nsales@beta.org\n");
    assert_eq!(
        app.export_state.message.as_deref(),
        Some(format!("Saved to {path}").as_str())
    );
}

#[test]
fn local_export_honors_selection() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("picked").display().to_string();

    let mut app = app_with_results();
    app.cursor_row = 1;
    app.update(Action::ToggleSelect); // sales@beta.org only

    app.update(Action::Export);
    app.export_state.output_path = stem.clone();
    app.export_state.cursor = 3;
    app.update(Action::DrillIn);

    let content = std::fs::read_to_string(format!("{stem}.txt")).unwrap();
    assert_eq!(content, "sales@beta.org\n");
}

// ── Clipboard ───────────────────────────────────────────────────

#[test]
fn copy_with_empty_table_warns() {
    let mut app = test_app();
    app.screen = Screen::Results;
    app.input_mode = InputMode::Normal;
    app.update(Action::CopyToClipboard);
    assert_eq!(app.notifications.latest().unwrap().message, "Nothing to copy");
}

// ── Clear / detail / overlays ───────────────────────────────────

#[test]
fn clear_drops_results_and_returns_to_editor() {
    let mut app = app_with_results();
    app.update(Action::ClearResults);
    assert!(app.table.is_empty());
    assert!(app.stats.is_none());
    assert_eq!(app.screen, Screen::UrlEntry);
}

#[test]
fn enter_opens_detail_and_esc_closes_it() {
    let mut app = app_with_results();
    app.cursor_row = 2;
    app.update(Action::DrillIn);
    assert_eq!(app.screen, Screen::Detail(2));

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Results);
}

#[test]
fn detail_navigation_clamps_at_page_edges() {
    let mut app = app_with_results();
    app.update(Action::DrillIn);
    app.update(Action::MoveUp);
    assert_eq!(app.screen, Screen::Detail(0));
    app.update(Action::MoveDown);
    app.update(Action::MoveDown);
    app.update(Action::MoveDown);
    assert_eq!(app.screen, Screen::Detail(2));
}

#[test]
fn help_overlay_toggles() {
    let mut app = app_with_results();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    // Other actions are swallowed while help is up.
    app.update(Action::MoveDown);
    assert_eq!(app.cursor_row, 0);
    app.update(Action::ToggleHelp);
    assert!(!app.show_help);
}

#[test]
fn quit_needs_confirmation() {
    let mut app = app_with_results();
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);

    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    assert!(!app.should_quit);

    app.update(Action::Quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

// ── Modes ───────────────────────────────────────────────────────

#[test]
fn scan_and_filter_modes_cycle() {
    let mut app = app_with_results();
    app.update(Action::CycleScanMode);
    assert_eq!(app.settings.scan_mode, ScanMode::Deep);

    app.update(Action::CycleFilterMode);
    assert_eq!(
        app.settings.filter_mode,
        mailsift_core::FilterMode::Valid
    );
}

#[test]
fn toast_expires_on_ticks() {
    let mut app = app_with_results();
    assert!(app.notifications.latest().is_some());
    for _ in 0..crate::model::notify::TOAST_TTL_TICKS + 1 {
        app.update(Action::Tick);
    }
    assert!(app.notifications.is_empty());
}
