use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use mailsift_core::MAX_URLS;

use crate::app::App;

/// Render the URL entry screen.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // mode line
        Constraint::Min(5),    // editor
    ])
    .split(area);

    // Header
    let count = app.url_entry.url_count();
    let count_style = if count > MAX_URLS {
        Style::default().fg(theme.invalid).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let header = Line::from(vec![
        Span::styled(" mailsift ", theme.header_style()),
        Span::styled(
            " Enter URLs, one per line",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {count}/{MAX_URLS}"), count_style),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    // Mode line
    let mode = Line::from(vec![
        Span::styled(" scan: ", Style::default().fg(theme.dim)),
        Span::styled(
            app.settings.scan_mode.label(),
            Style::default().fg(theme.active),
        ),
        Span::styled(" (^D)   filter: ", Style::default().fg(theme.dim)),
        Span::styled(
            app.settings.filter_mode.label(),
            Style::default().fg(theme.active),
        ),
        Span::styled(" (^F)   server: ", Style::default().fg(theme.dim)),
        Span::styled(&app.settings.server_url, Style::default().fg(theme.text)),
    ]);
    f.render_widget(Paragraph::new(mode), chunks[1]);

    // Editor with a block cursor on the active line
    let entry = &app.url_entry;
    let lines: Vec<Line> = entry
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == entry.row {
                let before: String = line.chars().take(entry.col).collect();
                let at: String = line.chars().skip(entry.col).take(1).collect();
                let after: String = line.chars().skip(entry.col + 1).collect();
                let cursor_char = if at.is_empty() { " ".to_string() } else { at };
                Line::from(vec![
                    Span::styled(before, Style::default().fg(theme.text)),
                    Span::styled(
                        cursor_char,
                        Style::default().fg(theme.header_fg).bg(theme.active),
                    ),
                    Span::styled(after, Style::default().fg(theme.text)),
                ])
            } else {
                Line::from(Span::styled(line.clone(), Style::default().fg(theme.text)))
            }
        })
        .collect();

    let editor = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(" URLs "),
    );
    f.render_widget(editor, chunks[2]);

    // Footer
    let footer = Line::from(Span::styled(
        " ^R:extract  Enter:new line  ^D:scan mode  ^F:filter  Esc:results  ^C:quit",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), footer_area);
}
