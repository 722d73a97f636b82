use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the help overlay.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(58, 20, f.area());

    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), Style::default().fg(theme.active)),
            Span::styled(desc.to_string(), Style::default().fg(theme.text)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(" Keys ", theme.header_style())),
        Line::from(""),
        key("/", "search emails and domains"),
        key("1-4", "sort by column (again to reverse)"),
        key("h/l \u{2190}/\u{2192}", "previous / next page"),
        key("H/L", "first / last page"),
        key("z", "cycle rows per page"),
        key("j/k \u{2191}/\u{2193}", "move cursor"),
        key("Space", "mark row for export"),
        key("a", "mark / unmark whole page"),
        key("Enter", "record detail"),
        key("e", "export (txt/csv/json)"),
        key("y", "copy all addresses"),
        key("r", "re-run extraction"),
        key("o", "edit URLs"),
        key("c", "clear results"),
        key("q", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  ?/Esc to close",
            Style::default().fg(theme.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Help "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
