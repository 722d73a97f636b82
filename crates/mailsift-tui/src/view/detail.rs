use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::App;
use crate::view::centered_rect;

/// Render the record detail overlay for a row of the current page.
pub fn render(f: &mut Frame, app: &App, row: usize) {
    let theme = &app.theme;
    let Some(record) = app.table.visible_record(row) else {
        return;
    };

    let popup = centered_rect(64, 10, f.area());

    let field = |name: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("  {name:<8}"), Style::default().fg(theme.dim)),
            Span::styled(value.to_string(), Style::default().fg(theme.text)),
        ])
    };

    let info = app.table.page_info();
    let lines = vec![
        Line::from(Span::styled(" Email Record ", theme.header_style())),
        Line::from(""),
        field("Email", &record.email),
        Line::from(vec![
            Span::styled("  Status  ", Style::default().fg(theme.dim)),
            Span::styled(
                record.status.label(),
                Style::default()
                    .fg(theme.status_color(record.status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        field("Domain", &record.domain),
        field("Source", &record.source),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "  row {}/{}   j/k:prev/next  Esc:back",
                info.page_start + row + 1,
                info.total_filtered
            ),
            Style::default().fg(theme.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Detail "),
        );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
