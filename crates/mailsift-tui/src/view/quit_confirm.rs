use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the quit confirmation modal.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(36, 5, f.area());

    let lines = vec![
        Line::from(Span::styled(" Quit mailsift? ", theme.header_style())),
        Line::from(""),
        Line::from(Span::styled(
            "  q:quit   Esc:cancel",
            Style::default().fg(theme.text),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
