use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;
use crate::model::notify::Level;

/// Render toast notifications stacked bottom-right, newest at the bottom.
pub fn render(f: &mut Frame, app: &App) {
    if app.notifications.is_empty() {
        return;
    }
    let theme = &app.theme;
    let area = f.area();

    let toasts: Vec<_> = app.notifications.visible().collect();
    for (i, toast) in toasts.iter().enumerate() {
        let width = (toast.message.chars().count() as u16 + 4)
            .min(area.width.saturating_sub(2))
            .max(10);
        let height = 3;
        // Newest (i == 0) sits just above the footer; older ones stack upward.
        let y = area
            .height
            .saturating_sub(2 + height * (i as u16 + 1));
        let rect = Rect {
            x: area.width.saturating_sub(width + 1),
            y,
            width,
            height,
        };

        let color = match toast.level {
            Level::Info => theme.active,
            Level::Warn => ratatui::style::Color::Yellow,
            Level::Error => theme.invalid,
        };

        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {}", toast.message),
            Style::default().fg(theme.text),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
    }
}
