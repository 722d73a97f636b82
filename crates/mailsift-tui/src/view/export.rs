use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use mailsift_reporting::ExportFormat;

use crate::app::App;
use crate::view::centered_rect;

/// Where the rendered export ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDestination {
    /// Render locally and write the file.
    LocalFile,
    /// Ask the server's /export endpoint to render, then write.
    Server,
}

impl ExportDestination {
    pub fn label(self) -> &'static str {
        match self {
            Self::LocalFile => "Local file",
            Self::Server => "Server render",
        }
    }
}

/// State for the export modal.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub active: bool,
    pub format: ExportFormat,
    pub destination: ExportDestination,
    pub output_path: String,
    /// 0=format, 1=destination, 2=path, 3=confirm
    pub cursor: usize,
    pub editing_path: bool,
    pub edit_buffer: String,
    pub edit_cursor: usize,
    pub message: Option<String>,
}

impl Default for ExportState {
    fn default() -> Self {
        Self {
            active: false,
            format: ExportFormat::Text,
            destination: ExportDestination::LocalFile,
            output_path: "mailsift-emails".to_string(),
            cursor: 0,
            editing_path: false,
            edit_buffer: String::new(),
            edit_cursor: 0,
            message: None,
        }
    }
}

/// Render the export modal overlay.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let export = &app.export_state;
    let popup = centered_rect(52, 14, f.area());

    let selected = app.table.selected_count();
    let scope_note = if selected > 0 {
        format!("{selected} selected")
    } else {
        format!("{} filtered", app.table.page_info().total_filtered)
    };

    let mut lines = vec![
        Line::from(Span::styled(" Export Emails ", theme.header_style())),
        Line::from(Span::styled(
            format!("  {scope_note}, valid first"),
            Style::default().fg(theme.dim),
        )),
        Line::from(""),
    ];

    let fmt_indicator = if export.cursor == 0 { "> " } else { "  " };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {fmt_indicator}Format:  "),
            Style::default().fg(theme.text),
        ),
        Span::styled(export.format.label(), Style::default().fg(theme.active)),
    ]));

    let dest_indicator = if export.cursor == 1 { "> " } else { "  " };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {dest_indicator}Render:  "),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            export.destination.label(),
            Style::default().fg(theme.active),
        ),
    ]));

    let path_indicator = if export.cursor == 2 { "> " } else { "  " };
    let path_display = if export.editing_path {
        format!("{}\u{2588}", export.edit_buffer)
    } else {
        export.output_path.clone()
    };
    let path_style = if export.editing_path {
        Style::default().fg(theme.active)
    } else {
        Style::default().fg(theme.dim)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {path_indicator}Output:  "),
            Style::default().fg(theme.text),
        ),
        Span::styled(path_display, path_style),
        Span::styled(
            format!(".{}", export.format.extension()),
            Style::default().fg(theme.dim),
        ),
    ]));

    lines.push(Line::from(""));

    let confirm_style = if export.cursor == 3 {
        Style::default()
            .fg(theme.header_fg)
            .bg(theme.active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.active)
    };
    lines.push(Line::from(vec![
        Span::styled("          ", Style::default()),
        Span::styled(" Export ", confirm_style),
    ]));

    if let Some(msg) = &export.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {msg}"),
            Style::default().fg(theme.valid),
        )));
    }

    lines.push(Line::from(""));
    let hint = if export.editing_path {
        "  Type filename, Enter:confirm, Esc:cancel"
    } else {
        "  j/k:navigate  Enter:select/cycle  Esc:close"
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(theme.dim),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Export "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
