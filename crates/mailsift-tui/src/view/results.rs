use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use mailsift_core::Column;

use crate::app::{App, InputMode};
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

/// Render the results screen into the given area.
/// `footer_area` is a full-width row below the main content.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let has_search =
        app.input_mode == InputMode::Search || !app.table.filter_query().is_empty();

    let mut constraints = vec![
        Constraint::Length(1), // header
        Constraint::Length(1), // stats line
    ];
    if has_search {
        constraints.push(Constraint::Length(1)); // search bar
    }
    constraints.push(Constraint::Min(5)); // table

    let chunks = Layout::vertical(constraints).split(area);
    let mut chunk_idx = 0;

    render_header(f, chunks[chunk_idx], app);
    chunk_idx += 1;

    render_stats_line(f, chunks[chunk_idx], app);
    chunk_idx += 1;

    if has_search {
        render_search_bar(f, chunks[chunk_idx], app, &app.theme);
        chunk_idx += 1;
    }

    render_table(f, chunks[chunk_idx], app);

    render_footer(f, footer_area, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(" mailsift ", theme.header_style()),
        Span::styled(
            " Results",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ];

    if !app.table.filter_query().is_empty() {
        spans.push(Span::styled(
            format!(" [filter: {}]", app.table.filter_query()),
            Style::default().fg(theme.active),
        ));
    }
    if app.table.selected_count() > 0 {
        spans.push(Span::styled(
            format!(" [{} selected]", app.table.selected_count()),
            Style::default().fg(theme.active),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_stats_line(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    if app.loading {
        spans.push(Span::styled(
            format!(" {} Extracting...", spinner_char(app.tick)),
            Style::default()
                .fg(theme.spinner)
                .add_modifier(Modifier::BOLD),
        ));
    } else if let Some(stats) = &app.stats {
        spans.push(Span::styled(
            format!(" {} emails ", app.table.len()),
            Style::default().fg(theme.text),
        ));
        spans.push(Span::styled(
            format!("V:{} ", stats.valid_emails),
            Style::default().fg(theme.valid),
        ));
        spans.push(Span::styled(
            format!("I:{} ", stats.invalid_emails),
            Style::default().fg(theme.invalid),
        ));
        spans.push(Span::styled(
            format!(
                "{} URL{} · {:.2}s · {} scan",
                stats.urls_processed,
                if stats.urls_processed == 1 { "" } else { "s" },
                stats.processing_time,
                stats.scan_mode.label(),
            ),
            Style::default().fg(theme.dim),
        ));
        if app.cached {
            spans.push(Span::styled(" (cached)", Style::default().fg(theme.dim)));
        }
    } else {
        spans.push(Span::styled(
            " No results yet — o to enter URLs, r to extract",
            Style::default().fg(theme.dim),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let cursor = if app.input_mode == InputMode::Search {
        "\u{2588}"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            " /",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.table.filter_query(), Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.active)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let info = app.table.page_info();
    let wide = area.width >= 100;

    let sort = app.table.sort();
    let header_label = |column: Column, key: char| {
        let arrow = match sort {
            Some((active, true)) if active == column => " \u{2193}",
            Some((active, false)) if active == column => " \u{2191}",
            _ => "",
        };
        format!("{} ({key}){arrow}", column.label())
    };

    let mut header_cells = vec![
        Cell::from(if app.table.page_fully_selected() {
            "[x]"
        } else {
            "[ ]"
        })
        .style(Style::default().fg(theme.active)),
        Cell::from("#").style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
    ];
    let mut labeled = vec![
        header_label(Column::Email, '1'),
        header_label(Column::Status, '2'),
        header_label(Column::Domain, '3'),
    ];
    if wide {
        labeled.push(header_label(Column::Source, '4'));
    }
    header_cells.extend(labeled.into_iter().map(|h| {
        Cell::from(h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .table
        .visible()
        .iter()
        .enumerate()
        .map(|(row_idx, record)| {
            let mark = if app.table.is_row_selected(row_idx) {
                "[x]"
            } else {
                "[ ]"
            };
            let num = format!("{}", info.page_start + row_idx + 1);
            let email = truncate(&record.email, (area.width as usize).saturating_sub(50));
            let status_style = Style::default().fg(theme.status_color(record.status));

            let mut cells = vec![
                Cell::from(mark).style(Style::default().fg(theme.active)),
                Cell::from(num).style(Style::default().fg(theme.dim)),
                Cell::from(email),
                Cell::from(record.status.label()).style(status_style),
                Cell::from(record.domain.clone()),
            ];
            if wide {
                cells.push(
                    Cell::from(truncate(&record.source, 40)).style(Style::default().fg(theme.dim)),
                );
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(3),  // selection mark
        Constraint::Length(5),  // #
        Constraint::Min(24),    // Email
        Constraint::Length(12), // Status
        Constraint::Length(20), // Domain
    ];
    if wide {
        widths.push(Constraint::Min(20)); // Source
    }

    let title = format!(
        " Page {}/{} \u{2014} {} of {} emails ",
        info.current_page, info.page_count, info.total_filtered, info.total_records
    );

    let table = Table::new(rows, &widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(title),
        )
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    if info.page_len > 0 {
        state.select(Some(app.cursor_row.min(info.page_len - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let info = app.table.page_info();

    let left = Span::styled(
        " /:search  1-4:sort  h/l:page  H/L:first/last  z:rows  Space:mark  a:all  \
         Enter:detail  e:export  y:copy  o:urls  c:clear  ?:help  q:quit",
        theme.footer_style(),
    );
    f.render_widget(Paragraph::new(Line::from(left)), area);

    let right = Line::from(Span::styled(
        format!("{}/page ", info.rows_per_page),
        Style::default().fg(theme.dim),
    ))
    .alignment(ratatui::layout::Alignment::Right);
    f.render_widget(Paragraph::new(right), area);
}
