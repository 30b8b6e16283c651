//! UI rendering for the listing demo.

use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: &str = " Patients ";
const ANCHOR_WIDTH: u16 = 24;

/// Draw the application.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title and filter
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    draw_header(f, chunks[0]);

    let border = if app.focus == Focus::Table {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);
    f.render_stateful_widget(&app.table, inner, &mut app.table_state);

    draw_footer(f, app, chunks[2]);

    // The dropdown overlays the table, so the filter goes last
    let anchor = Rect::new(
        chunks[0].x + TITLE.len() as u16 + 2,
        chunks[0].y,
        ANCHOR_WIDTH,
        1,
    )
    .intersection(chunks[0]);
    f.render_stateful_widget(&app.filter, anchor, &mut app.filter_state);

    if app.show_help {
        draw_help_popup(f);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(app.status_line(), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(
            "?:help  f:filter  tab:focus  q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(announcement) = &app.announcement {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            announcement.as_str(),
            Style::default().fg(Color::Cyan),
        ));
    }
    let line = Line::from(spans);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = centered_rect(50, 16, f.area());
    f.render_widget(Clear, area);

    let help = vec![
        Line::from(Span::styled("Table", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  j/k, Up/Down    move cursor"),
        Line::from("  Space, Ctrl+A   toggle row / all rows"),
        Line::from("  h/l, Left/Right scroll columns"),
        Line::from("  n/p             next / previous page"),
        Line::from("  +/-             rows per page"),
        Line::from("  Ctrl+R          clear selection"),
        Line::from(""),
        Line::from(Span::styled("Filter", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  f               open status filter"),
        Line::from("  Enter/Space     choose option"),
        Line::from("  a / Esc         apply / cancel"),
    ];

    let popup = Paragraph::new(help).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(popup, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
