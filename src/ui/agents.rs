use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::theme::*;
use crate::app::App;
use crate::panels::agents::{AgentRow, DESCRIPTION, EMPTY_MESSAGE, SEARCH_PLACEHOLDER, TITLE};

const CREATE_ACTION: &str = "[n] + Create Agent";

pub(super) fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    render_title(f, chunks[0]);
    render_search(f, app, chunks[1]);

    let rows = app.agents_panel.rows(app.agents.agents());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_IDLE))
        .style(Style::default().bg(BG_PRIMARY));

    if app.agents.loading() {
        let loading = Paragraph::new("Loading agents...")
            .style(Style::default().fg(FG_DIM))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(loading, chunks[2]);
        return;
    }
    if rows.is_empty() {
        let empty = Paragraph::new(EMPTY_MESSAGE)
            .style(Style::default().fg(FG_DIM))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, chunks[2]);
        return;
    }

    let mut state = TableState::default();
    state.select(app.agents_panel.selected_index(rows.len()));
    let table = Table::new(
        rows.iter().map(table_row),
        [
            Constraint::Percentage(50),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(4),
        ],
    )
    .header(
        Row::new(["Name", "Status", "Created", ""])
            .style(Style::default().fg(FG_DIM).add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    )
    .block(block)
    .highlight_style(Style::default().bg(ROW_HIGHLIGHT_BG))
    .highlight_symbol("▶ ");
    f.render_stateful_widget(table, chunks[2], &mut state);
}

fn render_title(f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(CREATE_ACTION.len() as u16 + 2)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(DESCRIPTION, Style::default().fg(FG_DIM))),
    ]);
    f.render_widget(title, chunks[0]);

    let create = Paragraph::new(Span::styled(
        CREATE_ACTION,
        Style::default()
            .fg(MENU_HIGHLIGHT_TEXT)
            .bg(BRAND)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);
    f.render_widget(create, chunks[1]);
}

fn render_search(f: &mut Frame<'_>, app: &App, area: Rect) {
    let panel = &app.agents_panel;
    let border = if panel.is_searching() {
        BORDER_FOCUS
    } else {
        BORDER_IDLE
    };
    let line = if panel.search().is_empty() && !panel.is_searching() {
        Line::from(Span::styled(
            format!("/ {}", SEARCH_PLACEHOLDER),
            Style::default().fg(FG_DIM),
        ))
    } else {
        let mut spans = vec![
            Span::styled("/ ", Style::default().fg(FG_DIM)),
            Span::styled(panel.search(), Style::default().fg(FG_PRIMARY)),
        ];
        if panel.is_searching() {
            spans.push(Span::styled("▏", Style::default().fg(BORDER_FOCUS)));
        }
        Line::from(spans)
    };
    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(search, area);
}

fn table_row(row: &AgentRow) -> Row<'static> {
    let mut name = vec![Line::from(Span::styled(
        row.name.clone(),
        Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
    ))];
    if let Some(description) = &row.description {
        name.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(FG_DIM),
        )));
    }
    let (fg, bg) = badge_colors(row.badge);
    let badge = Span::styled(format!(" {} ", row.status), Style::default().fg(fg).bg(bg));

    Row::new([
        Cell::from(Text::from(name)),
        Cell::from(Line::from(badge)),
        Cell::from(row.created.clone()),
        Cell::from("⋯"),
    ])
    .height(2)
}
