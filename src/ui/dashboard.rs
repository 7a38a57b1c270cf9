use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::block::Title;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::theme::*;
use crate::app::App;
use crate::panels::dashboard::{
    ACTIVITY_WINDOWS, HEADLINE, RECENT_ACTIVITY, STAT_CARDS, SUBTITLE, SYSTEM_STATUS, StatCard,
    Trend, UPGRADE_ACTION, UPGRADE_BODY, UPGRADE_TITLE,
};

pub(super) fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(6),
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            HEADLINE,
            Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(FG_DIM))),
    ]);
    f.render_widget(heading, rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);
    for (card, slot) in STAT_CARDS.iter().zip(cards.iter()) {
        render_stat_card(f, card, *slot);
    }

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[2]);
    render_activity(f, app, lower[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(lower[1]);
    render_upgrade(f, side[0]);
    render_system_status(f, side[1]);
}

fn render_stat_card(f: &mut Frame<'_>, card: &StatCard, area: Rect) {
    let arrow = match card.trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
    };
    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            card.value,
            Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} {}", arrow, card.change),
                Style::default().fg(trend_color(card.trend)),
            ),
            Span::styled(" from last month", Style::default().fg(FG_DIM)),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(card.title, Style::default().fg(FG_DIM)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_IDLE)),
    );
    f.render_widget(body, area);
}

fn render_activity(f: &mut Frame<'_>, app: &App, area: Rect) {
    let window = ACTIVITY_WINDOWS
        .get(app.activity_window)
        .copied()
        .unwrap_or(ACTIVITY_WINDOWS[0]);
    let items: Vec<ListItem> = RECENT_ACTIVITY
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(activity_color(item.kind))),
                    Span::styled(item.title, Style::default().fg(FG_PRIMARY)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", item.time),
                    Style::default().fg(FG_DIM),
                )),
            ])
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(
                "Recent Activity",
                Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .title(
                Title::from(Span::styled(
                    format!(" {} [w] ", window),
                    Style::default().fg(BRAND),
                ))
                .alignment(Alignment::Right),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_IDLE)),
    );
    f.render_widget(list, area);
}

fn render_upgrade(f: &mut Frame<'_>, area: Rect) {
    let body = Paragraph::new(vec![
        Line::from(Span::styled(UPGRADE_BODY, Style::default().fg(FG_PRIMARY))),
        Line::from(Span::styled(
            format!(" {} ", UPGRADE_ACTION),
            Style::default().fg(MENU_HIGHLIGHT_TEXT).bg(BRAND),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(
                UPGRADE_TITLE,
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_FOCUS)),
    );
    f.render_widget(body, area);
}

fn render_system_status(f: &mut Frame<'_>, area: Rect) {
    let lines: Vec<Line> = SYSTEM_STATUS
        .iter()
        .map(|status| {
            Line::from(vec![
                Span::styled(format!("{:<14}", status.component), Style::default().fg(FG_PRIMARY)),
                Span::styled(status.state, Style::default().fg(SUCCESS)),
            ])
        })
        .collect();
    let body = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                "System Status",
                Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_IDLE)),
    );
    f.render_widget(body, area);
}
