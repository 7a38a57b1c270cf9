use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, OverlayState, RowActionMenu};
use crate::panels::agents::RowAction;
use crate::routes::{NAV_ITEMS, Route, active_nav_index};

mod agents;
mod dashboard;
mod theme;
use theme::*;

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

const SIDEBAR_WIDTH: u16 = 24;
const HEADER_SEARCH_HINT: &str = "Search agents, voices, or analytics...";
const USER_INITIALS: &str = "JD";
const USER_NAME: &str = "John Doe";

fn cell_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
}

pub fn render(f: &mut Frame<'_>, app: &App) {
    let size = f.size();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let block = Paragraph::new(format!(
            "Terminal too small. Resize to at least {}x{}.",
            MIN_WIDTH, MIN_HEIGHT
        ))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("VoiceCraft")
                .borders(Borders::ALL)
                .style(Style::default().fg(FG_PRIMARY).bg(MENU_BG)),
        )
        .style(Style::default().fg(FG_PRIMARY).bg(BG_PRIMARY));
        f.render_widget(block, size);
        return;
    }

    let base = Block::default().style(Style::default().bg(BG_PRIMARY));
    f.render_widget(base, size);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(size);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(vertical[0]);

    render_sidebar(f, app, horizontal[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(horizontal[1]);
    render_header(f, app, main[0]);
    render_page(f, app, main[1]);

    render_status_bar(f, app, vertical[1]);

    if let Some(overlay) = app.overlay.as_ref() {
        render_overlay(f, overlay);
    }
    render_toasts(f, app, main[1]);
}

fn render_sidebar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(BORDER_IDLE))
        .style(Style::default().bg(SIDEBAR_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled(
            " VoiceCraft",
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(" AI Agent Control", Style::default().fg(FG_DIM))),
    ]);
    f.render_widget(brand, chunks[0]);

    let active = active_nav_index(&app.route);
    let items: Vec<ListItem> = NAV_ITEMS
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let text = format!(" {} {}  {}", item.icon, item.label, idx + 1);
            let style = if Some(idx) == active {
                Style::default()
                    .fg(NAV_ACTIVE_TEXT)
                    .bg(NAV_ACTIVE_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(FG_PRIMARY)
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();
    f.render_widget(List::new(items), chunks[1]);

    let sign_out = Paragraph::new(Span::styled(" ⏻ Sign Out", Style::default().fg(FG_DIM)));
    f.render_widget(sign_out, chunks[2]);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(BORDER_IDLE))
        .style(Style::default().bg(BG_PRIMARY));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let unread = app.toasts.unread();
    let bell = if unread > 0 {
        format!("🔔 {}", unread)
    } else {
        String::from("🔔")
    };
    let user = format!("[{}] {}", USER_INITIALS, USER_NAME);
    let right_width = cell_width(&bell) + cell_width(&user) + 4;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(right_width)])
        .split(inner);

    let search = Paragraph::new(Line::from(vec![
        Span::styled(" ⌕ ", Style::default().fg(FG_DIM)),
        Span::styled(HEADER_SEARCH_HINT, Style::default().fg(FG_DIM)),
    ]));
    f.render_widget(search, chunks[0]);

    let bell_style = if unread > 0 {
        Style::default().fg(DANGER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FG_DIM)
    };
    let right = Paragraph::new(Line::from(vec![
        Span::styled(bell, bell_style),
        Span::raw("  "),
        Span::styled(user, Style::default().fg(FG_PRIMARY)),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(right, chunks[1]);
}

fn render_page(f: &mut Frame<'_>, app: &App, area: Rect) {
    let area = Rect {
        x: area.x.saturating_add(1),
        width: area.width.saturating_sub(2),
        ..area
    };
    match &app.route {
        Route::Dashboard => dashboard::render(f, app, area),
        Route::Agents => agents::render(f, app, area),
        other => render_placeholder(f, other, area),
    }
}

fn render_placeholder(f: &mut Frame<'_>, route: &Route, area: Rect) {
    let text = route.placeholder().unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_IDLE))
        .style(Style::default().bg(BG_PRIMARY));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let target = centered_rect(80, 20, inner);
    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            text,
            Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}  ·  Esc to go back", route),
            Style::default().fg(FG_DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(message, target);
}

fn render_status_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    f.render_widget(Clear, area);
    let mut segments = vec![
        format!("[{}]", app.environment.label()),
        format!("[DATA:{}]", app.service_name()),
        format!("[PAGE:{}]", app.route),
    ];
    let deleting = app.agents.pending_delete_count();
    if deleting > 0 {
        segments.push(format!("[DELETING:{}]", deleting));
    }

    let mut spans: Vec<Span> = Vec::new();
    for text in segments {
        spans.push(Span::styled(text, Style::default().fg(BAR_TEXT).bg(BAR_BG)));
        spans.push(Span::styled(" ", Style::default().bg(BAR_BG)));
    }
    spans.push(Span::styled(
        app.status_message.as_str(),
        Style::default().fg(BAR_TEXT).bg(BAR_BG),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(BAR_TEXT).bg(BAR_BG))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn render_overlay(f: &mut Frame<'_>, overlay: &OverlayState) {
    match overlay {
        OverlayState::RowActions(menu) => render_row_actions_overlay(f, menu),
    }
}

fn render_row_actions_overlay(f: &mut Frame<'_>, menu: &RowActionMenu) {
    let area = centered_rect(40, 30, f.size());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", menu.agent_name),
            Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MENU_BORDER))
        .style(Style::default().bg(MENU_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = RowAction::ALL
        .iter()
        .enumerate()
        .map(|(idx, action)| {
            let base = if *action == RowAction::DeleteAgent {
                Style::default().fg(DANGER)
            } else {
                Style::default().fg(FG_PRIMARY)
            };
            let style = if idx == menu.selected {
                Style::default()
                    .fg(MENU_HIGHLIGHT_TEXT)
                    .bg(MENU_HIGHLIGHT_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            ListItem::new(Line::from(Span::styled(format!(" {}", action.label()), style)))
        })
        .collect();
    f.render_widget(List::new(items), chunks[0]);

    let hint = Paragraph::new("Enter select · Esc close")
        .style(Style::default().fg(FG_DIM).bg(MENU_BG))
        .alignment(Alignment::Left);
    f.render_widget(hint, chunks[1]);
}

/// Stacks visible toasts in the top-right corner of `area`, newest first.
fn render_toasts(f: &mut Frame<'_>, app: &App, area: Rect) {
    const TOAST_HEIGHT: u16 = 4;
    let width = area.width.min(44);
    let x = area.x + area.width - width;
    let mut y = area.y;

    for toast in app.toasts.visible() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect {
            x,
            y,
            width,
            height: TOAST_HEIGHT,
        };
        f.render_widget(Clear, rect);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", toast.title),
                Style::default()
                    .fg(toast_border(toast.variant))
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(toast_border(toast.variant)))
            .style(Style::default().bg(BG_PANEL));
        let body = Paragraph::new(toast.description.as_str())
            .style(Style::default().fg(FG_PRIMARY))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(body, rect);
        y += TOAST_HEIGHT;
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1])[1]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    use super::*;
    use crate::app::AppAction;
    use crate::config::{RuntimeEnvironment, Settings};
    use crate::data::{MemoryDataService, UnconfiguredDataService};

    fn settings() -> Settings {
        Settings {
            environment: RuntimeEnvironment::Production,
            ..Settings::default()
        }
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn shell_shows_brand_nav_and_header() {
        let app = App::new(&settings(), Arc::new(UnconfiguredDataService));
        let text = screen(&app, 120, 40);
        for expected in [
            "VoiceCraft",
            "AI Agent Control",
            "Dashboard",
            "My Agents",
            "Voice Library",
            "Sign Out",
            "Search agents, voices, or analytics...",
            "John Doe",
            "Total Active Agents",
            "8,542",
        ] {
            assert!(text.contains(expected), "missing {:?}", expected);
        }
    }

    #[tokio::test]
    async fn small_terminal_shows_resize_hint() {
        let app = App::new(&settings(), Arc::new(UnconfiguredDataService));
        let text = screen(&app, 60, 20);
        assert!(text.contains("Terminal too small"));
    }

    #[tokio::test]
    async fn placeholder_pages_render_their_message() {
        let mut app = App::new(&settings(), Arc::new(UnconfiguredDataService));
        app.execute_action(AppAction::Navigate(Route::Analytics));
        assert!(screen(&app, 120, 40).contains("Analytics Module Coming Soon"));
    }

    #[tokio::test]
    async fn agents_page_renders_rows_and_empty_state() {
        let service = Arc::new(MemoryDataService::with_rows(
            "agents",
            vec![json!({
                "id": "7",
                "name": "Concierge",
                "description": "Front desk",
                "status": "active",
                "created_at": "2024-03-15T00:00:00.000Z"
            })],
        ));
        let mut app = App::new(&settings(), service.clone());
        app.execute_action(AppAction::Navigate(Route::Agents));
        assert!(screen(&app, 120, 40).contains("Loading agents"));

        let event = app.remote_rx.recv().await.unwrap();
        app.handle_remote_event(event);
        let text = screen(&app, 120, 40);
        assert!(text.contains("Concierge"));
        assert!(text.contains("Front desk"));
        assert!(text.contains("Active"));
        assert!(text.contains("Mar 15, 2024"));

        app.execute_action(AppAction::DeleteSelected);
        let text = screen(&app, 120, 40);
        assert!(text.contains("No agents found. Create your first one!"));
        assert!(text.contains("[DELETING:1]"));
        let event = app.remote_rx.recv().await.unwrap();
        app.handle_remote_event(event);
        let text = screen(&app, 120, 40);
        assert!(text.contains("Agent deleted"));
        assert!(!text.contains("DELETING"));
    }

    #[tokio::test]
    async fn row_action_menu_lists_actions() {
        let service = Arc::new(MemoryDataService::with_rows(
            "agents",
            vec![json!({"id": "7", "name": "Concierge", "status": "draft", "created_at": "2024-01-01"})],
        ));
        let mut app = App::new(&settings(), service);
        app.execute_action(AppAction::Navigate(Route::Agents));
        let event = app.remote_rx.recv().await.unwrap();
        app.handle_remote_event(event);
        app.execute_action(AppAction::OpenRowActions);

        let text = screen(&app, 120, 40);
        for label in ["View Details", "Edit Agent", "Delete Agent"] {
            assert!(text.contains(label), "missing {:?}", label);
        }
    }
}
