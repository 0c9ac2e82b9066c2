//! Interactive terminal dashboard.
//!
//! Upload view: type or paste (drag a file onto the terminal) a CSV path and
//! press Enter; Ctrl+D loads the demo statement.
//! Dashboard view: `/` search, Up/Down select, `x` delete, `u` upload new, `q` quit.

use analyzer_finance::Analysis;
use analyzer_ingest::ingest_path;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use tracing::info;

use crate::app::{Action, AppState, View};
use crate::report::{money, points, table_amount};

/// Terminal-only state that has no meaning outside this front end
#[derive(Debug, Default)]
struct Ui {
    path_input: String,
    editing_search: bool,
    selected: usize,
    quit: bool,
}

pub async fn run_dashboard(initial: AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, initial).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    res
}

async fn dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    initial: AppState,
) -> Result<()> {
    let mut state = initial;
    let mut ui = Ui::default();

    while !ui.quit {
        let analysis = state.analysis();
        terminal.draw(|f| match (state.screen(), analysis.as_ref()) {
            (View::Dashboard, Some(a)) => draw_dashboard(f, &state, a, &ui),
            _ => draw_upload(f, &state, &ui),
        })?;

        if !event::poll(std::time::Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Paste(text) => {
                if state.screen() == View::Upload {
                    ui.path_input = text.trim().trim_matches('\'').to_string();
                    state = state.reduce(Action::DragEnter);
                }
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                state = match state.screen() {
                    View::Upload => handle_upload_key(state, &mut ui, key).await,
                    View::Dashboard => handle_dashboard_key(state, &mut ui, key),
                };
            }
            _ => {}
        }
    }

    Ok(())
}

async fn handle_upload_key(state: AppState, ui: &mut Ui, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            ui.selected = 0;
            state.reduce(Action::LoadDemo)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            ui.quit = true;
            state
        }
        KeyCode::Esc => {
            if state.dragging {
                ui.path_input.clear();
                state.reduce(Action::DragLeave)
            } else {
                ui.quit = true;
                state
            }
        }
        KeyCode::Tab if !state.transactions.is_empty() => state.reduce(Action::ShowDashboard),
        KeyCode::Enter => {
            let path = ui.path_input.trim().to_string();
            if path.is_empty() {
                return state;
            }
            let state = state.reduce(Action::UploadStarted);
            match ingest_path(&path).await {
                Ok(txns) => {
                    info!(path = %path, count = txns.len(), "loaded statement");
                    ui.path_input.clear();
                    ui.selected = 0;
                    state.reduce(Action::UploadSucceeded(txns))
                }
                Err(e) => state.reduce(Action::UploadFailed(e.to_string())),
            }
        }
        KeyCode::Backspace => {
            ui.path_input.pop();
            state
        }
        KeyCode::Char(c) => {
            ui.path_input.push(c);
            state
        }
        _ => state,
    }
}

fn handle_dashboard_key(state: AppState, ui: &mut Ui, key: KeyEvent) -> AppState {
    if ui.editing_search {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                ui.editing_search = false;
                state
            }
            KeyCode::Backspace => {
                let mut term = state.search.clone();
                term.pop();
                ui.selected = 0;
                state.reduce(Action::SetSearch(term))
            }
            KeyCode::Char(c) => {
                let term = format!("{}{}", state.search, c);
                ui.selected = 0;
                state.reduce(Action::SetSearch(term))
            }
            _ => state,
        };
    }

    let visible = state.visible_transactions().count();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            ui.quit = true;
            state
        }
        KeyCode::Char('/') => {
            ui.editing_search = true;
            state
        }
        KeyCode::Char('u') => state.reduce(Action::ShowUpload),
        KeyCode::Down => {
            if ui.selected + 1 < visible {
                ui.selected += 1;
            }
            state
        }
        KeyCode::Up => {
            ui.selected = ui.selected.saturating_sub(1);
            state
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            let id = state.visible_transactions().nth(ui.selected).map(|t| t.id);
            match id {
                Some(id) => {
                    let state = state.reduce(Action::DeleteTransaction(id));
                    let remaining = state.visible_transactions().count();
                    ui.selected = ui.selected.min(remaining.saturating_sub(1));
                    state
                }
                None => state,
            }
        }
        _ => state,
    }
}

fn hex(color: &str) -> Color {
    color.parse().unwrap_or(Color::Gray)
}

fn draw_upload(f: &mut Frame, state: &AppState, ui: &Ui) {
    let area = centered(f.area(), 70, 16);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(2),
        ])
        .split(area);

    let title = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "Statement Analyzer",
            Style::default().fg(Color::Indexed(63)).add_modifier(Modifier::BOLD),
        )),
        Line::raw("Unlock insights from your credit card usage."),
        Line::raw("Visualize spending, track rewards, and find savings."),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let border = if state.dragging { Color::Indexed(63) } else { Color::Gray };
    let drop = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "Drop your statement here",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw("Supports .CSV files only"),
        Line::raw(format!("> {}", ui.path_input)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("path (Enter to load)"),
    );
    f.render_widget(drop, chunks[1]);

    if let Some(err) = &state.error {
        let err = Paragraph::new(err.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(err, chunks[2]);
    }

    let mut hints = vec!["Ctrl+D: No file? Try with Demo Data", "Esc: quit"];
    if !state.transactions.is_empty() {
        hints.push("Tab: back to dashboard");
    }
    let help = Paragraph::new(hints.join("   "))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

fn draw_dashboard(f: &mut Frame, state: &AppState, a: &Analysis, ui: &Ui) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(Span::styled(
        "Statement Analyzer",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(header, rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    stat_card(f, cards[0], "Total Spend", money(a.total_spend), "This Statement", Color::White);
    stat_card(
        f,
        cards[1],
        "Reward Points",
        format!("{} pts", points(a.total_points)),
        "Estimated Earned",
        Color::Yellow,
    );
    stat_card(
        f,
        cards[2],
        "Potential Savings",
        format!("${}", a.potential_savings()),
        "Optimizable Spend",
        Color::Green,
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(rows[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(a.categories.len() as u16 + 2),
            Constraint::Min(5),
        ])
        .split(body[0]);
    draw_breakdown(f, left[0], a);
    draw_table(f, left[1], state, a, ui);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(body[1]);
    draw_insights(f, right[0], a);
    draw_rewards(f, right[1], a);

    let help = if ui.editing_search {
        "search: type to filter, Enter/Esc done"
    } else {
        "/ search   ↑↓ select   x delete   u upload new   q quit"
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::Gray)),
        rows[3],
    );
}

fn stat_card(f: &mut Frame, area: Rect, title: &str, value: String, subtext: &str, color: Color) {
    let card = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtext, Style::default().fg(Color::Gray))),
    ]))
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(card, area);
}

fn draw_breakdown(f: &mut Frame, area: Rect, a: &Analysis) {
    let block = Block::default().borders(Borders::ALL).title("Category Breakdown");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); a.categories.len()])
        .split(inner);

    for (c, line) in a.categories.iter().zip(lines.iter()) {
        let share = a.category_share(c);
        let cfg = c.category.config();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(hex(cfg.color)))
            .ratio((share / 100.0).clamp(0.0, 1.0))
            .label(format!("{}  {} ({:.1}%)", cfg.label, money(c.amount), share));
        f.render_widget(gauge, *line);
    }
}

fn draw_table(f: &mut Frame, area: Rect, state: &AppState, a: &Analysis, ui: &Ui) {
    let visible: Vec<_> = a
        .transactions
        .iter()
        .filter(|t| t.transaction.matches_search(&state.search))
        .collect();

    let title = if state.search.is_empty() && !ui.editing_search {
        "Transactions".to_string()
    } else {
        format!("Transactions (search: {})", state.search)
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if visible.is_empty() {
        let empty = Paragraph::new(format!("No transactions found matching \"{}\"", state.search))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows = visible.iter().map(|t| {
        let (label, color) = match t.category {
            Some(c) => (c.label(), hex(c.config().color)),
            None => ("Payment", Color::Green),
        };
        let pts = t.points.map(|p| format!("+{}", p)).unwrap_or_default();
        let amount_style = if t.transaction.is_credit() {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(t.transaction.date.clone()),
            Cell::from(t.transaction.description.clone()),
            Cell::from(Span::styled(label, Style::default().fg(color))),
            Cell::from(pts),
            Cell::from(Span::styled(table_amount(t), amount_style)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Length(20),
            Constraint::Length(7),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Date", "Merchant", "Category", "Points", "Amount"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(block);

    let mut table_state = TableState::default().with_selected(Some(ui.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_insights(f: &mut Frame, area: Rect, a: &Analysis) {
    let mut lines: Vec<Line> = Vec::new();
    if a.rule_insights().next().is_none() {
        lines.push(Line::from(Span::styled(
            "Great job! No unusual spending patterns detected.",
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::raw(""));
    }
    for insight in &a.insights {
        let color = match insight.severity {
            analyzer_core::Severity::Warning => Color::Yellow,
            analyzer_core::Severity::Info => Color::Indexed(63),
        };
        lines.push(Line::from(Span::styled(
            insight.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(insight.description.clone()));
        if let Some(saving) = insight.estimated_saving.filter(|s| *s > 0) {
            lines.push(Line::from(Span::styled(
                format!("Potential Savings: ${}", saving),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::raw(""));
    }

    let panel = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Smart Insights"));
    f.render_widget(panel, area);
}

fn draw_rewards(f: &mut Frame, area: Rect, a: &Analysis) {
    let panel = Paragraph::new(Text::from(vec![
        Line::raw("Total Points Earned"),
        Line::from(Span::styled(
            points(a.total_points),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::raw(format!(
            "Redeem for a {} statement credit or transfer to travel partners.",
            money(a.redemption_value())
        )),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Rewards Status"));
    f.render_widget(panel, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
