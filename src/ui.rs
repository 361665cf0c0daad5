use crate::date::{format_date, format_timestamp};
use crate::task::Task;
use crate::task_store::TaskStore;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Terminal,
};
use std::io;

pub const NO_TASKS: &str = "No tasks found.";
pub const ADDED: &str = "Task added successfully!";
pub const COMPLETED: &str = "Task marked as complete!";
pub const REMOVED: &str = "Task removed successfully!";

/// `1. [✓] Buy milk (Priority: 2) - Due: 2024-01-15`
pub fn format_row(position: usize, task: &Task) -> String {
    format!(
        "{}. [{}] {} (Priority: {}) - {}",
        position,
        status_glyph(task),
        task.description,
        task.priority,
        due_label(task)
    )
}

fn status_glyph(task: &Task) -> &'static str {
    if task.completed {
        "✓"
    } else {
        "✗"
    }
}

fn due_label(task: &Task) -> String {
    match task.due_date {
        Some(date) => format!("Due: {}", format_date(date)),
        None => "No due date".to_string(),
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, store: &mut TaskStore) -> io::Result<()> {
    let mut state = ListState::default();
    let mut status = String::from("a: add  c/Enter: complete  d: remove  q: quit");
    if !store.is_empty() {
        state.select(Some(0));
    }

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(3), Constraint::Length(3)])
                .split(f.area());

            let items: Vec<ListItem> = store
                .list()
                .into_iter()
                .map(|(position, t)| {
                    let style = if t.completed {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("{}. [{}] ", position, status_glyph(t))),
                        Span::styled(t.description.as_str(), style),
                        Span::raw(format!(" (Priority: {}) - {}", t.priority, due_label(t))),
                    ]))
                })
                .collect();

            let title = if store.is_empty() {
                NO_TASKS.to_string()
            } else {
                format!("Tasks ({})", store.config().path().display())
            };
            let list = List::new(items)
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
            f.render_stateful_widget(list, chunks[0], &mut state);

            let created = state
                .selected()
                .and_then(|i| store.get(i + 1))
                .map(|t| format!("  |  created {}", format_timestamp(t.created_at())))
                .unwrap_or_default();
            let footer = Paragraph::new(format!("{}{}", status, created)).block(Block::default().borders(Borders::ALL));
            f.render_widget(footer, chunks[1]);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let selected = state.selected().map(|i| i + 1);
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('a') => {
                    terminal.clear()?;
                    status = prompt_add(store);
                    terminal.clear()?;
                    if state.selected().is_none() && !store.is_empty() {
                        state.select(Some(0));
                    }
                }
                KeyCode::Char('c') | KeyCode::Enter => {
                    if let Some(position) = selected {
                        status = outcome(store.mark_complete(position), COMPLETED);
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(position) = selected {
                        status = outcome(store.remove(position), REMOVED);
                        if store.is_empty() {
                            state.select(None);
                        } else if position > store.len() {
                            state.select(Some(store.len() - 1));
                        }
                    }
                }
                KeyCode::Up => {
                    if let Some(i) = state.selected().filter(|&i| i > 0) {
                        state.select(Some(i - 1));
                    }
                }
                KeyCode::Down => {
                    if let Some(i) = state.selected().filter(|&i| i + 1 < store.len()) {
                        state.select(Some(i + 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn outcome(result: crate::error::Result<()>, success: &str) -> String {
    match result {
        Ok(()) => success.to_string(),
        Err(err) => format!("Error: {}", err),
    }
}

fn prompt_add(store: &mut TaskStore) -> String {
    let Some(description) = prompt("Enter task description") else {
        return "Add cancelled.".to_string();
    };
    let Some(due_date) = prompt("Enter due date (YYYY-MM-DD) or leave blank") else {
        return "Add cancelled.".to_string();
    };
    let Some(priority) = prompt("Enter priority (1-5)") else {
        return "Add cancelled.".to_string();
    };
    let priority = match priority.parse::<i64>() {
        Ok(priority) => priority,
        Err(_) => return format!("Error: invalid priority {:?}", priority),
    };
    outcome(store.add(description, Some(&due_date), priority), ADDED)
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input);
    enable_raw_mode().ok();
    match read {
        Ok(n) if n > 0 => Some(input.trim().to_string()),
        _ => None,
    }
}
