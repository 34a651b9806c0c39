//! List view: filter tabs, search, task list and details

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::chrome;
use crate::cli::tui::app::App;
use crate::cli::tui::utils::{select_box, task_line};

/// Draw the list layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter tabs
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Tasks + details
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[2]);

    chrome::draw_tabs(frame, app, main_chunks[0]);
    chrome::draw_search(frame, app, main_chunks[1]);
    draw_tasks_panel(frame, app, content_chunks[0]);
    draw_details_panel(frame, app, content_chunks[1]);
    chrome::draw_status_bar(frame, app, main_chunks[3]);
    chrome::draw_delete_modal(frame, app);
}

/// Draw the visible tasks
fn draw_tasks_panel(frame: &mut Frame, app: &App, area: Rect) {
    let store = app.store();
    let bulk = store.capabilities().bulk_selection;
    let visible = store.visible_tasks();

    // Borders, highlight symbol, checkbox, badge
    let text_width = (area.width as usize).saturating_sub(20);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let style = if task.done {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if task.archived {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            };

            ListItem::new(format!(
                "{}{}",
                select_box(bulk, store.is_selected(task.id)),
                task_line(task, text_width)
            ))
            .style(style)
        })
        .collect();

    let title = format!("Tasks ({}/{})", visible.len(), store.tasks().len());

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.cursor()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw details for the task under the cursor
fn draw_details_panel(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(task) = app.cursor_task() {
        let mut lines = vec![
            format!("Task: {}", task.id),
            format!("Text: {}", task.text),
            format!("Status: {}", task.status_label()),
            format!("Archived: {}", if task.archived { "yes" } else { "no" }),
            format!("Created: {}", task.created_at.format("%Y-%m-%d %H:%M")),
            String::new(),
            format!("[d] {}", task.toggle_label()),
        ];

        if task.can_archive() {
            lines.push("[a] Archive".to_string());
        }
        lines.push("[x] Delete".to_string());

        lines.join("\n")
    } else if app.store().tasks().is_empty() {
        "No tasks yet. Press n to add one.".to_string()
    } else {
        "No tasks match".to_string()
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
