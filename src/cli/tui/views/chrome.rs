//! Widgets shared by every view: filter tabs, search line, status bar and
//! the deletion prompt

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

use crate::cli::tui::app::{App, InputMode};
use crate::cli::tui::ui::centered_rect;
use crate::cli::tui::ViewMode;
use crate::domain::Filter;

/// Draw the filter tabs with per-filter counts
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let counts = app.store().counts();
    let titles: Vec<Line> = Filter::ALL
        .iter()
        .enumerate()
        .map(|(i, filter)| {
            Line::from(format!("{}:{} ({})", i + 1, filter.label(), counts.get(*filter)))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.store().filter().index())
        .block(Block::default().title("My To-Do List").borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Draw the search line
pub fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Search(query) => (format!("{}_", query), Style::default().fg(Color::Yellow)),
        _ if app.store().search_query().is_empty() => (
            "Press / to search tasks...".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        _ => (app.store().search_query().to_string(), Style::default()),
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().title("Search").borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = app.status_message().unwrap_or(
                "[n]ew [d]one [a]rchive [x]delete [/]search [1-4]filter [b]oard [?]help [q]uit",
            );
            (msg.to_string(), Style::default())
        }
        InputMode::Search(_) => (
            "Type to filter, Enter to keep, Esc to clear".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::NewTask(text) => (
            format!("What needs to be done? {}_", text),
            Style::default().fg(Color::Green),
        ),
    };

    let view_str = match app.view_mode() {
        ViewMode::List => "[List]",
        ViewMode::Board => "[Board]",
    };

    let store = app.store();
    let selection = if store.capabilities().bulk_selection && !store.selected().is_empty() {
        let summary = store.selection_summary();
        if summary.all_visible_selected {
            format!(" [all {} selected]", summary.selected)
        } else {
            format!(" [{} selected]", summary.selected)
        }
    } else {
        String::new()
    };

    let status_text = format!("{}{} {}", view_str, selection, content);

    let paragraph = Paragraph::new(status_text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Draw the deletion prompt over everything else when a deletion is pending
pub fn draw_delete_modal(frame: &mut Frame, app: &App) {
    let Some(task) = app.store().pending_deletion() else {
        return;
    };

    let area = centered_rect(60, 7, frame.area());
    let text = vec![
        Line::from(format!(
            "Are you sure you want to delete the task \"{}\"?",
            task.text
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[n] Cancel", Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled(
                "[y] Delete",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Confirm Deletion")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
