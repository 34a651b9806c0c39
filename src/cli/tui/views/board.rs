//! Board view: Active | Done | Archived columns over the search results

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

use super::chrome;
use crate::cli::tui::app::App;
use crate::cli::tui::utils::{select_box, truncate_str};
use crate::domain::{Filter, Task};

/// Draw the board layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Columns
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(main_chunks[1]);

    chrome::draw_search(frame, app, main_chunks[0]);

    let results = app.store().search_results();
    let column_specs = [
        (Filter::Active, Color::Yellow),
        (Filter::Done, Color::Green),
        (Filter::Archived, Color::Magenta),
    ];
    for ((filter, color), column) in column_specs.into_iter().zip(columns.iter()) {
        let tasks: Vec<&Task> = results
            .iter()
            .copied()
            .filter(|t| filter.matches(t))
            .collect();
        draw_column(frame, app, filter, color, &tasks, *column);
    }

    chrome::draw_status_bar(frame, app, main_chunks[2]);
    chrome::draw_delete_modal(frame, app);
}

fn draw_column(
    frame: &mut Frame,
    app: &App,
    filter: Filter,
    color: Color,
    tasks: &[&Task],
    area: Rect,
) {
    let store = app.store();
    let bulk = store.capabilities().bulk_selection;
    let cursor_id = app.cursor_task().map(|t| t.id);
    let text_width = (area.width as usize).saturating_sub(10);

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let pointer = if Some(task.id) == cursor_id { "> " } else { "  " };
            let mut style = Style::default().fg(color);
            if Some(task.id) == cursor_id {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            ListItem::new(format!(
                "{}{}{}",
                pointer,
                select_box(bulk, store.is_selected(task.id)),
                truncate_str(&task.text, text_width)
            ))
            .style(style)
        })
        .collect();

    let border_style = if holds_cursor(store.filter(), filter) {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(color)
    };

    let list = List::new(items).block(
        Block::default()
            .title(format!("{} ({})", filter.label(), tasks.len()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(list, area);
}

/// Whether the cursor can land in `column` under the `active` filter.
/// `All` spans every column.
fn holds_cursor(active: Filter, column: Filter) -> bool {
    active == Filter::All || active == column
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filter_highlights_every_column() {
        for column in [Filter::Active, Filter::Done, Filter::Archived] {
            assert!(holds_cursor(Filter::All, column));
        }
    }

    #[test]
    fn narrow_filter_highlights_its_column() {
        assert!(holds_cursor(Filter::Done, Filter::Done));
        assert!(!holds_cursor(Filter::Done, Filter::Active));
        assert!(!holds_cursor(Filter::Archived, Filter::Done));
    }
}
