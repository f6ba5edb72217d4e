use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::App;
use crate::input::Focus;
use crate::ui::create_titled_block;

/// Draw the book selector with character counts.
pub fn draw_book_list(f: &mut Frame, app: &mut App, area: Rect) {
    let selected = app.book_list_state.selected();
    let name_width = usize::from(area.width.saturating_sub(14)).max(8);

    let items: Vec<ListItem> = app
        .visible_books
        .iter()
        .enumerate()
        .filter_map(|(row, &idx)| app.catalog.entry(idx).map(|entry| (row, entry)))
        .map(|(row, entry)| {
            let (prefix, text_style) = if Some(row) == selected {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };

            let name = if entry.name.chars().count() > name_width {
                let cut: String = entry.name.chars().take(name_width - 3).collect();
                format!("{cut}...")
            } else {
                format!("{:name_width$}", entry.name)
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(name, text_style),
                Span::styled(
                    format!(" {:>7}", entry.effective_characters()),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let title = if app.book_search_active || !app.book_search_query.is_empty() {
        format!("Books /{} ({})", app.book_search_query, app.visible_books.len())
    } else {
        format!("Books ({})", app.visible_books.len())
    };

    let list = List::new(items)
        .block(create_titled_block(&title, app.focus == Focus::Books))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("");

    f.render_stateful_widget(list, area, &mut app.book_list_state);
}
