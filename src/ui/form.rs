use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::input::Focus;
use crate::types::CountMode;
use crate::ui::create_titled_block;

const LABEL_WIDTH: usize = 38;

/// Draw the editable layout parameters, one row per field.
pub fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Form;
    let selected = app.form.selected_index();

    let lines: Vec<Line> = app
        .form
        .visible_fields()
        .iter()
        .enumerate()
        .map(|(i, &field)| {
            let is_selected = focused && i == selected;
            let value_style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let cursor = if is_selected { "_" } else { " " };

            Line::from(vec![
                Span::raw(if is_selected { "> " } else { "  " }),
                Span::styled(
                    format!("{:width$}", field.label(), width = LABEL_WIDTH),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!(" {}{cursor} ", app.form.buffer(field)), value_style),
            ])
        })
        .collect();

    let title = match app.count_mode {
        CountMode::Characters => "Layout",
        CountMode::Words => "Layout (word count)",
    };

    f.render_widget(Paragraph::new(lines).block(create_titled_block(title, focused)), area);
}

/// Draw the last calculation, or a prompt when there is none.
pub fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let block = create_titled_block("Result", false);

    let Some(calculation) = &app.calculation else {
        let prompt = Paragraph::new(Line::from(Span::styled(
            "Select a book and press Enter to calculate.",
            Style::default().fg(Color::Gray),
        )))
        .block(block);
        f.render_widget(prompt, area);
        return;
    };

    let value_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{}: ", calculation.book)),
            Span::styled(format!("{} columns", calculation.result.total_columns), value_style),
            Span::raw(", "),
            Span::styled(format!("{} cm", calculation.result.total_length_cm), value_style),
        ]),
        Line::from(Span::styled(
            match calculation.words {
                Some(words) => format!(
                    "{words} words, {} characters, margins ignored",
                    calculation.total_characters
                ),
                None => format!(
                    "{} characters, gaps {}",
                    calculation.total_characters,
                    calculation.gap_policy.name()
                ),
            },
            Style::default().fg(Color::Gray),
        )),
    ];

    if let Some(warning) = calculation.warning {
        lines.push(Line::from(Span::styled(
            warning.message(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
