//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod book_list;
mod diagram;
mod form;

pub use book_list::draw_book_list;
pub use diagram::draw_diagram;
pub use form::{draw_form, draw_results};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::constants::ui::BOOK_PANE_WIDTH;
use crate::input::{AppMode, Focus};
use crate::types::CountMode;

/// Render the full application UI to the terminal frame.
#[allow(clippy::cast_possible_truncation)]
pub fn draw(f: &mut Frame, app: &mut App) {
    // Create the base layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode {
        AppMode::Splash => draw_splash(f, app, chunks[0]),
        AppMode::Calculator => draw_calculator(f, app, chunks[0]),
    }

    // Draw status/info modal (blocking)
    if let Some(status) = &app.status_message {
        draw_message_modal(f, "Info", status, Color::Cyan);
        return;
    }
    // Draw error message if present (blocking)
    if let Some(error) = &app.error_message {
        draw_message_modal(f, "Error", error, Color::Red);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    }

    if app.mode == AppMode::Splash {
        let msg = "Press any key to continue...";

        // Make sure the area is large enough for the message
        if chunks[1].width >= msg.len() as u16 && chunks[1].height >= 3 {
            let width = msg.len() as u16;
            let x = (chunks[1].width.saturating_sub(width)) / 2;
            let text_area = Rect {
                x: chunks[1].left() + x,
                y: chunks[1].top() + 1,
                width,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(msg).style(Style::default().fg(Color::Yellow)),
                text_area,
            );
        }
    } else {
        draw_command_bar(f, app, chunks[1]);
    }
}

fn draw_calculator(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOOK_PANE_WIDTH), Constraint::Min(40)])
        .split(area);

    draw_book_list(f, app, columns[0]);

    let form_rows = u16::try_from(app.form.visible_fields().len()).unwrap_or(u16::MAX);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form_rows.saturating_add(2)),
            Constraint::Length(6),
            Constraint::Min(7),
        ])
        .split(columns[1]);

    draw_form(f, app, right[0]);
    draw_results(f, app, right[1]);
    draw_diagram(f, app, right[2]);
}

fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.book_search_active { "Search Books" } else { "Commands/Status" };
    let border_color = if app.book_search_active { Color::Cyan } else { Color::Yellow };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin of 1 to account for the border
        .split(area)[0];

    if app.book_search_active {
        let search = Paragraph::new(format!(" /{}", app.book_search_query))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(search, inner_area);
        return;
    }

    let hints: &[(&str, &str)] = match app.focus {
        Focus::Books => &[
            ("Enter", "Calculate"),
            ("Tab", "Form"),
            ("/", "Search"),
            ("w", "Words"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        Focus::Form => &[
            ("Enter", "Calculate"),
            ("Tab", "Books"),
            ("←/→", "Step"),
            ("r", "Reset"),
            ("y", "Copy"),
            ("q", "Quit"),
        ],
    };

    let mut text = create_help_text(hints);
    let mode = match app.count_mode {
        CountMode::Characters => format!("Characters, gaps {}", app.gap_policy.name()),
        CountMode::Words => "Words (no margins)".to_string(),
    };
    text.push(Span::styled(format!(" | {mode}"), Style::default().fg(Color::Gray)));

    let status_bar = Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Gray));
    f.render_widget(status_bar, inner_area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(
            *key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let title_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

#[allow(clippy::cast_possible_truncation)]
fn draw_splash(f: &mut Frame, app: &App, area: Rect) {
    let logo = [
        r"  ┌──────┬──────┬──────┬──────┬──────┐  ",
        r"  │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │  ",
        r"  │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │  ",
        r"  │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │ ≡≡≡≡ │  ",
        r"  └──────┴──────┴──────┴──────┴──────┘  ",
        r"                                        ",
        r"  Ancient Manuscript Length Calculator  ",
        r"                                        ",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightBlue))
        .title(Span::styled(
            app.config.app_name().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let logo_height = logo.len() as u16;
    let logo_width = logo[0].chars().count() as u16;
    let vertical_pad = (inner_area.height.saturating_sub(logo_height)) / 2;
    let horizontal_pad = (inner_area.width.saturating_sub(logo_width)) / 2;

    for (i, line) in logo.iter().enumerate() {
        let y = inner_area.top() + vertical_pad + i as u16;
        if y >= inner_area.bottom() {
            break;
        }

        let text_area = Rect {
            x: inner_area.left() + horizontal_pad,
            y,
            width: logo_width.min(inner_area.width),
            height: 1,
        };

        let style = if i < 5 {
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };

        f.render_widget(Paragraph::new(*line).style(style), text_area);
    }

    let version_text = format!("v{}", app.config.app_version());
    if area.width > (version_text.len() + 2) as u16 && area.height >= 2 {
        let version_area = Rect {
            x: area.right() - version_text.len() as u16 - 2,
            y: area.bottom() - 2,
            width: version_text.len() as u16,
            height: 1,
        };

        f.render_widget(
            Paragraph::new(version_text).style(Style::default().fg(Color::Gray)),
            version_area,
        );
    }
}

/// Centered blocking message box, dismissed with Esc or Enter.
#[allow(clippy::cast_possible_truncation)]
fn draw_message_modal(f: &mut Frame, title: &str, message: &str, accent: Color) {
    use unicode_width::UnicodeWidthStr;
    let size = f.size();

    // Between 50 columns and 80% of the screen
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(50) as u16;
    let width = width.min(size.width.saturating_sub(4));

    let inner_width = width.saturating_sub(4) as usize;
    let msg_lines = message.width().div_ceil(inner_width.max(1));
    let height = (msg_lines as u16 + 4).min(size.height.saturating_sub(4));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();

    let width = 60.min(size.width.saturating_sub(4));
    let height = 26.min(size.height.saturating_sub(4));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let help_text: Vec<Line> = build_help_content(app)
        .into_iter()
        .map(|(key, desc, is_header)| {
            if is_header {
                Line::from(vec![Span::styled(
                    key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{key:>12}"),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

// Build help content based on the focused pane
fn build_help_content(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        ("Enter / c", "Calculate", false),
        ("Tab", "Switch between books and form", false),
        ("w", "Toggle word-count mode", false),
        ("g", "Toggle gap clamping", false),
        ("y", "Copy result to clipboard", false),
        ("q / Esc", "Quit", false),
        ("", "", false),
    ];

    match app.focus {
        Focus::Books => lines.extend([
            ("── Books ──", "", true),
            ("↑/↓ or j/k", "Select book", false),
            ("PgUp/PgDn", "Jump ten books", false),
            ("/", "Filter books by name", false),
        ]),
        Focus::Form => lines.extend([
            ("── Layout ──", "", true),
            ("↑/↓", "Select field", false),
            ("←/→ or -/+", "Step value", false),
            ("0-9 .", "Type value", false),
            ("Backspace", "Delete digit", false),
            ("r", "Reset to defaults", false),
        ]),
    }

    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));

    lines
}
