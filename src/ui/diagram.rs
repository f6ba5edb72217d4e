use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Rectangle},
        Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::diagram::{LayoutDiagram, SegmentKind};
use crate::ui::create_titled_block;

const STRIP_HEIGHT: f64 = 10.0;

/// Draw the schematic strip for the last calculation, first column on the right.
pub fn draw_diagram(f: &mut Frame, app: &App, area: Rect) {
    let block = create_titled_block("Layout (read right to left)", false);

    let Some(diagram) = &app.diagram else {
        f.render_widget(
            Paragraph::new(Span::styled("No layout yet.", Style::default().fg(Color::Gray)))
                .block(block),
            area,
        );
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let labels = diagram.labels();
    let label_rows = u16::try_from(labels.len()).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(label_rows)])
        .split(inner);

    draw_strip(f, diagram, chunks[0]);

    let label_lines: Vec<Line> = labels
        .into_iter()
        .map(|label| Line::from(Span::styled(label, Style::default().fg(Color::Gray))))
        .collect();
    f.render_widget(Paragraph::new(label_lines), chunks[1]);
}

fn draw_strip(f: &mut Frame, diagram: &LayoutDiagram, area: Rect) {
    let extent = diagram.extent_cm.max(1.0);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, extent])
        .y_bounds([0.0, STRIP_HEIGHT])
        .paint(move |ctx| {
            // Outline of the whole sheet, margins included
            ctx.draw(&Rectangle {
                x: 0.0,
                y: 1.0,
                width: diagram.extent_cm,
                height: STRIP_HEIGHT - 2.0,
                color: Color::Gray,
            });

            for segment in diagram.columns() {
                ctx.draw(&Rectangle {
                    x: diagram.mirrored_x(segment),
                    y: 2.0,
                    width: segment.width_cm,
                    height: STRIP_HEIGHT - 4.0,
                    color: Color::LightYellow,
                });
            }

            // Number the first and last columns
            let numbered = [diagram.columns().next(), diagram.columns().last()];
            for segment in numbered.into_iter().flatten() {
                if let SegmentKind::Column(n) = segment.kind {
                    ctx.print(
                        diagram.mirrored_x(segment),
                        STRIP_HEIGHT - 1.0,
                        Span::styled(n.to_string(), Style::default().fg(Color::Yellow)),
                    );
                }
            }
        });

    f.render_widget(canvas, area);
}
