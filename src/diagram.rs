//! Geometry of the schematic column strip.
//!
//! Segments are laid out in reading order starting at 0 cm: the right margin,
//! then whole columns separated by gaps, then the left margin. Hebrew is read
//! right to left, so renderers place 0 cm at the right-hand edge.

use crate::constants::ui::MAX_DRAWN_COLUMNS;
use crate::types::{LayoutParameters, LayoutResult};

/// What a stretch of the strip is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Margin before the first column.
    RightMargin,
    /// A written column (1-based).
    Column(usize),
    /// Blank space between two columns.
    Gap,
    /// Margin after the last column.
    LeftMargin,
}

/// A stretch of the strip in centimeters from its start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// What this stretch is.
    pub kind: SegmentKind,
    /// Offset from the start of the strip.
    pub start_cm: f64,
    /// Extent of the stretch.
    pub width_cm: f64,
}

impl Segment {
    /// Offset of the far edge.
    pub fn end_cm(&self) -> f64 {
        self.start_cm + self.width_cm
    }
}

/// Drawable model of a layout result.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDiagram {
    /// All stretches in reading order.
    pub segments: Vec<Segment>,
    /// Number of whole columns in the layout.
    pub column_count: usize,
    /// Number of columns in `segments`, at most [`MAX_DRAWN_COLUMNS`].
    pub drawn_columns: usize,
    /// Extent of the drawn strip.
    pub extent_cm: f64,
    /// Computed manuscript length, for the dimension label.
    pub total_length_cm: f64,
    /// Computed column count, for the dimension label.
    pub total_columns: f64,
    /// Parameters the strip was drawn from.
    pub parameters: LayoutParameters,
}

impl LayoutDiagram {
    /// Lay out `floor(total_columns)` columns between the two margins,
    /// drawing no more than [`MAX_DRAWN_COLUMNS`] of them.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn build(result: &LayoutResult, params: &LayoutParameters) -> Self {
        // `as` saturates, so huge counts stay finite
        let column_count = if result.total_columns.is_finite() && result.total_columns > 0.0 {
            result.total_columns.floor() as usize
        } else {
            0
        };
        let drawn_columns = column_count.min(MAX_DRAWN_COLUMNS);

        let mut segments = Vec::with_capacity(drawn_columns * 2 + 1);
        let mut cursor = 0.0;
        let mut push = |kind, width_cm: f64| {
            segments.push(Segment { kind, start_cm: cursor, width_cm });
            cursor += width_cm;
        };

        push(SegmentKind::RightMargin, params.right_margin_cm.max(0.0));
        for n in 1..=drawn_columns {
            if n > 1 {
                push(SegmentKind::Gap, params.inter_column_margin_cm.max(0.0));
            }
            push(SegmentKind::Column(n), params.column_width_cm.max(0.0));
        }
        push(SegmentKind::LeftMargin, params.left_margin_cm.max(0.0));

        Self {
            segments,
            column_count,
            drawn_columns,
            extent_cm: cursor,
            total_length_cm: result.total_length_cm,
            total_columns: result.total_columns,
            parameters: *params,
        }
    }

    /// Column segments only.
    pub fn columns(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| matches!(s.kind, SegmentKind::Column(_)))
    }

    /// Mirror a reading-order offset onto a left-to-right axis.
    pub fn mirrored_x(&self, segment: &Segment) -> f64 {
        self.extent_cm - segment.end_cm()
    }

    /// Whether the strip shows fewer columns than the layout has.
    pub const fn is_truncated(&self) -> bool {
        self.drawn_columns < self.column_count
    }

    /// Dimension labels shown under the strip.
    pub fn labels(&self) -> Vec<String> {
        let p = &self.parameters;
        let mut labels = vec![
            format!(
                "{} columns x {:.1} cm, gaps {:.1} cm",
                self.column_count, p.column_width_cm, p.inter_column_margin_cm
            ),
            format!(
                "margins: right {:.1} cm, left {:.1} cm",
                p.right_margin_cm, p.left_margin_cm
            ),
            format!(
                "total: {} columns, {} cm",
                self.total_columns, self.total_length_cm
            ),
        ];
        if self.is_truncated() {
            labels.push(format!(
                "strip truncated: first {} of {} columns drawn",
                self.drawn_columns, self.column_count
            ));
        }
        labels
    }

    /// Segment covering a reading-order offset, if any.
    fn kind_at(&self, offset_cm: f64) -> Option<SegmentKind> {
        self.segments
            .iter()
            .find(|s| s.width_cm > 0.0 && offset_cm >= s.start_cm && offset_cm < s.end_cm())
            .map(|s| s.kind)
    }

    /// Text strip `width` cells wide, first column at the right.
    ///
    /// Columns are `#`, gaps blank, margins `.`; labels follow on new lines.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_ascii(&self, width: usize) -> String {
        let width = width.max(1);
        let mut strip = String::with_capacity(width + 2);
        strip.push('|');
        if self.extent_cm > 0.0 {
            let cell_cm = self.extent_cm / width as f64;
            for cell in 0..width {
                // Sample the cell centre, mirrored so reading starts on the right.
                let x = (cell as f64 + 0.5) * cell_cm;
                let ch = match self.kind_at(self.extent_cm - x) {
                    Some(SegmentKind::Column(_)) => '#',
                    Some(SegmentKind::Gap) => ' ',
                    Some(SegmentKind::RightMargin | SegmentKind::LeftMargin) | None => '.',
                };
                strip.push(ch);
            }
        } else {
            strip.push_str(&".".repeat(width));
        }
        strip.push('|');

        let mut out = strip;
        for label in self.labels() {
            out.push('\n');
            out.push_str(&label);
        }
        out
    }
}
