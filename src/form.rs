//! Editable layout form.
//!
//! Each field keeps the text the user typed so partially entered values
//! survive redraws. Values are parsed only when a calculation is requested.

use crossterm::event::{KeyCode, KeyEvent};

use crate::constants::layout;
use crate::error::{Error, Result};
use crate::types::LayoutParameters;

/// A numeric input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Lines per column.
    LinesPerColumn,
    /// Characters per line.
    CharactersPerLine,
    /// Column width in cm.
    ColumnWidth,
    /// Margin before the first column in cm.
    RightMargin,
    /// Margin after the last column in cm.
    LeftMargin,
    /// Margin between columns in cm.
    InterColumnMargin,
    /// Word count, shown only in word mode.
    WordCount,
}

const LAYOUT_FIELDS: &[Field] = &[
    Field::LinesPerColumn,
    Field::CharactersPerLine,
    Field::ColumnWidth,
    Field::RightMargin,
    Field::LeftMargin,
    Field::InterColumnMargin,
];

const ALL_FIELDS: &[Field] = &[
    Field::LinesPerColumn,
    Field::CharactersPerLine,
    Field::ColumnWidth,
    Field::RightMargin,
    Field::LeftMargin,
    Field::InterColumnMargin,
    Field::WordCount,
];

impl Field {
    /// Label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LinesPerColumn => "Lines per Column",
            Self::CharactersPerLine => "Characters per Line",
            Self::ColumnWidth => "Column Width (cm)",
            Self::RightMargin => "Right Margin Before First Column (cm)",
            Self::LeftMargin => "Left Margin After Last Column (cm)",
            Self::InterColumnMargin => "Margin Between Columns (cm)",
            Self::WordCount => "Word Count",
        }
    }

    /// Whether the field only takes whole numbers.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::LinesPerColumn | Self::CharactersPerLine | Self::WordCount)
    }

    /// Smallest accepted value.
    #[must_use]
    pub fn minimum(self) -> f64 {
        match self {
            Self::LinesPerColumn => f64::from(layout::MIN_LINES_PER_COLUMN),
            Self::CharactersPerLine => f64::from(layout::MIN_CHARACTERS_PER_LINE),
            Self::ColumnWidth => layout::MIN_COLUMN_WIDTH_CM,
            Self::RightMargin | Self::LeftMargin | Self::InterColumnMargin => layout::MIN_MARGIN_CM,
            Self::WordCount => 0.0,
        }
    }

    /// Amount the arrow keys add or remove.
    #[must_use]
    pub const fn step(self) -> f64 {
        if self.is_integer() {
            layout::INTEGER_STEP
        } else {
            layout::REAL_STEP
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::LinesPerColumn => 0,
            Self::CharactersPerLine => 1,
            Self::ColumnWidth => 2,
            Self::RightMargin => 3,
            Self::LeftMargin => 4,
            Self::InterColumnMargin => 5,
            Self::WordCount => 6,
        }
    }

    fn format(self, value: f64) -> String {
        if self.is_integer() {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        }
    }
}

/// Outcome of a key sent to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// A value or the selection changed.
    Modified,
    /// The key applied but nothing changed.
    NoChange,
    /// The key is not a form key.
    Unhandled,
}

/// Text buffers for every field plus the selected row.
#[derive(Debug, Clone)]
pub struct LayoutForm {
    buffers: Vec<String>,
    selected: usize,
    show_word_count: bool,
}

impl LayoutForm {
    /// Form pre-filled from `params`, word count zero.
    pub fn new(params: &LayoutParameters) -> Self {
        let mut form = Self {
            buffers: vec![String::new(); ALL_FIELDS.len()],
            selected: 0,
            show_word_count: false,
        };
        form.reset(params);
        form
    }

    /// Restore the layout fields to `params` and zero the word count.
    pub fn reset(&mut self, params: &LayoutParameters) {
        self.set(Field::LinesPerColumn, f64::from(params.lines_per_column));
        self.set(Field::CharactersPerLine, f64::from(params.characters_per_line));
        self.set(Field::ColumnWidth, params.column_width_cm);
        self.set(Field::RightMargin, params.right_margin_cm);
        self.set(Field::LeftMargin, params.left_margin_cm);
        self.set(Field::InterColumnMargin, params.inter_column_margin_cm);
        self.set(Field::WordCount, 0.0);
    }

    fn set(&mut self, field: Field, value: f64) {
        self.buffers[field.slot()] = field.format(value);
    }

    /// Fields currently shown, in display order.
    pub fn visible_fields(&self) -> &'static [Field] {
        if self.show_word_count {
            ALL_FIELDS
        } else {
            LAYOUT_FIELDS
        }
    }

    /// Show or hide the word count row.
    pub fn set_word_count_visible(&mut self, visible: bool) {
        self.show_word_count = visible;
        self.selected = self.selected.min(self.visible_fields().len() - 1);
    }

    /// Row index of the selection.
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected field.
    pub fn selected_field(&self) -> Field {
        self.visible_fields()[self.selected]
    }

    /// Raw text of a field.
    pub fn buffer(&self, field: Field) -> &str {
        &self.buffers[field.slot()]
    }

    /// Move the selection down, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.visible_fields().len();
    }

    /// Move the selection up, wrapping.
    pub fn select_prev(&mut self) {
        let len = self.visible_fields().len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Type a character into the selected field.
    pub fn insert_char(&mut self, c: char) -> FormAction {
        let field = self.selected_field();
        let buffer = &mut self.buffers[field.slot()];
        let accepted =
            c.is_ascii_digit() || (c == '.' && !field.is_integer() && !buffer.contains('.'));
        if !accepted {
            return FormAction::NoChange;
        }
        buffer.push(c);
        FormAction::Modified
    }

    /// Delete the last character of the selected field.
    pub fn backspace(&mut self) -> FormAction {
        let field = self.selected_field();
        if self.buffers[field.slot()].pop().is_some() {
            FormAction::Modified
        } else {
            FormAction::NoChange
        }
    }

    /// Add `direction` steps to the selected field, never going below its minimum.
    pub fn step(&mut self, direction: i8) -> FormAction {
        let field = self.selected_field();
        let current = self.buffer(field).parse::<f64>().unwrap_or_else(|_| field.minimum());
        let stepped = (current + f64::from(direction) * field.step()).max(field.minimum());
        let formatted = field.format(stepped);
        if formatted == self.buffers[field.slot()] {
            return FormAction::NoChange;
        }
        self.buffers[field.slot()] = formatted;
        FormAction::Modified
    }

    /// Apply an editing key to the selected field.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Up => {
                self.select_prev();
                FormAction::Modified
            }
            KeyCode::Down => {
                self.select_next();
                FormAction::Modified
            }
            KeyCode::Left | KeyCode::Char('-') => self.step(-1),
            KeyCode::Right | KeyCode::Char('+') => self.step(1),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => self.insert_char(c),
            _ => FormAction::Unhandled,
        }
    }

    fn parse_field(&self, field: Field) -> Result<f64> {
        let raw = self.buffer(field).trim();
        if raw.is_empty() {
            return Err(Error::invalid_parameter(field.label(), raw, "value is required"));
        }
        raw.parse::<f64>()
            .map_err(|_| Error::invalid_parameter(field.label(), raw, "not a number"))
    }

    fn parse_integer(&self, field: Field) -> Result<u64> {
        let raw = self.buffer(field).trim();
        raw.parse::<u64>().map_err(|_| {
            Error::invalid_parameter(
                field.label(),
                raw,
                if raw.is_empty() { "value is required" } else { "must be a whole number" },
            )
        })
    }

    fn parse_u32(&self, field: Field) -> Result<u32> {
        u32::try_from(self.parse_integer(field)?)
            .map_err(|_| Error::invalid_parameter(field.label(), self.buffer(field), "too large"))
    }

    /// Parse and validate the layout fields.
    pub fn parameters(&self) -> Result<LayoutParameters> {
        let lines_per_column = self.parse_u32(Field::LinesPerColumn)?;
        let characters_per_line = self.parse_u32(Field::CharactersPerLine)?;

        let params = LayoutParameters {
            lines_per_column,
            characters_per_line,
            column_width_cm: self.parse_field(Field::ColumnWidth)?,
            right_margin_cm: self.parse_field(Field::RightMargin)?,
            left_margin_cm: self.parse_field(Field::LeftMargin)?,
            inter_column_margin_cm: self.parse_field(Field::InterColumnMargin)?,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parse the word count field.
    pub fn word_count(&self) -> Result<u64> {
        self.parse_integer(Field::WordCount)
    }
}
