//! Core value types for layout calculations.
//!
//! `LayoutParameters` is what the user supplies, `LayoutResult` is what the
//! calculator derives from it.

use serde::{Deserialize, Serialize};

use crate::constants::layout;
use crate::error::{Error, Result};

/// How the size of a text is measured before the layout is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Use the catalog's character count, outer and inter-column margins included.
    #[default]
    Characters,
    /// Estimate characters from a word count; margins are ignored.
    Words,
}

impl CountMode {
    /// Returns all count modes in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Characters, Self::Words]
    }

    /// Returns the human-readable name of this mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Characters => "Characters",
            Self::Words => "Words",
        }
    }

    /// Toggle to the other mode (for the 'w' key).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Characters => Self::Words,
            Self::Words => Self::Characters,
        }
    }
}

/// User-supplied column layout. Each field is independent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    /// Lines of text in one column.
    pub lines_per_column: u32,
    /// Characters written on one line.
    pub characters_per_line: u32,
    /// Width of one column in centimeters.
    pub column_width_cm: f64,
    /// Blank space before the first column.
    pub right_margin_cm: f64,
    /// Blank space after the last column.
    pub left_margin_cm: f64,
    /// Blank space between adjacent columns.
    pub inter_column_margin_cm: f64,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            lines_per_column: layout::DEFAULT_LINES_PER_COLUMN,
            characters_per_line: layout::DEFAULT_CHARACTERS_PER_LINE,
            column_width_cm: layout::DEFAULT_COLUMN_WIDTH_CM,
            right_margin_cm: layout::DEFAULT_RIGHT_MARGIN_CM,
            left_margin_cm: layout::DEFAULT_LEFT_MARGIN_CM,
            inter_column_margin_cm: layout::DEFAULT_INTER_COLUMN_MARGIN_CM,
        }
    }
}

impl LayoutParameters {
    /// Number of characters one column holds. Zero when either factor is zero.
    pub fn characters_per_column(&self) -> u64 {
        u64::from(self.lines_per_column) * u64::from(self.characters_per_line)
    }

    /// Check every field against the minimum the input controls allow.
    ///
    /// The calculator itself accepts any values; only the front ends call this.
    pub fn validate(&self) -> Result<()> {
        check_integer("Lines per Column", self.lines_per_column, layout::MIN_LINES_PER_COLUMN)?;
        check_integer(
            "Characters per Line",
            self.characters_per_line,
            layout::MIN_CHARACTERS_PER_LINE,
        )?;
        check_real("Column Width (cm)", self.column_width_cm, layout::MIN_COLUMN_WIDTH_CM)?;
        check_real(
            "Right Margin Before First Column (cm)",
            self.right_margin_cm,
            layout::MIN_MARGIN_CM,
        )?;
        check_real(
            "Left Margin After Last Column (cm)",
            self.left_margin_cm,
            layout::MIN_MARGIN_CM,
        )?;
        check_real(
            "Margin Between Columns (cm)",
            self.inter_column_margin_cm,
            layout::MIN_MARGIN_CM,
        )?;
        Ok(())
    }
}

fn check_integer(field: &'static str, value: u32, minimum: u32) -> Result<()> {
    if value < minimum {
        return Err(Error::invalid_parameter(
            field,
            value,
            format!("must be at least {minimum}"),
        ));
    }
    Ok(())
}

fn check_real(field: &'static str, value: f64, minimum: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_parameter(field, value, "must be a finite number"));
    }
    if value < minimum {
        return Err(Error::invalid_parameter(
            field,
            value,
            format!("must be at least {minimum:.1}"),
        ));
    }
    Ok(())
}

/// Derived column count and manuscript length, both rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Number of columns the text fills (fractional).
    pub total_columns: f64,
    /// Total horizontal extent in centimeters.
    pub total_length_cm: f64,
}

impl LayoutResult {
    /// Returned when a column holds no characters.
    pub const ZERO: Self = Self { total_columns: 0.0, total_length_cm: 0.0 };

    /// Whether either figure is exactly zero, the condition the UI warns about.
    #[allow(clippy::float_cmp)]
    pub fn has_zero(&self) -> bool {
        self.total_columns == 0.0 || self.total_length_cm == 0.0
    }
}

/// Why a zero result is being reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroWarning {
    /// Lines per column or characters per line is zero.
    ZeroCapacity,
    /// The inputs are valid but a figure came out as zero.
    ZeroResult,
}

impl ZeroWarning {
    /// Warning text shown next to the results.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ZeroCapacity => {
                "Lines per column and characters per line must be greater than zero."
            }
            Self::ZeroResult => "Please ensure all input values are greater than zero.",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults_match_input_controls() {
        let params = LayoutParameters::default();
        assert_eq!(params.lines_per_column, 40);
        assert_eq!(params.characters_per_line, 30);
        assert_eq!(params.characters_per_column(), 1200);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn validate_rejects_values_below_minimum() {
        let params = LayoutParameters { lines_per_column: 0, ..LayoutParameters::default() };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParameter { field: "Lines per Column", .. })
        ));

        let params = LayoutParameters { column_width_cm: 0.05, ..LayoutParameters::default() };
        assert!(params.validate().is_err());

        let params = LayoutParameters { left_margin_cm: -0.1, ..LayoutParameters::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn validate_accepts_zero_margins() {
        let params = LayoutParameters {
            right_margin_cm: 0.0,
            left_margin_cm: 0.0,
            inter_column_margin_cm: 0.0,
            ..LayoutParameters::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan() {
        let params = LayoutParameters { right_margin_cm: f64::NAN, ..LayoutParameters::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_detection_checks_either_figure() {
        assert!(LayoutResult::ZERO.has_zero());
        assert!(LayoutResult { total_columns: 0.0, total_length_cm: 0.6 }.has_zero());
        assert!(!LayoutResult { total_columns: 1.0, total_length_cm: 12.0 }.has_zero());
    }

    #[test]
    fn count_mode_toggles() {
        assert_eq!(CountMode::Characters.next(), CountMode::Words);
        assert_eq!(CountMode::Words.next(), CountMode::Characters);
        assert_eq!(CountMode::all().len(), 2);
    }
}
