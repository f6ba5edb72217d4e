//! Column count and manuscript length arithmetic.
//!
//! The length of a manuscript is the width of all columns, plus the gaps
//! between them, plus a margin on each end:
//!
//! ```text
//! columns = characters / (lines_per_column * characters_per_line)
//! length  = columns * column_width + (columns - 1) * gap + right + left
//! ```
//!
//! The `(columns - 1)` gap count is not clamped by default, so a text shorter
//! than one column gets a negative gap contribution. [`GapPolicy::Clamped`]
//! opts out of that.

use serde::{Deserialize, Serialize};

use crate::constants::text::AVERAGE_CHARACTERS_PER_WORD;
use crate::error::{Error, Result};
use crate::types::{CountMode, LayoutParameters, LayoutResult, ZeroWarning};

/// How the number of inter-column gaps is derived from the column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// `columns - 1`, negative for texts shorter than one column.
    #[default]
    Unclamped,
    /// `max(columns - 1, 0)`.
    Clamped,
}

impl GapPolicy {
    /// Returns the human-readable name of this policy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unclamped => "unclamped",
            Self::Clamped => "clamped",
        }
    }

    /// Toggle to the other policy (for the 'g' key).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Unclamped => Self::Clamped,
            Self::Clamped => Self::Unclamped,
        }
    }

    fn gap_count(self, total_columns: f64) -> f64 {
        match self {
            Self::Unclamped => total_columns - 1.0,
            Self::Clamped => (total_columns - 1.0).max(0.0),
        }
    }
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_precision_loss)]
fn column_capacity(params: &LayoutParameters) -> Result<f64> {
    match params.characters_per_column() {
        0 => Err(Error::ZeroCapacity {
            lines_per_column: params.lines_per_column,
            characters_per_line: params.characters_per_line,
        }),
        capacity => Ok(capacity as f64),
    }
}

/// Compute the layout, failing when a column holds no characters.
pub fn try_calculate(
    total_characters: f64,
    params: &LayoutParameters,
    policy: GapPolicy,
) -> Result<LayoutResult> {
    let capacity = column_capacity(params)?;
    let total_columns = total_characters / capacity;

    // Length uses the unrounded column count; only the outputs are rounded.
    let total_length_cm = total_columns * params.column_width_cm
        + policy.gap_count(total_columns) * params.inter_column_margin_cm
        + params.right_margin_cm
        + params.left_margin_cm;

    Ok(LayoutResult {
        total_columns: round2(total_columns),
        total_length_cm: round2(total_length_cm),
    })
}

/// Compute the layout with the given gap policy, returning
/// [`LayoutResult::ZERO`] when a column holds no characters.
pub fn calculate_with_policy(
    total_characters: f64,
    params: &LayoutParameters,
    policy: GapPolicy,
) -> LayoutResult {
    try_calculate(total_characters, params, policy).unwrap_or_else(|e| {
        tracing::warn!("{e}; reporting an empty layout");
        LayoutResult::ZERO
    })
}

/// Total columns and total length in cm for a text of `total_characters`.
///
/// Zero column capacity yields `(0, 0)` rather than an error.
pub fn calculate_columns_and_length(
    total_characters: f64,
    params: &LayoutParameters,
) -> LayoutResult {
    calculate_with_policy(total_characters, params, GapPolicy::Unclamped)
}

/// Estimated character count for `words` Hebrew words.
#[allow(clippy::cast_precision_loss)]
pub fn words_to_characters(words: u64) -> f64 {
    words as f64 * AVERAGE_CHARACTERS_PER_WORD
}

/// Word-count variant: columns from estimated characters, length from column
/// widths alone (no margins of any kind).
pub fn calculate_from_word_count(words: u64, params: &LayoutParameters) -> LayoutResult {
    let total_characters = words_to_characters(words);
    match column_capacity(params) {
        Ok(capacity) => {
            let total_columns = total_characters / capacity;
            LayoutResult {
                total_columns: round2(total_columns),
                total_length_cm: round2(total_columns * params.column_width_cm),
            }
        }
        Err(e) => {
            tracing::warn!("{e}; reporting an empty layout");
            LayoutResult::ZERO
        }
    }
}

/// One Calculate request together with everything it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Book or text label the request was made for.
    pub book: String,
    /// Whether the size came from characters or words.
    pub mode: CountMode,
    /// Word count, for word-mode requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<u64>,
    /// Characters laid out (estimated in word mode).
    pub total_characters: f64,
    /// Layout used.
    pub parameters: LayoutParameters,
    /// Gap policy used (character mode only).
    pub gap_policy: GapPolicy,
    /// Derived figures.
    pub result: LayoutResult,
    /// Set when either figure is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ZeroWarning>,
}

impl Calculation {
    /// Run the character-count formula for a book.
    pub fn for_characters(
        book: impl Into<String>,
        total_characters: f64,
        parameters: LayoutParameters,
        gap_policy: GapPolicy,
    ) -> Self {
        let book = book.into();
        let result = calculate_with_policy(total_characters, &parameters, gap_policy);
        tracing::debug!(
            book = %book,
            total_characters,
            total_columns = result.total_columns,
            total_length_cm = result.total_length_cm,
            "calculated layout"
        );
        Self {
            book,
            mode: CountMode::Characters,
            words: None,
            total_characters,
            parameters,
            gap_policy,
            warning: classify(&result, &parameters),
            result,
        }
    }

    /// Run the word-count formula for a book.
    pub fn for_words(book: impl Into<String>, words: u64, parameters: LayoutParameters) -> Self {
        let book = book.into();
        let result = calculate_from_word_count(words, &parameters);
        tracing::debug!(
            book = %book,
            words,
            total_columns = result.total_columns,
            total_length_cm = result.total_length_cm,
            "calculated layout from word count"
        );
        Self {
            book,
            mode: CountMode::Words,
            words: Some(words),
            total_characters: words_to_characters(words),
            parameters,
            gap_policy: GapPolicy::Unclamped,
            warning: classify(&result, &parameters),
            result,
        }
    }

    /// One-line summary, used for the clipboard and plain CLI output.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} columns, {} cm",
            self.book, self.result.total_columns, self.result.total_length_cm
        )
    }
}

fn classify(result: &LayoutResult, params: &LayoutParameters) -> Option<ZeroWarning> {
    if !result.has_zero() {
        None
    } else if params.characters_per_column() == 0 {
        Some(ZeroWarning::ZeroCapacity)
    } else {
        Some(ZeroWarning::ZeroResult)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;

    fn genesis_layout() -> LayoutParameters {
        LayoutParameters {
            lines_per_column: 40,
            characters_per_line: 30,
            column_width_cm: 10.0,
            right_margin_cm: 1.0,
            left_margin_cm: 1.0,
            inter_column_margin_cm: 1.4,
        }
    }

    #[test]
    fn genesis_reference_layout() {
        let result = calculate_columns_and_length(93_677.0, &genesis_layout());
        assert_eq!(result.total_columns, 78.06);
        // 780.6417 + 107.8898 + 2.0 from the unrounded column count
        assert_eq!(result.total_length_cm, 890.53);
    }

    #[test]
    fn zero_lines_returns_zero_pair() {
        let params = LayoutParameters { lines_per_column: 0, ..genesis_layout() };
        assert_eq!(calculate_columns_and_length(93_677.0, &params), LayoutResult::ZERO);
    }

    #[test]
    fn zero_characters_per_line_is_an_error_for_try_calculate() {
        let params = LayoutParameters { characters_per_line: 0, ..genesis_layout() };
        let err = try_calculate(100.0, &params, GapPolicy::Unclamped).unwrap_err();
        assert!(matches!(
            err,
            Error::ZeroCapacity { lines_per_column: 40, characters_per_line: 0 }
        ));
    }

    #[test]
    fn empty_text_keeps_negative_gap_term() {
        let result = calculate_columns_and_length(0.0, &genesis_layout());
        assert_eq!(result.total_columns, 0.0);
        // -1 * 1.4 + 1.0 + 1.0
        assert_eq!(result.total_length_cm, 0.6);
    }

    #[test]
    fn clamped_policy_drops_negative_gap_term() {
        let result = calculate_with_policy(0.0, &genesis_layout(), GapPolicy::Clamped);
        assert_eq!(result.total_length_cm, 2.0);

        // Above one column both policies agree.
        let unclamped = calculate_with_policy(93_677.0, &genesis_layout(), GapPolicy::Unclamped);
        let clamped = calculate_with_policy(93_677.0, &genesis_layout(), GapPolicy::Clamped);
        assert_eq!(unclamped, clamped);
    }

    #[test]
    fn exact_column_multiple() {
        let params = LayoutParameters {
            right_margin_cm: 0.0,
            left_margin_cm: 0.0,
            inter_column_margin_cm: 0.5,
            ..genesis_layout()
        };
        let result = calculate_columns_and_length(3_600.0, &params);
        assert_eq!(result.total_columns, 3.0);
        assert_eq!(result.total_length_cm, 31.0);
    }

    #[test]
    fn word_count_variant_ignores_margins() {
        assert_eq!(words_to_characters(20_512), 153_840.0);
        let result = calculate_from_word_count(20_512, &genesis_layout());
        assert_eq!(result.total_columns, 128.2);
        assert_eq!(result.total_length_cm, 1282.0);
    }

    #[test]
    fn word_count_variant_zero_capacity() {
        let params = LayoutParameters { lines_per_column: 0, ..genesis_layout() };
        assert_eq!(calculate_from_word_count(20_512, &params), LayoutResult::ZERO);
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-0.004), 0.0);
        assert_eq!(round2(78.064_166), 78.06);
    }

    #[test]
    fn calculation_classifies_zero_capacity() {
        let params = LayoutParameters { characters_per_line: 0, ..genesis_layout() };
        let calc = Calculation::for_characters("Genesis", 93_677.0, params, GapPolicy::Unclamped);
        assert_eq!(calc.warning, Some(ZeroWarning::ZeroCapacity));
    }

    #[test]
    fn calculation_classifies_zero_result() {
        let calc = Calculation::for_characters("Empty", 0.0, genesis_layout(), GapPolicy::Unclamped);
        assert_eq!(calc.warning, Some(ZeroWarning::ZeroResult));
    }

    #[test]
    fn calculation_summary() {
        let calc = Calculation::for_characters(
            "Genesis",
            93_677.0,
            genesis_layout(),
            GapPolicy::Unclamped,
        );
        assert_eq!(calc.warning, None);
        assert_eq!(calc.summary(), "Genesis: 78.06 columns, 890.53 cm");
    }

    #[test]
    fn word_calculation_records_estimate() {
        let calc = Calculation::for_words("Genesis", 20_512, genesis_layout());
        assert_eq!(calc.mode, CountMode::Words);
        assert_eq!(calc.words, Some(20_512));
        assert_eq!(calc.total_characters, 153_840.0);
    }
}
