//! Non-interactive calculations for the command-line front end.
//!
//! A [`BatchRequest`] names what to lay out (one book, every book, or a raw
//! character or word count). [`run_batch`] turns it into calculations, and
//! the `render_*` helpers format them for stdout.

use crate::calculator::{Calculation, GapPolicy};
use crate::catalog::Catalog;
use crate::constants::exit;
use crate::diagram::LayoutDiagram;
use crate::error::{Error, Result};
use crate::types::LayoutParameters;

/// Label used when a raw count is given without a book.
pub const UNNAMED_TEXT: &str = "text";

/// What the batch calculator was asked to compute.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    /// Book name or abbreviation; also labels raw counts.
    pub book: Option<String>,
    /// Explicit character count.
    pub characters: Option<u64>,
    /// Word count, which selects the word-count estimate.
    pub words: Option<u64>,
    /// Every book in the catalog.
    pub all: bool,
    /// Layout to apply.
    pub parameters: LayoutParameters,
    /// Gap policy for character-count calculations.
    pub gap_policy: GapPolicy,
}

/// Overall outcome of a batch, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// No calculation produced a zero figure.
    Success,
    /// At least one calculation carries a zero warning.
    ZeroWarning,
}

impl BatchStatus {
    /// Status for a finished batch.
    pub fn from_calculations(calculations: &[Calculation]) -> Self {
        if calculations.iter().any(|c| c.warning.is_some()) {
            Self::ZeroWarning
        } else {
            Self::Success
        }
    }

    /// Process exit status.
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => exit::SUCCESS,
            Self::ZeroWarning => exit::ZERO_WARNING,
        }
    }
}

/// Run every calculation the request names, in catalog order for `all`.
#[allow(clippy::cast_precision_loss)]
pub fn run_batch(catalog: &Catalog, request: &BatchRequest) -> Result<Vec<Calculation>> {
    let params = request.parameters;
    let policy = request.gap_policy;

    if request.all {
        return Ok(catalog
            .entries()
            .iter()
            .map(|entry| {
                Calculation::for_characters(
                    entry.name.clone(),
                    entry.effective_characters() as f64,
                    params,
                    policy,
                )
            })
            .collect());
    }

    let entry = match &request.book {
        Some(name) => Some(catalog.lookup(name)?),
        None => None,
    };
    let label = entry.map_or_else(|| UNNAMED_TEXT.to_string(), |e| e.name.clone());

    let calculation = if let Some(words) = request.words {
        Calculation::for_words(label, words, params)
    } else if let Some(characters) = request.characters {
        Calculation::for_characters(label, characters as f64, params, policy)
    } else {
        // No count given: the named book, or the first one like the TUI
        let entry = match entry {
            Some(entry) => entry,
            None => catalog
                .entries()
                .first()
                .ok_or_else(|| Error::Msg("The catalog has no books".to_string()))?,
        };
        Calculation::for_characters(
            entry.name.clone(),
            entry.effective_characters() as f64,
            params,
            policy,
        )
    };

    Ok(vec![calculation])
}

/// Pretty JSON: an object for one calculation, an array otherwise.
pub fn render_json(calculations: &[Calculation]) -> Result<String> {
    let json = if let [single] = calculations {
        serde_json::to_string_pretty(single)?
    } else {
        serde_json::to_string_pretty(calculations)?
    };
    Ok(json)
}

/// One summary line per calculation, each followed by its strip when a
/// diagram width is given.
pub fn render_text(calculations: &[Calculation], diagram_width: Option<usize>) -> String {
    let mut out = String::new();
    for calculation in calculations {
        out.push_str(&calculation.summary());
        out.push('\n');
        if let Some(width) = diagram_width {
            let diagram = LayoutDiagram::build(&calculation.result, &calculation.parameters);
            out.push_str(&diagram.to_ascii(width));
            out.push_str("\n\n");
        }
    }
    out
}

/// Book names with their effective character counts.
pub fn render_catalog(catalog: &Catalog) -> String {
    catalog
        .entries()
        .iter()
        .map(|entry| format!("{:<20} {:>8}\n", entry.name, entry.effective_characters()))
        .collect()
}

/// `book: message` for every calculation that carries a warning.
pub fn warning_lines(calculations: &[Calculation]) -> Vec<String> {
    calculations
        .iter()
        .filter_map(|c| c.warning.map(|w| format!("{}: {}", c.book, w.message())))
        .collect()
}
