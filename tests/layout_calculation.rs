//! Integration tests for the layout formulas through the public API.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

use manuscript_length::calculator::{
    calculate_columns_and_length, calculate_with_policy, Calculation, GapPolicy,
};
use manuscript_length::catalog::Catalog;
use manuscript_length::diagram::LayoutDiagram;
use manuscript_length::types::{CountMode, LayoutParameters, LayoutResult, ZeroWarning};

fn genesis_characters() -> f64 {
    Catalog::builtin().character_count("Genesis").unwrap() as f64
}

#[test]
fn genesis_with_default_layout() {
    let result = calculate_columns_and_length(genesis_characters(), &LayoutParameters::default());

    assert_eq!(result.total_columns, 78.06);
    // The length is summed from the unrounded column count.
    assert_eq!(result.total_length_cm, 890.53);
}

#[test]
fn abbreviation_resolves_to_same_book() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.character_count("gen"), catalog.character_count("Genesis"));
}

#[test]
fn genesis_word_count_estimate_ignores_margins() {
    let calculation = Calculation::for_words("Genesis", 20_512, LayoutParameters::default());

    assert_eq!(calculation.mode, CountMode::Words);
    assert_eq!(calculation.total_characters, 153_840.0);
    assert_eq!(calculation.result.total_columns, 128.2);
    assert_eq!(calculation.result.total_length_cm, 1282.0);
    assert!(calculation.warning.is_none());
}

#[test]
fn zero_capacity_reports_empty_layout_with_capacity_warning() {
    let params = LayoutParameters { lines_per_column: 0, ..LayoutParameters::default() };

    let calculation =
        Calculation::for_characters("Genesis", genesis_characters(), params, GapPolicy::Unclamped);

    assert_eq!(calculation.result, LayoutResult::ZERO);
    assert_eq!(calculation.warning, Some(ZeroWarning::ZeroCapacity));
}

#[test]
fn empty_text_keeps_negative_gap_term() {
    let params = LayoutParameters::default();

    let unclamped = calculate_with_policy(0.0, &params, GapPolicy::Unclamped);
    assert_eq!(unclamped.total_columns, 0.0);
    assert_eq!(unclamped.total_length_cm, 0.6);

    let clamped = calculate_with_policy(0.0, &params, GapPolicy::Clamped);
    assert_eq!(clamped.total_length_cm, 2.0);

    let calculation = Calculation::for_characters("empty", 0.0, params, GapPolicy::Unclamped);
    assert_eq!(calculation.warning, Some(ZeroWarning::ZeroResult));
}

#[test]
fn every_builtin_book_fits_at_least_one_column() {
    let catalog = Catalog::builtin();
    let params = LayoutParameters::default();

    for entry in catalog.entries() {
        let result = calculate_columns_and_length(entry.effective_characters() as f64, &params);
        assert!(result.total_columns > 1.0, "{} is too short", entry.name);
        assert!(result.total_length_cm > params.column_width_cm, "{}", entry.name);
    }
}

#[test]
fn calculation_serializes_for_json_output() {
    let calculation = Calculation::for_characters(
        "Genesis",
        genesis_characters(),
        LayoutParameters::default(),
        GapPolicy::Unclamped,
    );

    let value = serde_json::to_value(&calculation).unwrap();
    assert_eq!(value["book"], "Genesis");
    assert_eq!(value["mode"], "characters");
    assert_eq!(value["result"]["total_columns"].as_f64(), Some(78.06));
    assert_eq!(value["result"]["total_length_cm"].as_f64(), Some(890.53));
    assert!(value.get("warning").is_none());
    assert!(value.get("words").is_none());
}

#[test]
fn diagram_of_genesis_draws_whole_columns() {
    let params = LayoutParameters::default();
    let result = calculate_columns_and_length(genesis_characters(), &params);
    let diagram = LayoutDiagram::build(&result, &params);

    assert_eq!(diagram.column_count, 78);
    let text = diagram.to_ascii(60);
    let strip = text.lines().next().unwrap();
    assert_eq!(strip.chars().count(), 62);
    assert!(strip.starts_with('|') && strip.ends_with('|'));
    assert!(text.contains("total: 78.06 columns, 890.53 cm"));
}
