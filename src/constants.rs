//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Layout defaults and input minimums.
pub mod layout {
    /// Default lines of text per column.
    pub const DEFAULT_LINES_PER_COLUMN: u32 = 40;

    /// Default characters per line.
    pub const DEFAULT_CHARACTERS_PER_LINE: u32 = 30;

    /// Default width of one column in centimeters.
    pub const DEFAULT_COLUMN_WIDTH_CM: f64 = 10.0;

    /// Default margin before the first column.
    pub const DEFAULT_RIGHT_MARGIN_CM: f64 = 1.0;

    /// Default margin after the last column.
    pub const DEFAULT_LEFT_MARGIN_CM: f64 = 1.0;

    /// Default blank space between adjacent columns.
    pub const DEFAULT_INTER_COLUMN_MARGIN_CM: f64 = 1.4;

    /// Smallest accepted lines per column.
    pub const MIN_LINES_PER_COLUMN: u32 = 1;

    /// Smallest accepted characters per line.
    pub const MIN_CHARACTERS_PER_LINE: u32 = 1;

    /// Smallest accepted column width.
    pub const MIN_COLUMN_WIDTH_CM: f64 = 0.1;

    /// Smallest accepted margin of any kind.
    pub const MIN_MARGIN_CM: f64 = 0.0;

    /// Step applied to integer fields by the arrow keys.
    pub const INTEGER_STEP: f64 = 1.0;

    /// Step applied to centimeter fields by the arrow keys.
    pub const REAL_STEP: f64 = 0.1;
}

/// Text size estimation constants.
pub mod text {
    /// Average characters per Hebrew word, used by the word-count variant.
    pub const AVERAGE_CHARACTERS_PER_WORD: f64 = 7.5;

    /// Share of whitespace added to counts that exclude spaces.
    pub const WHITESPACE_ALLOWANCE: f64 = 0.20;
}

/// Environment variable names read by [`crate::config::Config`].
pub mod env {
    /// Default lines per column.
    pub const LINES_PER_COLUMN: &str = "MANUSCRIPT_LINES_PER_COLUMN";
    /// Default characters per line.
    pub const CHARACTERS_PER_LINE: &str = "MANUSCRIPT_CHARACTERS_PER_LINE";
    /// Default column width.
    pub const COLUMN_WIDTH_CM: &str = "MANUSCRIPT_COLUMN_WIDTH_CM";
    /// Default right margin.
    pub const RIGHT_MARGIN_CM: &str = "MANUSCRIPT_RIGHT_MARGIN_CM";
    /// Default left margin.
    pub const LEFT_MARGIN_CM: &str = "MANUSCRIPT_LEFT_MARGIN_CM";
    /// Default inter-column margin.
    pub const INTER_COLUMN_MARGIN_CM: &str = "MANUSCRIPT_INTER_COLUMN_MARGIN_CM";
    /// Path of a JSON catalog replacing the built-in table.
    pub const CATALOG: &str = "MANUSCRIPT_CATALOG";
    /// File receiving TUI log output.
    pub const LOG_FILE: &str = "MANUSCRIPT_LOG_FILE";
}

/// Search constants.
pub mod search {
    /// Maximum number of books listed while filtering.
    pub const MAX_SEARCH_RESULTS: usize = 40;
}

/// Exit statuses of the batch calculator.
pub mod exit {
    /// Every calculation produced non-zero figures.
    pub const SUCCESS: u8 = 0;
    /// Usage, validation or catalog error.
    pub const FAILURE: u8 = 1;
    /// At least one calculation reported a zero figure.
    pub const ZERO_WARNING: u8 = 2;
}

/// UI layout constants.
pub mod ui {
    /// Width of the book list pane in characters.
    pub const BOOK_PANE_WIDTH: u16 = 32;

    /// Most columns the diagram draws; longer layouts are truncated.
    pub const MAX_DRAWN_COLUMNS: usize = 1_000;

    /// Width of the ASCII diagram when none is requested.
    pub const DEFAULT_DIAGRAM_WIDTH: usize = 80;

    /// Event poll timeout in milliseconds.
    pub const POLL_INTERVAL_MS: u64 = 50;

    /// Sleep between idle polls in milliseconds.
    pub const IDLE_SLEEP_MS: u64 = 5;
}
