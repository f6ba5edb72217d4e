//! Compute scroll lengths from the command line.
//!
//! Usage: manuscript-calc --book Genesis [--diagram] [--json]

use std::process::ExitCode;

use anyhow::Context;
use clap::{error::ErrorKind, Parser};

use manuscript_length::{
    batch::{self, BatchRequest, BatchStatus},
    calculator::GapPolicy,
    catalog::Catalog,
    config::Config,
    constants::{exit, ui::DEFAULT_DIAGRAM_WIDTH},
    logging,
    types::LayoutParameters,
};

#[derive(Parser, Debug)]
#[command(name = "manuscript-calc", version)]
#[command(about = "Estimate how many columns and centimeters a book fills on a scroll")]
struct Args {
    /// Book name or abbreviation (defaults to the first catalog book)
    #[arg(short, long, conflicts_with = "all")]
    book: Option<String>,

    /// Lay out an explicit character count instead of a catalog book
    #[arg(long, conflicts_with_all = ["all", "words"])]
    characters: Option<u64>,

    /// Estimate from a word count; only column widths are summed
    #[arg(long, conflicts_with = "all")]
    words: Option<u64>,

    /// Calculate every book in the catalog
    #[arg(long)]
    all: bool,

    /// List catalog books with their character counts and exit
    #[arg(long)]
    list: bool,

    /// Lines of text per column
    #[arg(long)]
    lines_per_column: Option<u32>,

    /// Characters per line
    #[arg(long)]
    characters_per_line: Option<u32>,

    /// Width of one column in cm
    #[arg(long)]
    column_width: Option<f64>,

    /// Margin before the first column in cm
    #[arg(long)]
    right_margin: Option<f64>,

    /// Margin after the last column in cm
    #[arg(long)]
    left_margin: Option<f64>,

    /// Space between adjacent columns in cm
    #[arg(long)]
    inter_column_margin: Option<f64>,

    /// Never count fewer than zero gaps between columns
    #[arg(long)]
    clamp_gaps: bool,

    /// Print the column strip, optionally this many cells wide
    #[arg(long, value_name = "WIDTH", num_args = 0..=1, conflicts_with = "json")]
    diagram: Option<Option<usize>>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// JSON catalog replacing the built-in book table
    #[arg(long, value_name = "PATH")]
    catalog: Option<std::path::PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn parameters(&self, defaults: &LayoutParameters) -> anyhow::Result<LayoutParameters> {
        let params = LayoutParameters {
            lines_per_column: self.lines_per_column.unwrap_or(defaults.lines_per_column),
            characters_per_line: self
                .characters_per_line
                .unwrap_or(defaults.characters_per_line),
            column_width_cm: self.column_width.unwrap_or(defaults.column_width_cm),
            right_margin_cm: self.right_margin.unwrap_or(defaults.right_margin_cm),
            left_margin_cm: self.left_margin.unwrap_or(defaults.left_margin_cm),
            inter_column_margin_cm: self
                .inter_column_margin
                .unwrap_or(defaults.inter_column_margin_cm),
        };
        params.validate()?;
        Ok(params)
    }

    fn request(&self, defaults: &LayoutParameters) -> anyhow::Result<BatchRequest> {
        Ok(BatchRequest {
            book: self.book.clone(),
            characters: self.characters,
            words: self.words,
            all: self.all,
            parameters: self.parameters(defaults)?,
            gap_policy: if self.clamp_gaps { GapPolicy::Clamped } else { GapPolicy::Unclamped },
        })
    }
}

fn run(args: &Args) -> anyhow::Result<BatchStatus> {
    logging::init_cli(args.verbose)?;

    let mut config = Config::load()?;
    if let Some(path) = &args.catalog {
        config.catalog_path = Some(path.clone());
    }
    let catalog = Catalog::load(&config).context("Failed to load the book catalog")?;

    if args.list {
        print!("{}", batch::render_catalog(&catalog));
        return Ok(BatchStatus::Success);
    }

    let request = args.request(&config.defaults)?;
    let calculations = batch::run_batch(&catalog, &request)?;

    if args.json {
        println!("{}", batch::render_json(&calculations)?);
    } else {
        let width = args.diagram.map(|w| w.unwrap_or(DEFAULT_DIAGRAM_WIDTH));
        print!("{}", batch::render_text(&calculations, width));
    }

    for line in batch::warning_lines(&calculations) {
        eprintln!("warning: {line}");
    }

    Ok(BatchStatus::from_calculations(&calculations))
}

/// Help and version requests succeed; every other parse failure is a usage error.
const fn parse_failure_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit::SUCCESS,
        _ => exit::FAILURE,
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_failure_code(e.kind()));
        }
    };

    match run(&args) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("manuscript-calc").chain(args.iter().copied()))
    }

    fn failure_code(args: &[&str]) -> u8 {
        parse_failure_code(parse(args).unwrap_err().kind())
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        assert_eq!(failure_code(&["--bogus"]), exit::FAILURE);
        assert_ne!(exit::FAILURE, exit::ZERO_WARNING);
    }

    #[test]
    fn help_and_version_exit_cleanly() {
        assert_eq!(failure_code(&["--help"]), exit::SUCCESS);
        assert_eq!(failure_code(&["--version"]), exit::SUCCESS);
    }

    #[test]
    fn conflicting_flags_are_usage_errors() {
        assert_eq!(failure_code(&["--json", "--diagram"]), exit::FAILURE);
        assert_eq!(failure_code(&["--all", "--book", "Ruth"]), exit::FAILURE);
        assert_eq!(failure_code(&["--characters", "10", "--words", "2"]), exit::FAILURE);
        assert_eq!(failure_code(&["--lines-per-column", "many"]), exit::FAILURE);
    }

    #[test]
    fn diagram_width_is_optional() {
        assert_eq!(parse(&["--diagram"]).unwrap().diagram, Some(None));
        assert_eq!(parse(&["--diagram", "40"]).unwrap().diagram, Some(Some(40)));
        assert_eq!(parse(&[]).unwrap().diagram, None);
    }

    #[test]
    fn layout_flags_override_defaults() {
        let args = parse(&["--column-width", "8.5", "--clamp-gaps", "--words", "100"]).unwrap();
        let request = args.request(&LayoutParameters::default()).unwrap();

        assert_eq!(request.parameters.column_width_cm, 8.5);
        assert_eq!(request.parameters.lines_per_column, 40);
        assert_eq!(request.gap_policy, GapPolicy::Clamped);
        assert_eq!(request.words, Some(100));
    }

    #[test]
    fn out_of_range_layout_is_rejected() {
        let args = parse(&["--lines-per-column", "0"]).unwrap();
        assert!(args.request(&LayoutParameters::default()).is_err());
    }
}
