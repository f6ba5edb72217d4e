//! Tracing subscriber setup for the two binaries.

use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "manuscript_length=debug,info"
    } else {
        "manuscript_length=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Compact stderr logging for the command-line calculator.
pub fn init_cli(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::Msg(format!("Failed to initialize logging: {e}")))
}

/// File logging for the TUI. Without a file nothing is installed, since
/// output on stderr would corrupt the alternate screen.
pub fn init_tui(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = fs_err::File::create(path).map_err(|e| Error::io(e, Some(path.to_path_buf())))?;

    tracing_subscriber::registry()
        .with(env_filter(true))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false),
        )
        .try_init()
        .map_err(|e| Error::Msg(format!("Failed to initialize logging: {e}")))
}
