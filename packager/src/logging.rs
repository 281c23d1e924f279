//! Logger installation for the command-line tools.
//!
//! Library code logs through the `log` facade; the binaries install an
//! `env_logger` backend writing to stderr so stdout carries only the tool's
//! report. The level comes from the CLI flags alone.

use crate::cli::LogArgs;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Map verbosity flags to a log level.
///
/// `--quiet` keeps errors only; otherwise warnings are shown by default and
/// each `-v` raises the level one step, up to trace.
#[must_use]
pub const fn level_filter(args: &LogArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::Error;
    }
    match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger at the level selected by `args`.
///
/// Installation is best effort: if a logger is already set, the existing
/// one stays in place.
pub fn init(args: &LogArgs) {
    let mut builder = Builder::new();
    builder
        .filter_level(level_filter(args))
        .format_timestamp(None)
        .format_target(false)
        .target(Target::Stderr);
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
