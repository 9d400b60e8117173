//! Logging setup.
//!
//! Diagnostics use the `log` facade with the `env_logger` backend and always
//! go to stderr, so they never mix with the report on stdout. A set `RUST_LOG`
//! overrides the flags entirely. Otherwise `-q` keeps errors only, `-v` turns
//! on debug and `-vv` trace, and the default is info.
//!
//! Debug builds prefix each line with a timestamp (and, at `-v` and above,
//! the emitting module relative to the crate root). Release builds print the
//! level and message only.
//!
//! # Example
//!
//! ```rust,no_run
//! use movie_dupecheck::logging::init_logging;
//!
//! // -v on the command line
//! init_logging(1, false);
//! log::debug!("Sizes will be measured");
//! ```

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize logging from the CLI verbosity flags.
///
/// Call once at startup. Later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let from_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }
    configure_format(&mut builder, verbose);

    if builder.try_init().is_err() {
        return;
    }

    if from_env {
        log::debug!("Logging configured from RUST_LOG={:?}", env::var("RUST_LOG").ok());
    } else {
        log::debug!("Logging initialized at level: {}", current_level_name());
    }
}

/// Map CLI flags to a level: quiet wins, then 0=info, 1=debug, 2+=trace.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let level = record.level();
            let style = buf.default_level_style(level);
            let timestamp = buf.timestamp_seconds();
            if verbose >= 1 {
                let module = short_target(record.target());
                writeln!(buf, "{timestamp} {style}{level:<5}{style:#} [{module}] {}", record.args())
            } else {
                writeln!(buf, "{} {style}{:<5}{style:#} {}", timestamp, level, record.args())
            }
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let level = record.level();
            let style = buf.default_level_style(level);
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        });
    }
}

/// Strip this crate's prefix from a log target; foreign targets stay whole.
#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn short_target(target: &str) -> &str {
    match target.strip_prefix(concat!(env!("CARGO_CRATE_NAME"), "::")) {
        Some(rest) => rest,
        None => target,
    }
}

/// Name of the active maximum log level.
#[must_use]
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
