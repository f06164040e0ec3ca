//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with report output on stdout.
//! Filter precedence: `RUST_LOG`, then `VITALS_LOG`, then the verbosity flag.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::AppError;

/// Map `-v` occurrences to a level.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Build the filter without installing anything.
pub fn build_filter(rust_log: Option<&str>, fallback: Option<&str>, verbose: u8) -> Result<EnvFilter, AppError> {
    let directives = rust_log.or(fallback);
    match directives {
        Some(d) => EnvFilter::try_new(d)
            .map_err(|e| AppError::new(2, format!("Invalid log filter '{d}': {e}"))),
        None => Ok(EnvFilter::default().add_directive(level_for_verbosity(verbose).into())),
    }
}

/// Install the global subscriber. Safe to call once per process; later calls are ignored.
pub fn init(fallback: Option<&str>, verbose: u8) -> Result<(), AppError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), fallback, verbose)?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // A subscriber may already be installed (tests, embedding); that is not an error.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for_verbosity(0), LevelFilter::WARN);
        assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
        assert_eq!(level_for_verbosity(9), LevelFilter::TRACE);
    }

    #[test]
    fn rust_log_takes_precedence() {
        let filter = build_filter(Some("vitals_calc=trace"), Some("error"), 0).unwrap();
        assert_eq!(filter.to_string(), "vitals_calc=trace");
    }

    #[test]
    fn bad_directive_is_a_usage_error() {
        let err = build_filter(None, Some("vitals_calc=loud"), 0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
