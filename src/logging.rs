//! Logging initialization
//!
//! Structured logging via `tracing` with human-readable and JSON output,
//! verbosity from the command line, and an `INCIDENT_DRILL_LOG` environment
//! override.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flag
pub const LOG_ENV: &str = "INCIDENT_DRILL_LOG";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Human,
    /// Newline-delimited JSON
    Json,
}

/// Map `-v` count to a tracing directive: 0 warn, 1 info, 2 debug, 3+ trace
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber on stderr.
///
/// `INCIDENT_DRILL_LOG` takes precedence over `verbosity`. Safe to call more
/// than once; later calls are ignored.
pub fn init_logging(format: LogFormat, verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let show_target = verbosity >= 2;

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
