//! Diagnostic logging on stderr.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `GLOSSARY_GUARD_LOG=glossary_guard::engine=debug`.
pub const LOG_ENV: &str = "GLOSSARY_GUARD_LOG";

static INIT: Once = Once::new();

/// Default filter for a `-v` count when `GLOSSARY_GUARD_LOG` is unset.
#[must_use]
pub const fn level_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: u8, quiet: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose, quiet)));

        // A subscriber installed elsewhere (tests, embedding) wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose >= 2)
                    .with_thread_ids(verbose >= 3),
            )
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
