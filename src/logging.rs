//! Diagnostic logging
//!
//! Log output goes to stderr so that report and export output on stdout
//! stays clean for piping.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a filter directive, e.g. `aureon_reports=debug`
pub const LOG_ENV: &str = "AUREON_LOG";

static TRACING_INIT: Once = Once::new();

/// Filter used when neither `AUREON_LOG` nor `RUST_LOG` is set
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,aureon_reports={}", level)
}

/// Install the global subscriber once; later calls are no-ops
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
