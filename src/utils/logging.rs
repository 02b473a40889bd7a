//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`; user-facing output is printed
//! by the styling helpers instead.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that enables debug diagnostics when set to `true`
pub const DEBUG_ENV: &str = "CLASSDEMO_DEBUG";

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    let debug_env = std::env::var(DEBUG_ENV).map(|v| v == "true").unwrap_or(false);
    if verbose || debug_env {
        "classdemo=debug"
    } else {
        "classdemo=info"
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
