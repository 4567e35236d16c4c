//==================================================
// File: logging.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Tracing setup for the RedCode binary
// Objective: One stderr subscriber filtered by REDCODE_LOG, keeping stdout
//            for script output
//==================================================

use std::io;
use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "REDCODE_LOG";

static INIT: OnceLock<()> = OnceLock::new();

/// Builds the filter: `REDCODE_LOG` directives over a `warn` default, with
/// the crate raised to `trace` when `trace` is set.
pub fn filter(trace: bool) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    if trace {
        if let Ok(directive) = "redcode=trace".parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Installs the global subscriber once; later calls are no-ops.
pub fn init(trace: bool) {
    INIT.get_or_init(|| {
        SubscriberBuilder::default()
            .with_env_filter(filter(trace))
            .with_writer(io::stderr)
            .with_target(true)
            .compact()
            .init();
    });
    tracing::debug!(trace, "tracing initialised");
}


//==================================================
// End of file
//==================================================
