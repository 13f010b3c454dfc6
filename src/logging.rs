//! Tracing setup. Logs go to stderr so they stay out of the interactive dialogue on stdout.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber with the given filter directive. An unparsable directive
/// falls back to `warn`. Only the first call has any effect.
pub fn init(filter: &str) {
    INIT_ONCE.call_once(|| {
        let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
    });
}
