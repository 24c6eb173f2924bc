//! Tracing initialization.
//!
//! Engine builds log at `info` (one line per fact pack), mode degradation at
//! `warn`, dropped calibration rows and per-feature posteriors at `debug`.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Env var holding the log directives, e.g. `smvs_engine=debug,smvs_core=warn`.
pub const LOG_ENV: &str = "SMVS_LOG";

/// Directive used when `SMVS_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "smvs_engine=info,smvs_core=warn";

static INIT: Once = Once::new();

/// Install the global subscriber with [`DEFAULT_DIRECTIVE`]. Idempotent.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_DIRECTIVE);
}

/// Install the global subscriber, falling back to `default_directive` when
/// `SMVS_LOG` does not parse. Only the first call in a process has effect.
pub fn init_tracing_with(default_directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        // The host may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).compact())
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing_with("smvs_core=debug");
        init_tracing();
        ::tracing::info!(category = "HEALTH_SUPPLEMENTS", "tracing initialized twice");
    }

    #[test]
    fn test_default_directive_parses() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
    }
}
