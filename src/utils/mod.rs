pub mod persistence;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const FALLBACK_FILTER: &str = "budget_tracker=warn";

/// Initializes the global tracing subscriber. `RUST_LOG` wins over `log_filter` when set.
pub fn init_tracing(log_filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(log_filter))
            .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
