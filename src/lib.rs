#![doc(test(attr(deny(warnings))))]

//! Budget Tracker records spending against a monthly limit, keeps running
//! totals, and persists the whole state to a JSON file.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

use config::Config;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing from `config` and emits a startup debug log.
pub fn init(config: &Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(&config.log_filter);
        tracing::debug!(
            data_file = %config.data_file.display(),
            "Budget Tracker tracing initialized."
        );
    });
}
