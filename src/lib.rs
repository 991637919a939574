#![doc(test(attr(deny(warnings))))]

//! Finance Core expands recurring financial obligations into concrete
//! occurrences and projects running account balances over a bounded horizon,
//! powering the forecasting views of a personal finance tracker.

pub mod config;
pub mod errors;
pub mod projection;
pub mod schedule;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
