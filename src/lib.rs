#![doc(test(attr(deny(warnings))))]

//! Month Status offers the spending forecast behind a monthly expense
//! tracker: it finds the table for the current month, buckets its expenses by
//! day, projects the month-end total and classifies the month against its
//! budget.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod forecast;
pub mod ledger;
pub mod period;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

pub use errors::{TrackerError, TrackerResult};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Month Status tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
