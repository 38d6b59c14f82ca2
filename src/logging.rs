//! Browser Logging
//!
//! Routes `tracing` events from the tree engine (duplicate ids, parent
//! cycles, rejected drops) to the browser console.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Pretty;
use tracing_subscriber::prelude::*;
use tracing_web::{performance_layer, MakeWebConsoleWriter};

#[cfg(debug_assertions)]
const MAX_LEVEL: LevelFilter = LevelFilter::DEBUG;
#[cfg(not(debug_assertions))]
const MAX_LEVEL: LevelFilter = LevelFilter::INFO;

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        // std::time is unavailable in the browser
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(MAX_LEVEL);
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    // Fails only when a subscriber is already set
    let _ = tracing_subscriber::registry().with(fmt_layer).with(perf_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_installs_global_subscriber() {
        init();
        assert!(tracing::dispatcher::has_been_set());
        // Second call must not panic
        init();
    }
}
