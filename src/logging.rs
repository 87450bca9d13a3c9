// SPDX-License-Identifier: PMPL-1.0-or-later

//! Diagnostic logging to stderr in `[LEVEL] message` form.
//!
//! stdout is reserved for the generated header, so every log line goes to
//! stderr.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// Install the global subscriber. `verbose` lowers the threshold from WARN to DEBUG.
pub fn init(verbose: bool) {
    let filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    // a second init (tests, embedding) keeps the first subscriber
    let _ = Registry::default().with(layer).try_init();
}
