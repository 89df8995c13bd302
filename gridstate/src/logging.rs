//! Diagnostic tracing for the grid reducer and CLI.
//!
//! What gets logged:
//!
//! - `debug`: every dispatched action (`reduce`, tagged with the action kind),
//!   replay input loading, duplicate row keys in the data transform.
//! - `warn`: host props that could not be merged into grid state (the state is
//!   kept unchanged), non-object rows skipped from a `data` prop.
//! - `info`: CLI milestones such as a finished replay or `init` finding an
//!   existing settings file.
//!
//! Output goes to stderr so `gridstate reduce` / `gridstate page` keep stdout
//! for JSON results.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Call once, at CLI startup.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=gridstate=debug gridstate reduce --config grid.json --actions actions.json
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
