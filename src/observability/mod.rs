// Observability infrastructure using tracing crate
// Structured logging for the simulated backend and the demo binary

use anyhow::Result;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize the observability system.
/// Compact human-readable output by default; `verbose` raises the level to
/// debug so the per-endpoint dispatch lines show up.
pub fn init(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "geode_market=debug"
    } else {
        "geode_market=info"
    };

    // Example: RUST_LOG=geode_market=debug
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))?;

    let fmt_layer = fmt::layer().compact().with_target(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    Ok(())
}
