// 📝 Logging setup
// RUST_LOG overrides the default filter, e.g. `RUST_LOG=expense_tracker=debug`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when RUST_LOG is unset or invalid
pub const DEFAULT_FILTER: &str = "expense_tracker=info,tower_http=info";

/// Install the global subscriber. Call once, at process start.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}
