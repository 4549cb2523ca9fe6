use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber.
///
/// Only does anything when `RUST_LOG` is set, and only the first time.
/// `RUST_LOG=tally_dispatch=trace` shows every dispatch, nested by depth.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .try_init();
        }
    });
}
