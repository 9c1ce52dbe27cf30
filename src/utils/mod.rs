pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` is honoured; without it only `month_status` info events are shown.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("month_status=info"));

        // A host application may already have installed a subscriber.
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    });
}
