//! Log output for the driver, controlled by `RHO_LOG`.

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install the subscriber. Safe to call more than once.
///
/// `RHO_LOG` takes `EnvFilter` directives; without it only warnings and
/// errors are shown. Spans nest as an indented tree on stderr.
pub fn init() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RHO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        let tree = HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        // A subscriber may already be installed by an embedding host.
        let _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
    });
}
