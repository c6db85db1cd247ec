//! Log setup shared by the `guard` and `print_walk` binaries.
//!
//! Turns, loop detection and terminal states are logged at `debug`, every
//! move at `trace`. All of it is written to stderr; stdout is reserved for
//! the walk's output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. The level comes from `RUST_LOG` and is
/// `warn` otherwise, which leaves only the extra-guard-marker warning from
/// parsing. To watch each move: `RUST_LOG=guard=trace guard puzzle.txt`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
