//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber: human-readable lines on stderr, filtered by
/// `RUST_LOG` with `info` as the floor. Records emitted through `log` by the
/// library crates are forwarded as well.
///
/// Returns `false` when a subscriber was already installed.
pub fn init() -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .try_init()
        .is_ok()
}
