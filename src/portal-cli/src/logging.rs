//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor a level is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn setup_logging(level: Option<&str>, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LOG_LEVEL)));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
