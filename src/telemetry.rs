//! # Telemetry
//!
//! Global `tracing` subscriber setup.

use crate::config::LoggingConfig;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry};

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Subscriber built from a [`LoggingConfig`].
pub type LogSubscriber =
    Layered<Box<dyn Layer<FilteredRegistry> + Send + Sync>, FilteredRegistry>;

/// Builds the filter: `RUST_LOG` when set and valid, else the configured
/// directives, else `info`.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Builds the subscriber without installing it.
#[must_use]
pub fn subscriber(config: &LoggingConfig) -> LogSubscriber {
    let fmt_layer: Box<dyn Layer<FilteredRegistry> + Send + Sync> = if config.json {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .json()
            .with_current_span(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .compact()
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt_layer)
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns `TryInitError` if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    subscriber(config).try_init()
}
