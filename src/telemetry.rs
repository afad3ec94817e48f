//! Telemetry logic.
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Log;

/// Build the filter, `RUST_LOG` wins over configured level.
fn filter(config: &Log) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install global tracing subscriber.
pub fn init(config: &Log) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(filter(config));

    if config.json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        let config = Log::default();
        // another test may already own the global subscriber.
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
