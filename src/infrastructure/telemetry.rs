//! Tracing subscriber setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::infrastructure::config::AppConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// filter. Calling this again after a subscriber is set is a no-op.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .is_ok()
    {
        tracing::debug!(filter = %config.log_filter, "Tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = AppConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }
}
