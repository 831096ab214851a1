use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{BoardConfig, Env};

/// Installs the global tracing subscriber. Human readable output in dev, JSON
/// lines elsewhere. Calling it again once a subscriber is set does nothing.
pub fn init(config: &BoardConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter `{}`: {e}", config.log_filter);
        EnvFilter::new(crate::config::DEFAULT_LOG_FILTER)
    });

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.env {
        Env::Dev => registry.with(fmt::layer()).try_init(),
        Env::Staging | Env::Production => registry.with(fmt::layer().json()).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        let config = BoardConfig {
            log_filter: "not a [valid filter".into(),
            ..Default::default()
        };
        init(&config);
        init(&BoardConfig::default());
        tracing::info!("still logging");
    }
}
