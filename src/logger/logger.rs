use crate::settings;
use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

pub struct LogConfig {
    pub filter: String,
}

impl From<&settings::Log> for LogConfig {
    fn from(log: &settings::Log) -> Self {
        Self {
            filter: log.filter.clone(),
        }
    }
}

impl LogConfig {
    fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter).map_err(|e| anyhow!("log filter {:?}: {e}", self.filter))
    }
}

/// Process-wide subscriber whose filter can be swapped once settings load.
pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logger {
    /// `RUST_LOG` wins over the `info` default until settings are read.
    pub fn new_bootstrap() -> Self {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();

        Self { reload_handle }
    }

    pub fn reload_from_config(&self, config: &LogConfig) -> Result<()> {
        let filter = config.env_filter()?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_directive_filters() {
        let config = LogConfig::from(&settings::Log {
            filter: "varanda=debug,warp=info".to_string(),
        });
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn rejects_malformed_filter() {
        let config = LogConfig {
            filter: "varanda=loud".to_string(),
        };
        assert!(config.env_filter().is_err());
    }
}
