//! Logging configuration for rowlens.
//!
//! The library itself only emits `tracing` events and spans; nothing here is
//! required for profiling. Binaries that want output call [`init_logging`]
//! once at startup.

use tracing::Level;

/// Configuration for rowlens logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Log level for rowlens components specifically
    pub rowlens_level: Level,
    /// Whether to use JSON output format
    pub json_format: bool,
    /// Environment filter override
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            rowlens_level: Level::INFO,
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration for production use.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            rowlens_level: Level::INFO,
            json_format: true,
            env_filter: None,
        }
    }

    /// Creates a configuration for development use.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            rowlens_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }

    /// Sets the log level for the application.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the log level for rowlens components.
    pub fn with_rowlens_level(mut self, level: Level) -> Self {
        self.rowlens_level = level;
        self
    }

    /// Sets whether to use JSON output format.
    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    /// Sets a custom environment filter.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            filter.clone()
        } else {
            format!(
                "{},rowlens={}",
                self.level.as_str().to_lowercase(),
                self.rowlens_level.as_str().to_lowercase()
            )
        }
    }
}

/// Initializes logging for the current process.
///
/// The `RUST_LOG` environment variable takes precedence over the configured
/// filter. Calling this more than once returns an error from the underlying
/// subscriber registry.
///
/// # Examples
///
/// ```rust,no_run
/// use rowlens::logging::{init_logging, LoggingConfig};
///
/// init_logging(LoggingConfig::default()).unwrap();
/// ```
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = if config.json_format {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.rowlens_level, Level::INFO);
        assert!(!config.json_format);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_logging_config_development() {
        let config = LoggingConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.json_format);
    }

    #[test]
    fn test_logging_config_production() {
        let config = LoggingConfig::production();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.rowlens_level, Level::INFO);
        assert!(config.json_format);
    }

    #[test]
    fn test_env_filter_string() {
        let config = LoggingConfig::default().with_rowlens_level(Level::DEBUG);
        assert_eq!(config.env_filter(), "info,rowlens=debug");

        let config = LoggingConfig::default().with_env_filter("warn,rowlens=trace");
        assert_eq!(config.env_filter(), "warn,rowlens=trace");
    }
}
