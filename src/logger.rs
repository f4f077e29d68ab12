use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    config::{LogFormat, LoggerConfig},
    Error, Result,
};

const CRATE_TARGET: &str = "tosid_kmac";

/// Builds the filter directives for the supplied configuration.
///
/// `RUST_LOG` wins over the configured level when it is set.
#[must_use]
pub fn filter_directives(config: &LoggerConfig) -> String {
    config
        .override_filter
        .clone()
        .unwrap_or_else(|| format!("{CRATE_TARGET}={}", config.level))
}

/// Installs the global tracing subscriber.
///
/// Does nothing when logging is disabled. Returns [`Error::Logger`] when a
/// global subscriber is already installed.
pub fn init(config: &LoggerConfig) -> Result<()> {
    if !config.enable {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(config)))
        .map_err(|err| Error::Logger(err.to_string()))?;

    let builder = fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| Error::Logger(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn directives_follow_level() {
        let config = LoggerConfig {
            level: LogLevel::Warn,
            ..LoggerConfig::default()
        };
        assert_eq!(filter_directives(&config), "tosid_kmac=warn");
    }

    #[test]
    fn override_filter_replaces_level() {
        let config = LoggerConfig {
            override_filter: Some("info,tosid_kmac::store=trace".to_string()),
            ..LoggerConfig::default()
        };
        assert_eq!(filter_directives(&config), "info,tosid_kmac::store=trace");
    }

    #[test]
    fn disabled_logger_is_a_no_op() {
        let config = LoggerConfig {
            enable: false,
            ..LoggerConfig::default()
        };
        init(&config).expect("disabled logger never fails");
    }
}
