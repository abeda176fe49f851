use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingSection};

/// Build the filter: RUST_LOG, then `-v` count, then the configured level.
pub fn env_filter(config: &LoggingSection, verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbose {
        0 => config.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_logging(config: &LoggingSection, verbose: u8) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config, verbose));

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    }
    .map_err(|e| anyhow!("init logging: {}", e))?;

    tracing::debug!(level = %config.level, format = ?config.format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_config_level() {
        // RUST_LOG may be set in the environment running the tests
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let cfg = LoggingSection::default();
        assert_eq!(env_filter(&cfg, 0).to_string(), "warn");
        assert_eq!(env_filter(&cfg, 2).to_string(), "debug");
    }

    #[test]
    fn test_invalid_level_falls_back() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let cfg = LoggingSection {
            level: "ledgerlift=loud".to_string(),
            ..LoggingSection::default()
        };
        assert_eq!(env_filter(&cfg, 0).to_string(), "warn");
    }
}
