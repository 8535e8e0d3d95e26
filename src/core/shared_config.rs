//! Process-wide logger configuration
//!
//! Holds the threshold and default output format shared by every logger
//! without a local override. The global instance is created on first use
//! from `LOGBRO_LEVEL` and `LOGBRO_FORMAT` and stays mutable afterwards;
//! writes are last-write-wins. Tests build their own `SharedConfig` and hand
//! it to `LoggerBuilder::shared_config`.

use super::error::{LoggerError, Result};
use super::log_level::{parse_threshold, LogLevel};
use super::output_format::OutputFormat;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

/// Environment variable holding the initial threshold string
pub const LEVEL_ENV: &str = "LOGBRO_LEVEL";

/// Environment variable holding the initial format name
pub const FORMAT_ENV: &str = "LOGBRO_FORMAT";

/// Threshold used when the configuration names no level: nothing is filtered
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Trace;

static GLOBAL: OnceLock<Arc<SharedConfig>> = OnceLock::new();

#[derive(Debug)]
pub struct SharedConfig {
    level: RwLock<LogLevel>,
    format: RwLock<OutputFormat>,
}

impl SharedConfig {
    /// Configuration with the defaults: no filtering, pretty output
    pub fn new() -> Self {
        Self {
            level: RwLock::new(DEFAULT_LEVEL),
            format: RwLock::new(OutputFormat::Pretty),
        }
    }

    /// Read the initial values from the environment
    ///
    /// An unrecognized `LOGBRO_FORMAT` falls back to pretty output with a
    /// warning on stderr.
    pub fn from_env() -> Self {
        let level = std::env::var(LEVEL_ENV).ok();
        let format = std::env::var(FORMAT_ENV).ok();

        Self::from_values_lenient(level.as_deref(), format.as_deref())
    }

    /// Like [`from_values`](Self::from_values), but an unrecognized format
    /// falls back to pretty output with a warning on stderr. The level is
    /// applied either way.
    pub fn from_values_lenient(level: Option<&str>, format: Option<&str>) -> Self {
        Self::from_values(level, format).unwrap_or_else(|e| {
            eprintln!("[LOGBRO WARNING] {}; using pretty output", e);
            let config = Self::new();
            if let Some(level) = level {
                config.set_level(level);
            }
            config
        })
    }

    /// Build from raw configuration strings, as found in the environment
    pub fn from_values(level: Option<&str>, format: Option<&str>) -> Result<Self> {
        let config = Self::new();
        if let Some(level) = level {
            config.set_level(level);
        }
        match format {
            None | Some("") => {}
            Some(name) => config.set_format(name)?,
        }
        Ok(config)
    }

    /// The process-wide configuration, initialized from the environment on first use
    pub fn global() -> &'static Arc<SharedConfig> {
        GLOBAL.get_or_init(|| Arc::new(Self::from_env()))
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    /// Set the threshold from a free-form string and return the result
    ///
    /// The least severe level named in `input` wins; if none is named the
    /// threshold becomes [`DEFAULT_LEVEL`].
    pub fn set_level(&self, input: &str) -> LogLevel {
        let level = parse_threshold(input).unwrap_or(DEFAULT_LEVEL);
        *self.level.write() = level;
        level
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn format(&self) -> OutputFormat {
        self.format.read().clone()
    }

    /// Set the default format from a registered name or an `OutputFormat`
    pub fn set_format<F, E>(&self, format: F) -> Result<()>
    where
        F: TryInto<OutputFormat, Error = E>,
        E: Into<LoggerError>,
    {
        let format = format.try_into().map_err(Into::into)?;
        *self.format.write() = format;
        Ok(())
    }

    /// Restore the defaults
    pub fn reset(&self) {
        *self.level.write() = DEFAULT_LEVEL;
        *self.format.write() = OutputFormat::Pretty;
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SharedConfig::new();
        assert_eq!(config.level(), LogLevel::Trace);
        assert_eq!(config.format(), OutputFormat::Pretty);
    }

    #[test]
    fn test_set_level_from_string() {
        let config = SharedConfig::new();
        assert_eq!(config.set_level("bad warn,critical----"), LogLevel::Warn);
        assert_eq!(config.level(), LogLevel::Warn);
    }

    #[test]
    fn test_set_level_without_match_falls_back() {
        let config = SharedConfig::new();
        config.set_min_level(LogLevel::Error);
        assert_eq!(config.set_level("verbose"), DEFAULT_LEVEL);
        assert_eq!(config.level(), DEFAULT_LEVEL);
    }

    #[test]
    fn test_set_format_by_name_and_value() {
        let config = SharedConfig::new();
        config.set_format("json").unwrap();
        assert_eq!(config.format(), OutputFormat::Json);

        let custom = OutputFormat::custom(|record| record.level().to_string());
        config.set_format(custom.clone()).unwrap();
        assert_eq!(config.format(), custom);
    }

    #[test]
    fn test_set_format_rejects_unknown_name() {
        let config = SharedConfig::new();
        let err = config.set_format("xml").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert_eq!(config.format(), OutputFormat::Pretty);
    }

    #[test]
    fn test_from_values() {
        let config = SharedConfig::from_values(Some("warn"), Some("json")).unwrap();
        assert_eq!(config.level(), LogLevel::Warn);
        assert_eq!(config.format(), OutputFormat::Json);

        let config = SharedConfig::from_values(None, Some("")).unwrap();
        assert_eq!(config.level(), DEFAULT_LEVEL);
        assert_eq!(config.format(), OutputFormat::Pretty);

        assert!(SharedConfig::from_values(None, Some("yaml")).is_err());
    }

    #[test]
    fn test_lenient_unknown_format_keeps_level() {
        let config = SharedConfig::from_values_lenient(Some("warn"), Some("yaml"));
        assert_eq!(config.level(), LogLevel::Warn);
        assert_eq!(config.format(), OutputFormat::Pretty);

        let config = SharedConfig::from_values_lenient(Some("error"), Some("json"));
        assert_eq!(config.level(), LogLevel::Error);
        assert_eq!(config.format(), OutputFormat::Json);

        let config = SharedConfig::from_values_lenient(None, None);
        assert_eq!(config.level(), DEFAULT_LEVEL);
        assert_eq!(config.format(), OutputFormat::Pretty);
    }

    #[test]
    fn test_reset() {
        let config = SharedConfig::from_values(Some("error"), Some("json")).unwrap();
        config.reset();
        assert_eq!(config.level(), DEFAULT_LEVEL);
        assert_eq!(config.format(), OutputFormat::Pretty);
    }
}
