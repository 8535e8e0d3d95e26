//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    listeners::{EventListeners, ListenerId},
    log_arg::LogArgs,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    record_builder::RecordBuilder,
    shared_config::SharedConfig,
    sink::Sink,
    timestamp::Clock,
};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide default logger, writing to the process stdout/stderr.
pub fn logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

pub struct Logger {
    stdout: Mutex<Box<dyn Sink>>,
    stderr: Mutex<Box<dyn Sink>>,
    /// Local override of the shared format
    local_format: RwLock<Option<OutputFormat>>,
    shared: Arc<SharedConfig>,
    records: RecordBuilder,
    listeners: EventListeners,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger on the process stdout/stderr using the global shared configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(
            Box::new(ConsoleSink::stdout()),
            Box::new(ConsoleSink::stderr()),
            None,
            Arc::clone(SharedConfig::global()),
            RecordBuilder::new(),
        )
    }

    fn from_parts(
        stdout: Box<dyn Sink>,
        stderr: Box<dyn Sink>,
        local_format: Option<OutputFormat>,
        shared: Arc<SharedConfig>,
        records: RecordBuilder,
    ) -> Self {
        let listeners = EventListeners::new();
        // "error" is both a level and the conventional failure channel; it
        // always has a passive listener
        listeners.on(LogLevel::Error.as_str(), |_| {});

        Self {
            stdout: Mutex::new(stdout),
            stderr: Mutex::new(stderr),
            local_format: RwLock::new(local_format),
            shared,
            records,
            listeners,
            metrics: LoggerMetrics::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Process-wide settings
    // ---------------------------------------------------------------------

    /// Threshold shared by every logger built on the global configuration
    pub fn shared_level() -> LogLevel {
        SharedConfig::global().level()
    }

    /// Set the global threshold from a free-form string such as `"debug,http"`
    pub fn set_shared_level(input: &str) -> LogLevel {
        SharedConfig::global().set_level(input)
    }

    pub fn set_shared_min_level(level: LogLevel) {
        SharedConfig::global().set_min_level(level);
    }

    /// Default format shared by every logger without a local override
    pub fn shared_format() -> OutputFormat {
        SharedConfig::global().format()
    }

    /// Set the global default format from a registered name or an `OutputFormat`
    pub fn set_shared_format<F, E>(format: F) -> Result<()>
    where
        F: TryInto<OutputFormat, Error = E>,
        E: Into<LoggerError>,
    {
        SharedConfig::global().set_format(format)
    }

    // ---------------------------------------------------------------------
    // Instance settings
    // ---------------------------------------------------------------------

    /// Effective threshold; always the shared one
    pub fn level(&self) -> LogLevel {
        self.shared.level()
    }

    /// Levels are process-wide; setting one on an instance always fails.
    pub fn set_level(&self, _level: &str) -> Result<()> {
        Err(LoggerError::unsupported(
            "set_level",
            "Do not set the level of a Logger instance. Instead, set the level globally",
        ))
    }

    /// Effective format: the local override if set, else the shared format
    pub fn format(&self) -> OutputFormat {
        match self.local_format.read().as_ref() {
            Some(format) => format.clone(),
            None => self.shared.format(),
        }
    }

    /// Override the shared format for this logger
    pub fn set_format<F, E>(&self, format: F) -> Result<()>
    where
        F: TryInto<OutputFormat, Error = E>,
        E: Into<LoggerError>,
    {
        let format = format.try_into().map_err(Into::into)?;
        *self.local_format.write() = Some(format);
        Ok(())
    }

    /// Drop the local override and follow the shared format again
    pub fn clear_format(&self) {
        *self.local_format.write() = None;
    }

    pub fn shared_config(&self) -> &Arc<SharedConfig> {
        &self.shared
    }

    // ---------------------------------------------------------------------
    // Logging
    // ---------------------------------------------------------------------

    /// Log at a level given by name. Unknown names are ignored.
    pub fn log(&self, level: &str, args: impl Into<LogArgs>) {
        let format = self.format();
        self.log_with_format(level, &format, args);
    }

    pub fn log_level(&self, level: LogLevel, args: impl Into<LogArgs>) {
        self.log(level.as_str(), args);
    }

    /// Gated write path.
    ///
    /// Below the threshold, or for a name outside the level table, nothing is
    /// written and nothing is emitted. Otherwise the record is built, rendered
    /// with `format`, terminated by exactly one newline, written to the sink
    /// chosen by the level, and emitted to listeners of the level's event.
    pub fn log_with_format(&self, level: &str, format: &OutputFormat, args: impl Into<LogArgs>) {
        let Some(severity) = LogLevel::from_name(level) else {
            self.metrics.record_filtered();
            return;
        };
        if severity < self.level() {
            self.metrics.record_filtered();
            return;
        }

        let record = self.records.build(level, args);
        self.metrics.record_logged();

        match catch_unwind(AssertUnwindSafe(|| format.render(&record))) {
            Ok(mut text) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                self.write(severity, &text);
            }
            Err(_) => {
                self.metrics.record_write_failure();
                eprintln!(
                    "[LOGBRO ERROR] Formatter '{}' panicked; '{}' record not written",
                    format.name(),
                    level
                );
            }
        }

        let outcome = self.listeners.emit(level, &record);
        if outcome.failed > 0 {
            self.metrics.record_listener_failures(outcome.failed as u64);
        }
    }

    fn write(&self, level: LogLevel, text: &str) {
        let mut sink = if level.routes_to_stderr() {
            self.stderr.lock()
        } else {
            self.stdout.lock()
        };

        match catch_unwind(AssertUnwindSafe(|| sink.write(text))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                eprintln!("[LOGBRO ERROR] Sink '{}' write failed: {}", sink.name(), e);
            }
            Err(_) => {
                self.metrics.record_write_failure();
                eprintln!("[LOGBRO ERROR] Sink '{}' panicked during write", sink.name());
            }
        }
    }

    #[inline]
    pub fn trace(&self, args: impl Into<LogArgs>) {
        self.log_level(LogLevel::Trace, args);
    }

    #[inline]
    pub fn debug(&self, args: impl Into<LogArgs>) {
        self.log_level(LogLevel::Debug, args);
    }

    #[inline]
    pub fn info(&self, args: impl Into<LogArgs>) {
        self.log_level(LogLevel::Info, args);
    }

    #[inline]
    pub fn warn(&self, args: impl Into<LogArgs>) {
        self.log_level(LogLevel::Warn, args);
    }

    #[inline]
    pub fn error(&self, args: impl Into<LogArgs>) {
        self.log_level(LogLevel::Error, args);
    }

    #[inline]
    pub fn critical(&self, args: impl Into<LogArgs>) {
        self.log_level(LogLevel::Critical, args);
    }

    /// Per-level methods that always render JSON, whatever the configured format
    ///
    /// # Example
    ///
    /// ```
    /// use logbro::Logger;
    ///
    /// let logger = Logger::new();
    /// logger.json().info(("user %s logged in", "alice"));
    /// ```
    pub fn json(&self) -> JsonLogger<'_> {
        JsonLogger { logger: self }
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    /// Listen for records logged at `event` (a level name)
    pub fn on<F>(&self, event: impl Into<String>, callback: F) -> ListenerId
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.listeners.on(event, callback)
    }

    pub fn once<F>(&self, event: impl Into<String>, callback: F) -> ListenerId
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.listeners.once(event, callback)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.listeners.off(id)
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.listener_count(event)
    }

    /// Emit an event directly. Returns the number of listeners invoked.
    pub fn emit(&self, event: &str, record: &LogRecord) -> usize {
        let outcome = self.listeners.emit(event, record);
        if outcome.failed > 0 {
            self.metrics.record_listener_failures(outcome.failed as u64);
        }
        outcome.invoked()
    }

    pub fn events(&self) -> &EventListeners {
        &self.listeners
    }

    // ---------------------------------------------------------------------
    // Maintenance
    // ---------------------------------------------------------------------

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.stdout.lock().flush()?;
        self.stderr.lock().flush()?;
        Ok(())
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logbro::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .stdout(MemorySink::new())
    ///     .format(OutputFormat::Json)
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// View of a [`Logger`] whose level methods always render JSON.
#[derive(Clone, Copy)]
pub struct JsonLogger<'a> {
    logger: &'a Logger,
}

impl JsonLogger<'_> {
    pub fn log(&self, level: &str, args: impl Into<LogArgs>) {
        self.logger.log_with_format(level, &OutputFormat::Json, args);
    }

    #[inline]
    pub fn trace(&self, args: impl Into<LogArgs>) {
        self.log(LogLevel::Trace.as_str(), args);
    }

    #[inline]
    pub fn debug(&self, args: impl Into<LogArgs>) {
        self.log(LogLevel::Debug.as_str(), args);
    }

    #[inline]
    pub fn info(&self, args: impl Into<LogArgs>) {
        self.log(LogLevel::Info.as_str(), args);
    }

    #[inline]
    pub fn warn(&self, args: impl Into<LogArgs>) {
        self.log(LogLevel::Warn.as_str(), args);
    }

    #[inline]
    pub fn error(&self, args: impl Into<LogArgs>) {
        self.log(LogLevel::Error.as_str(), args);
    }

    #[inline]
    pub fn critical(&self, args: impl Into<LogArgs>) {
        self.log(LogLevel::Critical.as_str(), args);
    }
}

enum FormatSetting {
    Value(OutputFormat),
    Name(String),
}

/// Builder for constructing Logger with a fluent API
///
/// Unset sinks default to the process stdout/stderr, an unset format defers
/// to the shared format, and an unset shared configuration means the global one.
///
/// # Example
/// ```
/// use logbro::prelude::*;
/// use std::sync::Arc;
///
/// let shared = Arc::new(SharedConfig::new());
/// shared.set_level("warn");
///
/// let out = MemorySink::new();
/// let logger = Logger::builder()
///     .stdout(out.clone())
///     .stderr(out.clone())
///     .format_name("json")
///     .shared_config(shared)
///     .build()
///     .unwrap();
///
/// logger.info("hidden");
/// logger.warn("shown");
/// assert_eq!(out.lines().len(), 1);
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    stdout: Option<Box<dyn Sink>>,
    stderr: Option<Box<dyn Sink>>,
    format: Option<FormatSetting>,
    shared: Option<Arc<SharedConfig>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink for levels up to `warn`
    #[must_use = "builder methods return a new value"]
    pub fn stdout<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stdout = Some(Box::new(sink));
        self
    }

    /// Sink for `error` and `critical`
    #[must_use = "builder methods return a new value"]
    pub fn stderr<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stderr = Some(Box::new(sink));
        self
    }

    /// Local format override
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(FormatSetting::Value(format));
        self
    }

    /// Local format override by registered name, validated in [`build`](Self::build)
    #[must_use = "builder methods return a new value"]
    pub fn format_name(mut self, name: impl Into<String>) -> Self {
        self.format = Some(FormatSetting::Name(name.into()));
        self
    }

    /// Use this configuration instead of the global one
    #[must_use = "builder methods return a new value"]
    pub fn shared_config(mut self, shared: Arc<SharedConfig>) -> Self {
        self.shared = Some(shared);
        self
    }

    /// Time source for record timestamps
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the Logger
    ///
    /// Fails with `InvalidConfiguration` for a sink that is not writable or a
    /// format name that is not registered.
    pub fn build(self) -> Result<Logger> {
        let stdout = self
            .stdout
            .unwrap_or_else(|| Box::new(ConsoleSink::stdout()));
        if !stdout.is_writable() {
            return Err(LoggerError::config("stdout", "stdout must be Writable"));
        }

        let stderr = self
            .stderr
            .unwrap_or_else(|| Box::new(ConsoleSink::stderr()));
        if !stderr.is_writable() {
            return Err(LoggerError::config("stderr", "stderr must be Writable"));
        }

        let local_format = match self.format {
            None => None,
            Some(FormatSetting::Value(format)) => Some(format),
            Some(FormatSetting::Name(name)) => Some(OutputFormat::from_name(&name)?),
        };

        let shared = self
            .shared
            .unwrap_or_else(|| Arc::clone(SharedConfig::global()));
        let records = match self.clock {
            Some(clock) => RecordBuilder::with_clock(clock),
            None => RecordBuilder::new(),
        };

        Ok(Logger::from_parts(stdout, stderr, local_format, shared, records))
    }
}
