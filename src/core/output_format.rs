//! Output formats for log records
//!
//! Provides the formats a record can be rendered with:
//! - Pretty: `[<timestamp>] <LEVEL>: <message>`, followed by the stack on its own lines
//! - Json: one serialized object
//! - Custom: any caller-supplied function
//!
//! Formatters never add a trailing newline; the logger owns line termination.

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use super::printf::inspect;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Render a record as human-readable text
///
/// # Example
///
/// ```
/// use logbro::core::output_format::pretty;
/// use logbro::LogRecord;
///
/// let record: LogRecord = serde_json::from_str(
///     r#"{"timestamp":"T","level":"info","message":"m"}"#,
/// ).unwrap();
/// assert_eq!(pretty(&record), "[T] INFO: m");
/// ```
pub fn pretty(record: &LogRecord) -> String {
    let mut out = format!(
        "[{}] {}: {}",
        record.timestamp(),
        record.level().to_uppercase(),
        record.message().unwrap_or_default()
    );

    match record.stack() {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {}
        Some(Value::String(stack)) if stack.is_empty() => {}
        Some(Value::String(stack)) => {
            out.push('\n');
            out.push_str(stack);
        }
        Some(other) => {
            out.push('\n');
            out.push_str(&inspect(other));
        }
    }

    out
}

/// Serialize any value as a JSON object
///
/// Values that cannot be serialized render as `{}` instead of failing.
pub fn json<T>(value: &T) -> String
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Caller-supplied formatter, compared by identity.
#[derive(Clone)]
pub struct CustomFormat(Arc<dyn Fn(&LogRecord) -> String + Send + Sync>);

impl CustomFormat {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&LogRecord) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, record: &LogRecord) -> String {
        (self.0)(record)
    }
}

impl fmt::Debug for CustomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomFormat(..)")
    }
}

impl PartialEq for CustomFormat {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Output format for log records
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] INFO: Request processed`
    #[default]
    Pretty,

    /// JSON format for machine processing
    ///
    /// Example: `{"message":"Request processed","level":"info","timestamp":"2025-01-08T10:30:45.123Z"}`
    Json,

    /// Caller-supplied formatter
    Custom(CustomFormat),
}

impl OutputFormat {
    /// Names accepted by [`OutputFormat::from_name`].
    pub const NAMES: [&'static str; 2] = ["pretty", "json"];

    /// Wrap a formatting function
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&LogRecord) -> String + Send + Sync + 'static,
    {
        OutputFormat::Custom(CustomFormat::new(f))
    }

    /// Resolve a registered format name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(LoggerError::config(
                "format",
                format!(
                    "Invalid format '{}'. Must be one of {} or a function",
                    other,
                    Self::NAMES.join(", ")
                ),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Custom(_) => "custom",
        }
    }

    /// Render a record according to this format
    pub fn render(&self, record: &LogRecord) -> String {
        match self {
            OutputFormat::Pretty => pretty(record),
            OutputFormat::Json => json(record),
            OutputFormat::Custom(f) => f.call(record),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl TryFrom<&str> for OutputFormat {
    type Error = LoggerError;

    fn try_from(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_name(&s)
    }
}

impl From<CustomFormat> for OutputFormat {
    fn from(f: CustomFormat) -> Self {
        OutputFormat::Custom(f)
    }
}
