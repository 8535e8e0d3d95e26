//! Arguments accepted by a log call
//!
//! This module provides:
//! - `LogArg`: one call argument, classified once at the call boundary
//! - `Fields`: a merging object whose fields are copied into the record
//! - `ErrorRecord`: an error captured as plain, serializable fields
//! - `LogArgs`: the variadic argument list of a single call

use serde_json::{Map, Value};
use std::error::Error as StdError;

/// One argument of a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    /// Text; as the first format argument it is the printf template
    Message(String),
    /// Any other plain value (number, bool, null, array, nested data)
    Value(Value),
    /// Merging object
    Fields(Fields),
    /// Error captured as fields
    Failure(ErrorRecord),
}

impl LogArg {
    /// Capture an error value as a log argument.
    pub fn error<E>(err: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        LogArg::Failure(ErrorRecord::from_error(err))
    }

    /// Whether this argument is object-like and, in first position, merges into the record.
    ///
    /// JSON arrays are plain values, not merging objects: they have no field names.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            LogArg::Fields(_) | LogArg::Failure(_) | LogArg::Value(Value::Object(_))
        )
    }

    /// Convert into plain JSON.
    pub fn to_json_value(&self) -> Value {
        match self {
            LogArg::Message(s) => Value::String(s.clone()),
            LogArg::Value(v) => v.clone(),
            LogArg::Fields(fields) => Value::Object(fields.as_map().clone()),
            LogArg::Failure(err) => Value::Object(err.as_map().clone()),
        }
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Message(s.to_string())
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Message(s)
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::Message(s.clone())
    }
}

impl From<Value> for LogArg {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => LogArg::Message(s),
            other => LogArg::Value(other),
        }
    }
}

impl From<Fields> for LogArg {
    fn from(fields: Fields) -> Self {
        LogArg::Fields(fields)
    }
}

impl From<ErrorRecord> for LogArg {
    fn from(err: ErrorRecord) -> Self {
        LogArg::Failure(err)
    }
}

macro_rules! impl_from_plain {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArg {
                fn from(v: $ty) -> Self {
                    LogArg::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_from_plain!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool);

// JSON has no NaN or Infinity; those keep their textual spelling instead of becoming null
macro_rules! impl_from_float {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArg {
                fn from(v: $ty) -> Self {
                    if v.is_finite() {
                        LogArg::Value(Value::from(v))
                    } else {
                        LogArg::Message(non_finite_text(f64::from(v)))
                    }
                }
            }
        )*
    };
}

impl_from_float!(f32, f64);

fn non_finite_text(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_sign_positive() {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

impl From<()> for LogArg {
    fn from(_: ()) -> Self {
        LogArg::Value(Value::Null)
    }
}

/// Merging object: caller fields copied directly into the record.
///
/// Field order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    fields: Map<String, Value>,
}

impl Fields {
    /// Create an empty merging object
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Error value captured as an independent set of fields.
///
/// Holds `type: "Error"`, `name`, `stack` and `message`, followed by any
/// caller-supplied properties. Nothing references the original error.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    fields: Map<String, Value>,
}

impl ErrorRecord {
    /// Discriminant stored under `type`.
    pub const TYPE: &'static str = "Error";

    /// Capture any error, including its `source()` chain.
    ///
    /// `stack` starts with `"<name>: <message>"`, lists each source on its own
    /// `caused by:` line, and ends with a backtrace when one is captured
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
    pub fn from_error<E>(err: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let name = short_type_name(std::any::type_name::<E>());
        let message = err.to_string();

        let mut stack = format!("{}: {}", name, message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        let backtrace = std::backtrace::Backtrace::capture();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            stack.push('\n');
            stack.push_str(&backtrace.to_string());
        }

        Self::from_parts(name, message, stack)
    }

    /// Build from explicit parts, for errors that did not originate as a Rust error value.
    pub fn from_parts(
        name: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::from(Self::TYPE));
        fields.insert("name".to_string(), Value::String(name.into()));
        fields.insert("stack".to_string(), Value::String(stack.into()));
        fields.insert("message".to_string(), Value::String(message.into()));
        Self { fields }
    }

    /// Attach an extra own property of the error.
    pub fn with_property<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn stack(&self) -> Option<&str> {
        self.fields.get("stack").and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

fn short_type_name(full: &str) -> String {
    // Strip module paths but keep generic arguments readable: `a::B<c::D>` -> `B<D>`
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            ':' => segment.clear(),
            '<' | '>' | ',' | ' ' | '&' | '(' | ')' | '[' | ']' | ';' => {
                out.push_str(&segment);
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(&segment);
    out
}

/// Argument list of one log call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs(pub Vec<LogArg>);

impl LogArgs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<LogArg>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn as_slice(&self) -> &[LogArg] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<LogArg> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<LogArg>> for LogArgs {
    fn from(args: Vec<LogArg>) -> Self {
        Self(args)
    }
}

impl From<LogArg> for LogArgs {
    fn from(arg: LogArg) -> Self {
        Self(vec![arg])
    }
}

impl From<()> for LogArgs {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<&str> for LogArgs {
    fn from(s: &str) -> Self {
        Self(vec![s.into()])
    }
}

impl From<String> for LogArgs {
    fn from(s: String) -> Self {
        Self(vec![s.into()])
    }
}

impl From<Fields> for LogArgs {
    fn from(fields: Fields) -> Self {
        Self(vec![fields.into()])
    }
}

impl From<ErrorRecord> for LogArgs {
    fn from(err: ErrorRecord) -> Self {
        Self(vec![err.into()])
    }
}

impl From<Value> for LogArgs {
    fn from(v: Value) -> Self {
        Self(vec![v.into()])
    }
}

macro_rules! impl_from_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> From<($($name,)+)> for LogArgs
        where
            $($name: Into<LogArg>),+
        {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Self(vec![$($name.into()),+])
            }
        }
    };
}

impl_from_tuple!(A);
impl_from_tuple!(A, B);
impl_from_tuple!(A, B, C);
impl_from_tuple!(A, B, C, D);
impl_from_tuple!(A, B, C, D, E);
impl_from_tuple!(A, B, C, D, E, F);
impl_from_tuple!(A, B, C, D, E, F, G);
impl_from_tuple!(A, B, C, D, E, F, G, H);
