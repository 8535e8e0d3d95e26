//! Record construction from call arguments
//!
//! Classification of the argument list:
//!
//! 1. The first argument is object-like (`Fields`, `Failure`, or a JSON
//!    object): it becomes the merging object and the remaining arguments are
//!    format arguments. An error is already flattened into plain fields by
//!    `ErrorRecord`, so the record never holds the error itself. The formatted
//!    message replaces the merging object's `message` only when non-empty.
//! 2. Otherwise every argument is a format argument and an empty result
//!    leaves `message` absent.
//!
//! `level` and `timestamp` are applied last and win over caller fields of
//! the same name.

use super::log_arg::{LogArg, LogArgs};
use super::log_record::LogRecord;
use super::printf;
use super::timestamp::{iso8601, Clock, SystemClock};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RecordBuilder {
    clock: Arc<dyn Clock>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Build the record for one log call.
    ///
    /// # Example
    ///
    /// ```
    /// use logbro::core::{Fields, RecordBuilder};
    ///
    /// let record = RecordBuilder::new().build("info", (Fields::new().with_field("a", 1), "msg"));
    /// assert_eq!(record.message(), Some("msg"));
    /// assert_eq!(record.get("a"), Some(&serde_json::json!(1)));
    /// assert_eq!(record.level(), "info");
    /// ```
    pub fn build(&self, level: &str, args: impl Into<LogArgs>) -> LogRecord {
        let mut args = args.into().into_vec();

        let (mut fields, message) = if args.first().is_some_and(LogArg::is_object) {
            let merging = args.remove(0);
            (merging_fields(merging), printf::format_args(&args))
        } else {
            (Map::new(), printf::format_args(&args))
        };

        if !message.is_empty() {
            fields.insert("message".to_string(), Value::String(message));
        }
        fields.insert("level".to_string(), Value::String(level.to_string()));
        fields.insert(
            "timestamp".to_string(),
            Value::String(iso8601(&self.clock.now())),
        );

        LogRecord::from_map(fields)
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn merging_fields(arg: LogArg) -> Map<String, Value> {
    match arg {
        LogArg::Fields(fields) => fields.into_map(),
        LogArg::Failure(err) => err.into_map(),
        LogArg::Value(Value::Object(map)) => map,
        // Not object-like; callers check `is_object` first
        LogArg::Message(_) | LogArg::Value(_) => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_arg::{ErrorRecord, Fields};
    use crate::core::timestamp::FixedClock;
    use serde_json::json;
    use std::fmt;

    const NOW: &str = "2020-01-03T16:17:05.388Z";

    fn builder() -> RecordBuilder {
        RecordBuilder::with_clock(Arc::new(FixedClock::from_millis(1578068225388)))
    }

    fn keys(record: &LogRecord) -> Vec<&str> {
        record.keys().collect()
    }

    fn sample_fields() -> Fields {
        Fields::new()
            .with_field("string", "string")
            .with_field("obj", json!({"bool": true}))
    }

    #[derive(Debug)]
    struct TestError;

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Test error")
        }
    }

    impl std::error::Error for TestError {}

    #[test]
    fn test_no_args_has_no_message() {
        let record = builder().build("info", ());
        assert_eq!(record.message(), None);
        assert_eq!(record.level(), "info");
        assert_eq!(record.timestamp(), NOW);
        assert_eq!(keys(&record), vec!["level", "timestamp"]);
    }

    #[test]
    fn test_simple_message() {
        let record = builder().build("info", "Simple log message");
        assert_eq!(record.message(), Some("Simple log message"));
        assert_eq!(keys(&record), vec!["message", "level", "timestamp"]);
    }

    #[test]
    fn test_template_interpolation() {
        let record = builder().build("info", ("hi %s", "there"));
        assert_eq!(record.message(), Some("hi there"));

        let record = builder().build("info", ("Message: %s %f", "hey", 1.1234));
        assert_eq!(record.message(), Some("Message: hey 1.1234"));
    }

    #[test]
    fn test_empty_string_message_is_absent() {
        let record = builder().build("info", "");
        assert!(!record.contains_key("message"));
    }

    #[test]
    fn test_merging_object_only() {
        let record = builder().build("info", sample_fields());
        assert_eq!(keys(&record), vec!["string", "obj", "level", "timestamp"]);
        assert_eq!(record.get("obj"), Some(&json!({"bool": true})));
        assert_eq!(record.message(), None);
    }

    #[test]
    fn test_merging_object_and_message() {
        let record = builder().build("info", (Fields::new().with_field("a", 1), "msg"));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"a": 1, "message": "msg", "level": "info", "timestamp": NOW})
        );
    }

    #[test]
    fn test_merging_object_and_template() {
        let record = builder().build("info", (sample_fields(), "Message: %s %f", "hey", 1.1234));
        assert_eq!(record.message(), Some("Message: hey 1.1234"));
        assert_eq!(record.get("string"), Some(&json!("string")));
    }

    #[test]
    fn test_json_object_first_is_merging() {
        let record = builder().build("warn", (json!({"four": 5}), "note"));
        assert_eq!(record.get("four"), Some(&json!(5)));
        assert_eq!(record.message(), Some("note"));
    }

    #[test]
    fn test_base_fields_win() {
        let fields = Fields::new()
            .with_field("level", "fake")
            .with_field("timestamp", "yesterday")
            .with_field("keep", true);
        let record = builder().build("error", fields);

        assert_eq!(record.level(), "error");
        assert_eq!(record.timestamp(), NOW);
        assert_eq!(record.get("keep"), Some(&json!(true)));
        // Caller-supplied keys keep their position
        assert_eq!(keys(&record), vec!["level", "timestamp", "keep"]);
    }

    #[test]
    fn test_error_stack_and_message() {
        let err = ErrorRecord::from_error(&TestError);
        let stack = err.stack().unwrap().to_string();
        let record = builder().build("info", (err, "Message: %s %f", "hey", 1.1234));

        assert_eq!(record.stack(), Some(&json!(stack)));
        assert_eq!(record.message(), Some("Message: hey 1.1234"));
        assert_eq!(record.get("type"), Some(&json!("Error")));
        assert_eq!(record.level(), "info");
    }

    #[test]
    fn test_error_message_kept_without_format_args() {
        let record = builder().build("critical", LogArg::error(&TestError));
        assert_eq!(record.message(), Some("Test error"));
        assert!(record.stack().is_some());
    }

    #[test]
    fn test_error_properties_copied() {
        let err = ErrorRecord::from_error(&TestError)
            .with_property("propertyOne", "one")
            .with_property("deepObj", json!({"deep": ["Object"]}));
        let record = builder().build("info", err);

        assert_eq!(record.get("propertyOne"), Some(&json!("one")));
        assert_eq!(record.get("deepObj"), Some(&json!({"deep": ["Object"]})));
    }

    #[test]
    fn test_error_record_serializes() {
        let record = builder().build("error", LogArg::error(&TestError));
        let json = serde_json::to_string(&record).unwrap();
        let back: LogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_non_object_first_formats_everything() {
        let record = builder().build(
            "info",
            (1, "two", (), json!({"four": 5, "six": [7, "8"]})),
        );
        assert_eq!(
            record.message(),
            Some("1 two null { four: 5, six: [ 7, '8' ] }")
        );
        assert!(!record.contains_key("four"));
    }

    #[test]
    fn test_unknown_level_name_is_recorded_verbatim() {
        let record = builder().build("audit", "x");
        assert_eq!(record.level(), "audit");
    }
}
