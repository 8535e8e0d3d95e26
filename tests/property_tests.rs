//! Property-based tests for logbro using proptest

use logbro::core::log_level::parse_threshold;
use logbro::core::printf::format_args;
use logbro::prelude::*;
use logbro::{FixedClock, RecordBuilder, LEVELS};
use proptest::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LEVELS.to_vec())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names roundtrip through parsing
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.as_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(LogLevel::from_name(level.as_str()), Some(level));
    }

    /// Ordering agrees with rank
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, level1.rank() <= level2.rank());
        prop_assert_eq!(level1 < level2, level1.rank() < level2.rank());
    }

    /// Only the two most severe levels route to the error sink
    #[test]
    fn test_routing_split(level in any_level()) {
        prop_assert_eq!(level.routes_to_stderr(), level >= LogLevel::Error);
    }

    /// The least severe level named anywhere in the string wins
    #[test]
    fn test_threshold_is_minimum(
        levels in prop::collection::vec(any_level(), 1..6),
        separator in prop::sample::select(vec![",", " ", "-", ";", ", "]),
    ) {
        let input = levels
            .iter()
            .map(|l| l.as_str().to_uppercase())
            .collect::<Vec<_>>()
            .join(separator);
        let expected = levels.iter().copied().min();
        prop_assert_eq!(parse_threshold(&input), expected);
    }

    /// Strings without level names yield no threshold
    #[test]
    fn test_threshold_without_names(input in "[0-9 ,.-]{0,20}") {
        prop_assert_eq!(parse_threshold(&input), None);
    }
}

// ============================================================================
// Message Formatting Tests
// ============================================================================

proptest! {
    /// Text without placeholders is never altered
    #[test]
    fn test_plain_text_untouched(text in "[^%]{0,40}") {
        prop_assert_eq!(format_args(&[LogArg::from(text.as_str())]), text);
    }

    /// Extra arguments are appended with single spaces
    #[test]
    fn test_extra_args_appended(
        template in "[a-z ]{0,20}",
        extra in prop::collection::vec("[a-z]{1,8}", 1..5),
    ) {
        let mut args = vec![LogArg::from(template.as_str())];
        args.extend(extra.iter().map(|s| LogArg::from(s.as_str())));

        let expected = format!("{} {}", template, extra.join(" "));
        prop_assert_eq!(format_args(&args), expected);
    }

    /// %d and %s render any integer exactly
    #[test]
    fn test_integer_placeholder(n in any::<i64>(), u in any::<u64>()) {
        let args = [LogArg::from("n=%d"), LogArg::from(n)];
        prop_assert_eq!(format_args(&args), format!("n={}", n));

        let args = [LogArg::from("u=%s"), LogArg::from(u)];
        prop_assert_eq!(format_args(&args), format!("u={}", u));
    }

    /// %s substitutes text verbatim
    #[test]
    fn test_string_placeholder(s in "[a-zA-Z0-9 ]{0,20}") {
        let args = [LogArg::from("<%s>"), LogArg::from(s.as_str())];
        prop_assert_eq!(format_args(&args), format!("<{}>", s));
    }
}

// ============================================================================
// Record Tests
// ============================================================================

proptest! {
    /// level and timestamp are always the last keys and always set
    #[test]
    fn test_record_keys(
        level in any_level(),
        keys in prop::collection::btree_set("k[a-z]{1,5}", 0..5),
        message in "[a-z ]{0,10}",
    ) {
        let builder = RecordBuilder::with_clock(Arc::new(FixedClock::from_millis(0)));
        let mut fields = Fields::new();
        for key in &keys {
            fields.add_field(key.as_str(), 1);
        }

        let record = builder.build(level.as_str(), (fields, message.as_str()));

        let record_keys: Vec<&str> = record.keys().collect();
        let n = record_keys.len();
        prop_assert_eq!(&record_keys[n - 2..], &["level", "timestamp"][..]);
        prop_assert_eq!(record.level(), level.as_str());
        prop_assert_eq!(record.timestamp(), "1970-01-01T00:00:00.000Z");
        if message.is_empty() {
            prop_assert!(record.message().is_none());
        }
    }

    /// Every record that passes the threshold produces exactly one line
    #[test]
    fn test_one_line_per_record(
        threshold in any_level(),
        calls in prop::collection::vec(any_level(), 0..20),
    ) {
        let shared = Arc::new(SharedConfig::new());
        shared.set_min_level(threshold);
        let out = MemorySink::new();
        let err = MemorySink::new();
        let logger = Logger::builder()
            .stdout(out.clone())
            .stderr(err.clone())
            .shared_config(shared)
            .format(OutputFormat::Json)
            .build()
            .unwrap();

        for level in &calls {
            logger.log_level(*level, "line");
        }

        let passed = calls.iter().filter(|l| **l >= threshold);
        let expected_err = passed.clone().filter(|l| l.routes_to_stderr()).count();
        let expected_out = passed.count() - expected_err;
        prop_assert_eq!(out.lines().len(), expected_out);
        prop_assert_eq!(err.lines().len(), expected_err);
        prop_assert!(out.chunks().iter().all(|c| c.ends_with('\n')));
    }
}
