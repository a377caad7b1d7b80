//! Property-based tests for chronicle_logger using proptest

use chronicle_logger::prelude::*;
use chronicle_logger::{classify, Classification};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

fn capture() -> (Chronicle, MemoryDestination) {
    let memory = MemoryDestination::new();
    let logger = Chronicle::builder()
        .threshold(Severity::Info)
        .destination(memory.clone())
        .build();
    (logger, memory)
}

fn level_strategy() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
        Just(LogLevel::Critical),
        Just(LogLevel::Always),
    ]
}

// ============================================================================
// Classifier
// ============================================================================

proptest! {
    /// Any key built as prefix + suffix is private
    #[test]
    fn test_prefixed_keys_are_private(prefix in "[a-z]{1,8}", suffix in "[a-z0-9_]{0,8}") {
        let key = format!("{}{}", prefix, suffix);
        prop_assert_eq!(classify(&key, &prefix), Classification::Private);
    }

    /// Keys not starting with the prefix are ordinary
    #[test]
    fn test_other_keys_are_ordinary(key in "[a-z]{1,12}") {
        prop_assume!(!key.starts_with("private"));
        prop_assert_eq!(classify(&key, "private"), Classification::Ordinary);
    }
}

// ============================================================================
// Binding and assembly
// ============================================================================

proptest! {
    /// Bound private keys never appear as top-level fields
    #[test]
    fn test_private_bindings_never_flattened(
        suffixes in prop::collection::vec("[a-z0-9]{0,6}", 1..6),
        values in prop::collection::vec(any::<i64>(), 6),
    ) {
        let (logger, memory) = capture();

        let mut fields = Fields::new();
        for (suffix, value) in suffixes.iter().zip(values.iter()) {
            fields.add_field(format!("private{}", suffix), *value);
        }
        logger.bind(fields);
        logger.error("check");

        let record = memory.last_json().unwrap();
        let object = record.as_object().unwrap();
        for suffix in &suffixes {
            let key = format!("private{}", suffix);
            if key != "private" {
                prop_assert!(!object.contains_key(&key));
            }
        }

        let expected: Vec<Value> = values.iter().take(suffixes.len()).map(|v| Value::from(*v)).collect();
        prop_assert_eq!(record["private"].as_array().unwrap(), &expected);
    }

    /// The last bind of a key wins
    #[test]
    fn test_last_write_wins(writes in prop::collection::vec(any::<i64>(), 1..10)) {
        let (logger, memory) = capture();

        for value in &writes {
            logger.bind(Fields::new().with_field("counter", *value));
        }
        logger.warning("final");

        let record = memory.last_json().unwrap();
        prop_assert_eq!(&record["counter"], &Value::from(*writes.last().unwrap()));
    }

    /// Every record decodes to exactly the assembled fields
    #[test]
    fn test_json_round_trip(
        bindings in prop::collection::hash_map("[a-d]{1,6}", ".{0,12}", 0..8),
        message in ".{0,24}",
        level in level_strategy(),
    ) {
        let (logger, memory) = capture();

        logger.bind(bindings.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
        logger.log(level, Some(message.clone().into()), Fields::new());

        let decoded: HashMap<String, Value> =
            serde_json::from_str(&memory.payloads().pop().unwrap()).unwrap();

        for (key, value) in &bindings {
            prop_assert_eq!(&decoded[key], &Value::String(value.clone()));
        }
        prop_assert_eq!(&decoded["event"], &Value::String(message));
        prop_assert_eq!(&decoded["loglevel"], &Value::String(level.to_str().to_string()));
        prop_assert_eq!(decoded.len(), bindings.len() + 5);
    }

    /// Clearing leaves only derived metadata (and the event)
    #[test]
    fn test_clear_leaves_metadata_only(
        bindings in prop::collection::hash_map("[a-z]{1,10}", any::<i32>(), 0..8),
    ) {
        let (logger, memory) = capture();

        logger.bind(bindings.into_iter().collect());
        logger.clear_bindings();
        logger.critical("after clear");

        let record = memory.last_json().unwrap();
        let mut keys: Vec<&String> = record.as_object().unwrap().keys().collect();
        keys.sort();
        prop_assert_eq!(keys, vec!["event", "file", "lineno", "loglevel", "timestamp"]);
    }
}

// ============================================================================
// Levels
// ============================================================================

proptest! {
    /// ALWAYS records pass whatever threshold is configured
    #[test]
    fn test_always_passes_any_threshold(threshold in prop_oneof![
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Error),
        Just(Severity::Critical),
    ]) {
        let (logger, memory) = capture();
        logger.set_threshold(threshold);
        logger.always("status");
        prop_assert_eq!(memory.len(), 1);
    }

    /// LogLevel string conversions roundtrip
    #[test]
    fn test_log_level_str_roundtrip(level in level_strategy()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(format!("{}", level), level.to_str());
    }
}
