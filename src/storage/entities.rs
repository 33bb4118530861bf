use serde_json::{Map, Value};
use tracing::warn;

use crate::engine::{
    record::{LogCollection, LogRecord},
    streak::StreakMap,
    validation::{ValidationError, validate_value},
};

/// Converts the raw content of the logs file into a [LogCollection].
///
/// Entries written by hand or by older versions are accepted as long as they are 3 element
/// arrays: each field is coerced into the expected type. Semantically invalid entries (bad dates,
/// empty names) are kept, the streak computation skips what it can't interpret.
pub fn logs_from_value(raw: Vec<Value>) -> LogCollection {
    raw.into_iter()
        .filter_map(|value| match validate_value(&value) {
            Ok(record) => Some(record),
            Err(ValidationError::MalformedRecord) => {
                let coerced = coerce_record(&value);
                if coerced.is_none() {
                    warn!("Dropping malformed log entry {value}");
                }
                coerced
            }
            Err(_) => coerce_record(&value),
        })
        .collect()
}

/// Converts the raw content of the streaks file. Anything that isn't a non negative integer (or
/// something that clearly means one) is dropped.
pub fn streaks_from_value(raw: Map<String, Value>) -> StreakMap {
    raw.into_iter()
        .filter_map(|(habit, value)| match coerce_streak(&value) {
            Some(streak) => Some((habit, streak)),
            None => {
                warn!("Dropping streak {value} of {habit:?}");
                None
            }
        })
        .collect()
}

fn coerce_record(value: &Value) -> Option<LogRecord> {
    let [habit, date, completed] = value.as_array()?.as_slice() else {
        return None;
    };
    Some(LogRecord::new(
        coerce_text(habit),
        coerce_text(date),
        is_truthy(completed),
    ))
}

/// Text form of a stored field, written the way older data files printed values: `True`,
/// `False` and `None` for the JSON literals, single quoted strings inside containers.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(v) => v.clone(),
        other => nested_text(other),
    }
}

fn nested_text(value: &Value) -> String {
    match value {
        Value::Null => "None".into(),
        Value::Bool(true) => "True".into(),
        Value::Bool(false) => "False".into(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => format!("'{v}'"),
        Value::Array(items) => {
            let items = items.iter().map(nested_text).collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        }
        Value::Object(entries) => {
            let entries = entries
                .iter()
                .map(|(key, v)| format!("'{key}': {}", nested_text(v)))
                .collect::<Vec<_>>();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(v) => *v,
        Value::Number(v) => v.as_f64().is_some_and(|v| v != 0.),
        Value::String(v) => !v.is_empty(),
        Value::Array(v) => !v.is_empty(),
        Value::Object(v) => !v.is_empty(),
    }
}

fn coerce_streak(value: &Value) -> Option<u32> {
    match value {
        Value::Number(v) => v
            .as_u64()
            .or_else(|| v.as_f64().filter(|v| *v >= 0.).map(|v| v as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::Bool(v) => Some(u32::from(*v)),
        Value::String(v) => v.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::engine::record::LogRecord;

    use super::{logs_from_value, streaks_from_value};

    fn as_vec(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap_or_default()
    }

    #[test]
    fn test_logs_coerced_before_validation() {
        let logs = logs_from_value(as_vec(json!([
            ["Read", "2025-06-01", true],
            ["Read", "2025-06-02", 1],
            ["Read", "2025-06-03", 0],
            ["Read", "2025-06-04", "yes"],
            [42, "2025-06-05", null],
        ])));
        assert_eq!(
            logs.records(),
            [
                LogRecord::new("Read", "2025-06-01", true),
                LogRecord::new("Read", "2025-06-02", true),
                LogRecord::new("Read", "2025-06-03", false),
                LogRecord::new("Read", "2025-06-04", true),
                LogRecord::new("42", "2025-06-05", false),
            ]
        );
    }

    #[test]
    fn test_non_text_fields_are_printed() {
        let logs = logs_from_value(as_vec(json!([
            [true, null, true],
            [["a", 1], {"k": false}, false],
            [1.5, "2025-06-01", true],
        ])));
        assert_eq!(
            logs.records(),
            [
                LogRecord::new("True", "None", true),
                LogRecord::new("['a', 1]", "{'k': False}", false),
                LogRecord::new("1.5", "2025-06-01", true),
            ]
        );
    }

    #[test]
    fn test_logs_drop_non_triples_keep_bad_dates() {
        let logs = logs_from_value(as_vec(json!([
            ["Read", "2025-06-01"],
            "Read",
            {"habit": "Read"},
            ["Read", "06/01/2025", true],
        ])));
        assert_eq!(
            logs.records(),
            [LogRecord::new("Read", "06/01/2025", true)]
        );
    }

    #[test]
    fn test_streaks_coercion() {
        let raw = json!({"Read": 4, "Walk": "2", "Swim": -1, "Run": 3.0, "Yoga": [1]});
        let streaks = streaks_from_value(raw.as_object().cloned().unwrap_or_default());
        assert_eq!(
            streaks.iter().collect::<Vec<_>>(),
            [("Read", 4), ("Run", 3), ("Walk", 2)]
        );
    }
}
