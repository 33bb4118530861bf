use serde_json::Value;
use thiserror::Error;

use crate::utils::time::parse_calendar_date;

use super::record::LogRecord;

/// Longest accepted habit name, counted in characters.
pub const MAX_HABIT_NAME_LEN: usize = 50;

/// Reasons a single log record is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("record must be a [habit, date, completed] triple")]
    MalformedRecord,
    #[error("date {date:?} is not a valid YYYY-MM-DD calendar date")]
    InvalidDate { date: String },
    #[error("habit name is empty")]
    EmptyHabitName,
    #[error("habit name is {length} characters long, the limit is {}", MAX_HABIT_NAME_LEN)]
    NameTooLong { length: usize },
}

/// Checks a habit name on its own. Shared with [super::habit::HabitName] construction.
pub fn validate_habit_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyHabitName);
    }
    let length = name.chars().count();
    if length > MAX_HABIT_NAME_LEN {
        return Err(ValidationError::NameTooLong { length });
    }
    Ok(())
}

/// Validates an already typed record. `completed` is a real bool at this point, so only the
/// name and date can be wrong.
pub fn validate(record: &LogRecord) -> Result<(), ValidationError> {
    validate_habit_name(&record.habit)?;
    if parse_calendar_date(&record.date).is_none() {
        return Err(ValidationError::InvalidDate {
            date: record.date.clone(),
        });
    }
    Ok(())
}

/// Strict validation of a raw `[habit, date, completed]` value. No coercion happens here:
/// `1` is not a bool and `"2025-06-01"` must be a string.
pub fn validate_value(value: &Value) -> Result<LogRecord, ValidationError> {
    let Some([habit, date, completed]) = value.as_array().map(Vec::as_slice) else {
        return Err(ValidationError::MalformedRecord);
    };
    let (Value::String(habit), Value::String(date), Value::Bool(completed)) =
        (habit, date, completed)
    else {
        return Err(ValidationError::MalformedRecord);
    };

    let record = LogRecord::new(habit.as_str(), date.as_str(), *completed);
    validate(&record)?;
    Ok(record)
}
