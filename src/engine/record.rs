use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time::parse_calendar_date;

/// One observation of a habit for a day. Stored on disk as `[habit, "YYYY-MM-DD", completed]`.
///
/// The date stays textual so that a malformed historical entry survives loading and saving.
/// It is only skipped once something tries to interpret it.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
#[serde(from = "(String, String, bool)", into = "(String, String, bool)")]
pub struct LogRecord {
    pub habit: String,
    pub date: String,
    pub completed: bool,
}

impl LogRecord {
    pub fn new(habit: impl Into<String>, date: impl Into<String>, completed: bool) -> Self {
        Self {
            habit: habit.into(),
            date: date.into(),
            completed,
        }
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    fn same_day(&self, other: &LogRecord) -> bool {
        self.habit == other.habit && self.date == other.date
    }
}

impl From<(String, String, bool)> for LogRecord {
    fn from((habit, date, completed): (String, String, bool)) -> Self {
        Self {
            habit,
            date,
            completed,
        }
    }
}

impl From<LogRecord> for (String, String, bool) {
    fn from(LogRecord { habit, date, completed }: LogRecord) -> Self {
        (habit, date, completed)
    }
}

/// Append ordered history of records. Producers only ever append; duplicates for the same
/// habit and day are resolved when reading, the latest appended one wins.
#[derive(PartialEq, Eq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogCollection {
    records: Vec<LogRecord>,
}

impl LogCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogRecord> {
        self.records.iter()
    }

    /// Records of a single habit in insertion order.
    pub fn for_habit<'a>(&'a self, habit: &'a str) -> impl Iterator<Item = &'a LogRecord> + 'a {
        self.records.iter().filter(move |record| record.habit == habit)
    }

    /// Completion per calendar day for one habit. Later records overwrite earlier ones for the
    /// same day and unparseable dates are left out.
    pub fn latest_by_date(&self, habit: &str) -> BTreeMap<NaiveDate, bool> {
        self.for_habit(habit)
            .filter_map(|record| record.calendar_date().map(|date| (date, record.completed)))
            .collect()
    }

    /// Removes the live record for the same habit and day (if any) and appends `record`.
    pub(super) fn replace_day(&mut self, record: LogRecord) {
        self.records.retain(|existing| !existing.same_day(&record));
        self.records.push(record);
    }
}

impl From<Vec<LogRecord>> for LogCollection {
    fn from(records: Vec<LogRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<LogRecord> for LogCollection {
    fn from_iter<T: IntoIterator<Item = LogRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LogCollection {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
