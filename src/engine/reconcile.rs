use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::utils::time::format_date;

use super::{
    habit::HabitName,
    log_store::merge,
    record::{LogCollection, LogRecord},
    streak::{StreakMap, compute},
    validation::{ValidationError, validate},
};

/// A record of the check-in that didn't pass validation and was left out of the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub record: LogRecord,
    pub reason: ValidationError,
}

/// Result of one check-in. Logs and streaks belong together and should be persisted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInOutcome {
    pub logs: LogCollection,
    pub streaks: StreakMap,
    pub skipped: Vec<SkippedRecord>,
}

/// Records today's completions and recomputes every streak.
///
/// Invalid completions are reported in [CheckInOutcome::skipped], the rest still goes through.
/// The caller is responsible for making sure there is at least one habit.
#[instrument(skip_all, fields(today = %today))]
pub fn check_in(
    habits: &[HabitName],
    existing: LogCollection,
    completions: &BTreeMap<String, bool>,
    today: NaiveDate,
) -> CheckInOutcome {
    let date = format_date(today);
    let (valid, skipped): (Vec<_>, Vec<_>) = completions
        .iter()
        .map(|(habit, completed)| {
            let record = LogRecord::new(habit.as_str(), date.as_str(), *completed);
            match validate(&record) {
                Ok(()) => Ok(record),
                Err(reason) => Err(SkippedRecord { record, reason }),
            }
        })
        .partition(Result::is_ok);

    let valid = valid.into_iter().flatten().collect::<Vec<_>>();
    let skipped = skipped
        .into_iter()
        .filter_map(Result::err)
        .inspect(|skipped| warn!("Skipping {:?}: {}", skipped.record, skipped.reason))
        .collect::<Vec<_>>();

    debug!("Merging {} records, skipped {}", valid.len(), skipped.len());
    let logs = merge(existing, valid);
    let streaks = compute(habits, &logs, today);

    CheckInOutcome {
        logs,
        streaks,
        skipped,
    }
}
