use chrono::NaiveDate;

use crate::{
    engine::record::LogCollection,
    utils::{
        percentage::{Percentage, ratio_percentage},
        time::date_range,
    },
};

/// State of a habit on one day of a history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Completed,
    Missed,
    Unrecorded,
}

#[derive(Debug)]
pub struct HabitHistory {
    pub days: Vec<(NaiveDate, DayStatus)>,
}

impl HabitHistory {
    pub fn completed(&self) -> usize {
        self.count(DayStatus::Completed)
    }

    pub fn recorded(&self) -> usize {
        self.days.len() - self.count(DayStatus::Unrecorded)
    }

    /// Completed days out of the recorded ones.
    pub fn completion(&self) -> Percentage {
        ratio_percentage(self.completed(), self.recorded())
    }

    fn count(&self, status: DayStatus) -> usize {
        self.days.iter().filter(|(_, v)| *v == status).count()
    }
}

/// Returns one status per day between `start` and `end` (both inclusive) for `habit`. Only the
/// log data is used, the same last write wins rule applies to repeated days.
pub fn analyze_habit(
    logs: &LogCollection,
    habit: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> HabitHistory {
    let recorded = logs.latest_by_date(habit);
    let days = date_range(start, end)
        .map(|day| {
            let status = match recorded.get(&day) {
                Some(true) => DayStatus::Completed,
                Some(false) => DayStatus::Missed,
                None => DayStatus::Unrecorded,
            };
            (day, status)
        })
        .collect();
    HabitHistory { days }
}

/// Earliest parseable date of the habit up to `today`, used as start of an unbounded range.
pub fn first_recorded_day(
    logs: &LogCollection,
    habit: &str,
    today: NaiveDate,
) -> Option<NaiveDate> {
    logs.latest_by_date(habit)
        .into_keys()
        .next()
        .filter(|day| *day <= today)
}
