use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{habit::HabitName, record::LogCollection};

/// Current streak per habit name. Always recomputed from the logs, never edited in place.
#[derive(PartialEq, Eq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakMap(BTreeMap<String, u32>);

impl StreakMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Streak of `habit`, 0 when nothing is known about it.
    pub fn get(&self, habit: &str) -> u32 {
        self.0.get(habit).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(habit, streak)| (habit.as_str(), *streak))
    }
}

impl FromIterator<(String, u32)> for StreakMap {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Computes the current streak of every habit as of `as_of`.
///
/// Records after `as_of` are ignored. The run is counted backwards from the latest remaining
/// recorded day and stops at the first day that is either marked as missed or has no record at
/// all; both count as a break.
pub fn compute(habits: &[HabitName], logs: &LogCollection, as_of: NaiveDate) -> StreakMap {
    habits
        .iter()
        .map(|habit| {
            let streak = habit_streak(logs, habit, as_of);
            trace!("Streak for {habit} as of {as_of}: {streak}");
            (habit.to_string(), streak)
        })
        .collect()
}

fn habit_streak(logs: &LogCollection, habit: &str, as_of: NaiveDate) -> u32 {
    let days = logs.latest_by_date(habit);

    let mut streak = 0;
    let mut anchor: Option<NaiveDate> = None;
    for (&date, &completed) in days.range(..=as_of).rev() {
        if !completed {
            break;
        }
        match anchor {
            Some(previous) if (previous - date).num_days() != 1 => break,
            Some(_) | None => {
                streak += 1;
                anchor = Some(date);
            }
        }
    }
    streak
}
