use std::{fmt::Display, io::Write};

use ansi_term::Colour::{Green, Red};
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use clap::{Parser, ValueEnum};

use crate::{
    engine::{habit::HabitName, record::LogCollection},
    storage::habit_store::HabitStore,
    utils::clock::Clock,
};

use super::{
    output::analysis::{DayStatus, HabitHistory, analyze_habit, first_recorded_day},
    validation_error,
};

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    Last7,
    Last30,
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRange::All => write!(f, "all"),
            DateRange::Last7 => write!(f, "last7"),
            DateRange::Last30 => write!(f, "last30"),
        }
    }
}

impl DateRange {
    /// First day covered by the range. The fixed ranges include today.
    fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateRange::All => None,
            DateRange::Last7 => Some(today - Duration::days(6)),
            DateRange::Last30 => Some(today - Duration::days(29)),
        }
    }
}

#[derive(Debug, Parser, Default)]
pub struct HistoryCommand {
    #[arg(long, help = "Only show this habit")]
    habit: Option<String>,
    #[arg(
        short,
        long,
        default_value_t = DateRange::All,
        help = "Range of days to show, ending today"
    )]
    range: DateRange,
}

/// Command to process `history`. Shows a day by day timeline of every habit (or a single one)
/// together with the share of recorded days that were completed.
pub async fn process_history_command(
    HistoryCommand { habit, range }: HistoryCommand,
    store: &impl HabitStore,
    clock: &impl Clock,
    output: &mut impl Write,
) -> Result<()> {
    let habits = store.load_habits().await?;
    let selected: Vec<&HabitName> = match habit {
        Some(name) => match habits.find(&name) {
            Some(habit) => vec![habit],
            None => return Err(validation_error(format!("Unknown habit {name:?}"))),
        },
        None => habits.iter().collect(),
    };

    if selected.is_empty() {
        writeln!(output, "No habits yet. Run `habitual setup` first.")?;
        return Ok(());
    }

    let logs = store.load_logs().await?;
    let today = clock.today();
    for habit in selected {
        print_history(output, &logs, habit, range, today)?;
    }
    Ok(())
}

fn print_history(
    output: &mut impl Write,
    logs: &LogCollection,
    habit: &str,
    range: DateRange,
    today: NaiveDate,
) -> Result<()> {
    writeln!(output, "\n{habit}")?;
    let Some(start) = range
        .start(today)
        .or_else(|| first_recorded_day(logs, habit, today))
    else {
        writeln!(output, "  No data recorded yet")?;
        return Ok(());
    };

    let history = analyze_habit(logs, habit, start, today);
    writeln!(output, "  {}", timeline(&history))?;
    writeln!(
        output,
        "  {} to {}: {} of {} recorded days completed ({})",
        start,
        today,
        history.completed(),
        history.recorded(),
        history.completion()
    )?;
    Ok(())
}

fn timeline(history: &HabitHistory) -> String {
    history
        .days
        .iter()
        .map(|(_, status)| match status {
            DayStatus::Completed => Green.paint("■").to_string(),
            DayStatus::Missed => Red.paint("□").to_string(),
            DayStatus::Unrecorded => "·".to_string(),
        })
        .collect()
}
