use std::{
    collections::BTreeMap,
    fmt::Display,
    io::{BufRead, Write},
};

use anyhow::Result;
use chrono::NaiveDate;
use chrono_english::parse_date_string;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use crate::{
    engine::{habit::HabitList, reconcile::check_in, streak::compute},
    storage::habit_store::HabitStore,
    utils::{clock::Clock, time::parse_calendar_date},
};

use super::{output::print_streaks, prompt::ask_yes_no, validation_error};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DateStyle {
    #[default]
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser, Default)]
pub struct CheckInCommand {
    #[arg(long = "done", short = 'd', help = "Habit completed on that day. Can be repeated")]
    done: Vec<String>,
    #[arg(long = "missed", short = 'm', help = "Habit missed on that day. Can be repeated")]
    missed: Vec<String>,
    #[arg(
        long = "date",
        help = "Day to record. Defaults to today. Examples are \"2025-06-01\", \"yesterday\", \"15/03/2025\""
    )]
    date: Option<String>,
    #[arg(
        long,
        default_value_t = DateStyle::Uk,
        help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year"
    )]
    date_style: DateStyle,
}

/// Command to process `check-in`. Without any `--done`/`--missed` flags every habit is asked
/// about interactively.
pub async fn process_check_in_command(
    CheckInCommand {
        done,
        missed,
        date,
        date_style,
    }: CheckInCommand,
    store: &impl HabitStore,
    clock: &impl Clock,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let habits = store.load_habits().await?;
    if habits.is_empty() {
        return Err(validation_error(
            "No habits found! Run `habitual setup` to set up your daily habits first",
        ));
    }

    let today = clock.today();
    let day = match date {
        Some(expression) => resolve_date(&expression, date_style, clock)?,
        None => today,
    };
    if day > today {
        return Err(validation_error(format!("Can't check in for {day}, it is in the future")));
    }

    let completions = if done.is_empty() && missed.is_empty() {
        prompt_completions(&habits, day, input, output)?
    } else {
        resolve_completions(&habits, &done, &missed)?
    };

    let logs = store.load_logs().await?;
    let mut outcome = check_in(&habits, logs, &completions, day);
    for skipped in &outcome.skipped {
        warn!("Check-in for {:?} was not recorded: {}", skipped.record, skipped.reason);
        writeln!(
            output,
            "Skipped {}: {}",
            skipped.record.habit, skipped.reason
        )?;
    }
    if day != today {
        // A backfilled day shouldn't leave streaks computed for the past.
        outcome.streaks = compute(&habits, &outcome.logs, today);
    }

    store.save_snapshot(&outcome.logs, &outcome.streaks).await?;
    info!("Recorded {} completions for {day}", completions.len());

    writeln!(output, "\nLogs for {day} have been recorded successfully!")?;
    print_streaks(output, &habits, &outcome.streaks)?;
    Ok(())
}

fn resolve_date(expression: &str, style: DateStyle, clock: &impl Clock) -> Result<NaiveDate> {
    if let Some(date) = parse_calendar_date(expression.trim()) {
        return Ok(date);
    }
    parse_date_string(expression, clock.now(), style.into())
        .map(|date| date.date_naive())
        .map_err(|e| validation_error(format!("Failed to validate date {expression:?}: {e}")))
}

fn resolve_completions(
    habits: &HabitList,
    done: &[String],
    missed: &[String],
) -> Result<BTreeMap<String, bool>> {
    let mut completions = BTreeMap::new();
    let flagged = done
        .iter()
        .map(|name| (name, true))
        .chain(missed.iter().map(|name| (name, false)));
    for (name, completed) in flagged {
        let Some(habit) = habits.find(name) else {
            return Err(validation_error(format!(
                "Unknown habit {name:?}. Tracked habits are: {}",
                habits.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
            )));
        };
        if completions.insert(habit.to_string(), completed).is_some_and(|v| v != completed) {
            return Err(validation_error(format!(
                "{habit} is marked as both done and missed"
            )));
        }
    }
    Ok(completions)
}

fn prompt_completions(
    habits: &HabitList,
    day: NaiveDate,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<BTreeMap<String, bool>> {
    writeln!(output, "\n=== Daily Habit Check-in ===")?;
    writeln!(output, "Date: {day}")?;
    let mut completions = BTreeMap::new();
    for habit in habits.iter() {
        let completed = ask_yes_no(input, output, &format!("\nDid you complete '{habit}'?"))?;
        completions.insert(habit.to_string(), completed);
    }
    Ok(completions)
}
