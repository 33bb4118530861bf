pub mod analysis;

use std::{collections::BTreeSet, io::Write};

use ansi_term::Colour::{Green, Red, Yellow};
use anyhow::Result;

use crate::engine::{habit::HabitName, record::LogCollection, streak::StreakMap};

fn status(completed: bool) -> String {
    if completed {
        Green.paint("✓").to_string()
    } else {
        Red.paint("✗").to_string()
    }
}

/// Flame indicator, empty for habits without a streak.
fn flame(streak: u32) -> String {
    if streak > 0 {
        Yellow.paint(format!("🔥 {streak}")).to_string()
    } else {
        String::new()
    }
}

/// Prints current streak of each active habit.
pub fn print_streaks(
    output: &mut impl Write,
    habits: &[HabitName],
    streaks: &StreakMap,
) -> Result<()> {
    writeln!(output, "\nCurrent streaks:")?;
    let width = habits.iter().map(|habit| habit.chars().count()).max().unwrap_or(0);
    for habit in habits {
        let streak = streaks.get(habit);
        let indicator = if streak > 0 { flame(streak) } else { "-".to_string() };
        writeln!(output, "  {habit:width$}  {indicator}")?;
    }
    Ok(())
}

/// Prints every record grouped by date. Dates are shown in text order so malformed ones end up
/// at the end instead of disappearing.
pub fn print_logs(
    output: &mut impl Write,
    logs: &LogCollection,
    streaks: &StreakMap,
) -> Result<()> {
    if logs.is_empty() {
        writeln!(output, "\nNo logs found!")?;
        return Ok(());
    }

    writeln!(output, "\nAll recorded logs:")?;
    let dates = logs
        .iter()
        .map(|record| record.date.as_str())
        .collect::<BTreeSet<_>>();
    for date in dates {
        writeln!(output, "\nDate: {date}")?;
        for record in logs.iter().filter(|record| record.date == date) {
            writeln!(
                output,
                "  {}: {} {}",
                record.habit,
                status(record.completed),
                flame(streaks.get(&record.habit))
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::engine::{
        habit::HabitList,
        record::{LogCollection, LogRecord},
        streak::StreakMap,
    };

    use super::{print_logs, print_streaks};

    #[test]
    fn test_print_logs_grouped_by_date() -> Result<()> {
        let logs = LogCollection::from(vec![
            LogRecord::new("Read", "2025-06-02", true),
            LogRecord::new("Read", "2025-06-01", false),
            LogRecord::new("Walk", "2025-06-02", false),
        ]);
        let streaks: StreakMap = [("Read".to_string(), 1)].into_iter().collect();
        let mut output = Vec::new();
        print_logs(&mut output, &logs, &streaks)?;

        let printed = String::from_utf8(output)?;
        let first = printed.find("Date: 2025-06-01").unwrap();
        let second = printed.find("Date: 2025-06-02").unwrap();
        assert!(first < second);
        assert_eq!(printed.matches("Read:").count(), 2);
        assert!(printed.contains("🔥 1"));
        Ok(())
    }

    #[test]
    fn test_print_logs_empty() -> Result<()> {
        let mut output = Vec::new();
        print_logs(&mut output, &LogCollection::new(), &StreakMap::new())?;
        assert!(String::from_utf8(output)?.contains("No logs found!"));
        Ok(())
    }

    #[test]
    fn test_print_streaks_lists_every_habit() -> Result<()> {
        let habits = HabitList::new(["Read", "Drink Water"])?;
        let streaks: StreakMap = [("Read".to_string(), 3)].into_iter().collect();
        let mut output = Vec::new();
        print_streaks(&mut output, &habits, &streaks)?;

        let printed = String::from_utf8(output)?;
        assert!(printed.contains("🔥 3"));
        assert!(printed.contains("Drink Water  -"));
        Ok(())
    }
}
