use std::io::{BufRead, Write};

use anyhow::Result;

use crate::{
    engine::habit::{HabitList, HabitName, MAX_HABITS, MIN_HABITS},
    storage::habit_store::HabitStore,
};

use super::{prompt::ask_line, validation_error};

/// Command to process `setup`. Habits given as arguments are validated as a whole, otherwise the
/// user is asked for them one by one.
pub async fn process_setup_command(
    store: &impl HabitStore,
    habits: Vec<String>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let habits = if habits.is_empty() {
        prompt_habits(input, output)?
    } else {
        check_count(habits.len())?;
        HabitList::new(habits).map_err(validation_error)?
    };

    store.save_habits(&habits).await?;

    writeln!(output, "\nHabits configured successfully!")?;
    writeln!(output, "Your habits:")?;
    for (index, habit) in habits.iter().enumerate() {
        writeln!(output, "{}. {habit}", index + 1)?;
    }
    Ok(())
}

fn check_count(count: usize) -> Result<()> {
    if (MIN_HABITS..=MAX_HABITS).contains(&count) {
        Ok(())
    } else {
        Err(validation_error(format!(
            "Expected between {MIN_HABITS} and {MAX_HABITS} habits, got {count}"
        )))
    }
}

fn prompt_habits(input: &mut impl BufRead, output: &mut impl Write) -> Result<HabitList> {
    writeln!(output, "\n=== Setup Your Daily Habits ===")?;

    let count = loop {
        let answer = ask_line(
            input,
            output,
            &format!("\nHow many habits would you like to track? ({MIN_HABITS}-{MAX_HABITS}): "),
        )?;
        match answer.parse::<usize>() {
            Ok(count) if check_count(count).is_ok() => break count,
            Ok(_) => writeln!(
                output,
                "Please enter a number between {MIN_HABITS} and {MAX_HABITS}."
            )?,
            Err(_) => writeln!(output, "Please enter a valid number.")?,
        }
    };

    writeln!(output, "\nPlease input your {count} daily habits:")?;
    let mut names = Vec::<HabitName>::with_capacity(count);
    while names.len() < count {
        let answer = ask_line(input, output, &format!("Habit #{}: ", names.len() + 1))?;
        match HabitName::new(&answer) {
            Ok(name) if names.iter().any(|existing| existing.matches(&name)) => writeln!(
                output,
                "You've already added this habit. Please enter a different one."
            )?,
            Ok(name) => names.push(name),
            Err(e) => writeln!(output, "{e}. Please enter a valid habit.")?,
        }
    }

    Ok(HabitList::new(names.iter().map(|name| name.as_str()))?)
}
