//! Storage is organized through [habit_store::JsonHabitStore].
//! The basic idea is:
//!   - There is a directory with all the data.
//!   - Habits, logs and streaks each live in their own json file.
//!   - Files are replaced as a whole, never edited in place.

pub mod entities;
pub mod habit_store;
