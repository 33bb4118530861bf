use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::{ValidationError, validate_habit_name};

/// Lower bound of habits the setup accepts. The engine itself works with any amount.
pub const MIN_HABITS: usize = 2;
/// Upper bound of habits the setup accepts.
pub const MAX_HABITS: usize = 10;

/// Title cased, trimmed habit name. Logs keep the plain string, so changing a name later does
/// not move any history over.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HabitName(String);

impl HabitName {
    /// Normalizes a name the user just typed.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = title_case(raw.trim());
        validate_habit_name(&name)?;
        Ok(Self(name))
    }

    /// Wraps a name read back from storage. Logs refer to the exact string, so it is only
    /// validated and never normalized again.
    pub fn stored(name: String) -> Result<Self, ValidationError> {
        validate_habit_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case insensitive comparison used for matching user input against the habit list.
    pub fn matches(&self, input: &str) -> bool {
        self.0.trim().to_lowercase() == title_case(input.trim()).to_lowercase()
    }
}

/// Upper cases the first letter of each whitespace separated word and lower cases the rest.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut word_start = true;
    for c in value.chars() {
        if c.is_whitespace() {
            word_start = true;
            result.push(c);
        } else if word_start {
            word_start = false;
            result.extend(c.to_uppercase());
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}

impl TryFrom<String> for HabitName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::stored(value)
    }
}

impl From<HabitName> for String {
    fn from(value: HabitName) -> Self {
        value.0
    }
}

impl Deref for HabitName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for HabitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HabitListError {
    #[error("invalid habit name {name:?}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: ValidationError,
    },
    #[error("habit {name:?} is listed more than once")]
    Duplicate { name: String },
}

/// Active habits in the order the user declared them. Duplicate names are rejected here so
/// that nothing downstream has to decide which one counts.
#[derive(PartialEq, Eq, Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct HabitList {
    habits: Vec<HabitName>,
}

impl HabitList {
    /// Builds a list from names the user typed, title casing each of them.
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Result<Self, HabitListError> {
        Self::checked(names.into_iter().map(|raw| {
            let raw = raw.as_ref();
            (raw.to_string(), HabitName::new(raw))
        }))
    }

    /// Builds a list from the stored names, keeping every name exactly as written.
    pub fn from_stored(names: Vec<String>) -> Result<Self, HabitListError> {
        Self::checked(names.into_iter().map(|raw| (raw.clone(), HabitName::stored(raw))))
    }

    fn checked(
        names: impl Iterator<Item = (String, Result<HabitName, ValidationError>)>,
    ) -> Result<Self, HabitListError> {
        let mut habits = Vec::<HabitName>::new();
        for (raw, name) in names {
            let name = name.map_err(|source| HabitListError::InvalidName { name: raw, source })?;
            if habits.iter().any(|existing| existing.matches(&name)) {
                return Err(HabitListError::Duplicate {
                    name: name.to_string(),
                });
            }
            habits.push(name);
        }
        Ok(Self { habits })
    }

    /// Finds the active habit a user typed, ignoring case.
    pub fn find(&self, input: &str) -> Option<&HabitName> {
        self.habits.iter().find(|habit| habit.matches(input))
    }
}

impl Deref for HabitList {
    type Target = [HabitName];

    fn deref(&self) -> &Self::Target {
        &self.habits
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::validation::ValidationError;

    use super::{HabitList, HabitListError, HabitName};

    #[test]
    fn test_habit_name_is_title_cased() {
        assert_eq!(HabitName::new("  read BOOKS ").unwrap().as_str(), "Read Books");
        assert_eq!(HabitName::new("exercise").unwrap().as_str(), "Exercise");
        assert_eq!(HabitName::new("10k steps").unwrap().as_str(), "10k Steps");
    }

    #[test]
    fn test_habit_name_limits() {
        assert_eq!(HabitName::new("  "), Err(ValidationError::EmptyHabitName));
        assert_eq!(
            HabitName::new(&"x".repeat(51)),
            Err(ValidationError::NameTooLong { length: 51 })
        );
    }

    #[test]
    fn test_habit_list_rejects_duplicates() {
        assert_eq!(
            HabitList::new(["Read", "walk", "READ"]),
            Err(HabitListError::Duplicate {
                name: "Read".into()
            })
        );
    }

    #[test]
    fn test_habit_list_find() {
        let habits = HabitList::new(["Read", "Drink water"]).unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits.find("drink WATER").map(|v| v.as_str()), Some("Drink Water"));
        assert!(habits.find("Run").is_none());
    }

    #[test]
    fn test_habit_name_deserialization_keeps_text() {
        let names: Vec<HabitName> = serde_json::from_str(r#"["meditate"]"#).unwrap();
        assert_eq!(names[0].as_str(), "meditate");
        assert!(serde_json::from_str::<Vec<HabitName>>(r#"[""]"#).is_err());
    }

    #[test]
    fn test_stored_list_is_not_normalized() {
        let habits = HabitList::from_stored(vec!["read books".into(), "walk".into()]).unwrap();
        assert_eq!(
            habits.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
            ["read books", "walk"]
        );
        assert_eq!(habits.find("Read Books").map(|v| v.as_str()), Some("read books"));
        assert!(matches!(
            HabitList::from_stored(vec!["walk".into(), "Walk".into()]),
            Err(HabitListError::Duplicate { .. })
        ));
        assert!(matches!(
            HabitList::from_stored(vec![" ".into()]),
            Err(HabitListError::InvalidName { .. })
        ));
    }
}
