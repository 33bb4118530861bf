use std::{future::Future, path::PathBuf};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use serde_json::{Map, Value};
use tokio::fs::File;
use tracing::{debug, info};

use crate::{
    engine::{habit::HabitList, record::LogCollection, streak::StreakMap},
    fs::operations::{read_json_or_default, write_json_atomic, write_json_if_missing},
};

use super::entities::{logs_from_value, streaks_from_value};

pub const HABITS_FILE: &str = "habits.json";
pub const LOGS_FILE: &str = "logs.json";
pub const STREAKS_FILE: &str = "streaks.json";
const LOCK_FILE: &str = ".lock";

/// Interface for abstracting persistence of habits, logs and streaks.
pub trait HabitStore {
    /// Creates missing data files. Existing data is left untouched.
    fn initialize(&self) -> impl Future<Output = Result<()>>;

    fn load_habits(&self) -> impl Future<Output = Result<HabitList>>;

    /// Replaces the whole habit list.
    fn save_habits(&self, habits: &HabitList) -> impl Future<Output = Result<()>>;

    fn load_logs(&self) -> impl Future<Output = Result<LogCollection>>;

    fn load_streaks(&self) -> impl Future<Output = Result<StreakMap>>;

    /// Persists logs and streaks produced by the same reconciliation.
    fn save_snapshot(
        &self,
        logs: &LogCollection,
        streaks: &StreakMap,
    ) -> impl Future<Output = Result<()>>;

    /// Removes logs and streaks, habits stay.
    fn clear_tracking_data(&self) -> impl Future<Output = Result<()>>;

    /// Removes habits, logs and streaks.
    fn reset(&self) -> impl Future<Output = Result<()>>;
}

/// The main realization of [HabitStore]. Keeps every collection in its own json file inside the
/// application directory. Writes go through [write_json_atomic] while holding an exclusive lock
/// on a lock file, reads hold a shared one.
pub struct JsonHabitStore {
    data_dir: PathBuf,
}

impl JsonHabitStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self { data_dir })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    async fn lock(&self, exclusive: bool) -> Result<File> {
        let path = self.path(LOCK_FILE);
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open lock file {path:?}"))?;
        if exclusive {
            file.lock_exclusive()?;
        } else {
            file.lock_shared()?;
        }
        Ok(file)
    }

    async fn read_logs_inner(&self) -> Result<LogCollection> {
        let raw: Vec<Value> = read_json_or_default(&self.path(LOGS_FILE)).await?;
        Ok(logs_from_value(raw))
    }

    async fn write_tracking_data(&self, logs: &LogCollection, streaks: &StreakMap) -> Result<()> {
        let lock = self.lock(true).await?;
        // Logs go first, streaks can always be recomputed from them.
        let result = async {
            write_json_atomic(&self.path(LOGS_FILE), logs).await?;
            write_json_atomic(&self.path(STREAKS_FILE), streaks).await
        }
        .await;
        lock.unlock_async().await?;
        result
    }
}

impl HabitStore for JsonHabitStore {
    async fn initialize(&self) -> Result<()> {
        let lock = self.lock(true).await?;
        let result = async {
            write_json_if_missing(&self.path(HABITS_FILE), &HabitList::default()).await?;
            write_json_if_missing(&self.path(LOGS_FILE), &LogCollection::new()).await?;
            write_json_if_missing(&self.path(STREAKS_FILE), &StreakMap::new()).await
        }
        .await;
        lock.unlock_async().await?;
        result
    }

    async fn load_habits(&self) -> Result<HabitList> {
        let lock = self.lock(false).await?;
        let raw = read_json_or_default::<Vec<String>>(&self.path(HABITS_FILE)).await;
        lock.unlock_async().await?;
        let habits = HabitList::from_stored(raw?).context("Stored habit list is invalid")?;
        debug!("Loaded {} habits", habits.len());
        Ok(habits)
    }

    async fn save_habits(&self, habits: &HabitList) -> Result<()> {
        let lock = self.lock(true).await?;
        let result = write_json_atomic(&self.path(HABITS_FILE), habits).await;
        lock.unlock_async().await?;
        result?;
        info!("Saved {} habits", habits.len());
        Ok(())
    }

    async fn load_logs(&self) -> Result<LogCollection> {
        let lock = self.lock(false).await?;
        let logs = self.read_logs_inner().await;
        lock.unlock_async().await?;
        let logs = logs?;
        debug!("Loaded {} log records", logs.len());
        Ok(logs)
    }

    async fn load_streaks(&self) -> Result<StreakMap> {
        let lock = self.lock(false).await?;
        let raw = read_json_or_default::<Map<String, Value>>(&self.path(STREAKS_FILE)).await;
        lock.unlock_async().await?;
        Ok(streaks_from_value(raw?))
    }

    async fn save_snapshot(&self, logs: &LogCollection, streaks: &StreakMap) -> Result<()> {
        self.write_tracking_data(logs, streaks).await?;
        info!(
            "Saved {} log records and {} streaks",
            logs.len(),
            streaks.len()
        );
        Ok(())
    }

    async fn clear_tracking_data(&self) -> Result<()> {
        self.write_tracking_data(&LogCollection::new(), &StreakMap::new())
            .await?;
        info!("Cleared logs and streaks");
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        self.save_habits(&HabitList::default()).await?;
        self.clear_tracking_data().await?;
        info!("Reset all data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::engine::{
        habit::HabitList,
        record::{LogCollection, LogRecord},
        streak::{StreakMap, compute},
    };

    use super::{HABITS_FILE, HabitStore, JsonHabitStore, LOGS_FILE, STREAKS_FILE};

    fn sample_logs() -> LogCollection {
        LogCollection::from(vec![
            LogRecord::new("Read", "2025-06-01", true),
            LogRecord::new("Walk", "2025-06-01", false),
        ])
    }

    fn sample_streaks() -> StreakMap {
        [("Read".to_string(), 1), ("Walk".to_string(), 0)]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_initialize_creates_files() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonHabitStore::new(dir.path().to_owned())?;
        store.initialize().await?;

        for file in [HABITS_FILE, LOGS_FILE, STREAKS_FILE] {
            assert!(dir.path().join(file).exists(), "{file} should exist");
        }
        assert!(store.load_habits().await?.is_empty());
        assert!(store.load_logs().await?.is_empty());
        assert!(store.load_streaks().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_data() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonHabitStore::new(dir.path().to_owned())?;
        store.save_habits(&HabitList::new(["Read", "Walk"])?).await?;
        store.initialize().await?;
        assert_eq!(store.load_habits().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonHabitStore::new(dir.path().to_owned())?;
        store.save_snapshot(&sample_logs(), &sample_streaks()).await?;

        assert_eq!(store.load_logs().await?, sample_logs());
        assert_eq!(store.load_streaks().await?, sample_streaks());

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(LOGS_FILE))?)?;
        assert_eq!(
            on_disk,
            serde_json::json!([["Read", "2025-06-01", true], ["Walk", "2025-06-01", false]])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_load_tolerates_hand_edited_logs() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(
            dir.path().join(LOGS_FILE),
            r#"[["Read", "2025-06-01", 1], ["broken"], ["Walk", "2025-06-01", false]]"#,
        )?;
        let store = JsonHabitStore::new(dir.path().to_owned())?;
        let logs = store.load_logs().await?;
        assert_eq!(
            logs.records(),
            [
                LogRecord::new("Read", "2025-06-01", true),
                LogRecord::new("Walk", "2025-06-01", false),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_names_keep_their_logs() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join(HABITS_FILE), r#"["read books", "walk"]"#)?;
        std::fs::write(
            dir.path().join(LOGS_FILE),
            r#"[["read books", "2025-06-01", true], ["read books", "2025-06-02", true]]"#,
        )?;
        std::fs::write(dir.path().join(STREAKS_FILE), r#"{"read books": 2}"#)?;
        let store = JsonHabitStore::new(dir.path().to_owned())?;

        let habits = store.load_habits().await?;
        assert_eq!(
            habits.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
            ["read books", "walk"]
        );
        let logs = store.load_logs().await?;
        let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let streaks = compute(&habits, &logs, today);
        assert_eq!(streaks.get("read books"), 2);
        assert_eq!(store.load_streaks().await?.get("read books"), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_habit_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join(HABITS_FILE), r#"["Read", "read"]"#)?;
        let store = JsonHabitStore::new(dir.path().to_owned())?;
        assert!(store.load_habits().await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_keeps_habits_reset_removes_all() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonHabitStore::new(dir.path().to_owned())?;
        store.save_habits(&HabitList::new(["Read", "Walk"])?).await?;
        store.save_snapshot(&sample_logs(), &sample_streaks()).await?;

        store.clear_tracking_data().await?;
        assert_eq!(store.load_habits().await?.len(), 2);
        assert!(store.load_logs().await?.is_empty());
        assert!(store.load_streaks().await?.is_empty());

        store.save_snapshot(&sample_logs(), &sample_streaks()).await?;
        store.reset().await?;
        assert!(store.load_habits().await?.is_empty());
        assert!(store.load_logs().await?.is_empty());
        Ok(())
    }
}
