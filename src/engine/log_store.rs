use super::record::{LogCollection, LogRecord};

/// Merges newly written records into the history.
///
/// Every incoming record first removes the live record for the same habit and day and is then
/// appended, so the freshest write for a day is always the last one positionally. Records that
/// aren't touched keep their relative order. Nothing is validated here.
pub fn merge(
    existing: LogCollection,
    incoming: impl IntoIterator<Item = LogRecord>,
) -> LogCollection {
    incoming
        .into_iter()
        .fold(existing, |mut collection, record| {
            collection.replace_day(record);
            collection
        })
}

#[cfg(test)]
mod tests {
    use crate::engine::record::{LogCollection, LogRecord};

    use super::merge;

    fn history() -> LogCollection {
        LogCollection::from(vec![
            LogRecord::new("Read", "2025-06-01", true),
            LogRecord::new("Walk", "2025-06-01", false),
            LogRecord::new("Read", "2025-06-02", true),
        ])
    }

    #[test]
    fn test_merge_empty_incoming() {
        assert_eq!(merge(history(), []), history());
    }

    #[test]
    fn test_merge_replaced_slot_moves_to_end() {
        let merged = merge(history(), [LogRecord::new("Walk", "2025-06-01", true)]);
        assert_eq!(
            merged.records(),
            [
                LogRecord::new("Read", "2025-06-01", true),
                LogRecord::new("Read", "2025-06-02", true),
                LogRecord::new("Walk", "2025-06-01", true),
            ]
        );
    }

    #[test]
    fn test_merge_same_day_resubmission_is_idempotent() {
        let record = LogRecord::new("Read", "2025-06-03", true);
        let once = merge(history(), [record.clone()]);
        let twice = merge(once.clone(), [record.clone()]);
        assert_eq!(once, twice);
        assert_eq!(twice.iter().filter(|v| **v == record).count(), 1);
    }

    #[test]
    fn test_merge_duplicates_within_incoming() {
        let merged = merge(
            LogCollection::new(),
            [
                LogRecord::new("Read", "2025-06-03", true),
                LogRecord::new("Read", "2025-06-03", false),
            ],
        );
        assert_eq!(merged.records(), [LogRecord::new("Read", "2025-06-03", false)]);
    }

    #[test]
    fn test_merge_stores_invalid_records_as_is() {
        let merged = merge(LogCollection::new(), [LogRecord::new("", "someday", true)]);
        assert_eq!(merged.len(), 1);
    }
}
