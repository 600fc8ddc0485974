//! Durable SQLite-backed message store.
//!
//! Ordering is enforced by the store itself: `ORDER BY created_at, seq`
//! where `seq` is the insertion sequence, so equal timestamps never
//! reorder between reads.

use std::sync::Arc;

use uuid::Uuid;

use botsense_core::types::{HistoryEntry, Message};

use crate::db::Database;
use crate::store::{MessageStore, StoreError, StoreStats};

/// Message store backed by a WAL-mode SQLite database.
pub struct SqliteStore {
    db: Arc<Database>,
}

impl SqliteStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl MessageStore for SqliteStore {
    fn append(&self, message: &Message) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, dialog_id, participant_index, text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    message.id.to_string(),
                    message.dialog_id.to_string(),
                    message.participant_index,
                    message.text,
                    message.created_at,
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(f, _)
                    if f.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    StoreError::Duplicate(message.id.to_string())
                }
                other => StoreError::Unavailable(format!("Failed to append message: {}", other)),
            })?;
            Ok(())
        })
    }

    fn history(&self, dialog_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT text, participant_index FROM messages
                     WHERE dialog_id = ?1
                     ORDER BY created_at, seq",
                )
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params![dialog_id.to_string()], |row| {
                    Ok(HistoryEntry {
                        text: row.get(0)?,
                        participant_index: row.get(1)?,
                    })
                })
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;

            let mut entries = Vec::new();
            for row in rows {
                entries.push(row.map_err(|e| StoreError::Data(e.to_string()))?);
            }
            Ok(entries)
        })
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        self.db.with_conn(|conn| {
            let (total, dialogs): (i64, i64) = conn
                .query_row(
                    "SELECT COUNT(*), COUNT(DISTINCT dialog_id) FROM messages",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            Ok(StoreStats {
                total_messages: total as u64,
                unique_dialogs: dialogs as u64,
            })
        })
    }

    fn is_reachable(&self) -> bool {
        self.db.ping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::new(Arc::new(Database::in_memory().unwrap()))
    }

    fn msg(dialog: Uuid, idx: i32, text: &str, at: i64) -> Message {
        let mut m = Message::new(dialog, idx, text);
        m.created_at = at;
        m
    }

    #[test]
    fn test_append_and_history() {
        let store = store();
        let dialog = Uuid::new_v4();
        store.append(&msg(dialog, 0, "Hello, are you a bot?", 10)).unwrap();
        store.append(&msg(dialog, 1, "No, I'm human!", 20)).unwrap();

        let history = store.history(dialog).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "Hello, are you a bot?");
        assert_eq!(history[0].participant_index, 0);
        assert_eq!(history[1].text, "No, I'm human!");
        assert_eq!(history[1].participant_index, 1);
    }

    #[test]
    fn test_unknown_dialog_is_empty_not_error() {
        let store = store();
        assert!(store.history(Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let store = store();
        let dialog = Uuid::new_v4();
        for i in 0..5 {
            store.append(&msg(dialog, 0, &format!("m{}", i), 100)).unwrap();
        }
        let texts: Vec<String> = store
            .history(dialog)
            .unwrap()
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(texts, vec!["m0", "m1", "m2", "m3", "m4"]);
    }

    #[test]
    fn test_out_of_order_timestamps_sorted() {
        let store = store();
        let dialog = Uuid::new_v4();
        store.append(&msg(dialog, 0, "second", 200)).unwrap();
        store.append(&msg(dialog, 0, "first", 100)).unwrap();
        let history = store.history(dialog).unwrap();
        assert_eq!(history[0].text, "first");
        assert_eq!(history[1].text, "second");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = store();
        let dialog = Uuid::new_v4();
        let message = msg(dialog, 0, "once", 1);
        store.append(&message).unwrap();
        let result = store.append(&message);
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
        assert_eq!(store.history(dialog).unwrap().len(), 1);
    }

    #[test]
    fn test_stats() {
        let store = store();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.append(&msg(a, 0, "x", 1)).unwrap();
        store.append(&msg(a, 1, "y", 2)).unwrap();
        store.append(&msg(b, 0, "z", 3)).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.unique_dialogs, 2);
    }

    #[test]
    fn test_reachable() {
        assert!(store().is_reachable());
    }

    #[test]
    fn test_survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("botsense.db");
        let dialog = Uuid::new_v4();

        {
            let store = SqliteStore::new(Arc::new(Database::new(&path).unwrap()));
            store.append(&msg(dialog, 0, "persisted", 1)).unwrap();
        }

        let store = SqliteStore::new(Arc::new(Database::new(&path).unwrap()));
        let history = store.history(dialog).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "persisted");
    }

    #[test]
    fn test_empty_text_round_trips() {
        let store = store();
        let dialog = Uuid::new_v4();
        store.append(&msg(dialog, 0, "", 1)).unwrap();
        let history = store.history(dialog).unwrap();
        assert_eq!(history[0].text, "");
    }
}
