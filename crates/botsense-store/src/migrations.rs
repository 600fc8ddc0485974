//! Database schema migrations.
//!
//! Applies the initial schema: the messages table and the
//! schema_migrations tracking table.

use rusqlite::Connection;
use tracing::info;

use crate::store::StoreError;

/// Run all pending database migrations.
///
/// Currently implements the initial schema (version 1). Future migrations
/// can be added by checking the current version and applying incremental
/// changes.
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| StoreError::Unavailable(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| StoreError::Unavailable(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
///
/// `seq` is an autoincrement column used as a stable tiebreaker when two
/// messages share a `created_at` value, so history ordering stays
/// deterministic across reads.
fn apply_v1(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS messages (
            seq                 INTEGER PRIMARY KEY AUTOINCREMENT,
            id                  TEXT NOT NULL UNIQUE,
            dialog_id           TEXT NOT NULL,
            participant_index   INTEGER NOT NULL,
            text                TEXT NOT NULL DEFAULT '',
            created_at          INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_dialog
            ON messages (dialog_id, created_at, seq);

        INSERT INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| StoreError::Unavailable(format!("Failed to apply v1 schema: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i64 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_messages_table_exists() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_seq_autoincrements() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO messages (id, dialog_id, participant_index, text, created_at)
             VALUES ('a', 'd', 0, 'one', 100)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO messages (id, dialog_id, participant_index, text, created_at)
             VALUES ('b', 'd', 0, 'two', 100)",
            [],
        )
        .unwrap();

        let seqs: Vec<i64> = conn
            .prepare("SELECT seq FROM messages ORDER BY seq")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(seqs.len(), 2);
        assert!(seqs[0] < seqs[1]);
    }

    #[test]
    fn test_duplicate_message_id_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO messages (id, dialog_id, participant_index, text, created_at)
             VALUES ('a', 'd', 0, 'one', 100)",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO messages (id, dialog_id, participant_index, text, created_at)
             VALUES ('a', 'd', 0, 'two', 200)",
            [],
        );
        assert!(dup.is_err());
    }
}
