use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Create the `message_tone` table. Safe to run against an existing store.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS message_tone (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            ts              TEXT NOT NULL,
            author          TEXT NOT NULL,
            tone            TEXT NOT NULL CHECK (tone IN ('question', 'excited', 'plain')),
            exclamations    INTEGER NOT NULL DEFAULT 0,
            qmarks          INTEGER NOT NULL DEFAULT 0,
            message_length  INTEGER NOT NULL,
            category        TEXT,
            kafka_topic     TEXT,
            kafka_partition INTEGER,
            kafka_offset    INTEGER
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
