use crate::Database;
use crate::models::{NewToneRow, ToneRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    /// Insert one classified message and return its assigned id.
    pub fn insert_tone(&self, row: &NewToneRow) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message_tone
                    (ts, author, tone, exclamations, qmarks, message_length, category,
                     kafka_topic, kafka_partition, kafka_offset)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    row.ts,
                    row.author,
                    row.tone.as_str(),
                    row.exclamations,
                    row.qmarks,
                    row.message_length,
                    row.category,
                    row.kafka_topic,
                    row.kafka_partition,
                    row.kafka_offset,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn count_tones(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let n = conn.query_row("SELECT COUNT(*) FROM message_tone", [], |r| r.get(0))?;
            Ok(n)
        })
    }

    /// Most recently inserted rows first.
    pub fn recent_tones(&self, limit: u32) -> Result<Vec<ToneRow>> {
        self.with_conn(|conn| query_recent(conn, limit))
    }
}

fn query_recent(conn: &Connection, limit: u32) -> Result<Vec<ToneRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, ts, author, tone, exclamations, qmarks, message_length, category,
                kafka_topic, kafka_partition, kafka_offset
         FROM message_tone
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(ToneRow {
                id: row.get(0)?,
                ts: row.get(1)?,
                author: row.get(2)?,
                tone: row.get(3)?,
                exclamations: row.get(4)?,
                qmarks: row.get(5)?,
                message_length: row.get(6)?,
                category: row.get(7)?,
                kafka_topic: row.get(8)?,
                kafka_partition: row.get(9)?,
                kafka_offset: row.get(10)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
