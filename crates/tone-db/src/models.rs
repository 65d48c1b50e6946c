//! Row types for the `message_tone` table.

use tone_types::Tone;

/// A classified message ready to be inserted. The id is assigned by SQLite.
#[derive(Debug, Clone, PartialEq)]
pub struct NewToneRow {
    pub ts: String,
    pub author: String,
    pub tone: Tone,
    pub exclamations: i64,
    pub qmarks: i64,
    pub message_length: i64,
    pub category: Option<String>,
    pub kafka_topic: String,
    pub kafka_partition: i32,
    pub kafka_offset: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToneRow {
    pub id: i64,
    pub ts: String,
    pub author: String,
    pub tone: String,
    pub exclamations: i64,
    pub qmarks: i64,
    pub message_length: i64,
    pub category: Option<String>,
    pub kafka_topic: Option<String>,
    pub kafka_partition: Option<i32>,
    pub kafka_offset: Option<i64>,
}
