use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use tone_db::Database;
use tone_db::models::NewToneRow;
use tone_types::IncomingMessage;

use crate::error::RecordError;
use crate::source::{RecordSource, SourceRecord};

/// Counts of what the loop did before it stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub stored: u64,
    pub skipped: u64,
}

/// Decode and classify a record into the row it should produce.
pub fn build_row(record: &SourceRecord, now: DateTime<Utc>) -> Result<NewToneRow, RecordError> {
    let payload = record.payload.as_deref().ok_or(RecordError::MissingPayload)?;
    let msg = IncomingMessage::decode(payload, now)?;
    let classification = msg.classify();

    Ok(NewToneRow {
        ts: msg.timestamp,
        author: msg.author,
        tone: classification.tone,
        exclamations: classification.exclamations as i64,
        qmarks: classification.qmarks as i64,
        message_length: msg.message_length,
        category: msg.category,
        kafka_topic: record.topic.clone(),
        kafka_partition: record.partition,
        kafka_offset: record.offset,
    })
}

/// Process one record end to end. Returns the id of the stored row.
pub fn handle_record(
    db: &Database,
    record: &SourceRecord,
    now: DateTime<Utc>,
) -> Result<i64, RecordError> {
    let row = build_row(record, now)?;
    let id = db.insert_tone(&row)?;

    info!(
        "[ok] {} | {} | {} ex={} qm={} len={}",
        row.ts, row.author, row.tone, row.exclamations, row.qmarks, row.message_length
    );
    Ok(id)
}

/// Consume records until the source is exhausted or `shutdown` fires.
///
/// Cancellation is only observed while waiting for the next record, so a
/// record that has already been pulled is always finished.
pub async fn run<S: RecordSource>(
    source: &mut S,
    db: &Database,
    shutdown: &CancellationToken,
) -> RunSummary {
    let mut summary = RunSummary::default();

    loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = source.next_record() => next,
        };

        let Some(next) = next else {
            debug!("Record source exhausted");
            break;
        };

        match next {
            Ok(record) => match handle_record(db, &record, Utc::now()) {
                Ok(_) => summary.stored += 1,
                Err(e) => {
                    warn!("failed at offset {}: {}", record.offset, e);
                    summary.skipped += 1;
                }
            },
            Err(e) => {
                warn!("failed at offset ?: {}", e);
                summary.skipped += 1;
            }
        }
    }

    summary
}

/// Release the subscription and the store. Close errors are ignored.
pub fn release<S: RecordSource>(source: S, db: Database) {
    info!("stopping consumer…");
    let _ = source.close();
    let _ = db.close();
}
