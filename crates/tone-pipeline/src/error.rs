use thiserror::Error;
use tone_types::MessageError;

/// Why a single record was skipped.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record has no payload")]
    MissingPayload,

    #[error(transparent)]
    Decode(#[from] MessageError),

    #[error("store write failed: {0}")]
    Store(#[from] anyhow::Error),
}

