use std::fmt::Display;
use std::future::Future;

/// One record pulled from the message queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// `None` for records without a value (tombstones).
    pub payload: Option<Vec<u8>>,
}

/// A subscription that yields records in delivery order.
pub trait RecordSource {
    type Error: Display;

    /// Wait for the next record. `None` means the source is exhausted.
    fn next_record(&mut self) -> impl Future<Output = Option<Result<SourceRecord, Self::Error>>>;

    /// Stop the subscription and release the handle.
    fn close(self) -> Result<(), Self::Error>;
}
