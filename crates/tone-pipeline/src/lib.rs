//! Tone pipeline: consume chat records, classify them, and persist each one.
//!
//! Records are handled strictly one at a time. A failure on one record is
//! logged and skipped; it never stops the loop.

pub mod error;
pub mod pipeline;
pub mod source;

pub use error::RecordError;
pub use pipeline::{RunSummary, build_row, handle_record, release, run};
pub use source::{RecordSource, SourceRecord};
