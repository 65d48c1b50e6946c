pub mod message;
pub mod tone;

pub use message::{IncomingMessage, MessageError};
pub use tone::{Classification, EXCITED_SENTIMENT, Tone, classify};
