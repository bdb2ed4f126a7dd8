//! Error types for building and reading buffers.

use crate::builder::Nesting;
use crate::offsets::UOffset;

/// Structural misuse of a [`Builder`](crate::Builder).
///
/// These describe programmer errors: the call that returns one has written
/// nothing and the builder should be [`reset`](crate::Builder::reset) rather
/// than retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("no table is open")]
    NotInTable,
    #[error("no vector is open")]
    NotInVector,
    #[error("cannot start a nested write while a {active} is open")]
    Nested { active: Nesting },
    #[error("struct must be written inline: expected offset {expected}, got {actual}")]
    StructNotInline { expected: UOffset, actual: UOffset },
    #[error("slot {slot} out of range for a table with {fields} fields")]
    SlotOutOfRange { slot: usize, fields: usize },
    #[error("buffer is not finished")]
    NotFinished,
    #[error("buffer is already finished; reset the builder first")]
    AlreadyFinished,
}

/// Failure to locate the root of a buffer, or to decode a string in it.
///
/// Root resolution is bounds-checked. Reads below the root trust the buffer
/// layout but not the contents of string fields.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    BufferTooShort { needed: usize, actual: usize },
    #[error("offset {offset} out of bounds for buffer of {len} bytes")]
    OffsetOutOfBounds { offset: usize, len: usize },
    #[error("string at {loc} is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { loc: usize, valid_up_to: usize },
}
