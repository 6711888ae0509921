use thiserror::Error;

/// Failure signals raised by scanner operations.
///
/// Every variant is ordinary, recoverable control flow: a failed match means
/// "try another alternative", never a corrupted engine. Operations that fail
/// restore the cursor to its entry position first, except the multi-step
/// movements ([`Scanner::advance_by`], [`Scanner::retreat_by`],
/// [`Scanner::read_count`]), which keep partial progress.
///
/// [`Scanner::advance_by`]: crate::Scanner::advance_by
/// [`Scanner::retreat_by`]: crate::Scanner::retreat_by
/// [`Scanner::read_count`]: crate::Scanner::read_count
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The operation needed more input than the range has remaining.
    #[error("unexpected end of input")]
    EndOfInput,

    /// A derived combinator matched a character other than the required one.
    #[error("unexpected character '{0}'")]
    Unexpected(char),

    /// A zero-length match or search target was supplied.
    #[error("empty match target")]
    EmptyTarget,

    /// A malformed UTF-8 sequence starts at the given buffer offset.
    #[error("invalid UTF-8 sequence at byte offset {0}")]
    InvalidUtf8(usize),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, ScanError>;
