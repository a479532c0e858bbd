//! Error types for seam.

use thiserror::Error;

/// Result type for seam operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for seam operations.
///
/// Note that most "failures" in alignment are not errors: an unmatched chunk
/// is recorded in [`RunAlignment`](crate::RunAlignment) counts, and a fuzzy
/// pattern that fails to compile degrades to exact matching internally. The
/// variants here are reserved for conditions that would otherwise corrupt
/// output or make it meaningless.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A matched span references an offset past the end of the document.
    ///
    /// This indicates a locator bug, never bad input; it is rejected rather
    /// than silently emitting annotation that no longer reconstructs the
    /// source text.
    #[error("Span out of bounds for chunk {chunk_id:?}: offset {offset} > document length {len}")]
    SpanOutOfBounds {
        /// Id of the offending chunk.
        chunk_id: String,
        /// The out-of-range character offset.
        offset: usize,
        /// Document length in characters.
        len: usize,
    },

    /// A palette with zero colors was supplied.
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a span-out-of-bounds error.
    pub fn span_out_of_bounds(chunk_id: impl Into<String>, offset: usize, len: usize) -> Self {
        Error::SpanOutOfBounds {
            chunk_id: chunk_id.into(),
            offset,
            len,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
