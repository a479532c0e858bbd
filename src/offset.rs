//! Byte/character offset handling for alignment spans.
//!
//! The public contract of this crate addresses documents by **character**
//! (code-point) offset, because that is what the surrounding visualization
//! layer counts. Rust string APIs and the `regex` crate work in **byte**
//! offsets. Mixing the two silently corrupts spans the moment a document
//! contains a multi-byte character:
//!
//! ```text
//! Text: "café chunk"
//!
//! BYTE INDEX (what str::find / regex return)
//!   c   a   f   [  é  ]   ' '  c   h   u   n   k
//!   0   1   2   3 - 4     5    6   7   8   9  10
//!               └2 bytes┘
//!
//! CHAR INDEX (what the renderer counts)
//!   c   a   f   é   ' '  c   h   u   n   k
//!   0   1   2   3   4    5   6   7   8   9
//! ```
//!
//! The fix is the same as everywhere else in text tooling: carry **both**
//! coordinates in every span and convert once, at the boundary, through a
//! precomputed table. [`Span`] stores the dual offsets; [`OffsetTable`]
//! provides O(1) conversion after an O(n) build, with an identity fast path
//! for ASCII documents.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A half-open text span carrying both byte and character offsets.
///
/// `char_*` is the canonical addressing used in the public API and in
/// boundary events; `byte_*` exists so the text can be sliced without
/// re-walking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset (start, inclusive).
    pub byte_start: usize,
    /// Byte offset (end, exclusive).
    pub byte_end: usize,
    /// Character offset (start, inclusive).
    pub char_start: usize,
    /// Character offset (end, exclusive).
    pub char_end: usize,
}

impl Span {
    /// Create a span for ASCII text where byte == char offsets.
    #[must_use]
    pub const fn ascii(start: usize, end: usize) -> Self {
        Self {
            byte_start: start,
            byte_end: end,
            char_start: start,
            char_end: end,
        }
    }

    /// Character range.
    #[must_use]
    pub const fn char_range(&self) -> Range<usize> {
        self.char_start..self.char_end
    }

    /// Byte range.
    #[must_use]
    pub const fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }

    /// Character length.
    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.char_end.saturating_sub(self.char_start)
    }

    /// Check if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.char_start >= self.char_end
    }

    /// Extract the spanned text.
    #[must_use]
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.byte_start..self.byte_end).unwrap_or("")
    }
}

/// Precomputed byte↔char conversion for one document.
///
/// Built once per [`SourceDocument`](crate::SourceDocument) and shared by
/// every run aligned against it. For ASCII text the tables are skipped and
/// conversion is the identity.
#[derive(Debug, Clone)]
pub struct OffsetTable {
    byte_to_char: Vec<usize>,
    char_to_byte: Vec<usize>,
    char_len: usize,
    byte_len: usize,
    is_ascii: bool,
}

impl OffsetTable {
    /// Build the table for the given text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let byte_len = text.len();
        if text.is_ascii() {
            return Self {
                byte_to_char: Vec::new(),
                char_to_byte: Vec::new(),
                char_len: byte_len,
                byte_len,
                is_ascii: true,
            };
        }

        // byte_to_char maps every byte of a multi-byte char to that char's
        // index; char_to_byte maps each char index to its first byte.
        let mut byte_to_char = vec![0usize; byte_len + 1];
        let mut char_to_byte = Vec::new();
        let mut char_len = 0;
        for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
            char_to_byte.push(byte_idx);
            for i in 0..ch.len_utf8() {
                byte_to_char[byte_idx + i] = char_idx;
            }
            char_len = char_idx + 1;
        }
        byte_to_char[byte_len] = char_len;
        char_to_byte.push(byte_len);

        Self {
            byte_to_char,
            char_to_byte,
            char_len,
            byte_len,
            is_ascii: false,
        }
    }

    /// Document length in characters.
    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.char_len
    }

    /// Document length in bytes.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Convert a byte offset to a character offset (clamped to the end).
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        if self.is_ascii {
            byte_idx.min(self.byte_len)
        } else {
            self.byte_to_char
                .get(byte_idx)
                .copied()
                .unwrap_or(self.char_len)
        }
    }

    /// Convert a character offset to a byte offset (clamped to the end).
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        if self.is_ascii {
            char_idx.min(self.byte_len)
        } else {
            self.char_to_byte
                .get(char_idx)
                .copied()
                .unwrap_or(self.byte_len)
        }
    }

    /// Build a [`Span`] from byte offsets.
    #[must_use]
    pub fn span_from_bytes(&self, byte_start: usize, byte_end: usize) -> Span {
        Span {
            byte_start,
            byte_end,
            char_start: self.byte_to_char(byte_start),
            char_end: self.byte_to_char(byte_end),
        }
    }

    /// Build a [`Span`] from character offsets.
    #[must_use]
    pub fn span_from_chars(&self, char_start: usize, char_end: usize) -> Span {
        Span {
            byte_start: self.char_to_byte(char_start),
            byte_end: self.char_to_byte(char_end),
            char_start,
            char_end,
        }
    }

    /// Check if the underlying text is ASCII.
    #[must_use]
    pub const fn is_ascii(&self) -> bool {
        self.is_ascii
    }
}
