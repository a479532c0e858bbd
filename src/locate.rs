//! ChunkLocator: find one chunk's span inside the source text.
//!
//! The chunking process does not retain offsets, so each chunk's position
//! must be re-derived from its content. Two strategies:
//!
//! - **Exact**: first occurrence of the content at or after the floor, via
//!   `str::find` on the byte-floored suffix.
//! - **Fuzzy**: for chunkers that normalize whitespace (blank-line removal,
//!   re-wrapping). Content is tokenized on whitespace runs, each token
//!   escaped for literal matching, tokens joined with `\s+`, and the pattern
//!   searched in the suffix. Token order and identity are preserved; only
//!   the whitespace between them may differ.
//!
//! The fuzzy pattern is executed by the `regex` crate, whose finite-automaton
//! engine guarantees linear time in the haystack length, so adversarial
//! whitespace-heavy content cannot trigger backtracking blowup. If the
//! pattern fails to compile (e.g. the program size limit on pathological
//! content), the locator logs and degrades to exact matching for that chunk
//! instead of propagating an error.

use crate::chunk::{MatchMode, SourceDocument};
use crate::offset::Span;
use regex::Regex;

/// Find the best-matching span of `content` in `doc`, starting no earlier
/// than character offset `min_start`.
///
/// Returns `None` when the content does not occur at or after the floor.
/// Empty or whitespace-only content never stalls progression: it yields a
/// zero-length span at the floor.
#[must_use]
pub fn locate(
    content: &str,
    doc: &SourceDocument,
    min_start: usize,
    mode: MatchMode,
) -> Option<Span> {
    let floor = min_start.min(doc.char_len());
    if content.trim().is_empty() {
        return Some(doc.table().span_from_chars(floor, floor));
    }

    match mode {
        MatchMode::Exact => locate_exact(content, doc, floor),
        MatchMode::Fuzzy => locate_fuzzy(content, doc, floor),
    }
}

fn locate_exact(content: &str, doc: &SourceDocument, floor: usize) -> Option<Span> {
    let byte_floor = doc.table().char_to_byte(floor);
    let suffix = &doc.text()[byte_floor..];
    let found = suffix.find(content)?;
    let byte_start = byte_floor + found;
    Some(
        doc.table()
            .span_from_bytes(byte_start, byte_start + content.len()),
    )
}

fn locate_fuzzy(content: &str, doc: &SourceDocument, floor: usize) -> Option<Span> {
    let pattern = fuzzy_pattern(content);
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            log::warn!("Fuzzy pattern failed to compile, falling back to exact match: {e}");
            return locate_exact(content, doc, floor);
        }
    };

    let byte_floor = doc.table().char_to_byte(floor);
    let suffix = &doc.text()[byte_floor..];
    let m = regex.find(suffix)?;
    Some(
        doc.table()
            .span_from_bytes(byte_floor + m.start(), byte_floor + m.end()),
    )
}

/// Build the whitespace-tolerant pattern for a chunk's content: each
/// whitespace-delimited token escaped for literal matching, joined by `\s+`.
fn fuzzy_pattern(content: &str) -> String {
    content
        .split_whitespace()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join(r"\s+")
}
