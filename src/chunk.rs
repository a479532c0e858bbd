//! Core data model: documents, chunks, runs, and match modes.
//!
//! A **run** is one execution of an external chunking algorithm with a fixed
//! configuration; it produces an ordered list of chunks whose offsets the
//! chunker did not retain. This crate's job is to recover them. Nothing here
//! performs chunking; the types model the input contract of the alignment
//! engine.

use crate::offset::OffsetTable;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An immutable source document with precomputed offset tables.
///
/// Construct once, then align any number of runs against it. The engine
/// never mutates the text; callers own caching of alignment results.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    text: String,
    table: OffsetTable,
}

impl SourceDocument {
    /// Create a document from its full parsed text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let table = OffsetTable::new(&text);
        Self { text, table }
    }

    /// The full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document length in characters (the addressable length).
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.table.char_len()
    }

    /// The byte↔char offset table for this document.
    #[must_use]
    pub fn table(&self) -> &OffsetTable {
        &self.table
    }

    /// Slice the text by character offsets.
    #[must_use]
    pub fn slice_chars(&self, char_start: usize, char_end: usize) -> &str {
        let byte_start = self.table.char_to_byte(char_start);
        let byte_end = self.table.char_to_byte(char_end);
        self.text.get(byte_start..byte_end).unwrap_or("")
    }
}

/// One chunk produced by an external chunker.
///
/// `id` is opaque but typically ends in a numeric ordinal (the upstream
/// system emits `{file_id}_{chunk_index}`); `content` is the verbatim or
/// near-verbatim text the chunker extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Opaque chunk identifier.
    pub id: String,
    /// The chunk's text content.
    pub content: String,
}

impl Chunk {
    /// Create a chunk.
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// How chunk content is matched against the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Exact substring match.
    Exact,
    /// Whitespace-tolerant token match, for chunkers that collapse blank
    /// lines or re-wrap text.
    Fuzzy,
}

impl MatchMode {
    /// Derive the match mode from a run's recorded chunking configuration.
    ///
    /// An explicit boolean `normalize_whitespace` parameter wins when
    /// present. Otherwise the framework decides: `docling`'s hybrid chunker
    /// collapses blank lines and re-wraps, so it gets [`Fuzzy`]; `langchain`
    /// and `chonkie` splitters keep whitespace verbatim, so they (and any
    /// unknown framework) get [`Exact`]. Callers remain free to set the mode
    /// directly.
    ///
    /// [`Fuzzy`]: MatchMode::Fuzzy
    /// [`Exact`]: MatchMode::Exact
    #[must_use]
    pub fn from_run_config(framework: &str, parameters: &serde_json::Value) -> Self {
        if let Some(normalize) = parameters
            .get("normalize_whitespace")
            .and_then(serde_json::Value::as_bool)
        {
            return if normalize {
                MatchMode::Fuzzy
            } else {
                MatchMode::Exact
            };
        }
        match framework.to_ascii_lowercase().as_str() {
            "docling" => MatchMode::Fuzzy,
            _ => MatchMode::Exact,
        }
    }
}

/// One run of an external chunker: its id, the match mode derived from its
/// recorded configuration, and its chunks in emission order.
///
/// Emission order is NOT guaranteed to be document order; the aligner sorts
/// internally before matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Run identifier.
    pub run_id: String,
    /// Match mode for every chunk in this run.
    pub mode: MatchMode,
    /// Chunks in the order the chunker emitted them.
    pub chunks: Vec<Chunk>,
}

impl Run {
    /// Create a run.
    #[must_use]
    pub fn new(run_id: impl Into<String>, mode: MatchMode, chunks: Vec<Chunk>) -> Self {
        Self {
            run_id: run_id.into(),
            mode,
            chunks,
        }
    }
}

static TRAILING_ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(-?\d+)\s*$").unwrap());

/// Parse the numeric ordinal embedded at the end of a chunk id.
///
/// Takes the trailing integer after the last separator (`"doc_10"` → `10`,
/// `"c-3"` → `-3`, the whole id when it is all digits). Returns `None` when
/// no trailing integer parses, in which case callers fall back to stable
/// lexicographic comparison on the full id.
#[must_use]
pub fn ordinal(chunk_id: &str) -> Option<i64> {
    TRAILING_ORDINAL
        .captures(chunk_id)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}
