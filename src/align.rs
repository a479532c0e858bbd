//! SequentialAligner: drive the locator across one run's chunks.
//!
//! The upstream chunk list is not guaranteed to be pre-sorted, so chunks are
//! first sorted into document-emission order by the numeric ordinal embedded
//! in their ids, then matched left to right under a monotonically
//! non-decreasing start-offset constraint. That constraint trades recall (a
//! genuinely reordered chunk that starts earlier than its predecessor will
//! not match) for a hard correctness property: reported spans can never go
//! backwards, which would corrupt the annotation step.

use crate::chunk::{ordinal, Run, SourceDocument};
use crate::locate::locate;
use crate::offset::Span;
use crate::MatchMode;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One chunk's recovered span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    /// Id of the matched chunk.
    pub chunk_id: String,
    /// Index of the chunk in the run's original (emission-order) list.
    pub chunk_index: usize,
    /// The recovered half-open span.
    pub span: Span,
}

/// Per-chunk result in the run's original order, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOutcome {
    /// Id of the chunk.
    pub chunk_id: String,
    /// The recovered span, or `None` if the chunk did not match.
    pub span: Option<Span>,
}

/// Alignment result for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAlignment {
    /// Id of the aligned run.
    pub run_id: String,
    /// Match mode the run was aligned with.
    pub mode: MatchMode,
    /// Matched spans in alignment (document) order; starts are
    /// non-decreasing.
    pub matched: Vec<MatchSpan>,
    /// Per-chunk outcomes in the run's original order.
    pub outcomes: Vec<ChunkOutcome>,
    /// Number of chunks that did not match.
    pub unmatched_count: usize,
    /// Total number of chunks in the run.
    pub total_count: usize,
}

impl RunAlignment {
    /// Number of chunks that matched.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Fraction of chunks that matched, in `[0.0, 1.0]` (1.0 for an empty
    /// run).
    #[must_use]
    pub fn match_rate(&self) -> f64 {
        if self.total_count == 0 {
            1.0
        } else {
            self.matched.len() as f64 / self.total_count as f64
        }
    }
}

impl fmt::Display for RunAlignment {
    /// Formats as `"matched/total"`, e.g. `"37/40"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.matched.len(), self.total_count)
    }
}

/// Align one run's chunks against the document.
///
/// Chunks with a parseable trailing ordinal sort by it (then by id); chunks
/// without one sort after them, lexicographically by id. Matching then walks
/// that order with a search floor that advances past each matched start; an
/// unmatched chunk does not advance the floor, so subsequent chunks still
/// search from the same position.
#[must_use]
pub fn align(doc: &SourceDocument, run: &Run) -> RunAlignment {
    let mut order: Vec<usize> = (0..run.chunks.len()).collect();
    order.sort_by(|&a, &b| emission_order(&run.chunks[a].id, &run.chunks[b].id));

    let mut matched = Vec::new();
    let mut spans_by_index: Vec<Option<Span>> = vec![None; run.chunks.len()];
    let mut floor = 0usize;

    for &idx in &order {
        let chunk = &run.chunks[idx];
        match locate(&chunk.content, doc, floor, run.mode) {
            Some(span) => {
                log::debug!(
                    "run {}: chunk {} matched at [{}, {})",
                    run.run_id,
                    chunk.id,
                    span.char_start,
                    span.char_end
                );
                floor = span.char_start + 1;
                spans_by_index[idx] = Some(span);
                matched.push(MatchSpan {
                    chunk_id: chunk.id.clone(),
                    chunk_index: idx,
                    span,
                });
            }
            None => {
                log::debug!(
                    "run {}: chunk {} unmatched (floor {})",
                    run.run_id,
                    chunk.id,
                    floor
                );
            }
        }
    }

    let outcomes: Vec<ChunkOutcome> = run
        .chunks
        .iter()
        .zip(&spans_by_index)
        .map(|(chunk, span)| ChunkOutcome {
            chunk_id: chunk.id.clone(),
            span: *span,
        })
        .collect();

    let total_count = run.chunks.len();
    let unmatched_count = total_count - matched.len();
    log::debug!(
        "run {}: {}/{} chunks matched",
        run.run_id,
        matched.len(),
        total_count
    );

    RunAlignment {
        run_id: run.run_id.clone(),
        mode: run.mode,
        matched,
        outcomes,
        unmatched_count,
        total_count,
    }
}

/// Document-emission ordering on chunk ids: trailing ordinals first,
/// numerically (ties broken by full id); ids without an ordinal after,
/// lexicographically.
fn emission_order(a: &str, b: &str) -> Ordering {
    match (ordinal(a), ordinal(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
