//! BoundaryIndex: sparse map from text offset to boundary events.
//!
//! Each matched span contributes a chunk-start and a chunk-end event; any
//! number of chunks may overlap at one offset. Events at the same offset
//! keep insertion order here; the deterministic cross-kind ordering (all
//! ends before all starts) happens in the annotation builder, which uses
//! the recorded chunk index for tie-breaking.

use crate::align::MatchSpan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a boundary event opens or closes a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Chunk starts at this offset.
    Start,
    /// Chunk ends at this offset.
    End,
}

/// One chunk boundary at one character offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryEvent {
    /// Character offset of the boundary.
    pub offset: usize,
    /// Start or end.
    pub kind: BoundaryKind,
    /// Id of the chunk this boundary belongs to.
    pub chunk_id: String,
    /// Id of the run this boundary belongs to.
    pub run_id: String,
    /// Index of the chunk in the run's original list, for deterministic
    /// tie-breaking among co-located events.
    pub chunk_index: usize,
}

/// Sparse, ordered map from character offset to the boundary events there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryIndex {
    run_id: String,
    events: BTreeMap<usize, Vec<BoundaryEvent>>,
}

impl BoundaryIndex {
    /// Build the index from one run's matched spans.
    ///
    /// Every span contributes exactly two events; a zero-length span
    /// contributes both at the same offset.
    #[must_use]
    pub fn from_spans(run_id: impl Into<String>, spans: &[MatchSpan]) -> Self {
        let run_id = run_id.into();
        let mut events: BTreeMap<usize, Vec<BoundaryEvent>> = BTreeMap::new();
        for m in spans {
            events
                .entry(m.span.char_start)
                .or_default()
                .push(BoundaryEvent {
                    offset: m.span.char_start,
                    kind: BoundaryKind::Start,
                    chunk_id: m.chunk_id.clone(),
                    run_id: run_id.clone(),
                    chunk_index: m.chunk_index,
                });
            events.entry(m.span.char_end).or_default().push(BoundaryEvent {
                offset: m.span.char_end,
                kind: BoundaryKind::End,
                chunk_id: m.chunk_id.clone(),
                run_id: run_id.clone(),
                chunk_index: m.chunk_index,
            });
        }
        Self { run_id, events }
    }

    /// Id of the run this index was built from.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Iterate offsets and their events in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[BoundaryEvent])> + '_ {
        self.events.iter().map(|(&k, v)| (k, v.as_slice()))
    }

    /// Events at one offset, in insertion order.
    #[must_use]
    pub fn events_at(&self, offset: usize) -> &[BoundaryEvent] {
        self.events.get(&offset).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct offsets carrying events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the index holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The largest offset carrying an event, if any.
    #[must_use]
    pub fn max_offset(&self) -> Option<usize> {
        self.events.keys().next_back().copied()
    }
}
