//! # seam
//!
//! Chunk-to-source alignment and boundary annotation for RAG chunk
//! visualization.
//!
//! Chunkers emit text content but discard offsets. Given a document's full
//! text and one or more independently-produced chunk sets ("runs"), seam
//! recovers the exact character offsets of every chunk and produces one
//! text-preserving annotated view per run, able to display many possibly
//! overlapping, possibly mismatched chunk boundaries simultaneously.
//!
//! - **Alignment**: exact or whitespace-tolerant matching under a
//!   monotonically non-decreasing start constraint; unmatched chunks are
//!   reported, never fatal.
//! - **Annotation**: an ordered stream of literal slices and zero-width
//!   markers whose literal concatenation reconstructs the source exactly.
//! - **Determinism**: same inputs, byte-identical outputs — including
//!   marker ordering, labels, and color slots.
//!
//! ## Quick Start
//!
//! ```rust
//! use seam::{annotate_run, Chunk, MatchMode, Palette, Run, SourceDocument};
//!
//! let doc = SourceDocument::new("ABCDEF");
//! let run = Run::new(
//!     "demo",
//!     MatchMode::Exact,
//!     vec![Chunk::new("c_1", "AB"), Chunk::new("c_2", "CD"), Chunk::new("c_3", "EF")],
//! );
//!
//! let view = annotate_run(&doc, &run, &Palette::default()).unwrap();
//! assert_eq!(view.alignment.to_string(), "3/3");
//! assert_eq!(view.annotated.literal_text(), "ABCDEF");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! SourceDocument + Run(chunks)
//!        │
//!        ▼
//!  SequentialAligner ──uses──▶ ChunkLocator (exact | fuzzy)
//!        │
//!        ▼ MatchSpans
//!  BoundaryIndex (offset → events)
//!        │
//!        ▼
//!  AnnotationBuilder ──uses──▶ LabelAssigner (labels, color slots)
//!        │
//!        ▼
//!  AnnotatedDocument (Literal | Marker stream)
//! ```
//!
//! Runs are independent: they read-share the same immutable
//! [`SourceDocument`] and each produces its own [`RunAlignment`] and
//! [`AnnotatedDocument`]. With the `parallel` feature, [`annotate_runs`]
//! processes runs across threads via rayon.
//!
//! ## What seam does not do
//!
//! Chunking, embedding, retrieval, ranking, storage, rendering, and I/O all
//! stay with the caller. The engine is a pure function from (document, runs)
//! to (alignments, annotations).

#![warn(missing_docs)]

pub mod align;
pub mod annotate;
pub mod boundary;
pub mod chunk;
mod error;
pub mod label;
pub mod locate;
pub mod offset;

pub use align::{align, ChunkOutcome, MatchSpan, RunAlignment};
pub use annotate::{render, AnnotatedDocument, AnnotationItem};
pub use boundary::{BoundaryEvent, BoundaryIndex, BoundaryKind};
pub use chunk::{ordinal, Chunk, MatchMode, Run, SourceDocument};
pub use error::{Error, Result};
pub use label::{color_for, end_label, start_label, Palette};
pub use locate::locate;
pub use offset::{OffsetTable, Span};

use serde::{Deserialize, Serialize};

/// Everything produced for one run: its alignment and its annotated view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunView {
    /// Alignment result (matched spans and match-rate observables).
    pub alignment: RunAlignment,
    /// Annotated document stream.
    pub annotated: AnnotatedDocument,
}

/// Align one run and render its annotated document.
pub fn annotate_run(doc: &SourceDocument, run: &Run, palette: &Palette) -> Result<RunView> {
    let alignment = align::align(doc, run);
    let index = BoundaryIndex::from_spans(run.run_id.clone(), &alignment.matched);
    let annotated = annotate::render(doc, &index, palette)?;
    Ok(RunView {
        alignment,
        annotated,
    })
}

/// Align and render several runs against the same document.
///
/// Runs are processed in parallel when the `parallel` feature is enabled,
/// sequentially otherwise; output order always matches input order.
pub fn annotate_runs(doc: &SourceDocument, runs: &[Run], palette: &Palette) -> Result<Vec<RunView>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        runs.par_iter()
            .map(|run| annotate_run(doc, run, palette))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        runs.iter()
            .map(|run| annotate_run(doc, run, palette))
            .collect()
    }
}
