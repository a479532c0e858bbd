//! AnnotationBuilder: weave boundary markers into the source text.
//!
//! The builder walks the document left to right, emitting literal slices
//! between boundary offsets and zero-width markers at them. Because every
//! literal is cut from `[cursor, offset)` with a monotonically advancing
//! cursor, the concatenation of all literals reconstructs the source text
//! exactly — no duplication, no reordering, no loss — regardless of how
//! chunks overlap or how many failed to match.
//!
//! Co-located events are ordered deterministically: all `End` markers before
//! all `Start` markers (so a start never visually nests inside an unrelated
//! end), and within each kind by original chunk index. A marker's
//! `stack_depth` is its position in that ordered list; it exists purely for
//! non-overlapping visual stacking and carries no semantic weight.

use crate::boundary::{BoundaryIndex, BoundaryKind};
use crate::chunk::SourceDocument;
use crate::error::{Error, Result};
use crate::label::{color_for, end_label, start_label, Palette};
use serde::{Deserialize, Serialize};

/// One item of an annotated document: source text or a zero-width marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationItem {
    /// A verbatim slice of the source text.
    Literal {
        /// The slice content.
        text: String,
    },
    /// A zero-width chunk boundary marker.
    Marker {
        /// Character offset of the boundary.
        offset: usize,
        /// Start or end.
        kind: BoundaryKind,
        /// Id of the chunk this marker belongs to.
        chunk_id: String,
        /// Display label (ordinal suffix; end markers carry a trailing `/`).
        label: String,
        /// Slot into the palette supplied at render time.
        color_index: usize,
        /// Position among co-located markers, for visual stacking only.
        stack_depth: usize,
    },
}

/// The annotated view of one run: an ordered stream of literals and
/// markers whose literal concatenation equals the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Id of the run this annotation belongs to.
    pub run_id: String,
    /// The ordered annotation stream.
    pub items: Vec<AnnotationItem>,
}

impl AnnotatedDocument {
    /// Concatenate all literal items, reconstructing the source text.
    #[must_use]
    pub fn literal_text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            if let AnnotationItem::Literal { text } = item {
                out.push_str(text);
            }
        }
        out
    }

    /// Iterate only the marker items.
    pub fn markers(&self) -> impl Iterator<Item = &AnnotationItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, AnnotationItem::Marker { .. }))
    }
}

/// Render the annotated document for one run from its boundary index.
///
/// Returns [`Error::SpanOutOfBounds`] if any event sits past the end of
/// the document; that can only come from a locator bug and silently
/// emitting it would break the text-preservation guarantee.
pub fn render(
    doc: &SourceDocument,
    index: &BoundaryIndex,
    palette: &Palette,
) -> Result<AnnotatedDocument> {
    let char_len = doc.char_len();
    if let Some(max) = index.max_offset() {
        if max > char_len {
            let chunk_id = index
                .events_at(max)
                .first()
                .map(|e| e.chunk_id.clone())
                .unwrap_or_default();
            return Err(Error::span_out_of_bounds(chunk_id, max, char_len));
        }
    }

    let mut items = Vec::new();
    let mut cursor = 0usize;

    for (offset, events) in index.iter() {
        if offset > cursor {
            items.push(AnnotationItem::Literal {
                text: doc.slice_chars(cursor, offset).to_string(),
            });
            cursor = offset;
        }

        // Ends before starts; within each kind by original chunk index.
        let mut ordered: Vec<_> = events.iter().collect();
        ordered.sort_by_key(|e| (kind_rank(e.kind), e.chunk_index));

        for (stack_depth, event) in ordered.into_iter().enumerate() {
            let label = match event.kind {
                BoundaryKind::Start => start_label(&event.chunk_id),
                BoundaryKind::End => end_label(&event.chunk_id),
            };
            items.push(AnnotationItem::Marker {
                offset,
                kind: event.kind,
                chunk_id: event.chunk_id.clone(),
                label,
                color_index: color_for(&event.chunk_id, palette),
                stack_depth,
            });
        }
    }

    if cursor < char_len {
        items.push(AnnotationItem::Literal {
            text: doc.slice_chars(cursor, char_len).to_string(),
        });
    }

    Ok(AnnotatedDocument {
        run_id: index.run_id().to_string(),
        items,
    })
}

const fn kind_rank(kind: BoundaryKind) -> u8 {
    match kind {
        BoundaryKind::End => 0,
        BoundaryKind::Start => 1,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::align::MatchSpan;
    use crate::offset::Span;
    use proptest::prelude::*;

    proptest! {
        /// Literal concatenation equals the source for arbitrary in-bounds
        /// span sets, overlapping or not.
        #[test]
        fn text_preserved_under_random_spans(
            text in ".{0,60}",
            raw in proptest::collection::vec((0usize..80, 0usize..80), 0..10),
        ) {
            let doc = SourceDocument::new(text.clone());
            let len = doc.char_len();
            let spans: Vec<MatchSpan> = raw
                .iter()
                .enumerate()
                .map(|(i, &(a, b))| {
                    let (start, end) = if a <= b { (a, b) } else { (b, a) };
                    MatchSpan {
                        chunk_id: format!("c_{i}"),
                        chunk_index: i,
                        span: doc.table().span_from_chars(start.min(len), end.min(len)),
                    }
                })
                .collect();
            let index = BoundaryIndex::from_spans("r", &spans);
            let annotated = render(&doc, &index, &Palette::default()).unwrap();
            prop_assert_eq!(annotated.literal_text(), text);
        }
    }
}
