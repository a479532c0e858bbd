//! End-to-end alignment and annotation scenarios.

use seam::{
    annotate_run, AnnotationItem, BoundaryKind, Chunk, MatchMode, Palette, Run, SourceDocument,
};

fn run(mode: MatchMode, chunks: &[(&str, &str)]) -> Run {
    Run::new(
        "r1",
        mode,
        chunks
            .iter()
            .map(|(id, content)| Chunk::new(*id, *content))
            .collect(),
    )
}

fn marker_offsets(items: &[AnnotationItem]) -> Vec<(usize, BoundaryKind)> {
    items
        .iter()
        .filter_map(|item| match item {
            AnnotationItem::Marker { offset, kind, .. } => Some((*offset, *kind)),
            AnnotationItem::Literal { .. } => None,
        })
        .collect()
}

#[test]
fn adjacent_chunks_full_coverage() {
    let doc = SourceDocument::new("ABCDEF");
    let view = annotate_run(
        &doc,
        &run(MatchMode::Exact, &[("c_1", "AB"), ("c_2", "CD"), ("c_3", "EF")]),
        &Palette::default(),
    )
    .unwrap();

    let ranges: Vec<_> = view
        .alignment
        .matched
        .iter()
        .map(|m| m.span.char_range())
        .collect();
    assert_eq!(ranges, vec![0..2, 2..4, 4..6]);
    assert_eq!(view.annotated.literal_text(), "ABCDEF");
}

#[test]
fn fuzzy_matches_across_blank_lines() {
    let doc = SourceDocument::new("Hello\n\nWorld");
    let view = annotate_run(
        &doc,
        &run(MatchMode::Fuzzy, &[("c_1", "Hello World")]),
        &Palette::default(),
    )
    .unwrap();

    assert_eq!(view.alignment.matched[0].span.char_range(), 0..12);
    assert_eq!(view.annotated.literal_text(), "Hello\n\nWorld");
}

#[test]
fn overlapping_chunks_stack_without_duplication() {
    let doc = SourceDocument::new("ABC");
    let view = annotate_run(
        &doc,
        &run(MatchMode::Exact, &[("c_1", "AB"), ("c_2", "BC")]),
        &Palette::default(),
    )
    .unwrap();

    // Second chunk's floor is last_start + 1 = 1, so "BC" matches [1, 3).
    let ranges: Vec<_> = view
        .alignment
        .matched
        .iter()
        .map(|m| m.span.char_range())
        .collect();
    assert_eq!(ranges, vec![0..2, 1..3]);

    let markers = marker_offsets(&view.annotated.items);
    assert_eq!(
        markers,
        vec![
            (0, BoundaryKind::Start),
            (1, BoundaryKind::Start),
            (2, BoundaryKind::End),
            (3, BoundaryKind::End),
        ]
    );
    assert_eq!(view.annotated.literal_text(), "ABC");
}

#[test]
fn absent_chunk_counts_unmatched_without_markers() {
    let doc = SourceDocument::new("XYZ");
    let view = annotate_run(&doc, &run(MatchMode::Exact, &[("c_1", "Q")]), &Palette::default())
        .unwrap();

    assert_eq!(view.alignment.unmatched_count, 1);
    assert_eq!(view.alignment.matched_count(), 0);
    assert!(marker_offsets(&view.annotated.items).is_empty());
    assert_eq!(view.annotated.literal_text(), "XYZ");
}

#[test]
fn ordinal_sort_beats_lexicographic() {
    // "run_10" < "run_2" lexicographically; ordinals must order 2 first.
    let doc = SourceDocument::new("second tenth");
    let view = annotate_run(
        &doc,
        &run(MatchMode::Exact, &[("run_10", "tenth"), ("run_2", "second")]),
        &Palette::default(),
    )
    .unwrap();

    assert_eq!(view.alignment.matched[0].chunk_id, "run_2");
    assert_eq!(view.alignment.matched[1].chunk_id, "run_10");
    assert_eq!(view.alignment.matched_count(), 2);
}

#[test]
fn palette_slot_from_ordinal() {
    let palette = Palette::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
    assert_eq!(seam::color_for("c_7", &palette), 1);
    assert_eq!(seam::color_for("c_7", &palette), 1);
}

#[test]
fn partial_match_reporting() {
    let doc = SourceDocument::new("one two three");
    let view = annotate_run(
        &doc,
        &run(
            MatchMode::Exact,
            &[("c_1", "one"), ("c_2", "missing"), ("c_3", "three")],
        ),
        &Palette::default(),
    )
    .unwrap();

    assert_eq!(view.alignment.to_string(), "2/3");
    assert!((view.alignment.match_rate() - 2.0 / 3.0).abs() < 1e-9);
    // The unmatched chunk did not advance the floor: "three" still matches.
    assert_eq!(view.alignment.matched[1].chunk_id, "c_3");
    assert_eq!(view.annotated.literal_text(), "one two three");
}

#[test]
fn repeated_calls_byte_identical() {
    let doc = SourceDocument::new("the quick brown fox jumps over the lazy dog");
    let r = run(
        MatchMode::Fuzzy,
        &[("c_1", "the quick brown"), ("c_2", "fox jumps"), ("c_3", "lazy dog")],
    );
    let palette = Palette::default();

    let a = annotate_run(&doc, &r, &palette).unwrap();
    let b = annotate_run(&doc, &r, &palette).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn end_labels_carry_suffix() {
    let doc = SourceDocument::new("AB");
    let view = annotate_run(&doc, &run(MatchMode::Exact, &[("c_4", "AB")]), &Palette::default())
        .unwrap();

    let labels: Vec<_> = view
        .annotated
        .items
        .iter()
        .filter_map(|item| match item {
            AnnotationItem::Marker { label, .. } => Some(label.clone()),
            AnnotationItem::Literal { .. } => None,
        })
        .collect();
    assert_eq!(labels, vec!["4", "4/"]);
}

#[test]
fn empty_document() {
    let doc = SourceDocument::new("");
    let view = annotate_run(&doc, &run(MatchMode::Exact, &[("c_1", "x")]), &Palette::default())
        .unwrap();
    assert_eq!(view.alignment.unmatched_count, 1);
    assert_eq!(view.annotated.literal_text(), "");
}

#[test]
fn whitespace_only_chunk_progresses() {
    let doc = SourceDocument::new("AB CD");
    let view = annotate_run(
        &doc,
        &run(MatchMode::Exact, &[("c_1", "AB"), ("c_2", "   "), ("c_3", "CD")]),
        &Palette::default(),
    )
    .unwrap();

    assert_eq!(view.alignment.matched_count(), 3);
    assert!(view.alignment.matched[1].span.is_empty());
    assert_eq!(view.annotated.literal_text(), "AB CD");
}
