//! Alignment and annotation throughput on a synthetic document.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seam::{annotate_run, Chunk, MatchMode, Palette, Run, SourceDocument};

fn synthetic(paragraphs: usize) -> (SourceDocument, Vec<Chunk>) {
    let mut text = String::new();
    let mut chunks = Vec::new();
    for i in 0..paragraphs {
        let para = format!(
            "Paragraph {i} discusses topic {i} in moderate detail, \
             with several sentences of filler content to stretch the text."
        );
        chunks.push(Chunk::new(format!("doc_{i}"), para.clone()));
        text.push_str(&para);
        text.push_str("\n\n");
    }
    (SourceDocument::new(text), chunks)
}

fn bench_alignment(c: &mut Criterion) {
    let (doc, chunks) = synthetic(200);
    let palette = Palette::default();

    let exact = Run::new("exact", MatchMode::Exact, chunks.clone());
    c.bench_function("annotate_run_exact_200", |b| {
        b.iter(|| annotate_run(black_box(&doc), black_box(&exact), &palette).unwrap())
    });

    let fuzzy = Run::new("fuzzy", MatchMode::Fuzzy, chunks);
    c.bench_function("annotate_run_fuzzy_200", |b| {
        b.iter(|| annotate_run(black_box(&doc), black_box(&fuzzy), &palette).unwrap())
    });
}

fn bench_document_build(c: &mut Criterion) {
    let text = "日本語のテキスト and ASCII mixed. ".repeat(2000);
    c.bench_function("source_document_build_unicode", |b| {
        b.iter(|| SourceDocument::new(black_box(text.clone())))
    });
}

criterion_group!(benches, bench_alignment, bench_document_build);
criterion_main!(benches);
