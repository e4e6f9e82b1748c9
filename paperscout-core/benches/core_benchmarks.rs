use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paperscout_core::citation::format_citation;
use paperscout_core::tokenizer::tokenize;
use paperscout_core::{enrich_batch, KeywordOptions, RawPaperFields};

const ABSTRACT: &str = "We study quantum error correction for superconducting qubits. \
    Surface codes protect logical qubits against bit-flip and phase-flip noise, and \
    we benchmark decoding latency on hardware with realistic noise models.";

fn sample_paper(i: usize) -> RawPaperFields {
    RawPaperFields {
        title: format!("Quantum Error Correction Part {i}"),
        authors: vec!["A. Smith".into(), "B. Jones".into()],
        summary: ABSTRACT.repeat(4),
        link: format!("http://arxiv.org/abs/2101.{i:05}v1"),
        published: Some("2021-05-01T00:00:00Z".into()),
    }
}

fn bench_tokenizer(c: &mut Criterion) {
    let text = ABSTRACT.repeat(50);
    c.bench_function("tokenize_long_abstract", |b| {
        b.iter(|| tokenize(black_box(&text)).count())
    });
}

fn bench_citation(c: &mut Criterion) {
    let paper = sample_paper(1);
    c.bench_function("format_citation", |b| {
        b.iter(|| format_citation(black_box(&paper)))
    });
}

fn bench_enrich_batch(c: &mut Criterion) {
    let papers: Vec<RawPaperFields> = (0..10).map(sample_paper).collect();
    let options = KeywordOptions::default();
    c.bench_function("enrich_batch_10", |b| {
        b.iter(|| enrich_batch(black_box(&papers), &options))
    });
}

criterion_group!(benches, bench_tokenizer, bench_citation, bench_enrich_batch);
criterion_main!(benches);
