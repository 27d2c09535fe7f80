use abbreviations::abbreviation::{rewriter, AbbreviationEngine};
use abbreviations::clean_text;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const PARAGRAPH: &str = "Neurons in the substantia nigra pars compacta (SNPC) degenerate \
in Parkinson's disease (PD). A region of interest (ROI) was drawn around each SNPC \
cluster, and every ROI was checked twice. The test string (TS) and its time-\n\
stamped copy were stored; PD progression was scored per ROI. ";

fn document(paragraphs: usize) -> String {
    PARAGRAPH.repeat(paragraphs)
}

fn bench_findall(c: &mut Criterion) {
    let engine = AbbreviationEngine::with_default_config();
    let mut group = c.benchmark_group("findall");

    for paragraphs in [1usize, 16, 256] {
        let text = document(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{paragraphs}_paragraphs"), |b| {
            b.iter(|| black_box(engine.findall(black_box(&text))))
        });
    }
    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let engine = AbbreviationEngine::with_default_config();
    let text = document(64);
    let map = engine.findall(&text);

    let mut group = c.benchmark_group("rewrite");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("expand_with", |b| {
        b.iter(|| black_box(abbreviations::expand_with(black_box(&text), &map)))
    });
    group.bench_function("compress_with", |b| {
        b.iter(|| black_box(abbreviations::compress_with(black_box(&text), &map)))
    });
    // WHY: isolates the stemming cost of one association from map iteration
    group.bench_function("expand_single", |b| {
        b.iter(|| black_box(rewriter::expand(black_box(&text), "ROI", "region of interest")))
    });
    group.finish();
}

fn bench_clean_text(c: &mut Criterion) {
    let text = document(256);
    let mut group = c.benchmark_group("clean_text");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("clean_text", |b| b.iter(|| black_box(clean_text(black_box(&text)))));
    group.finish();
}

criterion_group!(benches, bench_findall, bench_rewrite, bench_clean_text);
criterion_main!(benches);
