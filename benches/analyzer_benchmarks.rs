use criterion::{criterion_group, criterion_main, Criterion};
use std::{hint::black_box, time::Duration};

use audit_engine::test_utils::fixtures;
use audit_engine::{Analyzer, ContentAnalyzer, PageRecord, TechnicalAnalyzer};

fn synthetic_crawl(pages: usize) -> Vec<PageRecord> {
    (0..pages)
        .map(|i| match i % 4 {
            0 => fixtures::healthy_page(&format!("https://example.com/p{i}")),
            1 => fixtures::bare_page(&format!("http://example.com/p{i}")),
            2 => fixtures::untitled_page(&format!("https://example.com/p{i}")),
            _ => fixtures::redirected_page(
                &format!("https://example.com/p{i}"),
                &["https://old.example/", "https://mid.example/", "final"],
            ),
        })
        .collect()
}

fn bench_analyzers(c: &mut Criterion) {
    let crawl = synthetic_crawl(1000);

    let mut content = ContentAnalyzer::new();
    let mut technical = TechnicalAnalyzer::new();
    for page in &crawl {
        content.add_page(page.clone());
        technical.add_page(page.clone());
    }

    c.bench_function("content_analyze_1000_pages", |b| {
        b.iter(|| black_box(content.analyze()))
    });

    c.bench_function("technical_analyze_1000_pages", |b| {
        b.iter(|| black_box(technical.analyze()))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(10));
    targets = bench_analyzers
}

criterion_main!(benches);
