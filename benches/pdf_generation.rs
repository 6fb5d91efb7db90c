//! PDF generation benchmarks
//!
//! Measures the full markup-to-PDF path and the encoder on its own.

use coursedoc::{DocumentRequest, PipelineBuilder, render_unit_documents};
use coursedoc_render_core::DocumentMetadata;
use coursedoc_render_lopdf::render_to_vec;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn unit_body(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            let heading = if i % 10 == 0 { format!("## Section {i}\n\n") } else { String::new() };
            format!(
                "{heading}Paragraph {i}: a sampling distribution describes how a statistic varies \
                 between repeated samples drawn from the same population.\n\n- point one\n- point two"
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let pipeline = PipelineBuilder::new().with_timestamp(false).build();

    for paragraphs in [10, 100, 1000] {
        let request = DocumentRequest::new("Statistics", "Unit 1", unit_body(paragraphs));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", paragraphs),
            &request,
            |b, request| b.iter(|| pipeline.render(black_box(request))),
        );
    }
    group.finish();
}

fn benchmark_encoder_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoder_only");
    let pipeline = PipelineBuilder::new().with_timestamp(false).build();
    let metadata = DocumentMetadata::new("Statistics", "Unit 1");

    for paragraphs in [100, 1000] {
        let document = pipeline
            .compose(&DocumentRequest::new("Statistics", "Unit 1", unit_body(paragraphs)))
            .expect("Failed to compose document");
        group.bench_with_input(
            BenchmarkId::new("pages", document.page_count()),
            &document,
            |b, document| {
                b.iter(|| render_to_vec(black_box(document), &metadata).expect("Failed to encode"))
            },
        );
    }
    group.finish();
}

fn benchmark_batch(c: &mut Criterion) {
    let pipeline = PipelineBuilder::new().with_timestamp(false).build();
    let requests: Vec<DocumentRequest> = (0..32)
        .map(|i| DocumentRequest::new(format!("Course {i}"), "Unit 1", unit_body(20)))
        .collect();
    c.bench_function("batch_32_units", |b| {
        b.iter(|| render_unit_documents(&pipeline, black_box(&requests)))
    });
}

criterion_group!(
    benches,
    benchmark_full_pipeline,
    benchmark_encoder_only,
    benchmark_batch
);
criterion_main!(benches);
