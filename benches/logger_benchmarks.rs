//! Criterion benchmarks for chronicle_logger

use chronicle_logger::prelude::*;
use chronicle_logger::{fields, RecordMetadata};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn memory_logger(threshold: Severity) -> (Chronicle, MemoryDestination) {
    let memory = MemoryDestination::new();
    let logger = Chronicle::builder()
        .threshold(threshold)
        .destination(memory.clone())
        .build();
    (logger, memory)
}

// ============================================================================
// Record Assembly Benchmarks
// ============================================================================

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    group.throughput(Throughput::Elements(1));

    let store = BindingStore::new();
    store.bind(fields! {
        ipaddress = "1.2.3.4",
        unique_log_id = 54321,
        status = "Logging in",
    });

    group.bench_function("assemble_and_render", |b| {
        b.iter(|| {
            let record = LogRecord::assemble(
                LogLevel::Error,
                Some(black_box("Invalid user login credentials").into()),
                fields! { attempt = 3 },
                &store,
                RecordMetadata::now(CallSite::unknown()),
            );
            black_box(record.to_json())
        });
    });

    group.finish();
}

// ============================================================================
// Logging Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let (logger, memory) = memory_logger(Severity::Info);
    logger.bind(fields! { service = "bench", version = "1.0" });

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
            memory.clear();
        });
    });

    group.bench_function("error_with_fields", |b| {
        b.iter(|| {
            logger.error_with(black_box("Error message"), fields! { code = 500, path = "/login" });
            memory.clear();
        });
    });

    let (filtered, _memory) = memory_logger(Severity::Critical);
    group.bench_function("filtered_info", |b| {
        b.iter(|| filtered.info(black_box("below threshold")));
    });

    group.finish();
}

fn bench_binding(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding");
    group.throughput(Throughput::Elements(1));

    let (logger, _memory) = memory_logger(Severity::Info);

    group.bench_function("bind_and_clear", |b| {
        b.iter(|| {
            logger.bind(fields! { request_id = black_box("abc-123"), private = "token" });
            logger.clear_bindings();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_assembly, bench_logging, bench_binding);
criterion_main!(benches);
