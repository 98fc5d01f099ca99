use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use calstats_core::{normalize_events, ViewportController};
use calstats_domain::RawEvent;

fn sample_events(count: u64) -> Vec<RawEvent> {
    let base = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let start = base + Duration::days(i64::try_from(idx).unwrap() * 3);
            let end = (idx % 4 != 0).then(|| start + Duration::days(2));
            RawEvent::new(idx, format!("trip {idx}"), start, end)
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_events");
    for count in [10_u64, 500, 5_000] {
        let events = sample_events(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| normalize_events(black_box(events)));
        });
    }
    group.finish();
}

fn bench_initialize(c: &mut Criterion) {
    let intervals = normalize_events(&sample_events(5_000));
    c.bench_function("viewport_initialize_5000", |b| {
        b.iter(|| {
            let mut controller = ViewportController::new();
            controller.initialize(black_box(&intervals))
        });
    });
}

criterion_group!(benches, bench_normalize, bench_initialize);
criterion_main!(benches);
