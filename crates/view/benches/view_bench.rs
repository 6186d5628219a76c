//! Benchmarks for hireboard-view.
//!
//! Target: full filter + sort + paginate of 10k candidates < 5ms

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hireboard_core::{Candidate, ChangeEvent, Status};
use hireboard_reactive::CandidateStore;
use hireboard_view::{SortKey, ViewEngine};

fn make_store(size: usize) -> CandidateStore {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    CandidateStore::with_records(
        (0..size)
            .map(|i| {
                Candidate::new(
                    format!("{:08x}", i.wrapping_mul(2_654_435_761)),
                    format!("Candidate {}", i),
                    ["Engineer", "Designer", "Recruiter"][i % 3],
                    base + Duration::minutes(i as i64),
                )
                .with_status(Status::ALL[i % 4])
            })
            .collect(),
    )
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [100, 1_000, 10_000] {
        let store = make_store(size);

        group.bench_with_input(BenchmarkId::new("default_sort", size), &store, |b, store| {
            let mut engine = ViewEngine::default();
            b.iter(|| engine.render(black_box(store)))
        });

        group.bench_with_input(BenchmarkId::new("search_by_name", size), &store, |b, store| {
            let mut engine = ViewEngine::default();
            engine.set_search("candidate 9");
            engine.toggle_sort(SortKey::Name);
            b.iter(|| engine.render(black_box(store)))
        });
    }

    group.finish();
}

fn bench_apply_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_and_render");

    for size in [1_000, 10_000] {
        group.bench_function(BenchmarkId::new("status_update", size), |b| {
            let mut store = make_store(size);
            let target = store.arrival_order()[size / 2].clone();
            let mut engine = ViewEngine::default();
            let mut i = 0usize;
            b.iter(|| {
                i += 1;
                let updated = target.clone().with_status(Status::ALL[i % 4]);
                store.apply(ChangeEvent::Update(updated));
                engine.render(&store)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_apply_and_render);
criterion_main!(benches);
