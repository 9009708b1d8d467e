use cookie_clearer::{
    is_in_scope, Cookie, CooldownPolicy, DomainScope, RecencyCache, ShardedRecencyStore,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Benchmark the scope predicate on accepted and rejected hosts
fn bench_scope_predicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope_predicate");
    let scope = DomainScope::default();

    for host in [
        "acme.domo.com",
        "acme-corp-analytics-production.domo.com",
        "evil-domo.com",
        "x.y.domo.com.evil.com",
    ] {
        group.bench_with_input(BenchmarkId::new("is_in_scope", host), host, |b, host| {
            b.iter(|| scope.is_in_scope(black_box(host)))
        });
    }

    group.bench_function("default_scope_free_fn", |b| {
        b.iter(|| is_in_scope(black_box("acme.domo.com")))
    });

    group.finish();
}

/// Benchmark cookie selection filtering
fn bench_cookie_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("cookie_selection");

    let cookies: Vec<Cookie> = (0..200)
        .map(|i| match i % 4 {
            0 => Cookie::new(format!("c{i}"), "acme.domo.com", "0"),
            1 => Cookie::new(format!("c{i}"), ".domo.com", "0"),
            2 => Cookie::new(format!("c{i}"), format!("tenant{i}.domo.com"), "0"),
            _ => Cookie::new(format!("c{i}"), "api.acme.domo.com", "0"),
        })
        .collect();

    group.throughput(Throughput::Elements(cookies.len() as u64));
    group.bench_function("applies_to_200", |b| {
        b.iter(|| {
            cookies
                .iter()
                .filter(|cookie| cookie.applies_to(black_box("acme.domo.com")))
                .count()
        })
    });

    group.finish();
}

/// Benchmark cooldown decisions under contention
fn bench_recency_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("recency_cache");
    let policy = CooldownPolicy::new(Duration::from_secs(10)).unwrap();

    group.throughput(Throughput::Elements(1000));
    group.bench_function("accept_single_host", |b| {
        let cache = RecencyCache::new(Arc::new(ShardedRecencyStore::new()), policy);
        let now = Instant::now();
        b.iter(|| {
            for _ in 0..1000 {
                black_box(cache.accept(black_box("acme.domo.com"), now));
            }
        })
    });

    for threads in [2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("accept_concurrent", threads),
            &threads,
            |b, &threads| {
                let cache = RecencyCache::new(Arc::new(ShardedRecencyStore::new()), policy);
                let hosts: Vec<String> = (0..threads).map(|i| format!("tenant{i}.domo.com")).collect();
                b.iter(|| {
                    let now = Instant::now();
                    thread::scope(|s| {
                        for host in &hosts {
                            let cache = &cache;
                            s.spawn(move || {
                                for _ in 0..1000 {
                                    black_box(cache.accept(host, now));
                                }
                            });
                        }
                    });
                })
            },
        );
    }

    group.bench_function("sweep_10k", |b| {
        b.iter_batched(
            || {
                let cache = RecencyCache::new(Arc::new(ShardedRecencyStore::new()), policy);
                let start = Instant::now();
                for i in 0..10_000 {
                    cache.accept(&format!("tenant{i}.domo.com"), start);
                }
                (cache, start + Duration::from_secs(21))
            },
            |(cache, later)| black_box(cache.sweep(later)),
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scope_predicate,
    bench_cookie_selection,
    bench_recency_cache
);
criterion_main!(benches);
