//! Criterion benchmarks for the trip planner.
//!
//! Measures end-to-end planning time across route lengths (3, 6, 10
//! destinations) with a scripted generator, so the numbers reflect the
//! planner's own work rather than a remote service.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package caravan-planner
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use caravan_core::{ActivityEntry, HotelEntry, Planner, ReferenceCatalog};
use caravan_planner::TripPlanner;
use caravan_planner::test_support::{numbered_activity_generator, request_on};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Destination counts to benchmark.
const ROUTE_LENGTHS: &[u32] = &[3, 6, 10];

/// Seed shared by every benchmark request.
const BENCHMARK_SEED: u64 = 0x00C0_FFEE;

/// Catalog of `count + 1` cities on a line, ten hotels and a handful of
/// activities each.
fn linear_catalog(count: u32) -> ReferenceCatalog {
    let mut catalog = ReferenceCatalog::default();
    for index in 0..=count {
        let city = format!("City {index}");
        for rank in 0..10_u32 {
            catalog.push_hotel(HotelEntry::new(
                city.as_str(),
                format!("{city} Hotel {rank}"),
                f64::from(80 + rank * 60),
            ));
        }
        for rank in 0..4_u32 {
            catalog.push_activity(ActivityEntry::new(
                city.as_str(),
                format!("{city} Sight {rank}"),
                f64::from(15 * rank),
            ));
        }
        for other in (index + 1)..=count {
            catalog = catalog.with_distance(
                &city,
                &format!("City {other}"),
                f64::from(40 * (other - index)),
            );
        }
    }
    catalog
}

/// Benchmark full plan generation for various route lengths.
fn bench_generate_plans(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_plans");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(5));

    for &count in ROUTE_LENGTHS {
        let destinations: Vec<String> = (1..=count).map(|index| format!("City {index}")).collect();
        let names: Vec<&str> = destinations.iter().map(String::as_str).collect();
        let request =
            request_on("City 0", &names, count * 2 + 1, 50_000.0).with_seed(BENCHMARK_SEED);
        let catalog = linear_catalog(count);

        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &request, |b, request| {
            b.iter(|| {
                let planner = TripPlanner::new(&catalog, numbered_activity_generator());
                planner.generate_plans(request)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate_plans);
criterion_main!(benches);
