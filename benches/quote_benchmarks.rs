//! Performance benchmarks for the Carrier Quote Engine.
//!
//! Covers the pure weight and price calculations, destination resolution,
//! and full `/quote` requests through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use carrier_quote_engine::api::{AppState, create_router};
use carrier_quote_engine::calculation::{aggregate_boxes, price_from_breaks};
use carrier_quote_engine::config::{CarrierTables, TableStore};
use carrier_quote_engine::engine::QuoteEngine;
use carrier_quote_engine::models::{BoxSpec, Carrier, Dimensions, ShipmentBoxes, ShipmentRequest};
use carrier_quote_engine::resolution::RegionResolver;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_store() -> Arc<TableStore> {
    Arc::new(TableStore::load("./config").expect("Failed to load reference tables"))
}

fn mixed_boxes(count: usize) -> Vec<BoxSpec> {
    (0..count)
        .map(|i| {
            let step = Decimal::from(i as u32 % 7);
            BoxSpec::new(
                dec!(5) + step,
                Dimensions::new(dec!(30) + step, dec!(40), dec!(50) - step),
                1 + (i as u32 % 3),
            )
        })
        .collect()
}

/// Benchmark: breakpoint interpolation for a region-based carrier.
fn bench_price_from_breaks(c: &mut Criterion) {
    let store = load_store();
    let Ok(CarrierTables::Regional(tables)) = store.tables(Carrier::Ups) else {
        panic!("UPS tables should be regional");
    };

    c.bench_function("price_from_breaks", |b| {
        b.iter(|| price_from_breaks(black_box(&tables.prices), 1, black_box(dec!(32))))
    });
}

/// Benchmark: destination resolution, from exact match to fuzzy fallback.
fn bench_resolution(c: &mut Criterion) {
    let store = load_store();
    let Ok(CarrierTables::Regional(tables)) = store.tables(Carrier::Dhl) else {
        panic!("DHL tables should be regional");
    };
    let resolver = RegionResolver::for_table(tables.regions.lookup());

    let mut group = c.benchmark_group("resolution");
    for destination in ["Germany", "Almanya", "Berlin, Germny"] {
        group.bench_with_input(
            BenchmarkId::from_parameter(destination),
            &destination,
            |b, destination| b.iter(|| resolver.resolve(black_box(destination))),
        );
    }
    group.finish();
}

/// Benchmark: mixed-box aggregation as the number of box specifications grows.
fn bench_aggregate_boxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_boxes");
    for count in [2usize, 10, 50].iter() {
        let boxes = mixed_boxes(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("boxes", count), &boxes, |b, boxes| {
            b.iter(|| aggregate_boxes(black_box(boxes), dec!(5000)))
        });
    }
    group.finish();
}

/// Benchmark: one engine quote across all carriers.
fn bench_engine_quote(c: &mut Criterion) {
    let engine = QuoteEngine::new(load_store());
    let request = ShipmentRequest {
        content: "Books".to_string(),
        country: "Almanya".to_string(),
        boxes: ShipmentBoxes::Mixed(mixed_boxes(5)),
        carriers: None,
    };

    c.bench_function("engine_quote", |b| b.iter(|| engine.quote(black_box(&request))));
}

/// Benchmark: a full `/quote` request through the router.
fn bench_quote_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = TableStore::load("./config").expect("Failed to load reference tables");
    let router = create_router(AppState::from_store(store));
    let body = serde_json::json!({
        "content": "Books",
        "country": "Almanya",
        "weight": 5,
        "length": 40,
        "width": 40,
        "height": 50,
        "quantity": 2
    })
    .to_string();

    c.bench_function("quote_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/quote")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_price_from_breaks,
    bench_resolution,
    bench_aggregate_boxes,
    bench_engine_quote,
    bench_quote_request,
);
criterion_main!(benches);
