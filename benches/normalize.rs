//! Benchmarks for request building and response normalization
//!
//! This benchmark measures:
//! - Batch request validation and serialization
//! - Envelope unwrapping of a full 100-query payload
//! - Normalization of organic and image batches

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use serpshot::protocol::{envelope, request, response};
use serpshot::{SearchOptions, SearchQuery, SearchType};

fn organic_item(q: &str) -> Value {
    let results: Vec<Value> = (1..=10)
        .map(|i| {
            json!({
                "title": format!("{q} {i}"),
                "link": format!("https://example.com/{i}"),
                "snippet": "lorem ipsum dolor sit amet",
                "position": i,
            })
        })
        .collect();
    json!({
        "search_params": {"q": q, "type": "search"},
        "search_info": {"total_results": "About 12,300", "search_time": "0.31"},
        "results": results,
        "credits": 1,
    })
}

fn image_item(q: &str) -> Value {
    let results: Vec<Value> = (1..=10)
        .map(|i| {
            json!({
                "title": format!("{q} {i}"),
                "imageUrl": format!("https://img.example.com/{i}.jpg"),
                "thumbnailUrl": format!("https://img.example.com/{i}_t.jpg"),
                "source": "example.com",
                "link": format!("https://example.com/{i}"),
                "imageWidth": 1024,
                "imageHeight": 768,
                "position": i,
            })
        })
        .collect();
    json!({
        "search_params": {"q": q, "type": "image"},
        "search_info": {"total_results": 500, "search_time": 0.2},
        "results": results,
        "credits": 2,
    })
}

fn queries(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("query number {i}")).collect()
}

fn bench_request_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_build");
    let opts = SearchOptions::new().num(20).location("US");

    for n in [1usize, 10, 100] {
        let query = SearchQuery::Batch(queries(n));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("build_to_json", n), &query, |b, q| {
            b.iter(|| {
                let req = request::build(black_box(q), SearchType::Search, &opts).unwrap();
                black_box(req.to_json().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let qs = queries(100);
    group.throughput(Throughput::Elements(qs.len() as u64));

    let organic = Value::Array(qs.iter().map(|q| organic_item(q)).collect());
    let images = Value::Array(qs.iter().map(|q| image_item(q)).collect());
    let partial = Value::Array(qs[..40].iter().map(|q| organic_item(q)).collect());

    group.bench_with_input(BenchmarkId::new("batch", "organic_100"), &organic, |b, raw| {
        b.iter(|| black_box(response::process_batch(black_box(raw), &qs, SearchType::Search)))
    });
    group.bench_with_input(BenchmarkId::new("batch", "image_100"), &images, |b, raw| {
        b.iter(|| black_box(response::process_batch(black_box(raw), &qs, SearchType::Image)))
    });
    group.bench_with_input(BenchmarkId::new("batch", "padded_40_of_100"), &partial, |b, raw| {
        b.iter(|| black_box(response::process_batch(black_box(raw), &qs, SearchType::Search)))
    });

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let qs = queries(100);
    let body = json!({
        "code": 200,
        "msg": "ok",
        "data": qs.iter().map(|q| organic_item(q)).collect::<Vec<_>>(),
    })
    .to_string()
    .into_bytes();

    let mut group = c.benchmark_group("envelope");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("parse_and_normalize_100", |b| {
        b.iter(|| {
            let raw = envelope::parse_response(200, None, black_box(&body)).unwrap();
            black_box(response::process_batch(&raw, &qs, SearchType::Search))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_request_build, bench_normalize, bench_envelope);
criterion_main!(benches);
