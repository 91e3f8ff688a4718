//! Benchmarks for grid request decoding and clause generation.
//!
//! Run with: cargo bench -p grid-query

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use grid_query::{FormValues, decode, decode_form, escape_literal, parse};
use std::collections::HashMap;
use std::hint::black_box;

/// Form fields for a grid with `n` columns, each searchable and sorted.
fn grid_fields(n: usize) -> Vec<(String, String)> {
    let mut fields = vec![
        ("draw".to_string(), "7".to_string()),
        ("start".to_string(), "20".to_string()),
        ("length".to_string(), "10".to_string()),
        ("search[value]".to_string(), "bob".to_string()),
        ("search[regex]".to_string(), "false".to_string()),
    ];
    for i in 0..n {
        fields.push((format!("columns[{i}][data]"), format!("col{i}")));
        fields.push((format!("columns[{i}][name]"), String::new()));
        fields.push((format!("columns[{i}][searchable]"), "true".to_string()));
        fields.push((format!("columns[{i}][orderable]"), "true".to_string()));
        fields.push((format!("columns[{i}][search][value]"), String::new()));
        fields.push((format!("columns[{i}][search][regex]"), "false".to_string()));
        fields.push((format!("order[{i}][column]"), i.to_string()));
        fields.push((format!("order[{i}][dir]"), "desc".to_string()));
    }
    fields
}

fn column_map(n: usize) -> HashMap<String, String> {
    (0..n).map(|i| (format!("col{i}"), format!("t.c{i}"))).collect()
}

fn urlencoded(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={v}", k.replace('[', "%5B").replace(']', "%5D")))
        .collect::<Vec<_>>()
        .join("&")
}

// =============================================================================
// Decoding Benchmarks
// =============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for n in [1, 8, 32] {
        let fields = grid_fields(n);
        group.bench_with_input(BenchmarkId::new("pairs", n), &fields, |b, f| {
            b.iter(|| decode(black_box(f.iter().map(|(k, v)| (k.as_str(), v.as_str())))))
        });

        let body = urlencoded(&fields);
        group.bench_with_input(BenchmarkId::new("urlencoded", n), &body, |b, s| {
            b.iter(|| decode_form(&FormValues::parse_urlencoded(black_box(s))))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let terms = [
        ("plain", "hello world"),
        ("quoted", r"o'neil \ sons"),
        ("regex", "^b.b$"),
    ];
    for (name, term) in terms {
        group.bench_with_input(BenchmarkId::new("escape_literal", name), term, |b, s| {
            b.iter(|| escape_literal(black_box(s)))
        });
    }

    let fields = grid_fields(8);
    group.bench_function("parse_8_columns", |b| {
        b.iter(|| parse(black_box(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))))
    });

    group.finish();
}

// =============================================================================
// Clause Generation Benchmarks
// =============================================================================

fn bench_clauses(c: &mut Criterion) {
    let mut group = c.benchmark_group("clauses");

    for n in [1, 8, 32] {
        let req = parse(grid_fields(n)).unwrap();
        let columns = column_map(n);

        group.bench_with_input(BenchmarkId::new("filter", n), &req, |b, r| {
            b.iter(|| r.filter_clause(black_box(&columns)))
        });
        group.bench_with_input(BenchmarkId::new("order", n), &req, |b, r| {
            b.iter(|| r.order_clause(black_box(&columns)))
        });
        group.bench_with_input(BenchmarkId::new("full_query", n), &req, |b, r| {
            b.iter(|| {
                r.clauses(black_box(&columns))
                    .map(|c| c.append_to("SELECT * FROM t"))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_normalize, bench_clauses);
criterion_main!(benches);
