//! Criterion timing of demo-query rendering on the three paths: named replacement,
//! positional substitution, and the quote-aware positional scan.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sql_powered::prelude::*;

/// Build an INSERT with `width` columns in positional form.
fn positional_insert(width: usize) -> (String, BoundParams) {
    let columns: Vec<String> = (0..width).map(|i| format!("c{i}")).collect();
    let marks = vec!["?"; width].join(", ");
    let template = format!("INSERT INTO t ({}) VALUES ({marks})", columns.join(", "));
    let params = BoundParams::positional((0..width).map(|i| {
        if i % 2 == 0 {
            Param::from(i as i64)
        } else {
            Param::from(format!("value '{i}'"))
        }
    }));
    (template, params)
}

fn named_insert(width: usize) -> (String, BoundParams) {
    let columns: Vec<String> = (0..width).map(|i| format!("c{i}")).collect();
    let marks: Vec<String> = columns.iter().map(|c| format!(":{c}")).collect();
    let template = format!(
        "INSERT INTO t ({}) VALUES ({})",
        columns.join(", "),
        marks.join(", ")
    );
    let params = BoundParams::named(
        columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| (c, Param::from(i as i64))),
    );
    (template, params)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_demo_query");

    for width in [4_usize, 32, 256] {
        let (template, params) = positional_insert(width);
        group.throughput(Throughput::Bytes(template.len() as u64));
        group.bench_with_input(BenchmarkId::new("positional", width), &width, |b, _| {
            b.iter(|| render_demo_query(black_box(&template), black_box(&params)).len());
        });

        // A quoted `?` forces the scanner path.
        let quoted = format!("{template} -- '?'");
        group.bench_with_input(BenchmarkId::new("quote_aware", width), &width, |b, _| {
            b.iter(|| render_demo_query(black_box(&quoted), black_box(&params)).len());
        });

        let (template, params) = named_insert(width);
        group.bench_with_input(BenchmarkId::new("named", width), &width, |b, _| {
            b.iter(|| render_demo_query(black_box(&template), black_box(&params)).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
