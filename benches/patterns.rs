//! Benchmarks for candlestick pattern classification.

use candlescan::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Generate realistic deterministic bars.
fn generate_series(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
  let mut open = Vec::with_capacity(n);
  let mut high = Vec::with_capacity(n);
  let mut low = Vec::with_capacity(n);
  let mut close = Vec::with_capacity(n);
  let mut price = 100.0;

  for i in 0..n {
    let change = ((i * 7 + 13) % 100) as f64 / 50.0 - 1.0;
    let volatility = 2.0 + ((i * 3) % 10) as f64 / 5.0;

    let o = price;
    let c = price + change;
    open.push(o);
    close.push(c);
    high.push(o.max(c) + volatility * 0.5);
    low.push(o.min(c) - volatility * 0.5);
    price = c;
  }

  (open, high, low, close)
}

fn bench_single_classifier(c: &mut Criterion) {
  let (open, high, low, close) = generate_series(1000);
  let candles = Candles::new(&open, &high, &low, &close).unwrap();
  let doji = DojiClassifier::default();

  c.bench_function("classify_doji_1000_bars", |b| {
    let mut out = vec![0i32; 1000];
    b.iter(|| {
      let _ = black_box(doji.classify(black_box(&candles), 0..1000, &mut out));
    })
  });
}

fn bench_aggregate_heavy_classifier(c: &mut Criterion) {
  let (open, high, low, close) = generate_series(1000);
  let candles = Candles::new(&open, &high, &low, &close).unwrap();
  let soldiers = ThreeWhiteSoldiersClassifier::default();

  c.bench_function("classify_three_white_soldiers_1000_bars", |b| {
    let mut out = vec![0i32; 1000];
    b.iter(|| {
      let _ = black_box(soldiers.classify(black_box(&candles), 0..1000, &mut out));
    })
  });
}

fn bench_all_classifiers(c: &mut Criterion) {
  let (open, high, low, close) = generate_series(1000);
  let candles = Candles::new(&open, &high, &low, &close).unwrap();
  let classifiers = BuiltinClassifier::all_with_defaults();

  c.bench_function("classify_all_sequential_1000_bars", |b| {
    let mut out = vec![0i32; 1000];
    b.iter(|| {
      for classifier in &classifiers {
        let _ = black_box(classifier.classify(black_box(&candles), 0..1000, &mut out));
      }
    })
  });
}

fn bench_scaling(c: &mut Criterion) {
  let doji = DojiClassifier::default();

  let mut group = c.benchmark_group("scaling");

  for size in [100, 500, 1000, 5000, 10000].iter() {
    let (open, high, low, close) = generate_series(*size);

    group.bench_with_input(BenchmarkId::new("classify_doji", size), size, |b, &n| {
      let candles = Candles::new(&open, &high, &low, &close).unwrap();
      let mut out = vec![0i32; n];
      b.iter(|| {
        let _ = black_box(doji.classify(black_box(&candles), 0..n, &mut out));
      })
    });
  }

  group.finish();
}

fn bench_parallel_scan(c: &mut Criterion) {
  let (open, high, low, close) = generate_series(1000);
  let candles = Candles::new(&open, &high, &low, &close).unwrap();
  let classifiers = BuiltinClassifier::all_with_defaults();

  c.bench_function("scan_parallel_all_1000_bars", |b| {
    b.iter(|| {
      let _ = black_box(scan_parallel(
        black_box(&classifiers),
        black_box(&candles),
        0..1000,
      ));
    })
  });
}

criterion_group!(
  benches,
  bench_single_classifier,
  bench_aggregate_heavy_classifier,
  bench_all_classifiers,
  bench_scaling,
  bench_parallel_scan,
);

criterion_main!(benches);
