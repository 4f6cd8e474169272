//! Property tests: code domain, determinism, output-range bounds, and the
//! rolling-aggregate invariant (incremental threshold == from-scratch
//! recomputation at every scan index).

use candlescan::average::CandleAverage;
use candlescan::prelude::*;
use proptest::prelude::*;

type Series = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>);

/// Valid OHLC bars: high covers the body from above, low from below.
fn arb_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Series> {
    prop::collection::vec(
        (50.0f64..150.0, -4.0f64..4.0, 0.0f64..4.0, 0.0f64..4.0),
        min_len..=max_len,
    )
    .prop_map(|seeds| {
        let mut open = Vec::with_capacity(seeds.len());
        let mut high = Vec::with_capacity(seeds.len());
        let mut low = Vec::with_capacity(seeds.len());
        let mut close = Vec::with_capacity(seeds.len());
        for (base, delta, up, down) in seeds {
            let o = base;
            let c = base + delta;
            open.push(o);
            close.push(c);
            high.push(o.max(c) + up);
            low.push(o.min(c) - down);
        }
        (open, high, low, close)
    })
}

fn metric(c: &Candles<'_, f64>, kind: RangeKind, i: usize) -> f64 {
    match kind {
        RangeKind::RealBody => c.real_body(i),
        RangeKind::HighLow => c.high_low_range(i),
        RangeKind::Shadows => c.upper_shadow(i) + c.lower_shadow(i),
    }
}

/// From-scratch threshold the incremental aggregate must agree with.
fn scratch_threshold(
    c: &Candles<'_, f64>,
    setting: CandleSetting,
    offset: usize,
    i: usize,
) -> f64 {
    let base = if setting.period != 0 {
        let from = i - offset - setting.period;
        let to = i - offset;
        (from..to).map(|j| metric(c, setting.kind, j)).sum::<f64>() / setting.period as f64
    } else {
        metric(c, setting.kind, i - offset)
    };
    let scaled = setting.factor * base;
    if setting.kind == RangeKind::Shadows {
        scaled / 2.0
    } else {
        scaled
    }
}

proptest! {
    #[test]
    fn codes_stay_in_domain_and_ranges_hold((series, cut) in (arb_series(24, 64), 0usize..24)) {
        let (open, high, low, close) = &series;
        let candles = Candles::new(open, high, low, close).unwrap();
        let len = candles.len();
        let start = cut.min(len);

        for classifier in BuiltinClassifier::all_with_defaults() {
            let mut out = vec![0i32; len];
            let range = classifier.classify(&candles, start..len, &mut out).unwrap();

            prop_assert!(range.end <= len);
            prop_assert!(range.is_empty() || range.start >= start);
            prop_assert!(range.is_empty() || range.start >= classifier.lookback());
            for i in range.start..range.end {
                prop_assert!(
                    out[i] == -100 || out[i] == 0 || out[i] == 100,
                    "{} emitted {} at {}", classifier.id(), out[i], i
                );
            }
        }
    }

    #[test]
    fn reruns_are_byte_identical(series in arb_series(24, 48)) {
        let (open, high, low, close) = &series;
        let candles = Candles::new(open, high, low, close).unwrap();
        let len = candles.len();

        for classifier in BuiltinClassifier::all_with_defaults() {
            let mut out_a = vec![0i32; len];
            let mut out_b = vec![0i32; len];
            let range_a = classifier.classify(&candles, 0..len, &mut out_a).unwrap();
            let range_b = classifier.classify(&candles, 0..len, &mut out_b).unwrap();
            prop_assert_eq!(range_a, range_b);
            prop_assert_eq!(&out_a, &out_b, "{} diverged between reruns", classifier.id());
        }
    }

    #[test]
    fn incremental_aggregate_matches_scratch(series in arb_series(20, 48)) {
        let (open, high, low, close) = &series;
        let candles = Candles::new(open, high, low, close).unwrap();
        let settings = CandleSettings::default();

        for (setting, offset) in [
            (settings.body_long, 0usize),
            (settings.body_doji, 1),
            (settings.shadow_short, 0),
            (settings.shadow_very_short, 2),
            (settings.near, 2),
            (settings.equal, 1),
            (settings.shadow_very_long, 0),
        ] {
            let first = setting.period + offset + 1;
            if first >= candles.len() {
                continue;
            }
            let mut aggregate = CandleAverage::primed(setting, offset, &candles, first);
            for i in first..candles.len() {
                let incremental = aggregate.average(&candles, i);
                let expected = scratch_threshold(&candles, setting, offset, i);
                prop_assert!(
                    (incremental - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                    "drift at i={} for {:?}/{}: {} vs {}",
                    i, setting.kind, offset, incremental, expected
                );
                aggregate.advance(&candles, i);
            }
        }
    }

    #[test]
    fn gap_predicates_are_mutually_exclusive(series in arb_series(8, 24)) {
        let (open, high, low, close) = &series;
        let candles = Candles::new(open, high, low, close).unwrap();

        for i in 1..candles.len() {
            prop_assert!(!(candles.gap_up(i, i - 1) && candles.gap_down(i, i - 1)));
            prop_assert!(!(candles.body_gap_up(i, i - 1) && candles.body_gap_down(i, i - 1)));
        }
    }
}
