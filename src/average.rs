//! Incrementally maintained trailing-window averages.
//!
//! Every multi-bar classifier compares candle metrics against a scaled
//! trailing average. Recomputing that average from scratch at every bar would
//! make a scan quadratic, so the sum is maintained incrementally: primed once
//! over the window ending just before the first scanned bar, then slid one
//! bar forward per scan step.

use crate::settings::{CandleSetting, RangeKind};
use crate::{Candles, SeriesElement};

/// Rolling sum of one candle metric over a trailing window.
///
/// The `offset` selects which historical bar of a multi-bar template the
/// window tracks: an aggregate with `offset == 2` primed at scan index
/// `first` covers bars `[first - 2 - period, first - 2)` and, after `k`
/// calls to [`advance`](Self::advance), bars `[first + k - 2 - period,
/// first + k - 2)`.
///
/// Invariant: between `prime` and the matching `advance` for scan index `i`,
/// `total` is the exact sum of the metric over the `period` bars ending at
/// `i - offset - 1`. Callers must advance exactly once per scan index, after
/// the code for that index has been written.
#[derive(Debug, Clone, Copy)]
pub struct CandleAverage<T> {
    setting: CandleSetting,
    offset: usize,
    total: T,
    trailing: usize,
}

impl<T: SeriesElement> CandleAverage<T> {
    /// Prime the window for a scan whose first emitted index is `first`.
    ///
    /// Callers guarantee `first >= setting.period + offset` (the classifier's
    /// lookback is the maximum such sum over all its aggregates).
    pub fn primed(
        setting: CandleSetting,
        offset: usize,
        candles: &Candles<'_, T>,
        first: usize,
    ) -> Self {
        let from = first - setting.period;
        let mut total = T::zero();
        for j in from..first {
            total = total + candles.metric(setting.kind, j - offset);
        }
        Self { setting, offset, total, trailing: from }
    }

    /// Comparison threshold for scan index `i`.
    ///
    /// `factor * (period != 0 ? total / period : metric(i - offset))`, halved
    /// for `Shadows` because that metric sums two shadows per bar.
    pub fn average(&self, candles: &Candles<'_, T>, i: usize) -> T {
        let base = if self.setting.period != 0 {
            self.total / T::from_period(self.setting.period)
        } else {
            candles.metric(self.setting.kind, i - self.offset)
        };
        let scaled = T::lit(self.setting.factor) * base;
        if self.setting.kind == RangeKind::Shadows {
            scaled / T::lit(2.0)
        } else {
            scaled
        }
    }

    /// Slide the window one bar forward, after the code for scan index `i`
    /// has been written. Adds the bar entering the window and subtracts the
    /// bar leaving it; the two must stay in lockstep or the invariant above
    /// is silently violated for every later bar.
    pub fn advance(&mut self, candles: &Candles<'_, T>, i: usize) {
        self.total = self.total + candles.metric(self.setting.kind, i - self.offset)
            - candles.metric(self.setting.kind, self.trailing - self.offset);
        self.trailing += 1;
    }
}
