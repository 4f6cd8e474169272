//! Four- and five-candle pattern classifiers.
//!
//! TA-Lib compatible codes: CDLBREAKAWAY, CDLCONCEALBABYSWALL, CDLHIKKAKE,
//! CDLLADDERBOTTOM, CDLMATHOLD, CDLRISEFALL3METHODS, CDLXSIDEGAP3METHODS.
//!
//! Hikkake is the one classifier whose scan carries state between steps (the
//! index of the last unconfirmed setup); the state lives on the stack of a
//! single call and never crosses calls. Its confirmation bar emits the same
//! ±100 as the setup bar, keeping the universal code domain.

use std::ops::Range;

use crate::average::CandleAverage;
use crate::settings::CandleSettings;
use crate::{
    check_ratio, resolve_scan, CandleColor, Candles, OutputRange, PatternClassifier, PatternId,
    Result, SeriesElement,
};

/// CDL_BREAKAWAY - acceleration away from a long candle over three bars,
/// then a reversal closing inside the opening gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakawayClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for BreakawayClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_BREAKAWAY")
    }

    fn lookback(&self) -> usize {
        self.settings.body_long.period + 4
    }

    fn classify<T: SeriesElement>(
        &self,
        c: &Candles<'_, T>,
        range: Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange> {
        let Some(first) = resolve_scan(self, c, &range, out.len())? else {
            return Ok(OutputRange::empty());
        };

        let mut body_long = CandleAverage::primed(self.settings.body_long, 4, c, first);
        for i in first..range.end {
            let aligned = c.real_body(i - 4) > body_long.average(c, i)
                && c.color(i - 4) == c.color(i - 3)
                && c.color(i - 3) == c.color(i - 1)
                && c.color(i - 1) == c.color(i).flip();
            let bullish = aligned
                && c.color(i - 4).is_black()
                && c.body_gap_down(i - 3, i - 4)
                && c.high(i - 2) < c.high(i - 3)
                && c.low(i - 2) < c.low(i - 3)
                && c.high(i - 1) < c.high(i - 2)
                && c.low(i - 1) < c.low(i - 2)
                && c.close(i) > c.open(i - 3)
                && c.close(i) < c.close(i - 4);
            let bearish = aligned
                && c.color(i - 4).is_white()
                && c.body_gap_up(i - 3, i - 4)
                && c.high(i - 2) > c.high(i - 3)
                && c.low(i - 2) > c.low(i - 3)
                && c.high(i - 1) > c.high(i - 2)
                && c.low(i - 1) > c.low(i - 2)
                && c.close(i) < c.open(i - 3)
                && c.close(i) > c.close(i - 4);
            out[i] = if bullish {
                100
            } else if bearish {
                -100
            } else {
                0
            };
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_CONCEALBABYSWALL - four black candles; two marubozu, a gapped-down
/// bar probing upward, then a full engulfment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcealingBabySwallowClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ConcealingBabySwallowClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_CONCEALBABYSWALL")
    }

    fn lookback(&self) -> usize {
        self.settings.shadow_very_short.period + 3
    }

    fn classify<T: SeriesElement>(
        &self,
        c: &Candles<'_, T>,
        range: Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange> {
        let Some(first) = resolve_scan(self, c, &range, out.len())? else {
            return Ok(OutputRange::empty());
        };

        let svs = self.settings.shadow_very_short;
        let mut shadow_vs_3 = CandleAverage::primed(svs, 3, c, first);
        let mut shadow_vs_2 = CandleAverage::primed(svs, 2, c, first);
        let mut shadow_vs_1 = CandleAverage::primed(svs, 1, c, first);
        for i in first..range.end {
            let vs3 = shadow_vs_3.average(c, i);
            let vs2 = shadow_vs_2.average(c, i);
            let matched = c.color(i - 3).is_black()
                && c.color(i - 2).is_black()
                && c.color(i - 1).is_black()
                && c.color(i).is_black()
                && c.lower_shadow(i - 3) < vs3
                && c.upper_shadow(i - 3) < vs3
                && c.lower_shadow(i - 2) < vs2
                && c.upper_shadow(i - 2) < vs2
                && c.body_gap_down(i - 1, i - 2)
                && c.upper_shadow(i - 1) > shadow_vs_1.average(c, i)
                && c.high(i - 1) > c.close(i - 2)
                && c.high(i) > c.high(i - 1)
                && c.low(i) < c.low(i - 1);
            out[i] = if matched { 100 } else { 0 };
            shadow_vs_3.advance(c, i);
            shadow_vs_2.advance(c, i);
            shadow_vs_1.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_HIKKAKE - inside bar, false breakout, and an optional confirmation
/// within the next three bars.
#[derive(Debug, Clone, Copy, Default)]
pub struct HikkakeClassifier;

impl HikkakeClassifier {
    /// Inside bar at `i - 1` and a directional fake-out at `i`.
    fn setup_at<T: SeriesElement>(c: &Candles<'_, T>, i: usize) -> Option<i32> {
        let inside = c.high(i - 1) < c.high(i - 2) && c.low(i - 1) > c.low(i - 2);
        if !inside {
            return None;
        }
        if c.high(i) < c.high(i - 1) && c.low(i) < c.low(i - 1) {
            Some(100)
        } else if c.high(i) > c.high(i - 1) && c.low(i) > c.low(i - 1) {
            Some(-100)
        } else {
            None
        }
    }
}

impl PatternClassifier for HikkakeClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_HIKKAKE")
    }

    fn lookback(&self) -> usize {
        5
    }

    fn classify<T: SeriesElement>(
        &self,
        c: &Candles<'_, T>,
        range: Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange> {
        let Some(first) = resolve_scan(self, c, &range, out.len())? else {
            return Ok(OutputRange::empty());
        };

        // Re-detect any setup among the three bars before the scan so a
        // confirmation landing inside the range is not missed.
        let mut setup: Option<(usize, i32)> = None;
        for i in (first - 3)..first {
            if let Some(result) = Self::setup_at(c, i) {
                setup = Some((i, result));
            }
        }

        for i in first..range.end {
            if let Some(result) = Self::setup_at(c, i) {
                setup = Some((i, result));
                out[i] = result;
                continue;
            }
            out[i] = match setup {
                Some((idx, result)) if i <= idx + 3 => {
                    let confirmed = (result > 0 && c.close(i) > c.high(idx - 1))
                        || (result < 0 && c.close(i) < c.low(idx - 1));
                    if confirmed {
                        setup = None;
                        result
                    } else {
                        0
                    }
                }
                _ => 0,
            };
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_LADDERBOTTOM - three declining black candles, a black bar with an
/// upper shadow, then a white bar closing above it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LadderBottomClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for LadderBottomClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_LADDERBOTTOM")
    }

    fn lookback(&self) -> usize {
        self.settings.shadow_very_short.period + 4
    }

    fn classify<T: SeriesElement>(
        &self,
        c: &Candles<'_, T>,
        range: Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange> {
        let Some(first) = resolve_scan(self, c, &range, out.len())? else {
            return Ok(OutputRange::empty());
        };

        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 1, c, first);
        for i in first..range.end {
            let matched = c.color(i - 4).is_black()
                && c.color(i - 3).is_black()
                && c.color(i - 2).is_black()
                && c.open(i - 4) > c.open(i - 3)
                && c.open(i - 3) > c.open(i - 2)
                && c.close(i - 4) > c.close(i - 3)
                && c.close(i - 3) > c.close(i - 2)
                && c.color(i - 1).is_black()
                && c.upper_shadow(i - 1) > shadow_vs.average(c, i)
                && c.color(i).is_white()
                && c.open(i) > c.open(i - 1)
                && c.close(i) > c.high(i - 1);
            out[i] = if matched { 100 } else { 0 };
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_MATHOLD - long white, a gapped cluster of small correcting candles
/// held above the penetration floor, then a breakout close.
#[derive(Debug, Clone, Copy)]
pub struct MatHoldClassifier {
    pub settings: CandleSettings,
    /// How deep the correction may cut into the first body.
    pub penetration: f64,
}

impl Default for MatHoldClassifier {
    fn default() -> Self {
        Self {
            settings: CandleSettings::default(),
            penetration: 0.5,
        }
    }
}

impl PatternClassifier for MatHoldClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_MATHOLD")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 4
    }

    fn validate_params(&self) -> Result<()> {
        check_ratio("penetration", self.penetration)
    }

    fn classify<T: SeriesElement>(
        &self,
        c: &Candles<'_, T>,
        range: Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange> {
        let Some(first) = resolve_scan(self, c, &range, out.len())? else {
            return Ok(OutputRange::empty());
        };

        let penetration = T::lit(self.penetration);
        let mut body_long = CandleAverage::primed(self.settings.body_long, 4, c, first);
        let mut body_short_3 = CandleAverage::primed(self.settings.body_short, 3, c, first);
        let mut body_short_2 = CandleAverage::primed(self.settings.body_short, 2, c, first);
        let mut body_short_1 = CandleAverage::primed(self.settings.body_short, 1, c, first);
        for i in first..range.end {
            let floor = c.close(i - 4) - c.real_body(i - 4) * penetration;
            let matched = c.real_body(i - 4) > body_long.average(c, i)
                && c.real_body(i - 3) < body_short_3.average(c, i)
                && c.real_body(i - 2) < body_short_2.average(c, i)
                && c.real_body(i - 1) < body_short_1.average(c, i)
                && c.color(i - 4).is_white()
                && c.color(i - 3).is_black()
                && c.body_gap_up(i - 3, i - 4)
                && c.body_bottom(i - 2) < c.close(i - 4)
                && c.body_bottom(i - 1) < c.close(i - 4)
                && c.body_bottom(i - 2) > floor
                && c.body_bottom(i - 1) > floor
                && c.body_top(i - 2) < c.open(i - 3)
                && c.body_top(i - 1) < c.body_top(i - 2)
                && c.open(i) > c.close(i - 1)
                && c.close(i) > c.high(i - 3).max(c.high(i - 2)).max(c.high(i - 1));
            out[i] = if matched { 100 } else { 0 };
            body_long.advance(c, i);
            body_short_3.advance(c, i);
            body_short_2.advance(c, i);
            body_short_1.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_RISEFALL3METHODS - long candle, three small counter-trend candles
/// held inside its range, then a long resumption candle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiseFallThreeMethodsClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for RiseFallThreeMethodsClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_RISEFALL3METHODS")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 4
    }

    fn classify<T: SeriesElement>(
        &self,
        c: &Candles<'_, T>,
        range: Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange> {
        let Some(first) = resolve_scan(self, c, &range, out.len())? else {
            return Ok(OutputRange::empty());
        };

        let mut body_long_4 = CandleAverage::primed(self.settings.body_long, 4, c, first);
        let mut body_short_3 = CandleAverage::primed(self.settings.body_short, 3, c, first);
        let mut body_short_2 = CandleAverage::primed(self.settings.body_short, 2, c, first);
        let mut body_short_1 = CandleAverage::primed(self.settings.body_short, 1, c, first);
        let mut body_long_0 = CandleAverage::primed(self.settings.body_long, 0, c, first);
        for i in first..range.end {
            let contained = c.low(i - 3).min(c.low(i - 2)).min(c.low(i - 1)) > c.low(i - 4)
                && c.high(i - 3).max(c.high(i - 2)).max(c.high(i - 1)) < c.high(i - 4);
            let sized = c.real_body(i - 4) > body_long_4.average(c, i)
                && c.real_body(i - 3) < body_short_3.average(c, i)
                && c.real_body(i - 2) < body_short_2.average(c, i)
                && c.real_body(i - 1) < body_short_1.average(c, i)
                && c.real_body(i) > body_long_0.average(c, i);
            let colored = c.color(i - 3) == c.color(i - 4).flip()
                && c.color(i - 2) == c.color(i - 3)
                && c.color(i - 1) == c.color(i - 2)
                && c.color(i) == c.color(i - 1).flip();
            let resumed = match c.color(i - 4) {
                CandleColor::White => c.close(i) > c.close(i - 4) && c.open(i) > c.close(i - 1),
                CandleColor::Black => c.close(i) < c.close(i - 4) && c.open(i) < c.close(i - 1),
            };
            out[i] = if contained && sized && colored && resumed {
                c.color(i - 4).sign() * 100
            } else {
                0
            };
            body_long_4.advance(c, i);
            body_short_3.advance(c, i);
            body_short_2.advance(c, i);
            body_short_1.advance(c, i);
            body_long_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_XSIDEGAP3METHODS - a gap between two same-color candles closed by an
/// opposite candle ending inside the first body.
#[derive(Debug, Clone, Copy, Default)]
pub struct XSideGapThreeMethodsClassifier;

impl PatternClassifier for XSideGapThreeMethodsClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_XSIDEGAP3METHODS")
    }

    fn lookback(&self) -> usize {
        2
    }

    fn classify<T: SeriesElement>(
        &self,
        c: &Candles<'_, T>,
        range: Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange> {
        let Some(first) = resolve_scan(self, c, &range, out.len())? else {
            return Ok(OutputRange::empty());
        };

        for i in first..range.end {
            let matched = c.color(i - 2) == c.color(i - 1)
                && c.color(i) == c.color(i - 1).flip()
                && c.open(i) < c.body_top(i - 1)
                && c.open(i) > c.body_bottom(i - 1)
                && c.close(i) < c.body_top(i - 2)
                && c.close(i) > c.body_bottom(i - 2)
                && ((c.color(i - 2).is_white() && c.body_gap_up(i - 1, i - 2))
                    || (c.color(i - 2).is_black() && c.body_gap_down(i - 1, i - 2)));
            out[i] = if matched {
                c.color(i - 2).sign() * 100
            } else {
                0
            };
        }
        Ok(OutputRange::new(first, range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candles;

    fn context_bars_n(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let open = vec![100.0; n];
        let close = vec![101.0; n];
        let high = vec![102.5; n];
        let low = vec![98.5; n];
        (open, high, low, close)
    }

    fn push_bar(
        s: &mut (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>),
        o: f64,
        h: f64,
        l: f64,
        cl: f64,
    ) {
        s.0.push(o);
        s.1.push(h);
        s.2.push(l);
        s.3.push(cl);
    }

    fn classify_all(
        classifier: &impl PatternClassifier,
        s: &(Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>),
    ) -> Vec<i32> {
        let candles = Candles::new(&s.0, &s.1, &s.2, &s.3).unwrap();
        let mut out = vec![0i32; candles.len()];
        let range = classifier
            .classify(&candles, 0..candles.len(), &mut out)
            .unwrap();
        assert_eq!(range.end, candles.len());
        out
    }

    fn classify_last(
        classifier: &impl PatternClassifier,
        s: &(Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>),
    ) -> i32 {
        *classify_all(classifier, s).last().unwrap()
    }

    #[test]
    fn test_breakaway_bullish() {
        let mut s = context_bars_n(14);
        push_bar(&mut s, 103.0, 103.2, 99.3, 99.5); // long black
        push_bar(&mut s, 99.0, 99.2, 98.2, 98.4); // gaps down
        push_bar(&mut s, 98.5, 98.8, 97.8, 98.0); // drifting lower
        push_bar(&mut s, 98.2, 98.4, 97.4, 97.6);
        push_bar(&mut s, 97.5, 99.4, 97.4, 99.2); // white closing inside the gap
        assert_eq!(classify_last(&BreakawayClassifier::default(), &s), 100);
    }

    #[test]
    fn test_concealing_baby_swallow() {
        let mut s = context_bars_n(13);
        push_bar(&mut s, 103.0, 103.0, 100.0, 100.0); // black marubozu
        push_bar(&mut s, 100.0, 100.0, 97.0, 97.0); // black marubozu
        push_bar(&mut s, 96.5, 97.5, 95.9, 96.0); // gapped down, probes upward
        push_bar(&mut s, 98.0, 98.2, 95.4, 95.5); // engulfs the probe entirely
        assert_eq!(
            classify_last(&ConcealingBabySwallowClassifier::default(), &s),
            100
        );
    }

    #[test]
    fn test_hikkake_setup_and_confirmation() {
        let mut s = context_bars_n(6);
        push_bar(&mut s, 100.0, 103.0, 98.0, 101.0); // wide bar
        push_bar(&mut s, 100.5, 102.0, 99.0, 100.8); // inside bar
        push_bar(&mut s, 100.0, 101.5, 98.5, 99.5); // fake-out lower
        push_bar(&mut s, 100.0, 102.8, 99.8, 102.5); // closes above the inside high
        let out = classify_all(&HikkakeClassifier, &s);
        assert_eq!(out[8], 100); // setup bar
        assert_eq!(out[9], 100); // confirmation bar
    }

    #[test]
    fn test_hikkake_unconfirmed_stays_zero() {
        let mut s = context_bars_n(6);
        push_bar(&mut s, 100.0, 103.0, 98.0, 101.0);
        push_bar(&mut s, 100.5, 102.0, 99.0, 100.8);
        push_bar(&mut s, 100.0, 101.5, 98.5, 99.5); // setup
        push_bar(&mut s, 99.8, 101.8, 98.7, 100.5); // never breaks the inside high
        let out = classify_all(&HikkakeClassifier, &s);
        assert_eq!(out[8], 100);
        assert_eq!(out[9], 0);
    }

    #[test]
    fn test_ladder_bottom() {
        let mut s = context_bars_n(14);
        push_bar(&mut s, 103.0, 103.1, 100.4, 100.5);
        push_bar(&mut s, 102.0, 102.1, 99.4, 99.5);
        push_bar(&mut s, 101.0, 101.1, 98.4, 98.5);
        push_bar(&mut s, 100.0, 101.5, 97.9, 98.0); // upper shadow appears
        push_bar(&mut s, 100.5, 102.2, 100.4, 102.0); // white closes above it
        assert_eq!(classify_last(&LadderBottomClassifier::default(), &s), 100);
    }

    #[test]
    fn test_mat_hold() {
        let mut s = context_bars_n(14);
        push_bar(&mut s, 100.0, 103.2, 99.8, 103.0); // long white
        push_bar(&mut s, 103.8, 103.9, 103.2, 103.3); // black above the gap
        push_bar(&mut s, 103.1, 103.2, 102.3, 102.4); // small correction
        push_bar(&mut s, 102.9, 103.0, 102.1, 102.2); // held above the floor
        push_bar(&mut s, 102.5, 104.6, 102.4, 104.5); // breakout close
        assert_eq!(classify_last(&MatHoldClassifier::default(), &s), 100);
    }

    #[test]
    fn test_rising_three_methods() {
        let mut s = context_bars_n(14);
        push_bar(&mut s, 100.0, 103.5, 99.8, 103.0); // long white
        push_bar(&mut s, 102.8, 102.9, 101.9, 102.0); // three small blacks inside
        push_bar(&mut s, 102.2, 102.3, 101.3, 101.4);
        push_bar(&mut s, 101.6, 101.7, 100.7, 100.8);
        push_bar(&mut s, 101.0, 104.2, 100.9, 104.0); // long white resumption
        assert_eq!(
            classify_last(&RiseFallThreeMethodsClassifier::default(), &s),
            100
        );
    }

    #[test]
    fn test_upside_gap_three_methods() {
        let mut s = context_bars_n(4);
        push_bar(&mut s, 100.0, 101.7, 99.8, 101.5); // white
        push_bar(&mut s, 102.0, 103.2, 101.9, 103.0); // white above the body gap
        push_bar(&mut s, 102.5, 102.7, 100.9, 101.0); // black closing the gap
        assert_eq!(
            classify_last(&XSideGapThreeMethodsClassifier, &s),
            100
        );
    }
}
