//! Two-candle pattern classifiers.
//!
//! TA-Lib compatible codes: CDLENGULFING, CDLHARAMI, CDLHARAMICROSS,
//! CDLPIERCING, CDLDARKCLOUDCOVER, CDLDOJISTAR, CDLCOUNTERATTACK, CDLINNECK,
//! CDLONNECK, CDLTHRUSTING, CDLKICKING, CDLKICKINGBYLENGTH, CDLMATCHINGLOW,
//! CDLHOMINGPIGEON, CDLSEPARATINGLINES, CDLGAPSIDESIDEWHITE.
//!
//! Averages that describe the first candle of a template carry offset 1
//! (their window ends just before bar `i - 1`); averages describing the
//! decisive bar carry offset 0.

use std::ops::Range;

use crate::average::CandleAverage;
use crate::settings::CandleSettings;
use crate::{
    check_ratio, resolve_scan, Candles, OutputRange, PatternClassifier, PatternId, Result,
    SeriesElement,
};

// ============================================================
// ENGULFING / HARAMI
// ============================================================

/// CDL_ENGULFING - second real body wraps the first, opposite colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngulfingClassifier;

impl PatternClassifier for EngulfingClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_ENGULFING")
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
            let curr = c.color(i);
            let prev = c.color(i - 1);
            // One body end may touch the other body exactly; the other must
            // clear it strictly.
            let bullish = curr.is_white()
                && prev.is_black()
                && ((c.close(i) >= c.open(i - 1) && c.open(i) < c.close(i - 1))
                    || (c.close(i) > c.open(i - 1) && c.open(i) <= c.close(i - 1)));
            let bearish = curr.is_black()
                && prev.is_white()
                && ((c.open(i) >= c.close(i - 1) && c.close(i) < c.open(i - 1))
                    || (c.open(i) > c.close(i - 1) && c.close(i) <= c.open(i - 1)));
            out[i] = if bullish {
                100
            } else if bearish {
                -100
            } else {
                0
            };
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_HARAMI - small second body strictly inside a long first body.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaramiClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for HaramiClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_HARAMI")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i - 1) > body_long.average(c, i)
                && c.real_body(i) <= body_short.average(c, i)
                && c.body_top(i) < c.body_top(i - 1)
                && c.body_bottom(i) > c.body_bottom(i - 1);
            out[i] = if matched {
                -c.color(i - 1).sign() * 100
            } else {
                0
            };
            body_long.advance(c, i);
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_HARAMICROSS - harami whose second candle is a doji.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaramiCrossClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for HaramiCrossClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_HARAMICROSS")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i - 1) > body_long.average(c, i)
                && c.real_body(i) <= body_doji.average(c, i)
                && c.body_top(i) < c.body_top(i - 1)
                && c.body_bottom(i) > c.body_bottom(i - 1);
            out[i] = if matched {
                -c.color(i - 1).sign() * 100
            } else {
                0
            };
            body_long.advance(c, i);
            body_doji.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// PIERCING / DARK CLOUD
// ============================================================

/// CDL_PIERCING - long white opens under the prior low and closes above the
/// midpoint of a long black body.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiercingClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for PiercingClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_PIERCING")
    }

    fn lookback(&self) -> usize {
        self.settings.body_long.period + 1
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

        let half = T::lit(0.5);
        let mut body_long_1 = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_long_0 = CandleAverage::primed(self.settings.body_long, 0, c, first);
        for i in first..range.end {
            let matched = c.color(i - 1).is_black()
                && c.real_body(i - 1) > body_long_1.average(c, i)
                && c.color(i).is_white()
                && c.real_body(i) > body_long_0.average(c, i)
                && c.open(i) < c.low(i - 1)
                && c.close(i) < c.open(i - 1)
                && c.close(i) > c.close(i - 1) + c.real_body(i - 1) * half;
            out[i] = if matched { 100 } else { 0 };
            body_long_1.advance(c, i);
            body_long_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_DARKCLOUDCOVER - black candle opens above the prior high and closes
/// deep into a long white body.
#[derive(Debug, Clone, Copy)]
pub struct DarkCloudCoverClassifier {
    pub settings: CandleSettings,
    /// How far the close must penetrate the prior body, as a fraction of it.
    pub penetration: f64,
}

impl Default for DarkCloudCoverClassifier {
    fn default() -> Self {
        Self {
            settings: CandleSettings::default(),
            penetration: 0.5,
        }
    }
}

impl PatternClassifier for DarkCloudCoverClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_DARKCLOUDCOVER")
    }

    fn lookback(&self) -> usize {
        self.settings.body_long.period + 1
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
        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        for i in first..range.end {
            let matched = c.color(i - 1).is_white()
                && c.real_body(i - 1) > body_long.average(c, i)
                && c.color(i).is_black()
                && c.open(i) > c.high(i - 1)
                && c.close(i) > c.open(i - 1)
                && c.close(i) < c.close(i - 1) - c.real_body(i - 1) * penetration;
            out[i] = if matched { -100 } else { 0 };
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// STARS / COUNTERATTACK
// ============================================================

/// CDL_DOJISTAR - doji gapping away from a long body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DojiStarClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for DojiStarClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_DOJISTAR")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        for i in first..range.end {
            let gap_away = if c.color(i - 1).is_white() {
                c.body_gap_up(i, i - 1)
            } else {
                c.body_gap_down(i, i - 1)
            };
            let matched = c.real_body(i - 1) > body_long.average(c, i)
                && c.real_body(i) <= body_doji.average(c, i)
                && gap_away;
            out[i] = if matched {
                -c.color(i - 1).sign() * 100
            } else {
                0
            };
            body_long.advance(c, i);
            body_doji.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_COUNTERATTACK - opposite long candles closing at the same level.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterattackClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for CounterattackClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_COUNTERATTACK")
    }

    fn lookback(&self) -> usize {
        self.settings
            .equal
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let mut equal = CandleAverage::primed(self.settings.equal, 1, c, first);
        let mut body_long_1 = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_long_0 = CandleAverage::primed(self.settings.body_long, 0, c, first);
        for i in first..range.end {
            let band = equal.average(c, i);
            // equality is a fuzz band: both directions tested on purpose
            let matched = c.color(i) == c.color(i - 1).flip()
                && c.real_body(i - 1) > body_long_1.average(c, i)
                && c.real_body(i) > body_long_0.average(c, i)
                && c.close(i) <= c.close(i - 1) + band
                && c.close(i) >= c.close(i - 1) - band;
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            equal.advance(c, i);
            body_long_1.advance(c, i);
            body_long_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// NECK LINES / THRUSTING
// ============================================================

/// CDL_INNECK - white candle closing just inside the prior black close.
#[derive(Debug, Clone, Copy, Default)]
pub struct InNeckClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for InNeckClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_INNECK")
    }

    fn lookback(&self) -> usize {
        self.settings
            .equal
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let mut equal = CandleAverage::primed(self.settings.equal, 1, c, first);
        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        for i in first..range.end {
            let matched = c.color(i - 1).is_black()
                && c.real_body(i - 1) > body_long.average(c, i)
                && c.color(i).is_white()
                && c.open(i) < c.low(i - 1)
                && c.close(i) <= c.close(i - 1) + equal.average(c, i)
                && c.close(i) >= c.close(i - 1);
            out[i] = if matched { -100 } else { 0 };
            equal.advance(c, i);
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_ONNECK - white candle closing at the prior black low.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnNeckClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for OnNeckClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_ONNECK")
    }

    fn lookback(&self) -> usize {
        self.settings
            .equal
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let mut equal = CandleAverage::primed(self.settings.equal, 1, c, first);
        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        for i in first..range.end {
            let band = equal.average(c, i);
            let matched = c.color(i - 1).is_black()
                && c.real_body(i - 1) > body_long.average(c, i)
                && c.color(i).is_white()
                && c.open(i) < c.low(i - 1)
                && c.close(i) <= c.low(i - 1) + band
                && c.close(i) >= c.low(i - 1) - band;
            out[i] = if matched { -100 } else { 0 };
            equal.advance(c, i);
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_THRUSTING - white candle closing above the prior close but under the
/// midpoint of the black body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrustingClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ThrustingClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_THRUSTING")
    }

    fn lookback(&self) -> usize {
        self.settings
            .equal
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let half = T::lit(0.5);
        let mut equal = CandleAverage::primed(self.settings.equal, 1, c, first);
        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        for i in first..range.end {
            let matched = c.color(i - 1).is_black()
                && c.real_body(i - 1) > body_long.average(c, i)
                && c.color(i).is_white()
                && c.open(i) < c.low(i - 1)
                && c.close(i) > c.close(i - 1) + equal.average(c, i)
                && c.close(i) <= c.close(i - 1) + c.real_body(i - 1) * half;
            out[i] = if matched { -100 } else { 0 };
            equal.advance(c, i);
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// KICKING
// ============================================================

/// CDL_KICKING - two opposite marubozu separated by a gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct KickingClassifier {
    pub settings: CandleSettings,
}

fn kicking_matches<T: SeriesElement>(
    c: &Candles<'_, T>,
    i: usize,
    body_long_1: &CandleAverage<T>,
    body_long_0: &CandleAverage<T>,
    shadow_vs_1: &CandleAverage<T>,
    shadow_vs_0: &CandleAverage<T>,
) -> bool {
    let vs1 = shadow_vs_1.average(c, i);
    let vs0 = shadow_vs_0.average(c, i);
    let gap = if c.color(i - 1).is_black() {
        c.gap_up(i, i - 1)
    } else {
        c.gap_down(i, i - 1)
    };
    c.color(i) == c.color(i - 1).flip()
        && c.real_body(i - 1) > body_long_1.average(c, i)
        && c.upper_shadow(i - 1) < vs1
        && c.lower_shadow(i - 1) < vs1
        && c.real_body(i) > body_long_0.average(c, i)
        && c.upper_shadow(i) < vs0
        && c.lower_shadow(i) < vs0
        && gap
}

impl PatternClassifier for KickingClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_KICKING")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_long
            .period
            .max(self.settings.shadow_very_short.period)
            + 1
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

        let mut body_long_1 = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_long_0 = CandleAverage::primed(self.settings.body_long, 0, c, first);
        let mut shadow_vs_1 = CandleAverage::primed(self.settings.shadow_very_short, 1, c, first);
        let mut shadow_vs_0 = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let matched =
                kicking_matches(c, i, &body_long_1, &body_long_0, &shadow_vs_1, &shadow_vs_0);
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_long_1.advance(c, i);
            body_long_0.advance(c, i);
            shadow_vs_1.advance(c, i);
            shadow_vs_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_KICKINGBYLENGTH - kicking, direction taken from the longer marubozu.
#[derive(Debug, Clone, Copy, Default)]
pub struct KickingByLengthClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for KickingByLengthClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_KICKINGBYLENGTH")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_long
            .period
            .max(self.settings.shadow_very_short.period)
            + 1
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

        let mut body_long_1 = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_long_0 = CandleAverage::primed(self.settings.body_long, 0, c, first);
        let mut shadow_vs_1 = CandleAverage::primed(self.settings.shadow_very_short, 1, c, first);
        let mut shadow_vs_0 = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let matched =
                kicking_matches(c, i, &body_long_1, &body_long_0, &shadow_vs_1, &shadow_vs_0);
            out[i] = if matched {
                let longer = if c.real_body(i) > c.real_body(i - 1) {
                    i
                } else {
                    i - 1
                };
                c.color(longer).sign() * 100
            } else {
                0
            };
            body_long_1.advance(c, i);
            body_long_0.advance(c, i);
            shadow_vs_1.advance(c, i);
            shadow_vs_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// SUPPORT / CONTINUATION
// ============================================================

/// CDL_MATCHINGLOW - two black candles closing at the same level.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingLowClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for MatchingLowClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_MATCHINGLOW")
    }

    fn lookback(&self) -> usize {
        self.settings.equal.period + 1
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

        let mut equal = CandleAverage::primed(self.settings.equal, 1, c, first);
        for i in first..range.end {
            let band = equal.average(c, i);
            let matched = c.color(i - 1).is_black()
                && c.color(i).is_black()
                && c.close(i) <= c.close(i - 1) + band
                && c.close(i) >= c.close(i - 1) - band;
            out[i] = if matched { 100 } else { 0 };
            equal.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_HOMINGPIGEON - small black body inside a long black body.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomingPigeonClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for HomingPigeonClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_HOMINGPIGEON")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 1
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.color(i - 1).is_black()
                && c.color(i).is_black()
                && c.real_body(i - 1) > body_long.average(c, i)
                && c.real_body(i) < body_short.average(c, i)
                && c.open(i) < c.open(i - 1)
                && c.close(i) > c.close(i - 1);
            out[i] = if matched { 100 } else { 0 };
            body_long.advance(c, i);
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_SEPARATINGLINES - opposite candles opening at the same level, the
/// second a belt hold resuming the trend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatingLinesClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for SeparatingLinesClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_SEPARATINGLINES")
    }

    fn lookback(&self) -> usize {
        self.settings
            .shadow_very_short
            .period
            .max(self.settings.body_long.period)
            .max(self.settings.equal.period)
            + 1
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

        let mut equal = CandleAverage::primed(self.settings.equal, 1, c, first);
        let mut body_long = CandleAverage::primed(self.settings.body_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let band = equal.average(c, i);
            let opening_shadow = if c.color(i).is_white() {
                c.lower_shadow(i)
            } else {
                c.upper_shadow(i)
            };
            let matched = c.color(i) == c.color(i - 1).flip()
                && c.open(i) <= c.open(i - 1) + band
                && c.open(i) >= c.open(i - 1) - band
                && c.real_body(i) > body_long.average(c, i)
                && opening_shadow < shadow_vs.average(c, i);
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            equal.advance(c, i);
            body_long.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_GAPSIDESIDEWHITE - two white candles of matching size gapping to the
/// same side of an earlier body.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapSideSideWhiteClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for GapSideSideWhiteClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_GAPSIDESIDEWHITE")
    }

    fn lookback(&self) -> usize {
        self.settings.near.period.max(self.settings.equal.period) + 2
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

        let mut near = CandleAverage::primed(self.settings.near, 1, c, first);
        let mut equal = CandleAverage::primed(self.settings.equal, 1, c, first);
        for i in first..range.end {
            let up = c.body_gap_up(i - 1, i - 2) && c.body_gap_up(i, i - 2);
            let down = c.body_gap_down(i - 1, i - 2) && c.body_gap_down(i, i - 2);
            let near_band = near.average(c, i);
            let equal_band = equal.average(c, i);
            let matched = (up || down)
                && c.color(i - 1).is_white()
                && c.color(i).is_white()
                && c.real_body(i) >= c.real_body(i - 1) - near_band
                && c.real_body(i) <= c.real_body(i - 1) + near_band
                && c.open(i) >= c.open(i - 1) - equal_band
                && c.open(i) <= c.open(i - 1) + equal_band;
            out[i] = if matched {
                if up {
                    100
                } else {
                    -100
                }
            } else {
                0
            };
            near.advance(c, i);
            equal.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}
