//! Three-candle pattern classifiers.
//!
//! TA-Lib compatible codes: CDL2CROWS, CDL3BLACKCROWS, CDL3INSIDE,
//! CDL3OUTSIDE, CDL3LINESTRIKE, CDL3STARSINSOUTH, CDL3WHITESOLDIERS,
//! CDLMORNINGSTAR, CDLEVENINGSTAR, CDLMORNINGDOJISTAR, CDLEVENINGDOJISTAR,
//! CDLABANDONEDBABY, CDLADVANCEBLOCK, CDLSTALLEDPATTERN, CDLSTICKSANDWICH,
//! CDLTASUKIGAP, CDLTRISTAR, CDLUNIQUE3RIVER, CDLUPSIDEGAP2CROWS,
//! CDLIDENTICAL3CROWS.
//!
//! Formations with per-position size checks keep one aggregate per template
//! position (offsets 2, 1, 0), exactly one advance per scan step each.

use std::ops::Range;

use crate::average::CandleAverage;
use crate::settings::CandleSettings;
use crate::{
    check_ratio, resolve_scan, Candles, OutputRange, PatternClassifier, PatternId, Result,
    SeriesElement,
};

// ============================================================
// CROWS
// ============================================================

/// CDL_2CROWS - two black candles eroding a long white one after a gap up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoCrowsClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for TwoCrowsClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_2CROWS")
    }

    fn lookback(&self) -> usize {
        self.settings.body_long.period + 2
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        for i in first..range.end {
            let matched = c.color(i - 2).is_white()
                && c.real_body(i - 2) > body_long.average(c, i)
                && c.color(i - 1).is_black()
                && c.body_gap_up(i - 1, i - 2)
                && c.color(i).is_black()
                && c.open(i) < c.open(i - 1)
                && c.open(i) > c.close(i - 1)
                && c.close(i) > c.open(i - 2)
                && c.close(i) < c.close(i - 2);
            out[i] = if matched { -100 } else { 0 };
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_3BLACKCROWS - three declining black candles closing at their lows,
/// each opening within the prior body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeBlackCrowsClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ThreeBlackCrowsClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_3BLACKCROWS")
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
        let mut shadow_vs_2 = CandleAverage::primed(svs, 2, c, first);
        let mut shadow_vs_1 = CandleAverage::primed(svs, 1, c, first);
        let mut shadow_vs_0 = CandleAverage::primed(svs, 0, c, first);
        for i in first..range.end {
            let matched = c.color(i - 3).is_white()
                && c.color(i - 2).is_black()
                && c.lower_shadow(i - 2) < shadow_vs_2.average(c, i)
                && c.color(i - 1).is_black()
                && c.lower_shadow(i - 1) < shadow_vs_1.average(c, i)
                && c.color(i).is_black()
                && c.lower_shadow(i) < shadow_vs_0.average(c, i)
                && c.open(i - 1) < c.open(i - 2)
                && c.open(i - 1) > c.close(i - 2)
                && c.open(i) < c.open(i - 1)
                && c.open(i) > c.close(i - 1)
                && c.high(i - 3) > c.close(i - 2)
                && c.close(i - 2) > c.close(i - 1)
                && c.close(i - 1) > c.close(i);
            out[i] = if matched { -100 } else { 0 };
            shadow_vs_2.advance(c, i);
            shadow_vs_1.advance(c, i);
            shadow_vs_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_IDENTICAL3CROWS - three black candles, each opening at the prior
/// close.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdenticalThreeCrowsClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for IdenticalThreeCrowsClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_IDENTICAL3CROWS")
    }

    fn lookback(&self) -> usize {
        self.settings
            .shadow_very_short
            .period
            .max(self.settings.equal.period)
            + 2
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
        let mut shadow_vs_2 = CandleAverage::primed(svs, 2, c, first);
        let mut shadow_vs_1 = CandleAverage::primed(svs, 1, c, first);
        let mut shadow_vs_0 = CandleAverage::primed(svs, 0, c, first);
        let mut equal_2 = CandleAverage::primed(self.settings.equal, 2, c, first);
        let mut equal_1 = CandleAverage::primed(self.settings.equal, 1, c, first);
        for i in first..range.end {
            let band_2 = equal_2.average(c, i);
            let band_1 = equal_1.average(c, i);
            let matched = c.color(i - 2).is_black()
                && c.lower_shadow(i - 2) < shadow_vs_2.average(c, i)
                && c.color(i - 1).is_black()
                && c.lower_shadow(i - 1) < shadow_vs_1.average(c, i)
                && c.color(i).is_black()
                && c.lower_shadow(i) < shadow_vs_0.average(c, i)
                && c.close(i - 2) > c.close(i - 1)
                && c.close(i - 1) > c.close(i)
                && c.open(i - 1) <= c.close(i - 2) + band_2
                && c.open(i - 1) >= c.close(i - 2) - band_2
                && c.open(i) <= c.close(i - 1) + band_1
                && c.open(i) >= c.close(i - 1) - band_1;
            out[i] = if matched { -100 } else { 0 };
            shadow_vs_2.advance(c, i);
            shadow_vs_1.advance(c, i);
            shadow_vs_0.advance(c, i);
            equal_2.advance(c, i);
            equal_1.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_UPSIDEGAP2CROWS - black candle gaps above a long white one, then a
/// second black engulfs it without closing the gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpsideGapTwoCrowsClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for UpsideGapTwoCrowsClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_UPSIDEGAP2CROWS")
    }

    fn lookback(&self) -> usize {
        self.settings.body_long.period + 2
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        for i in first..range.end {
            let matched = c.color(i - 2).is_white()
                && c.real_body(i - 2) > body_long.average(c, i)
                && c.color(i - 1).is_black()
                && c.body_gap_up(i - 1, i - 2)
                && c.color(i).is_black()
                && c.open(i) > c.open(i - 1)
                && c.close(i) < c.close(i - 1)
                && c.close(i) > c.close(i - 2);
            out[i] = if matched { -100 } else { 0 };
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// INSIDE / OUTSIDE
// ============================================================

/// CDL_3INSIDE - harami followed by a close beyond the first body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeInsideClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ThreeInsideClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_3INSIDE")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 2
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 1, c, first);
        for i in first..range.end {
            let harami = c.real_body(i - 2) > body_long.average(c, i)
                && c.real_body(i - 1) <= body_short.average(c, i)
                && c.body_top(i - 1) < c.body_top(i - 2)
                && c.body_bottom(i - 1) > c.body_bottom(i - 2);
            let confirmed = harami
                && ((c.color(i - 2).is_white()
                    && c.color(i).is_black()
                    && c.close(i) < c.open(i - 2))
                    || (c.color(i - 2).is_black()
                        && c.color(i).is_white()
                        && c.close(i) > c.open(i - 2)));
            out[i] = if confirmed {
                -c.color(i - 2).sign() * 100
            } else {
                0
            };
            body_long.advance(c, i);
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_3OUTSIDE - engulfing followed by a close beyond the second body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeOutsideClassifier;

impl PatternClassifier for ThreeOutsideClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_3OUTSIDE")
    }

    fn lookback(&self) -> usize {
        3
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
            let up = c.color(i - 1).is_white()
                && c.color(i - 2).is_black()
                && c.close(i - 1) > c.open(i - 2)
                && c.open(i - 1) < c.close(i - 2)
                && c.close(i) > c.close(i - 1);
            let down = c.color(i - 1).is_black()
                && c.color(i - 2).is_white()
                && c.open(i - 1) > c.close(i - 2)
                && c.close(i - 1) < c.open(i - 2)
                && c.close(i) < c.close(i - 1);
            out[i] = if up {
                100
            } else if down {
                -100
            } else {
                0
            };
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// LINE STRIKE
// ============================================================

/// CDL_3LINESTRIKE - three same-color candles, then an opposite candle
/// engulfing all three bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeLineStrikeClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ThreeLineStrikeClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_3LINESTRIKE")
    }

    fn lookback(&self) -> usize {
        self.settings.near.period + 3
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

        let mut near_3 = CandleAverage::primed(self.settings.near, 3, c, first);
        let mut near_2 = CandleAverage::primed(self.settings.near, 2, c, first);
        for i in first..range.end {
            let band_3 = near_3.average(c, i);
            let band_2 = near_2.average(c, i);
            let aligned = c.color(i - 3) == c.color(i - 2)
                && c.color(i - 2) == c.color(i - 1)
                && c.color(i) == c.color(i - 1).flip()
                && c.open(i - 2) >= c.body_bottom(i - 3) - band_3
                && c.open(i - 2) <= c.body_top(i - 3) + band_3
                && c.open(i - 1) >= c.body_bottom(i - 2) - band_2
                && c.open(i - 1) <= c.body_top(i - 2) + band_2;
            let struck = aligned
                && ((c.color(i - 1).is_white()
                    && c.close(i - 1) > c.close(i - 2)
                    && c.close(i - 2) > c.close(i - 3)
                    && c.open(i) > c.close(i - 1)
                    && c.close(i) < c.open(i - 3))
                    || (c.color(i - 1).is_black()
                        && c.close(i - 1) < c.close(i - 2)
                        && c.close(i - 2) < c.close(i - 3)
                        && c.open(i) < c.close(i - 1)
                        && c.close(i) > c.open(i - 3)));
            out[i] = if struck {
                c.color(i - 1).sign() * 100
            } else {
                0
            };
            near_3.advance(c, i);
            near_2.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// STARS
// ============================================================

/// CDL_MORNINGSTAR - long black, small body gapping down, long white
/// closing into the first body.
#[derive(Debug, Clone, Copy)]
pub struct MorningStarClassifier {
    pub settings: CandleSettings,
    /// Fraction of the first body the third close must recover.
    pub penetration: f64,
}

impl Default for MorningStarClassifier {
    fn default() -> Self {
        Self {
            settings: CandleSettings::default(),
            penetration: 0.3,
        }
    }
}

impl PatternClassifier for MorningStarClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_MORNINGSTAR")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 2
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
        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_short_1 = CandleAverage::primed(self.settings.body_short, 1, c, first);
        let mut body_short_0 = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i - 2) > body_long.average(c, i)
                && c.color(i - 2).is_black()
                && c.real_body(i - 1) <= body_short_1.average(c, i)
                && c.body_gap_down(i - 1, i - 2)
                && c.real_body(i) > body_short_0.average(c, i)
                && c.color(i).is_white()
                && c.close(i) > c.close(i - 2) + c.real_body(i - 2) * penetration;
            out[i] = if matched { 100 } else { 0 };
            body_long.advance(c, i);
            body_short_1.advance(c, i);
            body_short_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_EVENINGSTAR - mirror of the morning star; bearish.
#[derive(Debug, Clone, Copy)]
pub struct EveningStarClassifier {
    pub settings: CandleSettings,
    pub penetration: f64,
}

impl Default for EveningStarClassifier {
    fn default() -> Self {
        Self {
            settings: CandleSettings::default(),
            penetration: 0.3,
        }
    }
}

impl PatternClassifier for EveningStarClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_EVENINGSTAR")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 2
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
        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_short_1 = CandleAverage::primed(self.settings.body_short, 1, c, first);
        let mut body_short_0 = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i - 2) > body_long.average(c, i)
                && c.color(i - 2).is_white()
                && c.real_body(i - 1) <= body_short_1.average(c, i)
                && c.body_gap_up(i - 1, i - 2)
                && c.real_body(i) > body_short_0.average(c, i)
                && c.color(i).is_black()
                && c.close(i) < c.close(i - 2) - c.real_body(i - 2) * penetration;
            out[i] = if matched { -100 } else { 0 };
            body_long.advance(c, i);
            body_short_1.advance(c, i);
            body_short_0.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_MORNINGDOJISTAR - morning star whose middle candle is a doji.
#[derive(Debug, Clone, Copy)]
pub struct MorningDojiStarClassifier {
    pub settings: CandleSettings,
    pub penetration: f64,
}

impl Default for MorningDojiStarClassifier {
    fn default() -> Self {
        Self {
            settings: CandleSettings::default(),
            penetration: 0.3,
        }
    }
}

impl PatternClassifier for MorningDojiStarClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_MORNINGDOJISTAR")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.body_long.period)
            .max(self.settings.body_short.period)
            + 2
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
        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 1, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i - 2) > body_long.average(c, i)
                && c.color(i - 2).is_black()
                && c.real_body(i - 1) <= body_doji.average(c, i)
                && c.body_gap_down(i - 1, i - 2)
                && c.real_body(i) > body_short.average(c, i)
                && c.color(i).is_white()
                && c.close(i) > c.close(i - 2) + c.real_body(i - 2) * penetration;
            out[i] = if matched { 100 } else { 0 };
            body_long.advance(c, i);
            body_doji.advance(c, i);
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_EVENINGDOJISTAR - evening star whose middle candle is a doji.
#[derive(Debug, Clone, Copy)]
pub struct EveningDojiStarClassifier {
    pub settings: CandleSettings,
    pub penetration: f64,
}

impl Default for EveningDojiStarClassifier {
    fn default() -> Self {
        Self {
            settings: CandleSettings::default(),
            penetration: 0.3,
        }
    }
}

impl PatternClassifier for EveningDojiStarClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_EVENINGDOJISTAR")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.body_long.period)
            .max(self.settings.body_short.period)
            + 2
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
        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 1, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i - 2) > body_long.average(c, i)
                && c.color(i - 2).is_white()
                && c.real_body(i - 1) <= body_doji.average(c, i)
                && c.body_gap_up(i - 1, i - 2)
                && c.real_body(i) > body_short.average(c, i)
                && c.color(i).is_black()
                && c.close(i) < c.close(i - 2) - c.real_body(i - 2) * penetration;
            out[i] = if matched { -100 } else { 0 };
            body_long.advance(c, i);
            body_doji.advance(c, i);
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_ABANDONEDBABY - doji island separated from both neighbors by full
/// (shadow-inclusive) gaps.
#[derive(Debug, Clone, Copy)]
pub struct AbandonedBabyClassifier {
    pub settings: CandleSettings,
    pub penetration: f64,
}

impl Default for AbandonedBabyClassifier {
    fn default() -> Self {
        Self {
            settings: CandleSettings::default(),
            penetration: 0.3,
        }
    }
}

impl PatternClassifier for AbandonedBabyClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_ABANDONEDBABY")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.body_long.period)
            .max(self.settings.body_short.period)
            + 2
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
        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 1, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let sized = c.real_body(i - 2) > body_long.average(c, i)
                && c.real_body(i - 1) <= body_doji.average(c, i)
                && c.real_body(i) > body_short.average(c, i);
            let bullish = sized
                && c.color(i - 2).is_black()
                && c.color(i).is_white()
                && c.close(i) > c.close(i - 2) + c.real_body(i - 2) * penetration
                && c.gap_down(i - 1, i - 2)
                && c.gap_up(i, i - 1);
            let bearish = sized
                && c.color(i - 2).is_white()
                && c.color(i).is_black()
                && c.close(i) < c.close(i - 2) - c.real_body(i - 2) * penetration
                && c.gap_up(i - 1, i - 2)
                && c.gap_down(i, i - 1);
            out[i] = if bullish {
                100
            } else if bearish {
                -100
            } else {
                0
            };
            body_long.advance(c, i);
            body_doji.advance(c, i);
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// SOLDIERS / SOUTH / DELIBERATION
// ============================================================

/// CDL_3WHITESOLDIERS - three rising white candles with flat tops, each
/// opening within the prior body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeWhiteSoldiersClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ThreeWhiteSoldiersClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_3WHITESOLDIERS")
    }

    fn lookback(&self) -> usize {
        self.settings
            .shadow_very_short
            .period
            .max(self.settings.near.period)
            .max(self.settings.far.period)
            + 2
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
        let mut shadow_vs_2 = CandleAverage::primed(svs, 2, c, first);
        let mut shadow_vs_1 = CandleAverage::primed(svs, 1, c, first);
        let mut shadow_vs_0 = CandleAverage::primed(svs, 0, c, first);
        let mut near_2 = CandleAverage::primed(self.settings.near, 2, c, first);
        let mut near_1 = CandleAverage::primed(self.settings.near, 1, c, first);
        let mut far_2 = CandleAverage::primed(self.settings.far, 2, c, first);
        let mut far_1 = CandleAverage::primed(self.settings.far, 1, c, first);
        for i in first..range.end {
            let matched = c.color(i - 2).is_white()
                && c.upper_shadow(i - 2) < shadow_vs_2.average(c, i)
                && c.color(i - 1).is_white()
                && c.upper_shadow(i - 1) < shadow_vs_1.average(c, i)
                && c.color(i).is_white()
                && c.upper_shadow(i) < shadow_vs_0.average(c, i)
                && c.close(i) > c.close(i - 1)
                && c.close(i - 1) > c.close(i - 2)
                && c.open(i - 1) > c.open(i - 2)
                && c.open(i - 1) <= c.close(i - 2) + near_2.average(c, i)
                && c.open(i) > c.open(i - 1)
                && c.open(i) <= c.close(i - 1) + near_1.average(c, i)
                && c.real_body(i - 1) > c.real_body(i - 2) - far_2.average(c, i)
                && c.real_body(i) > c.real_body(i - 1) - far_1.average(c, i);
            out[i] = if matched { 100 } else { 0 };
            shadow_vs_2.advance(c, i);
            shadow_vs_1.advance(c, i);
            shadow_vs_0.advance(c, i);
            near_2.advance(c, i);
            near_1.advance(c, i);
            far_2.advance(c, i);
            far_1.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_3STARSINSOUTH - three black candles with shrinking bodies and lows,
/// the last a small marubozu inside the prior range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeStarsInSouthClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ThreeStarsInSouthClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_3STARSINSOUTH")
    }

    fn lookback(&self) -> usize {
        self.settings
            .shadow_very_short
            .period
            .max(self.settings.shadow_long.period)
            .max(self.settings.body_long.period)
            .max(self.settings.body_short.period)
            + 2
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut shadow_long = CandleAverage::primed(self.settings.shadow_long, 2, c, first);
        let mut shadow_vs_1 =
            CandleAverage::primed(self.settings.shadow_very_short, 1, c, first);
        let mut shadow_vs_0 =
            CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.color(i - 2).is_black()
                && c.color(i - 1).is_black()
                && c.color(i).is_black()
                && c.real_body(i - 2) > body_long.average(c, i)
                && c.lower_shadow(i - 2) > shadow_long.average(c, i)
                && c.real_body(i - 1) < c.real_body(i - 2)
                && c.open(i - 1) > c.close(i - 2)
                && c.open(i - 1) <= c.high(i - 2)
                && c.low(i - 1) < c.close(i - 2)
                && c.low(i - 1) >= c.low(i - 2)
                && c.lower_shadow(i - 1) > shadow_vs_1.average(c, i)
                && c.real_body(i) < body_short.average(c, i)
                && c.lower_shadow(i) < shadow_vs_0.average(c, i)
                && c.low(i) > c.low(i - 1)
                && c.high(i) < c.high(i - 1);
            out[i] = if matched { 100 } else { 0 };
            body_long.advance(c, i);
            shadow_long.advance(c, i);
            shadow_vs_1.advance(c, i);
            shadow_vs_0.advance(c, i);
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_ADVANCEBLOCK - three rising whites with weakening bodies and growing
/// upper shadows.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceBlockClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for AdvanceBlockClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_ADVANCEBLOCK")
    }

    fn lookback(&self) -> usize {
        self.settings
            .shadow_long
            .period
            .max(self.settings.shadow_short.period)
            .max(self.settings.far.period)
            .max(self.settings.near.period)
            .max(self.settings.body_long.period)
            + 2
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

        let ss = self.settings.shadow_short;
        let mut shadow_short_2 = CandleAverage::primed(ss, 2, c, first);
        let mut shadow_short_1 = CandleAverage::primed(ss, 1, c, first);
        let mut shadow_short_0 = CandleAverage::primed(ss, 0, c, first);
        let mut shadow_long_0 = CandleAverage::primed(self.settings.shadow_long, 0, c, first);
        let mut near_2 = CandleAverage::primed(self.settings.near, 2, c, first);
        let mut near_1 = CandleAverage::primed(self.settings.near, 1, c, first);
        let mut far_2 = CandleAverage::primed(self.settings.far, 2, c, first);
        let mut far_1 = CandleAverage::primed(self.settings.far, 1, c, first);
        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        for i in first..range.end {
            let rising = c.color(i - 2).is_white()
                && c.color(i - 1).is_white()
                && c.color(i).is_white()
                && c.close(i) > c.close(i - 1)
                && c.close(i - 1) > c.close(i - 2)
                && c.open(i - 1) > c.open(i - 2)
                && c.open(i - 1) <= c.close(i - 2) + near_2.average(c, i)
                && c.open(i) > c.open(i - 1)
                && c.open(i) <= c.close(i - 1) + near_1.average(c, i)
                && c.real_body(i - 2) > body_long.average(c, i)
                && c.upper_shadow(i - 2) < shadow_short_2.average(c, i);
            // any sign of the advance stalling kills the third candle
            let stalling = (c.real_body(i - 1) < c.real_body(i - 2) - far_2.average(c, i)
                && c.real_body(i) < c.real_body(i - 1) + near_1.average(c, i))
                || (c.real_body(i) < c.real_body(i - 1) - far_1.average(c, i))
                || (c.real_body(i) < c.real_body(i - 1)
                    && c.real_body(i - 1) < c.real_body(i - 2)
                    && (c.upper_shadow(i) > shadow_short_0.average(c, i)
                        || c.upper_shadow(i - 1) > shadow_short_1.average(c, i)))
                || (c.real_body(i) < c.real_body(i - 1)
                    && c.upper_shadow(i) > shadow_long_0.average(c, i));
            out[i] = if rising && stalling { -100 } else { 0 };
            shadow_short_2.advance(c, i);
            shadow_short_1.advance(c, i);
            shadow_short_0.advance(c, i);
            shadow_long_0.advance(c, i);
            near_2.advance(c, i);
            near_1.advance(c, i);
            far_2.advance(c, i);
            far_1.advance(c, i);
            body_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_STALLEDPATTERN - two long whites then a small candle riding on the
/// second one's shoulder.
#[derive(Debug, Clone, Copy, Default)]
pub struct StalledPatternClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for StalledPatternClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_STALLEDPATTERN")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_long
            .period
            .max(self.settings.body_short.period)
            .max(self.settings.shadow_very_short.period)
            .max(self.settings.near.period)
            + 2
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

        let mut body_long_2 = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_long_1 = CandleAverage::primed(self.settings.body_long, 1, c, first);
        let mut shadow_vs_1 =
            CandleAverage::primed(self.settings.shadow_very_short, 1, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        let mut near_2 = CandleAverage::primed(self.settings.near, 2, c, first);
        let mut near_1 = CandleAverage::primed(self.settings.near, 1, c, first);
        for i in first..range.end {
            let matched = c.color(i - 2).is_white()
                && c.color(i - 1).is_white()
                && c.color(i).is_white()
                && c.close(i) > c.close(i - 1)
                && c.close(i - 1) > c.close(i - 2)
                && c.open(i - 1) > c.open(i - 2)
                && c.open(i - 1) <= c.close(i - 2) + near_2.average(c, i)
                && c.real_body(i - 2) > body_long_2.average(c, i)
                && c.real_body(i - 1) > body_long_1.average(c, i)
                && c.upper_shadow(i - 1) < shadow_vs_1.average(c, i)
                && c.real_body(i) < body_short.average(c, i)
                && c.open(i) >= c.close(i - 1) - c.real_body(i) - near_1.average(c, i);
            out[i] = if matched { -100 } else { 0 };
            body_long_2.advance(c, i);
            body_long_1.advance(c, i);
            shadow_vs_1.advance(c, i);
            body_short.advance(c, i);
            near_2.advance(c, i);
            near_1.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// SANDWICHES / GAPS / TRISTAR
// ============================================================

/// CDL_STICKSANDWICH - two black closes at the same level around a white
/// candle riding above them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StickSandwichClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for StickSandwichClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_STICKSANDWICH")
    }

    fn lookback(&self) -> usize {
        self.settings.equal.period + 2
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

        let mut equal = CandleAverage::primed(self.settings.equal, 2, c, first);
        for i in first..range.end {
            let band = equal.average(c, i);
            let matched = c.color(i - 2).is_black()
                && c.color(i - 1).is_white()
                && c.color(i).is_black()
                && c.low(i - 1) > c.close(i - 2)
                && c.close(i) <= c.close(i - 2) + band
                && c.close(i) >= c.close(i - 2) - band;
            out[i] = if matched { 100 } else { 0 };
            equal.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_TASUKIGAP - a gap, a same-direction candle, then an opposite candle
/// closing inside the still-open gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct TasukiGapClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for TasukiGapClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_TASUKIGAP")
    }

    fn lookback(&self) -> usize {
        self.settings.near.period + 2
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
        for i in first..range.end {
            let sized =
                (c.real_body(i - 1) - c.real_body(i)).abs() < near.average(c, i);
            let upside = c.body_gap_up(i - 1, i - 2)
                && c.color(i - 1).is_white()
                && c.color(i).is_black()
                && c.open(i) < c.close(i - 1)
                && c.open(i) > c.open(i - 1)
                && c.close(i) < c.open(i - 1)
                && c.close(i) > c.body_top(i - 2)
                && sized;
            let downside = c.body_gap_down(i - 1, i - 2)
                && c.color(i - 1).is_black()
                && c.color(i).is_white()
                && c.open(i) < c.open(i - 1)
                && c.open(i) > c.close(i - 1)
                && c.close(i) > c.open(i - 1)
                && c.close(i) < c.body_bottom(i - 2)
                && sized;
            out[i] = if upside || downside {
                c.color(i - 1).sign() * 100
            } else {
                0
            };
            near.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_TRISTAR - three dojis, the middle one gapping away from its
/// neighbors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TristarClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for TristarClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_TRISTAR")
    }

    fn lookback(&self) -> usize {
        self.settings.body_doji.period + 2
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

        // one aggregate anchored at the first doji sizes all three bodies
        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 2, c, first);
        for i in first..range.end {
            let threshold = body_doji.average(c, i);
            let mut code = 0;
            if c.real_body(i - 2) <= threshold
                && c.real_body(i - 1) <= threshold
                && c.real_body(i) <= threshold
            {
                if c.body_gap_up(i - 1, i - 2) && c.body_top(i) < c.body_top(i - 1) {
                    code = -100;
                }
                if c.body_gap_down(i - 1, i - 2) && c.body_bottom(i) > c.body_bottom(i - 1) {
                    code = 100;
                }
            }
            out[i] = code;
            body_doji.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_UNIQUE3RIVER - long black, black harami dipping to a new low, then a
/// short white holding above that low.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unique3RiverClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for Unique3RiverClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_UNIQUE3RIVER")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.body_long.period)
            + 2
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 2, c, first);
        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i - 2) > body_long.average(c, i)
                && c.color(i - 2).is_black()
                && c.color(i - 1).is_black()
                && c.close(i - 1) > c.close(i - 2)
                && c.open(i - 1) <= c.open(i - 2)
                && c.low(i - 1) < c.low(i - 2)
                && c.real_body(i) < body_short.average(c, i)
                && c.color(i).is_white()
                && c.open(i) > c.low(i - 1);
            out[i] = if matched { 100 } else { 0 };
            body_long.advance(c, i);
            body_short.advance(c, i);
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

    fn classify_last(
        classifier: &impl PatternClassifier,
        s: &(Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>),
    ) -> i32 {
        let candles = Candles::new(&s.0, &s.1, &s.2, &s.3).unwrap();
        let mut out = vec![0i32; candles.len()];
        let range = classifier
            .classify(&candles, 0..candles.len(), &mut out)
            .unwrap();
        assert_eq!(range.end, candles.len());
        out[candles.len() - 1]
    }

    #[test]
    fn test_two_crows() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 99.5, 103.2, 99.3, 103.0); // long white
        push_bar(&mut s, 104.5, 104.7, 103.5, 103.7); // black above the gap
        push_bar(&mut s, 104.0, 104.2, 101.8, 102.0); // black into the white body
        assert_eq!(classify_last(&TwoCrowsClassifier::default(), &s), -100);
    }

    #[test]
    fn test_three_black_crows() {
        let mut s = context_bars_n(13);
        push_bar(&mut s, 102.0, 102.2, 99.7, 99.8);
        push_bar(&mut s, 101.5, 101.6, 98.9, 99.0);
        push_bar(&mut s, 100.5, 100.6, 97.9, 98.0);
        assert_eq!(
            classify_last(&ThreeBlackCrowsClassifier::default(), &s),
            -100
        );
    }

    #[test]
    fn test_identical_three_crows() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 102.0, 102.1, 99.75, 99.8);
        push_bar(&mut s, 99.8, 99.9, 98.45, 98.5); // opens at prior close
        push_bar(&mut s, 98.5, 98.6, 96.95, 97.0);
        assert_eq!(
            classify_last(&IdenticalThreeCrowsClassifier::default(), &s),
            -100
        );
    }

    #[test]
    fn test_upside_gap_two_crows() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 99.5, 103.2, 99.3, 103.0); // long white
        push_bar(&mut s, 104.5, 104.7, 103.5, 103.7); // black above the gap
        push_bar(&mut s, 104.8, 105.0, 103.2, 103.3); // engulfs, gap stays open
        assert_eq!(
            classify_last(&UpsideGapTwoCrowsClassifier::default(), &s),
            -100
        );
    }

    #[test]
    fn test_three_inside_up() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 103.0, 103.2, 99.3, 99.5); // long black
        push_bar(&mut s, 100.5, 101.4, 100.3, 101.2); // small inside
        push_bar(&mut s, 101.5, 103.6, 101.4, 103.5); // closes above the black open
        assert_eq!(classify_last(&ThreeInsideClassifier::default(), &s), 100);
    }

    #[test]
    fn test_three_outside_up() {
        let mut s = context_bars_n(4);
        push_bar(&mut s, 101.0, 101.5, 99.5, 100.0); // black
        push_bar(&mut s, 99.8, 101.8, 99.6, 101.5); // white engulfing
        push_bar(&mut s, 101.2, 102.2, 101.0, 102.0); // higher close
        assert_eq!(classify_last(&ThreeOutsideClassifier, &s), 100);
    }

    #[test]
    fn test_three_white_soldiers() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 100.0, 102.1, 99.8, 102.0);
        push_bar(&mut s, 100.5, 103.1, 100.3, 103.0);
        push_bar(&mut s, 101.5, 104.1, 101.3, 104.0);
        assert_eq!(
            classify_last(&ThreeWhiteSoldiersClassifier::default(), &s),
            100
        );
    }

    #[test]
    fn test_morning_star() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 103.0, 103.2, 99.3, 99.5); // long black
        push_bar(&mut s, 98.8, 99.2, 98.6, 99.0); // small body below the gap
        push_bar(&mut s, 99.2, 101.7, 99.1, 101.5); // white recovery
        assert_eq!(classify_last(&MorningStarClassifier::default(), &s), 100);
    }

    #[test]
    fn test_evening_star() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 99.5, 103.2, 99.3, 103.0); // long white
        push_bar(&mut s, 103.6, 104.0, 103.5, 103.8); // small body above the gap
        push_bar(&mut s, 103.3, 103.4, 100.8, 101.0); // black collapse
        assert_eq!(classify_last(&EveningStarClassifier::default(), &s), -100);
    }

    #[test]
    fn test_morning_doji_star() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 103.0, 103.2, 99.3, 99.5);
        push_bar(&mut s, 98.8, 99.0, 98.6, 98.85); // doji star
        push_bar(&mut s, 99.2, 101.7, 99.1, 101.5);
        assert_eq!(
            classify_last(&MorningDojiStarClassifier::default(), &s),
            100
        );
    }

    #[test]
    fn test_abandoned_baby_bullish() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 103.0, 103.2, 99.3, 99.5); // long black
        push_bar(&mut s, 98.9, 99.1, 98.7, 98.95); // doji island below both
        push_bar(&mut s, 99.2, 101.7, 99.15, 101.5); // white gapping back up
        assert_eq!(classify_last(&AbandonedBabyClassifier::default(), &s), 100);
    }

    #[test]
    fn test_abandoned_baby_negative_penetration() {
        let s = context_bars_n(16);
        let candles = Candles::new(&s.0, &s.1, &s.2, &s.3).unwrap();
        let classifier = AbandonedBabyClassifier {
            penetration: -1.0,
            ..Default::default()
        };
        let mut out = vec![0i32; candles.len()];
        assert!(classifier
            .classify(&candles, 0..candles.len(), &mut out)
            .is_err());
    }

    #[test]
    fn test_stick_sandwich() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 101.5, 101.7, 99.3, 99.5); // black
        push_bar(&mut s, 100.0, 101.2, 99.8, 101.0); // white above the close
        push_bar(&mut s, 101.3, 101.5, 99.4, 99.6); // black matching the first close
        assert_eq!(classify_last(&StickSandwichClassifier::default(), &s), 100);
    }

    #[test]
    fn test_upside_tasuki_gap() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 100.0, 102.5, 98.5, 101.0); // reference body
        push_bar(&mut s, 101.5, 102.7, 101.4, 102.5); // white above the gap
        push_bar(&mut s, 102.2, 102.4, 101.1, 101.2); // black into the gap
        assert_eq!(classify_last(&TasukiGapClassifier::default(), &s), 100);
    }

    #[test]
    fn test_tristar_bullish() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 100.0, 100.6, 99.6, 100.1);
        push_bar(&mut s, 99.5, 99.7, 99.2, 99.4); // doji gapping down
        push_bar(&mut s, 99.6, 99.9, 99.5, 99.7);
        assert_eq!(classify_last(&TristarClassifier::default(), &s), 100);
    }

    #[test]
    fn test_unique_three_river() {
        let mut s = context_bars_n(12);
        push_bar(&mut s, 103.0, 103.2, 99.3, 99.5); // long black
        push_bar(&mut s, 102.0, 102.2, 99.0, 100.0); // black harami, new low
        push_bar(&mut s, 99.5, 100.2, 99.4, 100.0); // short white above the low
        assert_eq!(classify_last(&Unique3RiverClassifier::default(), &s), 100);
    }
}
