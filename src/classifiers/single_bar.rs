//! Single-candle pattern classifiers.
//!
//! TA-Lib compatible codes: CDLDOJI, CDLDRAGONFLYDOJI, CDLGRAVESTONEDOJI,
//! CDLLONGLEGGEDDOJI, CDLRICKSHAWMAN, CDLHAMMER, CDLHANGINGMAN,
//! CDLINVERTEDHAMMER, CDLSHOOTINGSTAR, CDLTAKURI, CDLMARUBOZU,
//! CDLCLOSINGMARUBOZU, CDLLONGLINE, CDLSHORTLINE, CDLSPINNINGTOP,
//! CDLHIGHWAVE, CDLBELTHOLD.
//!
//! The Hammer family inspects one prior bar, so its lookback carries a +1
//! offset even though the formation itself is a single candle.

use std::ops::Range;

use crate::average::CandleAverage;
use crate::settings::CandleSettings;
use crate::{
    resolve_scan, Candles, OutputRange, PatternClassifier, PatternId, Result, SeriesElement,
};

// ============================================================
// DOJI FAMILY
// ============================================================

/// CDL_DOJI - real body within a fraction of the average high-low range.
#[derive(Debug, Clone, Copy, Default)]
pub struct DojiClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for DojiClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_DOJI")
    }

    fn lookback(&self) -> usize {
        self.settings.body_doji.period
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

        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        for i in first..range.end {
            out[i] = if c.real_body(i) <= body_doji.average(c, i) {
                100
            } else {
                0
            };
            body_doji.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_DRAGONFLYDOJI - doji with no upper shadow and a meaningful lower one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragonflyDojiClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for DragonflyDojiClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_DRAGONFLYDOJI")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.shadow_very_short.period)
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

        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i) <= body_doji.average(c, i)
                && c.upper_shadow(i) < shadow_vs.average(c, i)
                && c.lower_shadow(i) > shadow_vs.average(c, i);
            out[i] = if matched { 100 } else { 0 };
            body_doji.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_GRAVESTONEDOJI - doji with no lower shadow and a meaningful upper one.
#[derive(Debug, Clone, Copy, Default)]
pub struct GravestoneDojiClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for GravestoneDojiClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_GRAVESTONEDOJI")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.shadow_very_short.period)
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

        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i) <= body_doji.average(c, i)
                && c.lower_shadow(i) < shadow_vs.average(c, i)
                && c.upper_shadow(i) > shadow_vs.average(c, i);
            out[i] = if matched { 100 } else { 0 };
            body_doji.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_LONGLEGGEDDOJI - doji with at least one shadow longer than the body
/// threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongLeggedDojiClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for LongLeggedDojiClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_LONGLEGGEDDOJI")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.shadow_long.period)
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

        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        let mut shadow_long = CandleAverage::primed(self.settings.shadow_long, 0, c, first);
        for i in first..range.end {
            let threshold = shadow_long.average(c, i);
            let matched = c.real_body(i) <= body_doji.average(c, i)
                && (c.lower_shadow(i) > threshold || c.upper_shadow(i) > threshold);
            out[i] = if matched { 100 } else { 0 };
            body_doji.advance(c, i);
            shadow_long.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_RICKSHAWMAN - long-legged doji whose body sits near the midpoint of
/// the high-low range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RickshawManClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for RickshawManClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_RICKSHAWMAN")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.shadow_long.period)
            .max(self.settings.near.period)
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

        let two = T::lit(2.0);
        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        let mut shadow_long = CandleAverage::primed(self.settings.shadow_long, 0, c, first);
        let mut near = CandleAverage::primed(self.settings.near, 0, c, first);
        for i in first..range.end {
            let long = shadow_long.average(c, i);
            let band = near.average(c, i);
            let midpoint = c.low(i) + c.high_low_range(i) / two;
            let matched = c.real_body(i) <= body_doji.average(c, i)
                && c.lower_shadow(i) > long
                && c.upper_shadow(i) > long
                && c.body_bottom(i) <= midpoint + band
                && c.body_top(i) >= midpoint - band;
            out[i] = if matched { 100 } else { 0 };
            body_doji.advance(c, i);
            shadow_long.advance(c, i);
            near.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// HAMMER FAMILY
// ============================================================

/// CDL_HAMMER - small body, long lower shadow, no upper shadow, body near
/// the prior bar's low.
#[derive(Debug, Clone, Copy, Default)]
pub struct HammerClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for HammerClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_HAMMER")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.shadow_long.period)
            .max(self.settings.shadow_very_short.period)
            .max(self.settings.near.period)
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

        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        let mut shadow_long = CandleAverage::primed(self.settings.shadow_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        let mut near = CandleAverage::primed(self.settings.near, 1, c, first);
        for i in first..range.end {
            let matched = c.real_body(i) < body_short.average(c, i)
                && c.lower_shadow(i) > shadow_long.average(c, i)
                && c.upper_shadow(i) < shadow_vs.average(c, i)
                && c.body_bottom(i) <= c.low(i - 1) + near.average(c, i);
            out[i] = if matched { 100 } else { 0 };
            body_short.advance(c, i);
            shadow_long.advance(c, i);
            shadow_vs.advance(c, i);
            near.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_HANGINGMAN - hammer shape appearing without a drop below the prior
/// bar's low; bearish.
#[derive(Debug, Clone, Copy, Default)]
pub struct HangingManClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for HangingManClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_HANGINGMAN")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.shadow_long.period)
            .max(self.settings.shadow_very_short.period)
            .max(self.settings.near.period)
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

        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        let mut shadow_long = CandleAverage::primed(self.settings.shadow_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        let mut near = CandleAverage::primed(self.settings.near, 1, c, first);
        for i in first..range.end {
            let matched = c.real_body(i) < body_short.average(c, i)
                && c.lower_shadow(i) > shadow_long.average(c, i)
                && c.upper_shadow(i) < shadow_vs.average(c, i)
                && c.body_bottom(i) >= c.low(i - 1) - near.average(c, i);
            out[i] = if matched { -100 } else { 0 };
            body_short.advance(c, i);
            shadow_long.advance(c, i);
            shadow_vs.advance(c, i);
            near.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_INVERTEDHAMMER - small body at the bottom of the range, gapping down
/// from the prior body.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvertedHammerClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for InvertedHammerClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_INVERTEDHAMMER")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.shadow_long.period)
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

        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        let mut shadow_long = CandleAverage::primed(self.settings.shadow_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i) < body_short.average(c, i)
                && c.upper_shadow(i) > shadow_long.average(c, i)
                && c.lower_shadow(i) < shadow_vs.average(c, i)
                && c.body_gap_down(i, i - 1);
            out[i] = if matched { 100 } else { 0 };
            body_short.advance(c, i);
            shadow_long.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_SHOOTINGSTAR - inverted-hammer shape gapping up from the prior body;
/// bearish.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShootingStarClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ShootingStarClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_SHOOTINGSTAR")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.shadow_long.period)
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

        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        let mut shadow_long = CandleAverage::primed(self.settings.shadow_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i) < body_short.average(c, i)
                && c.upper_shadow(i) > shadow_long.average(c, i)
                && c.lower_shadow(i) < shadow_vs.average(c, i)
                && c.body_gap_up(i, i - 1);
            out[i] = if matched { -100 } else { 0 };
            body_short.advance(c, i);
            shadow_long.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_TAKURI - dragonfly doji with a very long lower shadow.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakuriClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for TakuriClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_TAKURI")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_doji
            .period
            .max(self.settings.shadow_very_short.period)
            .max(self.settings.shadow_very_long.period)
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

        let mut body_doji = CandleAverage::primed(self.settings.body_doji, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        let mut shadow_vl = CandleAverage::primed(self.settings.shadow_very_long, 0, c, first);
        for i in first..range.end {
            let matched = c.real_body(i) <= body_doji.average(c, i)
                && c.upper_shadow(i) < shadow_vs.average(c, i)
                && c.lower_shadow(i) > shadow_vl.average(c, i);
            out[i] = if matched { 100 } else { 0 };
            body_doji.advance(c, i);
            shadow_vs.advance(c, i);
            shadow_vl.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

// ============================================================
// MARUBOZU / LINES
// ============================================================

/// CDL_MARUBOZU - long body with no shadow at either end.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarubozuClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for MarubozuClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_MARUBOZU")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_long
            .period
            .max(self.settings.shadow_very_short.period)
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let threshold = shadow_vs.average(c, i);
            let matched = c.real_body(i) > body_long.average(c, i)
                && c.upper_shadow(i) < threshold
                && c.lower_shadow(i) < threshold;
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_long.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_CLOSINGMARUBOZU - long body with no shadow on the closing end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosingMarubozuClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ClosingMarubozuClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_CLOSINGMARUBOZU")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_long
            .period
            .max(self.settings.shadow_very_short.period)
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let threshold = shadow_vs.average(c, i);
            let closing_shadow = if c.color(i).is_white() {
                c.upper_shadow(i)
            } else {
                c.lower_shadow(i)
            };
            let matched =
                c.real_body(i) > body_long.average(c, i) && closing_shadow < threshold;
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_long.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_LONGLINE - long body with short shadows on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongLineClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for LongLineClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_LONGLINE")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_long
            .period
            .max(self.settings.shadow_short.period)
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 0, c, first);
        let mut shadow_short = CandleAverage::primed(self.settings.shadow_short, 0, c, first);
        for i in first..range.end {
            let threshold = shadow_short.average(c, i);
            let matched = c.real_body(i) > body_long.average(c, i)
                && c.upper_shadow(i) < threshold
                && c.lower_shadow(i) < threshold;
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_long.advance(c, i);
            shadow_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_SHORTLINE - short body with short shadows on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortLineClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for ShortLineClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_SHORTLINE")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.shadow_short.period)
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

        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        let mut shadow_short = CandleAverage::primed(self.settings.shadow_short, 0, c, first);
        for i in first..range.end {
            let threshold = shadow_short.average(c, i);
            let matched = c.real_body(i) < body_short.average(c, i)
                && c.upper_shadow(i) < threshold
                && c.lower_shadow(i) < threshold;
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_short.advance(c, i);
            shadow_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_SPINNINGTOP - short body with both shadows longer than the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinningTopClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for SpinningTopClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_SPINNINGTOP")
    }

    fn lookback(&self) -> usize {
        self.settings.body_short.period
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

        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        for i in first..range.end {
            let body = c.real_body(i);
            let matched = body < body_short.average(c, i)
                && c.upper_shadow(i) > body
                && c.lower_shadow(i) > body;
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_short.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_HIGHWAVE - short body with very long shadows on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighWaveClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for HighWaveClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_HIGHWAVE")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_short
            .period
            .max(self.settings.shadow_very_long.period)
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

        let mut body_short = CandleAverage::primed(self.settings.body_short, 0, c, first);
        let mut shadow_vl = CandleAverage::primed(self.settings.shadow_very_long, 0, c, first);
        for i in first..range.end {
            let threshold = shadow_vl.average(c, i);
            let matched = c.real_body(i) < body_short.average(c, i)
                && c.upper_shadow(i) > threshold
                && c.lower_shadow(i) > threshold;
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_short.advance(c, i);
            shadow_vl.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

/// CDL_BELTHOLD - long body opening on its extreme end.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeltHoldClassifier {
    pub settings: CandleSettings,
}

impl PatternClassifier for BeltHoldClassifier {
    fn id(&self) -> PatternId {
        PatternId("CDL_BELTHOLD")
    }

    fn lookback(&self) -> usize {
        self.settings
            .body_long
            .period
            .max(self.settings.shadow_very_short.period)
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

        let mut body_long = CandleAverage::primed(self.settings.body_long, 0, c, first);
        let mut shadow_vs = CandleAverage::primed(self.settings.shadow_very_short, 0, c, first);
        for i in first..range.end {
            let opening_shadow = if c.color(i).is_white() {
                c.lower_shadow(i)
            } else {
                c.upper_shadow(i)
            };
            let matched = c.real_body(i) > body_long.average(c, i)
                && opening_shadow < shadow_vs.average(c, i);
            out[i] = if matched { c.color(i).sign() * 100 } else { 0 };
            body_long.advance(c, i);
            shadow_vs.advance(c, i);
        }
        Ok(OutputRange::new(first, range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candles;

    /// `n` unremarkable bars establishing body 1.0 and range 4.0 averages.
    fn context_bars_n(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let open = vec![100.0; n];
        let close = vec![101.0; n];
        let high = vec![102.5; n];
        let low = vec![98.5; n];
        (open, high, low, close)
    }

    fn context_bars() -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        context_bars_n(10)
    }

    fn push_bar(
        series: &mut (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>),
        o: f64,
        h: f64,
        l: f64,
        cl: f64,
    ) {
        series.0.push(o);
        series.1.push(h);
        series.2.push(l);
        series.3.push(cl);
    }

    fn classify_last(classifier: &impl PatternClassifier, s: &(Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)) -> i32 {
        let candles = Candles::new(&s.0, &s.1, &s.2, &s.3).unwrap();
        let mut out = vec![0i32; candles.len()];
        let range = classifier
            .classify(&candles, 0..candles.len(), &mut out)
            .unwrap();
        assert_eq!(range.end, candles.len());
        out[candles.len() - 1]
    }

    #[test]
    fn test_doji_positive() {
        let mut s = context_bars();
        // body 0.1 <= 0.1 * avg range 4.0
        push_bar(&mut s, 100.0, 102.0, 98.0, 100.1);
        assert_eq!(classify_last(&DojiClassifier::default(), &s), 100);
    }

    #[test]
    fn test_doji_negative() {
        let mut s = context_bars();
        push_bar(&mut s, 100.0, 102.0, 98.0, 101.5);
        assert_eq!(classify_last(&DojiClassifier::default(), &s), 0);
    }

    #[test]
    fn test_dragonfly_doji() {
        let mut s = context_bars();
        // upper 0.05 < 0.4, lower 3.0 > 0.4, body 0.05
        push_bar(&mut s, 100.0, 100.1, 97.0, 100.05);
        assert_eq!(classify_last(&DragonflyDojiClassifier::default(), &s), 100);
    }

    #[test]
    fn test_gravestone_doji() {
        let mut s = context_bars();
        push_bar(&mut s, 100.0, 103.0, 99.95, 100.05);
        assert_eq!(classify_last(&GravestoneDojiClassifier::default(), &s), 100);
    }

    #[test]
    fn test_takuri() {
        let mut s = context_bars();
        // lower shadow 3.0 > 2 * body 0.05
        push_bar(&mut s, 100.0, 100.1, 97.0, 100.05);
        assert_eq!(classify_last(&TakuriClassifier::default(), &s), 100);
    }

    #[test]
    fn test_hammer_positive() {
        let mut s = context_bars_n(11);
        // body 0.1 < avg body 1.0; lower 2.7 > body; upper 0.05 < 0.4;
        // body bottom 99.2 <= prior low 98.5 + near band 0.8
        push_bar(&mut s, 99.2, 99.35, 96.5, 99.3);
        assert_eq!(classify_last(&HammerClassifier::default(), &s), 100);
    }

    #[test]
    fn test_hanging_man_positive() {
        let mut s = context_bars_n(11);
        // hammer shape but body bottom 100.0 >= prior low 98.5 - 0.8
        push_bar(&mut s, 100.0, 100.15, 97.5, 100.1);
        assert_eq!(classify_last(&HangingManClassifier::default(), &s), -100);
    }

    #[test]
    fn test_inverted_hammer() {
        let mut s = context_bars_n(11);
        // gaps below prior body bottom (100.0): body top 98.3 < 100.0
        push_bar(&mut s, 98.0, 100.4, 97.95, 98.3);
        assert_eq!(classify_last(&InvertedHammerClassifier::default(), &s), 100);
    }

    #[test]
    fn test_shooting_star() {
        let mut s = context_bars_n(11);
        // gaps above prior body top (101.0)
        push_bar(&mut s, 101.5, 104.5, 101.45, 101.8);
        assert_eq!(classify_last(&ShootingStarClassifier::default(), &s), -100);
    }

    #[test]
    fn test_marubozu_bullish_and_bearish() {
        let mut s = context_bars();
        push_bar(&mut s, 100.0, 103.0, 100.0, 103.0);
        assert_eq!(classify_last(&MarubozuClassifier::default(), &s), 100);

        let mut s = context_bars();
        push_bar(&mut s, 103.0, 103.0, 100.0, 100.0);
        assert_eq!(classify_last(&MarubozuClassifier::default(), &s), -100);
    }

    #[test]
    fn test_closing_marubozu_tolerates_opening_shadow() {
        let mut s = context_bars();
        // white: lower shadow 1.0 is fine, upper must be flat
        push_bar(&mut s, 100.0, 103.0, 99.0, 103.0);
        assert_eq!(classify_last(&ClosingMarubozuClassifier::default(), &s), 100);
    }

    #[test]
    fn test_spinning_top() {
        let mut s = context_bars();
        // body 0.4 < avg 1.0, both shadows 1.0 > body
        push_bar(&mut s, 100.0, 101.4, 99.0, 100.4);
        assert_eq!(classify_last(&SpinningTopClassifier::default(), &s), 100);
    }

    #[test]
    fn test_high_wave() {
        let mut s = context_bars();
        // shadows 2.0 > 2 * body 0.4
        push_bar(&mut s, 100.0, 102.4, 98.0, 100.4);
        assert_eq!(classify_last(&HighWaveClassifier::default(), &s), 100);
    }

    #[test]
    fn test_belt_hold_black() {
        let mut s = context_bars();
        // black: opens at the high, long body
        push_bar(&mut s, 103.0, 103.05, 99.0, 100.0);
        assert_eq!(classify_last(&BeltHoldClassifier::default(), &s), -100);
    }

    #[test]
    fn test_long_line_and_short_line() {
        let mut s = context_bars();
        // long body 3.0 > avg 1.0, shadows 0.2 below per-shadow avg
        push_bar(&mut s, 100.0, 103.2, 99.8, 103.0);
        assert_eq!(classify_last(&LongLineClassifier::default(), &s), 100);

        let mut s = context_bars();
        // short body 0.5, shadows 0.2 < per-shadow avg (0.75 + 0.75)/...
        push_bar(&mut s, 100.0, 100.7, 99.8, 100.5);
        assert_eq!(classify_last(&ShortLineClassifier::default(), &s), 100);
    }

    #[test]
    fn test_long_legged_doji_and_rickshaw() {
        let mut s = context_bars();
        // doji body, both shadows > body, body straddles the midpoint
        push_bar(&mut s, 100.05, 102.0, 98.0, 99.95);
        assert_eq!(classify_last(&LongLeggedDojiClassifier::default(), &s), 100);
        assert_eq!(classify_last(&RickshawManClassifier::default(), &s), 100);
    }

    #[test]
    fn test_insufficient_history_is_empty_success() {
        let s = context_bars();
        let candles = Candles::new(&s.0, &s.1, &s.2, &s.3).unwrap();
        let classifier = DojiClassifier::default();
        let mut out = vec![0i32; 5];
        // range entirely inside the 10-bar lookback
        let range = classifier.classify(&candles, 0..5, &mut out).unwrap();
        assert!(range.is_empty());
        assert!(out.iter().all(|&code| code == 0));
    }
}
