//! Threshold settings for candle-size comparisons.
//!
//! Every fuzzy comparison a classifier makes ("is this body long", "are these
//! closes equal") is a comparison against a scaled trailing average of one of
//! three per-bar metrics. This module holds the `(kind, period, factor)`
//! triples that define those thresholds and the default table the classifiers
//! ship with.

use serde::{Deserialize, Serialize};

/// Which per-bar measurement a rolling threshold is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeKind {
    /// `|close - open|`
    RealBody,
    /// `high - low`
    HighLow,
    /// `upper_shadow + lower_shadow` (averages of this kind are halved to
    /// yield a per-shadow threshold)
    Shadows,
}

/// One threshold definition: metric kind, averaging window, scale factor.
///
/// `period == 0` means "compare against the current bar's raw metric" rather
/// than a trailing average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleSetting {
    pub kind: RangeKind,
    pub period: usize,
    pub factor: f64,
}

impl CandleSetting {
    pub const fn new(kind: RangeKind, period: usize, factor: f64) -> Self {
        Self { kind, period, factor }
    }
}

/// The full threshold table used by the builtin classifiers.
///
/// Each classifier owns a copy, so thresholds can be tuned per instance;
/// `Default` yields the classic table:
///
/// | setting           | kind     | period | factor |
/// |-------------------|----------|--------|--------|
/// | body_long         | RealBody | 10     | 1.0    |
/// | body_very_long    | RealBody | 10     | 3.0    |
/// | body_short        | RealBody | 10     | 1.0    |
/// | body_doji         | HighLow  | 10     | 0.1    |
/// | shadow_long       | RealBody | 0      | 1.0    |
/// | shadow_very_long  | RealBody | 0      | 2.0    |
/// | shadow_short      | Shadows  | 10     | 1.0    |
/// | shadow_very_short | HighLow  | 10     | 0.1    |
/// | near              | HighLow  | 5      | 0.2    |
/// | far               | HighLow  | 5      | 0.6    |
/// | equal             | HighLow  | 5      | 0.05   |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleSettings {
    pub body_long: CandleSetting,
    pub body_very_long: CandleSetting,
    pub body_short: CandleSetting,
    pub body_doji: CandleSetting,
    pub shadow_long: CandleSetting,
    pub shadow_very_long: CandleSetting,
    pub shadow_short: CandleSetting,
    pub shadow_very_short: CandleSetting,
    pub near: CandleSetting,
    pub far: CandleSetting,
    pub equal: CandleSetting,
}

impl Default for CandleSettings {
    fn default() -> Self {
        Self {
            body_long: CandleSetting::new(RangeKind::RealBody, 10, 1.0),
            body_very_long: CandleSetting::new(RangeKind::RealBody, 10, 3.0),
            body_short: CandleSetting::new(RangeKind::RealBody, 10, 1.0),
            body_doji: CandleSetting::new(RangeKind::HighLow, 10, 0.1),
            shadow_long: CandleSetting::new(RangeKind::RealBody, 0, 1.0),
            shadow_very_long: CandleSetting::new(RangeKind::RealBody, 0, 2.0),
            shadow_short: CandleSetting::new(RangeKind::Shadows, 10, 1.0),
            shadow_very_short: CandleSetting::new(RangeKind::HighLow, 10, 0.1),
            near: CandleSetting::new(RangeKind::HighLow, 5, 0.2),
            far: CandleSetting::new(RangeKind::HighLow, 5, 0.6),
            equal: CandleSetting::new(RangeKind::HighLow, 5, 0.05),
        }
    }
}
