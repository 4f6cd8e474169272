//! # candlescan
//!
//! Windowed candlestick pattern classification over OHLC price series.
//!
//! Callers supply aligned open/high/low/close slices (any float precision), a
//! half-open index range, and a pre-allocated `i32` output buffer. Each
//! classifier runs one forward pass over the range, comparing candle metrics
//! against incrementally maintained trailing averages, and writes a signed
//! classification code per bar: `+100` (bullish formation), `-100` (bearish
//! formation), `0` (none).
//!
//! ## Quick Start
//!
//! ```rust
//! use candlescan::prelude::*;
//!
//! let open  = vec![100.0; 24];
//! let high  = vec![101.0; 24];
//! let low   = vec![ 99.0; 24];
//! let close = vec![100.1; 24];
//!
//! let candles = Candles::new(&open, &high, &low, &close)?;
//! let classifier = DojiClassifier::default();
//!
//! let mut codes = vec![0i32; candles.len()];
//! let range = classifier.classify(&candles, 0..candles.len(), &mut codes)?;
//!
//! for i in range.start..range.end {
//!     assert!(codes[i] == 0 || codes[i] == 100 || codes[i] == -100);
//! }
//! # Ok::<(), candlescan::PatternError>(())
//! ```

pub mod average;
pub mod classifiers;
pub mod settings;

pub mod prelude {
    pub use crate::{
        average::CandleAverage,
        classifiers::*,
        scan_parallel,
        settings::{CandleSetting, CandleSettings, RangeKind},
        BuiltinClassifier,
        CandleColor,
        Candles,
        OutputRange,
        PatternClassifier,
        PatternError,
        PatternId,
        Result,
        ScanFailure,
        ScanResult,
        SeriesElement,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors a classification call can report.
///
/// Both kinds are detected before any scan work begins; once a scan starts it
/// always runs to completion. A range that is valid but shorter than a
/// pattern's lookback is not an error — it yields success with an empty
/// [`OutputRange`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    /// The requested index range does not fit the input series (or the
    /// output buffer), or the input series disagree on length.
    #[error("range [{start}, {end}) out of range for length {len}")]
    OutOfRangeParam { start: usize, end: usize, len: usize },

    /// A tunable is outside its legal domain (e.g. a negative penetration).
    #[error("{param} = {value}: {reason}")]
    BadParam {
        param: &'static str,
        value: f64,
        reason: &'static str,
    },
}

// ============================================================
// SERIES ELEMENT
// ============================================================

/// Floating-point element type of a price series.
///
/// Satisfied by `f32` and `f64` through the blanket impl; every classifier is
/// generic over it, so one predicate body serves both precisions. The engine
/// performs no NaN/Inf screening — callers supply finite samples.
pub trait SeriesElement: num_traits::Float + std::fmt::Debug + Send + Sync + 'static {
    /// Convert a configuration-time constant (threshold factor, penetration
    /// ratio) into the element type.
    fn lit(value: f64) -> Self;

    /// Convert a window size for average division.
    fn from_period(period: usize) -> Self;
}

impl<T> SeriesElement for T
where
    T: num_traits::Float + std::fmt::Debug + Send + Sync + 'static,
{
    #[inline]
    fn lit(value: f64) -> Self {
        <T as num_traits::NumCast>::from(value).unwrap_or_else(T::nan)
    }

    #[inline]
    fn from_period(period: usize) -> Self {
        <T as num_traits::NumCast>::from(period).unwrap_or_else(T::nan)
    }
}

// ============================================================
// CANDLE COLOR
// ============================================================

/// Direction of a single candle. A flat bar (`close == open`) is White.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleColor {
    White,
    Black,
}

impl CandleColor {
    /// `+1` for White, `-1` for Black; classification codes are `sign * 100`.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            CandleColor::White => 1,
            CandleColor::Black => -1,
        }
    }

    #[inline]
    pub fn is_white(self) -> bool {
        matches!(self, CandleColor::White)
    }

    #[inline]
    pub fn is_black(self) -> bool {
        matches!(self, CandleColor::Black)
    }

    /// The opposite color.
    #[inline]
    pub fn flip(self) -> CandleColor {
        match self {
            CandleColor::White => CandleColor::Black,
            CandleColor::Black => CandleColor::White,
        }
    }
}

// ============================================================
// CANDLES - validated aligned view over the input series
// ============================================================

use crate::settings::RangeKind;

/// Borrowed, length-validated view over aligned OHLC(V) series.
///
/// All metric accessors are O(1) and pure; indices are raw series indices.
/// Classifiers only touch indices inside the validated range and its lookback
/// window.
#[derive(Debug, Clone, Copy)]
pub struct Candles<'a, T> {
    open: &'a [T],
    high: &'a [T],
    low: &'a [T],
    close: &'a [T],
    volume: Option<&'a [T]>,
}

impl<'a, T: SeriesElement> Candles<'a, T> {
    /// Build a view over four aligned series. Length disagreement is a
    /// contract violation reported as [`PatternError::OutOfRangeParam`].
    pub fn new(open: &'a [T], high: &'a [T], low: &'a [T], close: &'a [T]) -> Result<Self> {
        Self::build(open, high, low, close, None)
    }

    /// Like [`new`](Self::new) with a volume series, for consumers that
    /// weigh formations by traded volume.
    pub fn with_volume(
        open: &'a [T],
        high: &'a [T],
        low: &'a [T],
        close: &'a [T],
        volume: &'a [T],
    ) -> Result<Self> {
        Self::build(open, high, low, close, Some(volume))
    }

    fn build(
        open: &'a [T],
        high: &'a [T],
        low: &'a [T],
        close: &'a [T],
        volume: Option<&'a [T]>,
    ) -> Result<Self> {
        let mut max_len = open.len();
        let mut min_len = open.len();
        for l in [high.len(), low.len(), close.len()]
            .into_iter()
            .chain(volume.map(|v| v.len()))
        {
            max_len = max_len.max(l);
            min_len = min_len.min(l);
        }
        if min_len != max_len {
            return Err(PatternError::OutOfRangeParam {
                start: 0,
                end: max_len,
                len: min_len,
            });
        }
        Ok(Self {
            open,
            high,
            low,
            close,
            volume,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[inline]
    pub fn open(&self, i: usize) -> T {
        self.open[i]
    }

    #[inline]
    pub fn high(&self, i: usize) -> T {
        self.high[i]
    }

    #[inline]
    pub fn low(&self, i: usize) -> T {
        self.low[i]
    }

    #[inline]
    pub fn close(&self, i: usize) -> T {
        self.close[i]
    }

    #[inline]
    pub fn volume(&self, i: usize) -> Option<T> {
        self.volume.map(|v| v[i])
    }

    /// `|close - open|`
    #[inline]
    pub fn real_body(&self, i: usize) -> T {
        (self.close[i] - self.open[i]).abs()
    }

    /// `high - max(open, close)`
    #[inline]
    pub fn upper_shadow(&self, i: usize) -> T {
        self.high[i] - self.open[i].max(self.close[i])
    }

    /// `min(open, close) - low`
    #[inline]
    pub fn lower_shadow(&self, i: usize) -> T {
        self.open[i].min(self.close[i]) - self.low[i]
    }

    /// `high - low`
    #[inline]
    pub fn high_low_range(&self, i: usize) -> T {
        self.high[i] - self.low[i]
    }

    /// Higher end of the real body.
    #[inline]
    pub fn body_top(&self, i: usize) -> T {
        self.open[i].max(self.close[i])
    }

    /// Lower end of the real body.
    #[inline]
    pub fn body_bottom(&self, i: usize) -> T {
        self.open[i].min(self.close[i])
    }

    #[inline]
    pub fn color(&self, i: usize) -> CandleColor {
        if self.close[i] >= self.open[i] {
            CandleColor::White
        } else {
            CandleColor::Black
        }
    }

    /// Bar `i` gaps above bar `prev`: its low clears the earlier high.
    #[inline]
    pub fn gap_up(&self, i: usize, prev: usize) -> bool {
        self.low[i] > self.high[prev]
    }

    /// Bar `i` gaps below bar `prev`: its high stays under the earlier low.
    #[inline]
    pub fn gap_down(&self, i: usize, prev: usize) -> bool {
        self.high[i] < self.low[prev]
    }

    /// Real-body-only gap up: the bodies do not overlap, shadows may.
    #[inline]
    pub fn body_gap_up(&self, i: usize, prev: usize) -> bool {
        self.body_bottom(i) > self.body_top(prev)
    }

    /// Real-body-only gap down.
    #[inline]
    pub fn body_gap_down(&self, i: usize, prev: usize) -> bool {
        self.body_top(i) < self.body_bottom(prev)
    }

    /// The per-bar measurement a [`RangeKind`] selects.
    #[inline]
    pub(crate) fn metric(&self, kind: RangeKind, i: usize) -> T {
        match kind {
            RangeKind::RealBody => self.real_body(i),
            RangeKind::HighLow => self.high_low_range(i),
            RangeKind::Shadows => self.upper_shadow(i) + self.lower_shadow(i),
        }
    }

    /// Validate a requested `[start, end)` against the series and output
    /// buffer lengths. Lookback clipping is the classifier's job; this is
    /// only the universal bounds check.
    pub fn check_range(&self, range: &std::ops::Range<usize>, out_len: usize) -> Result<()> {
        let len = self.len().min(out_len);
        if range.start > range.end || range.end > len {
            return Err(PatternError::OutOfRangeParam {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(())
    }
}

// ============================================================
// OUTPUT RANGE
// ============================================================

/// The sub-range of the request a classifier actually populated.
///
/// Half-open, in absolute series indices. Empty when the requested range was
/// entirely inside the pattern's lookback; that is a legitimately short
/// series, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct OutputRange {
    pub start: usize,
    pub end: usize,
}

impl OutputRange {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

// ============================================================
// PATTERN CLASSIFIER TRAIT
// ============================================================

/// Unique identifier for a pattern formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternId(pub &'static str);

impl PatternId {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl serde::Serialize for PatternId {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(self.0)
    }
}

/// One candlestick formation classifier.
///
/// A classifier is a pure function of its configuration and the inputs: it
/// owns no cross-call state, and concurrent calls over the same `Candles`
/// view are safe. `classify` writes codes at absolute series indices within
/// the returned range and leaves every other element of `out` untouched.
pub trait PatternClassifier {
    /// Stable identifier of the formation.
    fn id(&self) -> PatternId;

    /// Minimum number of preceding bars required before the first code can
    /// be produced. A pure function of the configured window sizes; no data
    /// is consulted.
    fn lookback(&self) -> usize;

    /// Check tunables; runs before any scan work.
    fn validate_params(&self) -> Result<()> {
        Ok(())
    }

    /// Run one forward pass over `range`, writing `{-100, 0, 100}` codes.
    fn classify<T: SeriesElement>(
        &self,
        candles: &Candles<'_, T>,
        range: std::ops::Range<usize>,
        out: &mut [i32],
    ) -> Result<OutputRange>;
}

/// Shared Validate step of every classifier: bounds-check the request,
/// validate tunables, clip the start to the lookback. `Ok(None)` means the
/// range is legal but lies entirely inside the lookback.
pub fn resolve_scan<T, C>(
    classifier: &C,
    candles: &Candles<'_, T>,
    range: &std::ops::Range<usize>,
    out_len: usize,
) -> Result<Option<usize>>
where
    T: SeriesElement,
    C: PatternClassifier + ?Sized,
{
    candles.check_range(range, out_len)?;
    classifier.validate_params()?;
    let first = range.start.max(classifier.lookback());
    if first >= range.end {
        Ok(None)
    } else {
        Ok(Some(first))
    }
}

/// Reject a ratio tunable that is negative or non-finite.
pub(crate) fn check_ratio(param: &'static str, value: f64) -> Result<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(PatternError::BadParam {
            param,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(PatternError::BadParam {
            param,
            value,
            reason: "must be non-negative",
        });
    }
    Ok(())
}

// ============================================================
// BUILTIN CLASSIFIERS - generated via macro
// ============================================================

use classifiers::*;

/// Macro to generate the BuiltinClassifier enum without boilerplate.
macro_rules! define_builtin_classifiers {
    (
        $(
            $variant:ident($classifier:ty)
        ),* $(,)?
    ) => {
        /// All builtin classifiers - static dispatch, no vtable.
        #[derive(Debug, Clone)]
        pub enum BuiltinClassifier {
            $($variant($classifier)),*
        }

        impl BuiltinClassifier {
            #[inline]
            pub fn id(&self) -> PatternId {
                match self {
                    $(Self::$variant(c) => c.id()),*
                }
            }

            #[inline]
            pub fn lookback(&self) -> usize {
                match self {
                    $(Self::$variant(c) => c.lookback()),*
                }
            }

            pub fn validate_params(&self) -> Result<()> {
                match self {
                    $(Self::$variant(c) => c.validate_params()),*
                }
            }

            #[inline]
            pub fn classify<T: SeriesElement>(
                &self,
                candles: &Candles<'_, T>,
                range: std::ops::Range<usize>,
                out: &mut [i32],
            ) -> Result<OutputRange> {
                match self {
                    $(Self::$variant(c) => c.classify(candles, range, out)),*
                }
            }

            /// Every builtin classifier with default settings.
            pub fn all_with_defaults() -> Vec<BuiltinClassifier> {
                vec![
                    $(Self::$variant(<$classifier>::default())),*
                ]
            }
        }
    };
}

define_builtin_classifiers! {
    // Single bar (17)
    Doji(DojiClassifier),
    DragonflyDoji(DragonflyDojiClassifier),
    GravestoneDoji(GravestoneDojiClassifier),
    LongLeggedDoji(LongLeggedDojiClassifier),
    RickshawMan(RickshawManClassifier),
    Hammer(HammerClassifier),
    HangingMan(HangingManClassifier),
    InvertedHammer(InvertedHammerClassifier),
    ShootingStar(ShootingStarClassifier),
    Takuri(TakuriClassifier),
    Marubozu(MarubozuClassifier),
    ClosingMarubozu(ClosingMarubozuClassifier),
    LongLine(LongLineClassifier),
    ShortLine(ShortLineClassifier),
    SpinningTop(SpinningTopClassifier),
    HighWave(HighWaveClassifier),
    BeltHold(BeltHoldClassifier),

    // Two bar (16)
    Engulfing(EngulfingClassifier),
    Harami(HaramiClassifier),
    HaramiCross(HaramiCrossClassifier),
    Piercing(PiercingClassifier),
    DarkCloudCover(DarkCloudCoverClassifier),
    DojiStar(DojiStarClassifier),
    Counterattack(CounterattackClassifier),
    InNeck(InNeckClassifier),
    OnNeck(OnNeckClassifier),
    Thrusting(ThrustingClassifier),
    Kicking(KickingClassifier),
    KickingByLength(KickingByLengthClassifier),
    MatchingLow(MatchingLowClassifier),
    HomingPigeon(HomingPigeonClassifier),
    SeparatingLines(SeparatingLinesClassifier),
    GapSideSideWhite(GapSideSideWhiteClassifier),

    // Three bar (20)
    TwoCrows(TwoCrowsClassifier),
    ThreeBlackCrows(ThreeBlackCrowsClassifier),
    ThreeInside(ThreeInsideClassifier),
    ThreeOutside(ThreeOutsideClassifier),
    ThreeLineStrike(ThreeLineStrikeClassifier),
    ThreeStarsInSouth(ThreeStarsInSouthClassifier),
    ThreeWhiteSoldiers(ThreeWhiteSoldiersClassifier),
    MorningStar(MorningStarClassifier),
    EveningStar(EveningStarClassifier),
    MorningDojiStar(MorningDojiStarClassifier),
    EveningDojiStar(EveningDojiStarClassifier),
    AbandonedBaby(AbandonedBabyClassifier),
    AdvanceBlock(AdvanceBlockClassifier),
    StalledPattern(StalledPatternClassifier),
    StickSandwich(StickSandwichClassifier),
    TasukiGap(TasukiGapClassifier),
    Tristar(TristarClassifier),
    Unique3River(Unique3RiverClassifier),
    UpsideGapTwoCrows(UpsideGapTwoCrowsClassifier),
    IdenticalThreeCrows(IdenticalThreeCrowsClassifier),

    // Multi-bar (7)
    Breakaway(BreakawayClassifier),
    ConcealingBabySwallow(ConcealingBabySwallowClassifier),
    Hikkake(HikkakeClassifier),
    LadderBottom(LadderBottomClassifier),
    MatHold(MatHoldClassifier),
    RiseFallThreeMethods(RiseFallThreeMethodsClassifier),
    XSideGapThreeMethods(XSideGapThreeMethodsClassifier),
}

// ============================================================
// PARALLEL SCANNING
// ============================================================

use rayon::prelude::*;

/// Result of one classifier's scan.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScanResult {
    pub id: PatternId,
    /// Codes at absolute series indices; meaningful only inside `range`.
    pub codes: Vec<i32>,
    pub range: OutputRange,
}

/// A classifier that failed validation.
#[derive(Debug, Clone)]
pub struct ScanFailure {
    pub id: PatternId,
    pub error: PatternError,
}

/// Run many classifiers over one shared candle view in parallel.
///
/// Parallelism is across calls, never within one scan: a scan's aggregate
/// updates are strictly sequential, but every call owns its own aggregates
/// and output buffer and only reads the shared input slices.
pub fn scan_parallel<T: SeriesElement>(
    classifiers: &[BuiltinClassifier],
    candles: &Candles<'_, T>,
    range: std::ops::Range<usize>,
) -> (Vec<ScanResult>, Vec<ScanFailure>) {
    let results: Vec<_> = classifiers
        .par_iter()
        .map(|classifier| {
            let mut codes = vec![0i32; range.end];
            classifier
                .classify(candles, range.clone(), &mut codes)
                .map(|out_range| ScanResult {
                    id: classifier.id(),
                    codes,
                    range: out_range,
                })
                .map_err(|error| ScanFailure {
                    id: classifier.id(),
                    error,
                })
        })
        .collect();

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => failures.push(e),
        }
    }

    (successes, failures)
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_series(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        (
            vec![100.0; n],
            vec![101.0; n],
            vec![99.0; n],
            vec![100.5; n],
        )
    }

    #[test]
    fn test_candles_rejects_length_mismatch() {
        let (open, high, low, mut close) = flat_series(10);
        close.truncate(8);
        let err = Candles::new(&open, &high, &low, &close).unwrap_err();
        assert!(matches!(err, PatternError::OutOfRangeParam { .. }));
    }

    #[test]
    fn test_candles_rejects_volume_mismatch() {
        let (open, high, low, close) = flat_series(10);
        let volume = vec![1000.0; 9];
        let err = Candles::with_volume(&open, &high, &low, &close, &volume).unwrap_err();
        assert!(matches!(err, PatternError::OutOfRangeParam { .. }));
    }

    #[test]
    fn test_candle_metrics() {
        let open = [100.0];
        let high = [110.0];
        let low = [90.0];
        let close = [105.0];
        let c = Candles::new(&open, &high, &low, &close).unwrap();

        assert_eq!(c.real_body(0), 5.0);
        assert_eq!(c.high_low_range(0), 20.0);
        assert_eq!(c.upper_shadow(0), 5.0);
        assert_eq!(c.lower_shadow(0), 10.0);
        assert_eq!(c.body_top(0), 105.0);
        assert_eq!(c.body_bottom(0), 100.0);
        assert!(c.color(0).is_white());
    }

    #[test]
    fn test_flat_bar_is_white() {
        let open = [100.0];
        let high = [101.0];
        let low = [99.0];
        let close = [100.0];
        let c = Candles::new(&open, &high, &low, &close).unwrap();
        assert_eq!(c.color(0), CandleColor::White);
        assert_eq!(c.color(0).sign(), 1);
    }

    #[test]
    fn test_gap_predicates_mirror() {
        let open = [100.0, 106.0];
        let high = [102.0, 108.0];
        let low = [98.0, 103.0];
        let close = [101.0, 107.0];
        let c = Candles::new(&open, &high, &low, &close).unwrap();

        // bar 1 low (103) clears bar 0 high (102)
        assert!(c.gap_up(1, 0));
        assert!(!c.gap_down(1, 0));
        assert!(c.body_gap_up(1, 0));
        assert!(!c.body_gap_down(1, 0));
    }

    #[test]
    fn test_check_range_rejects_inverted() {
        let (open, high, low, close) = flat_series(10);
        let c = Candles::new(&open, &high, &low, &close).unwrap();
        assert!(c.check_range(&(5..3), 10).is_err());
    }

    #[test]
    fn test_check_range_rejects_short_output() {
        let (open, high, low, close) = flat_series(10);
        let c = Candles::new(&open, &high, &low, &close).unwrap();
        assert!(c.check_range(&(0..10), 8).is_err());
        assert!(c.check_range(&(0..10), 10).is_ok());
    }

    #[test]
    fn test_output_range_empty() {
        let r = OutputRange::empty();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn test_builtin_count() {
        let all = BuiltinClassifier::all_with_defaults();
        assert_eq!(all.len(), 60);
    }

    #[test]
    fn test_builtin_defaults_are_valid() {
        for classifier in BuiltinClassifier::all_with_defaults() {
            assert!(classifier.lookback() <= 20, "{}", classifier.id());
            assert!(classifier.validate_params().is_ok());
        }
    }

    #[test]
    fn test_scan_parallel_all_defaults() {
        let (open, high, low, close) = flat_series(64);
        let c = Candles::new(&open, &high, &low, &close).unwrap();
        let classifiers = BuiltinClassifier::all_with_defaults();

        let (results, failures) = scan_parallel(&classifiers, &c, 0..c.len());
        assert_eq!(results.len(), 60);
        assert!(failures.is_empty());

        for r in &results {
            assert!(r.range.end <= c.len());
            for i in r.range.start..r.range.end {
                assert!(matches!(r.codes[i], -100 | 0 | 100), "{}", r.id);
            }
        }
    }

    #[test]
    fn test_scan_parallel_reports_bad_params() {
        let (open, high, low, close) = flat_series(64);
        let c = Candles::new(&open, &high, &low, &close).unwrap();

        let star = MorningStarClassifier {
            penetration: -0.5,
            ..Default::default()
        };
        let classifiers = vec![BuiltinClassifier::MorningStar(star)];

        let (results, failures) = scan_parallel(&classifiers, &c, 0..c.len());
        assert!(results.is_empty());
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0].error, PatternError::BadParam { .. }));
    }
}
