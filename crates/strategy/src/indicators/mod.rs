//! Collaborator interfaces the rule engine consumes.
//!
//! The engine only ever talks to the pivot detector, oscillator, trend
//! classifier and moving-average function through these traits, so hosts
//! can plug in their own implementations (or test doubles) freely.

pub mod moving_average;

pub use moving_average::{AppliedPrice, MaCalculator, MaMethod, MovingAverage};

use common::Candle;

/// Classification of one bar by the pivot detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotMark {
    /// Local turning point out of a downtrend.
    Bullish,
    /// Local turning point out of an uptrend.
    Bearish,
    Neutral,
}

/// Detects directional turning points ("zigzag arrows") in a candle window.
pub trait PivotDetector {
    /// Recompute against the current candle window (newest-first).
    fn refresh(&mut self, candles: &[Candle]);

    /// Classify the bar `bars_back` bars ago. Bars outside the data the
    /// detector has seen are `Neutral`.
    fn classify(&self, bars_back: usize) -> PivotMark;
}

/// Momentum oscillator exposing two channel series per bar, used for
/// overbought/oversold confirmation.
pub trait Oscillator {
    fn refresh(&mut self, candles: &[Candle]);

    /// Value of the upper ("red") channel at the given bar.
    fn upper_value(&self, bars_back: usize) -> f64;

    /// Value of the lower ("green") channel at the given bar.
    fn lower_value(&self, bars_back: usize) -> f64;
}

/// Per-bar green/red polarity from a trend-coloring indicator.
pub trait TrendClassifier {
    fn refresh(&mut self, candles: &[Candle]);

    fn is_bullish(&self, bars_back: usize) -> bool;

    fn is_bearish(&self, bars_back: usize) -> bool;
}

/// The full set of collaborators a trend-reversal strategy is wired with.
///
/// The moving average defaults to the built-in [`MaCalculator`]; the other
/// three have no built-in implementation and always come from the host.
pub struct CollaboratorSet {
    pub pivots: Box<dyn PivotDetector + Send>,
    pub oscillator: Box<dyn Oscillator + Send>,
    pub trend: Box<dyn TrendClassifier + Send>,
    pub moving_average: Box<dyn MovingAverage + Send>,
}

impl CollaboratorSet {
    pub fn new(
        pivots: Box<dyn PivotDetector + Send>,
        oscillator: Box<dyn Oscillator + Send>,
        trend: Box<dyn TrendClassifier + Send>,
    ) -> Self {
        Self {
            pivots,
            oscillator,
            trend,
            moving_average: Box::new(MaCalculator),
        }
    }

    pub fn with_moving_average(mut self, moving_average: Box<dyn MovingAverage + Send>) -> Self {
        self.moving_average = moving_average;
        self
    }
}
