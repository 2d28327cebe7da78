use tracing::{debug, info};

use common::{Candle, Confirmations, Signal, SignalType};

use crate::config::{StrategyConfig, TrendReversalParams};
use crate::indicators::{AppliedPrice, CollaboratorSet, MaMethod, PivotMark};
use crate::Strategy;

/// Direction of the candidate pivot driving one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Buy,
    Sell,
}

/// Trend-reversal rule engine.
///
/// Scans the recent window for the pivot closest to the present and runs
/// three confirmation checks in its direction: an oscillator excursion into
/// the exhaustion band, bar-1 trend polarity, and bar-1 close against a
/// simple moving average. A signal fires only when all three pass on the
/// same cycle; partial passes stay visible as diagnostic flags.
pub struct TrendReversalStrategy {
    cfg: StrategyConfig,
    params: TrendReversalParams,
    collaborators: CollaboratorSet,
    /// Signal reported on the previous cycle. Re-emitted whenever a cycle
    /// finds no candle data or no pivot, so stale flags survive — pinned
    /// behavior, see the stale-state tests.
    last: Signal,
}

impl TrendReversalStrategy {
    pub fn new(
        cfg: StrategyConfig,
        params: TrendReversalParams,
        collaborators: CollaboratorSet,
    ) -> Self {
        let last = Signal::neutral(cfg.symbol.clone());
        Self {
            cfg,
            params,
            collaborators,
            last,
        }
    }

    pub fn params(&self) -> &TrendReversalParams {
        &self.params
    }

    /// Walk the lookback window from the oldest bar toward the present,
    /// overwriting on every match so the nearest pivot wins regardless of
    /// direction.
    fn scan_for_pivot(&self) -> Option<(Direction, usize)> {
        let mut candidate = None;
        for bar in (1..=self.params.pivot_lookback).rev() {
            match self.collaborators.pivots.classify(bar) {
                PivotMark::Bullish => candidate = Some((Direction::Buy, bar)),
                PivotMark::Bearish => candidate = Some((Direction::Sell, bar)),
                PivotMark::Neutral => {}
            }
        }
        candidate
    }

    /// Oscillator exhaustion check over bars `[1, window_start]`.
    ///
    /// The window starts at the candidate bar, widened to at least bar 2 so
    /// a pivot on the latest closed bar never confirms off a single bar, and
    /// capped at the oscillator lookback.
    fn oscillator_confirms(&self, direction: Direction, pivot_bar: usize) -> bool {
        let window_start = pivot_bar.max(2).min(self.params.oscillator_lookback);
        (1..=window_start).any(|bar| {
            let upper = self.collaborators.oscillator.upper_value(bar);
            let lower = self.collaborators.oscillator.lower_value(bar);
            match direction {
                Direction::Buy => {
                    upper < self.params.oversold || lower < self.params.oversold
                }
                Direction::Sell => {
                    // Readings at or beyond the cap are invalid, not overbought.
                    let overbought = |value: f64| {
                        value > self.params.overbought && value < self.params.overbought_cap
                    };
                    overbought(upper) || overbought(lower)
                }
            }
        })
    }

    fn trend_confirms(&self, direction: Direction) -> bool {
        match direction {
            Direction::Buy => self.collaborators.trend.is_bullish(1),
            Direction::Sell => self.collaborators.trend.is_bearish(1),
        }
    }

    fn moving_average_confirms(&self, direction: Direction, candles: &[Candle], close: f64) -> bool {
        let ma = self.collaborators.moving_average.compute(
            candles,
            1,
            self.params.ma_period,
            MaMethod::Simple,
            AppliedPrice::Close,
        );
        match (direction, ma) {
            (Direction::Buy, Some(ma)) => close > ma,
            (Direction::Sell, Some(ma)) => close < ma,
            // Not enough closed bars for the average yet.
            (_, None) => false,
        }
    }
}

impl Strategy for TrendReversalStrategy {
    fn name(&self) -> &str {
        &self.cfg.name
    }

    fn symbol(&self) -> &str {
        &self.cfg.symbol
    }

    fn evaluate(&mut self, candles: &[Candle]) -> Signal {
        if candles.is_empty() {
            return self.last.clone();
        }

        self.collaborators.pivots.refresh(candles);
        self.collaborators.oscillator.refresh(candles);
        self.collaborators.trend.refresh(candles);

        let Some((direction, pivot_bar)) = self.scan_for_pivot() else {
            debug!(strategy = %self.cfg.name, "no pivot in lookback window");
            return self.last.clone();
        };

        // A conforming detector never flags a bar the store does not hold;
        // if one does, keep the previous signal rather than index past the
        // window.
        let Some(last_closed) = candles.get(1) else {
            return self.last.clone();
        };

        let confirmations = Confirmations {
            pivot: true,
            oscillator: self.oscillator_confirms(direction, pivot_bar),
            trend: self.trend_confirms(direction),
            moving_average: self.moving_average_confirms(direction, candles, last_closed.close),
        };

        let kind = if confirmations.oscillator && confirmations.trend && confirmations.moving_average
        {
            match direction {
                Direction::Buy => SignalType::Buy,
                Direction::Sell => SignalType::Sell,
            }
        } else {
            SignalType::None
        };

        if kind == SignalType::None {
            debug!(
                strategy = %self.cfg.name,
                pivot_bar,
                oscillator = confirmations.oscillator,
                trend = confirmations.trend,
                moving_average = confirmations.moving_average,
                "pivot found but not fully confirmed"
            );
        } else {
            info!(
                strategy = %self.cfg.name,
                symbol = %self.cfg.symbol,
                kind = %kind,
                pivot_bar,
                "trend reversal signal confirmed"
            );
        }

        self.last = Signal {
            symbol: self.cfg.symbol.clone(),
            kind,
            confirmations,
        };
        self.last.clone()
    }
}
