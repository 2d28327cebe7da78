pub mod config;
pub mod indicators;
pub mod registry;
pub mod trend_reversal;

pub use config::{StrategyConfig, StrategyFileConfig, TrendReversalParams};
pub use registry::StrategyRegistry;
pub use trend_reversal::TrendReversalStrategy;

use common::{Candle, Signal};

/// All strategy implementations must satisfy this trait.
pub trait Strategy: Send {
    /// Human-readable name of this strategy instance.
    fn name(&self) -> &str;

    /// The instrument this strategy is bound to (e.g. "BTCUSDT").
    fn symbol(&self) -> &str;

    /// Evaluate the current candle window and report the resulting signal.
    ///
    /// `candles` is newest-first: index 0 is the still-forming bar, index 1
    /// the most recently closed bar. An empty slice stands for "no candle
    /// data yet" and leaves the previously reported signal in force.
    ///
    /// Takes `&mut self` because strategies retain their last signal and
    /// refresh stateful indicator collaborators on every call.
    fn evaluate(&mut self, candles: &[Candle]) -> Signal;
}
