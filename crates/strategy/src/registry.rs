use tracing::info;

use common::{Candle, Error, Result, Signal};

use crate::config::{StrategyConfig, StrategyFileConfig, TrendReversalParams};
use crate::indicators::CollaboratorSet;
use crate::trend_reversal::TrendReversalStrategy;
use crate::Strategy;

/// Holds all configured strategy instances and routes candle windows to them.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.strategies.len())
            .finish()
    }
}

impl StrategyRegistry {
    /// Build the registry from config.
    ///
    /// The indicator collaborators are host-owned, so the caller supplies a
    /// factory that wires a fresh set for each strategy entry.
    pub fn from_config<F>(file_cfg: &StrategyFileConfig, mut collaborators: F) -> Result<Self>
    where
        F: FnMut(&StrategyConfig) -> CollaboratorSet,
    {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();

        for cfg in &file_cfg.strategies {
            let strategy = build_strategy(cfg, collaborators(cfg))?;
            info!(name = %strategy.name(), symbol = %strategy.symbol(), "Registered strategy");
            strategies.push(strategy);
        }

        Ok(Self { strategies })
    }

    /// Evaluate every strategy bound to `symbol` against the candle window
    /// (newest-first). Returns one signal per matching strategy.
    pub fn evaluate_symbol(&mut self, symbol: &str, candles: &[Candle]) -> Vec<Signal> {
        self.strategies
            .iter_mut()
            .filter(|s| s.symbol() == symbol)
            .map(|s| s.evaluate(candles))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

// ─── Strategy builders ────────────────────────────────────────────────────────

fn build_strategy(
    cfg: &StrategyConfig,
    collaborators: CollaboratorSet,
) -> Result<Box<dyn Strategy>> {
    match cfg.strategy_type.as_str() {
        "trend_reversal" => {
            let params = TrendReversalParams::from_params(&cfg.params);
            Ok(Box::new(TrendReversalStrategy::new(
                cfg.clone(),
                params,
                collaborators,
            )))
        }
        other => Err(Error::Config(format!("unknown strategy type '{other}'"))),
    }
}
