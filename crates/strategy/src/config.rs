use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use common::Result;

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// type = "trend_reversal"
/// name = "BTC trend reversal"
/// symbol = "BTCUSDT"
///
/// [strategy.params]
/// pivot_lookback = 10
/// ma_period = 15
/// overbought = 70.0
/// oversold = 30.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy")]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Strategy type identifier; "trend_reversal" is the only known type.
    #[serde(rename = "type")]
    pub strategy_type: String,
    /// Human-readable name shown in logs.
    pub name: String,
    /// Instrument the strategy is bound to, e.g. "BTCUSDT".
    pub symbol: String,
    /// Strategy-specific parameters.
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

impl StrategyFileConfig {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Tuning knobs of the trend-reversal rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReversalParams {
    /// How many bars back the pivot scan reaches.
    pub pivot_lookback: usize,
    /// How many bars back the oscillator confirmation window may reach.
    pub oscillator_lookback: usize,
    /// Period of the simple moving average used for price confirmation.
    pub ma_period: usize,
    /// Oscillator level that counts as an oversold excursion (buy side).
    pub oversold: f64,
    /// Oscillator level that counts as an overbought excursion (sell side).
    pub overbought: f64,
    /// Oscillator readings at or above this are treated as invalid, never
    /// as overbought confirmation.
    pub overbought_cap: f64,
}

impl Default for TrendReversalParams {
    fn default() -> Self {
        Self {
            pivot_lookback: 10,
            oscillator_lookback: 10,
            ma_period: 15,
            oversold: 30.0,
            overbought: 70.0,
            overbought_cap: 200.0,
        }
    }
}

impl TrendReversalParams {
    /// Build from a config params table, falling back to defaults for
    /// missing keys.
    pub fn from_params(params: &HashMap<String, toml::Value>) -> Self {
        let defaults = Self::default();
        Self {
            pivot_lookback: param_usize(params, "pivot_lookback", defaults.pivot_lookback),
            oscillator_lookback: param_usize(
                params,
                "oscillator_lookback",
                defaults.oscillator_lookback,
            ),
            ma_period: param_usize(params, "ma_period", defaults.ma_period),
            oversold: param_f64(params, "oversold", defaults.oversold),
            overbought: param_f64(params, "overbought", defaults.overbought),
            overbought_cap: param_f64(params, "overbought_cap", defaults.overbought_cap),
        }
    }
}

fn param_f64(params: &HashMap<String, toml::Value>, key: &str, default: f64) -> f64 {
    params.get(key).and_then(|v| v.as_float()).unwrap_or(default)
}

fn param_usize(params: &HashMap<String, toml::Value>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|v| v.as_integer())
        .map(|v| v as usize)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_file() {
        let cfg: StrategyFileConfig = toml::from_str(
            r#"
            [[strategy]]
            type = "trend_reversal"
            name = "BTC trend reversal"
            symbol = "BTCUSDT"

            [strategy.params]
            pivot_lookback = 8
            oversold = 25.0
            "#,
        )
        .unwrap();

        assert_eq!(cfg.strategies.len(), 1);
        let strategy = &cfg.strategies[0];
        assert_eq!(strategy.strategy_type, "trend_reversal");
        assert_eq!(strategy.symbol, "BTCUSDT");

        let params = TrendReversalParams::from_params(&strategy.params);
        assert_eq!(params.pivot_lookback, 8);
        assert_eq!(params.oversold, 25.0);
        // untouched keys keep their defaults
        assert_eq!(params.ma_period, 15);
        assert_eq!(params.overbought_cap, 200.0);
    }

    #[test]
    fn empty_params_table_is_all_defaults() {
        let params = TrendReversalParams::from_params(&HashMap::new());
        assert_eq!(params, TrendReversalParams::default());
    }

    #[test]
    fn missing_params_section_deserializes_empty() {
        let cfg: StrategyFileConfig = toml::from_str(
            r#"
            [[strategy]]
            type = "trend_reversal"
            name = "ETH reversal"
            symbol = "ETHUSDT"
            "#,
        )
        .unwrap();
        assert!(cfg.strategies[0].params.is_empty());
    }
}
