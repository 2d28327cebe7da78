use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC bar for a single instrument.
///
/// Candle windows are passed around as newest-first slices: index 0 is the
/// still-forming bar, index 1 the most recently closed bar, index N a bar N
/// bars ago. Confirmation rules never read index 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Kind of signal emitted by a strategy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    #[default]
    None,
    Buy,
    Sell,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::None => write!(f, "none"),
            SignalType::Buy => write!(f, "buy"),
            SignalType::Sell => write!(f, "sell"),
        }
    }
}

/// One of the four checks a trend-reversal evaluation reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationRule {
    Pivot,
    Oscillator,
    Trend,
    MovingAverage,
}

impl ConfirmationRule {
    /// All rules in their fixed display order.
    pub const ALL: [ConfirmationRule; 4] = [
        ConfirmationRule::Pivot,
        ConfirmationRule::Oscillator,
        ConfirmationRule::Trend,
        ConfirmationRule::MovingAverage,
    ];
}

impl std::fmt::Display for ConfirmationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationRule::Pivot => write!(f, "pivot"),
            ConfirmationRule::Oscillator => write!(f, "oscillator"),
            ConfirmationRule::Trend => write!(f, "trend"),
            ConfirmationRule::MovingAverage => write!(f, "moving_average"),
        }
    }
}

/// Per-rule diagnostic flags from one evaluation cycle.
///
/// A tradable signal requires all of `oscillator`, `trend` and
/// `moving_average` on top of a found pivot; partial confirmation keeps the
/// flags visible for diagnostics without emitting a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Confirmations {
    pub pivot: bool,
    pub oscillator: bool,
    pub trend: bool,
    pub moving_average: bool,
}

impl Confirmations {
    pub fn get(&self, rule: ConfirmationRule) -> bool {
        match rule {
            ConfirmationRule::Pivot => self.pivot,
            ConfirmationRule::Oscillator => self.oscillator,
            ConfirmationRule::Trend => self.trend,
            ConfirmationRule::MovingAverage => self.moving_average,
        }
    }

    /// Iterate the flags in their fixed display order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfirmationRule, bool)> + '_ {
        ConfirmationRule::ALL.iter().map(|&rule| (rule, self.get(rule)))
    }
}

/// Outcome of one strategy evaluation for one instrument.
///
/// `kind` is `None` unless a pivot was found and every confirmation rule
/// passed on the same cycle. Each call to a strategy returns an owned
/// `Signal`; when a cycle finds no pivot, the previous cycle's kind and
/// flags are re-emitted untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub kind: SignalType,
    pub confirmations: Confirmations,
}

impl Signal {
    /// The all-clear signal a strategy starts from when bound to a symbol.
    pub fn neutral(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: SignalType::None,
            confirmations: Confirmations::default(),
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.kind != SignalType::None
    }
}
