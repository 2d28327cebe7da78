use common::Candle;

/// Averaging method for [`MovingAverage::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaMethod {
    Simple,
    Exponential,
}

/// Which candle price a moving average is taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedPrice {
    Open,
    High,
    Low,
    Close,
}

impl AppliedPrice {
    fn of(self, candle: &Candle) -> f64 {
        match self {
            AppliedPrice::Open => candle.open,
            AppliedPrice::High => candle.high,
            AppliedPrice::Low => candle.low,
            AppliedPrice::Close => candle.close,
        }
    }
}

/// Moving average of a candle price, evaluated at a given bar offset.
pub trait MovingAverage {
    /// Average of `period` values ending at `bars_back` bars ago.
    ///
    /// `candles` is newest-first. Returns `None` when the window does not
    /// hold `period` bars at that offset yet.
    fn compute(
        &self,
        candles: &[Candle],
        bars_back: usize,
        period: usize,
        method: MaMethod,
        price: AppliedPrice,
    ) -> Option<f64>;
}

/// Built-in moving-average implementation covering SMA and EMA.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaCalculator;

impl MovingAverage for MaCalculator {
    fn compute(
        &self,
        candles: &[Candle],
        bars_back: usize,
        period: usize,
        method: MaMethod,
        price: AppliedPrice,
    ) -> Option<f64> {
        if period == 0 || candles.len() < bars_back + period {
            return None;
        }

        match method {
            MaMethod::Simple => {
                let window = &candles[bars_back..bars_back + period];
                Some(window.iter().map(|c| price.of(c)).sum::<f64>() / period as f64)
            }
            MaMethod::Exponential => {
                // Oldest-first values from the evaluation bar back through
                // the full available history.
                let values: Vec<f64> =
                    candles[bars_back..].iter().rev().map(|c| price.of(c)).collect();
                Some(ema(&values, period))
            }
        }
    }
}

/// Exponential moving average of the last `period` values in `data`
/// (oldest first). Seeded with the SMA of the first `period` values.
fn ema(data: &[f64], period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    let start = data.len().saturating_sub(period * 3); // enough history
    let slice = &data[start..];

    let seed_len = period.min(slice.len());
    let mut ema_val: f64 = slice[..seed_len].iter().sum::<f64>() / seed_len as f64;

    for &value in &slice[seed_len..] {
        ema_val = value * k + ema_val * (1.0 - k);
    }
    ema_val
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    /// Candles from newest-first closes; other prices mirror the close.
    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .map(|&close| Candle {
                open_time: Utc::now(),
                open: close,
                high: close,
                low: close,
                close,
            })
            .collect()
    }

    #[test]
    fn sma_is_the_mean_of_the_window() {
        // Newest-first: forming bar 10, then closed bars 20, 30, 40
        let candles = candles(&[10.0, 20.0, 30.0, 40.0]);
        let ma = MaCalculator.compute(&candles, 1, 3, MaMethod::Simple, AppliedPrice::Close);
        assert_eq!(ma, Some(30.0));
    }

    #[test]
    fn sma_offset_shifts_the_window() {
        let candles = candles(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let at_bar_2 = MaCalculator.compute(&candles, 2, 3, MaMethod::Simple, AppliedPrice::Close);
        assert_eq!(at_bar_2, Some(40.0));
    }

    #[test]
    fn sma_returns_none_when_window_not_filled() {
        let candles = candles(&[10.0, 20.0, 30.0]);
        // Offset 1 + period 3 needs 4 candles
        let ma = MaCalculator.compute(&candles, 1, 3, MaMethod::Simple, AppliedPrice::Close);
        assert!(ma.is_none());
    }

    #[test]
    fn zero_period_yields_none() {
        let candles = candles(&[10.0, 20.0]);
        assert!(MaCalculator
            .compute(&candles, 1, 0, MaMethod::Simple, AppliedPrice::Close)
            .is_none());
    }

    #[test]
    fn ema_of_constant_series_is_the_constant() {
        let candles = candles(&[100.0; 20]);
        let ma = MaCalculator.compute(&candles, 1, 5, MaMethod::Exponential, AppliedPrice::Close);
        let value = ma.unwrap();
        assert!((value - 100.0).abs() < 1e-9, "expected 100, got {value}");
    }

    #[test]
    fn ema_leans_toward_recent_values() {
        // Oldest bars at 100, most recent closed bars rising to 110
        let mut closes: Vec<f64> = (0..10).map(|i| 101.0 + i as f64).collect(); // newest-first 101..110
        closes.reverse();
        let mut newest_first = closes; // now 110, 109, ... 101
        newest_first.extend([100.0; 10]);
        let candles = candles(&newest_first);

        let ema = MaCalculator
            .compute(&candles, 1, 5, MaMethod::Exponential, AppliedPrice::Close)
            .unwrap();
        let sma = MaCalculator
            .compute(&candles, 1, 5, MaMethod::Simple, AppliedPrice::Close)
            .unwrap();
        assert!(ema > sma, "EMA {ema} should sit above SMA {sma} in an uptrend");
    }

    #[test]
    fn applied_price_selects_the_field() {
        let mut candles = candles(&[10.0, 20.0, 30.0]);
        for candle in &mut candles {
            candle.high = candle.close + 5.0;
        }
        let ma = MaCalculator.compute(&candles, 1, 2, MaMethod::Simple, AppliedPrice::High);
        assert_eq!(ma, Some(30.0)); // (25 + 35) / 2
    }
}
