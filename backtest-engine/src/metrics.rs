use common::TimeSeries;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Outcome of evaluating a single summary statistic
///
/// Degenerate inputs are first-class branches rather than caught failures,
/// so callers can tell which condition produced a 0.0 sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stat {
    /// The statistic is well-defined
    Value(f64),
    /// Fewer than two observations
    InsufficientData,
    /// Zero dispersion or a non-finite intermediate (e.g. a fractional
    /// power of a negative base)
    Undefined,
}

impl Stat {
    /// Collapse the degenerate branches to the reporting sentinel
    pub fn or_zero(self) -> f64 {
        match self {
            Stat::Value(v) => v,
            Stat::InsufficientData | Stat::Undefined => 0.0,
        }
    }
}

/// Compound annual growth rate from final equity and observation count
pub fn cagr_stat(final_equity: Option<f64>, n_obs: usize) -> Stat {
    let Some(equity) = final_equity else {
        return Stat::InsufficientData;
    };
    if n_obs <= 1 {
        return Stat::InsufficientData;
    }

    let cagr = equity.powf(TRADING_DAYS_PER_YEAR / n_obs as f64) - 1.0;
    if cagr.is_finite() {
        Stat::Value(cagr)
    } else {
        Stat::Undefined
    }
}

/// Annualized volatility of period returns
pub fn volatility_stat(returns: &[f64]) -> Stat {
    if returns.len() <= 1 {
        return Stat::InsufficientData;
    }

    let vol = sample_std(returns) * TRADING_DAYS_PER_YEAR.sqrt();
    if vol.is_finite() {
        Stat::Value(vol)
    } else {
        Stat::Undefined
    }
}

/// Annualized Sharpe ratio of period returns
pub fn sharpe_stat(returns: &[f64], periods_per_year: f64) -> Stat {
    if returns.len() <= 1 {
        return Stat::InsufficientData;
    }

    let std = sample_std(returns);
    if std == 0.0 || std.is_nan() {
        return Stat::Undefined;
    }

    Stat::Value((mean(returns) * periods_per_year) / (std * periods_per_year.sqrt()))
}

/// Worst peak-to-trough decline of an equity curve, as a fraction
///
/// Always <= 0; exactly 0.0 for a non-decreasing curve or empty input.
pub fn max_drawdown(equity: &TimeSeries) -> f64 {
    let mut roll_max = f64::NEG_INFINITY;
    let mut worst = 0.0;

    for value in equity.values() {
        if value > roll_max {
            roll_max = value;
        }
        let drawdown = value / roll_max - 1.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    worst
}

/// Standalone annualized Sharpe ratio over the non-NaN observations
///
/// Returns 0.0 when fewer than two observations remain or the standard
/// deviation is zero or NaN. Never divides by zero.
pub fn annualized_sharpe(returns: &TimeSeries, periods_per_year: f64) -> f64 {
    let clean: Vec<f64> = returns.values().filter(|v| !v.is_nan()).collect();
    sharpe_stat(&clean, periods_per_year).or_zero()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator)
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }

    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, TimeZone, Utc};

    fn series(values: &[f64]) -> TimeSeries {
        let points: Vec<(DateTime<Utc>, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                (
                    Utc.with_ymd_and_hms(2020, 1, 1 + i as u32, 0, 0, 0).unwrap(),
                    v,
                )
            })
            .collect();
        TimeSeries::from_points(points)
    }

    #[test]
    fn test_max_drawdown_increasing_curve_is_zero() {
        let equity = series(&[1.0, 1.1, 1.2, 1.3]);
        assert_eq!(max_drawdown(&equity), 0.0);
    }

    #[test]
    fn test_max_drawdown_half_loss() {
        let equity = series(&[1.0, 0.5]);
        assert_relative_eq!(max_drawdown(&equity), -0.5);
    }

    #[test]
    fn test_max_drawdown_recovery_keeps_worst() {
        let equity = series(&[1.0, 1.1, 0.9, 1.0, 1.2]);
        // Worst decline is 0.9 against the 1.1 peak
        assert_relative_eq!(max_drawdown(&equity), 0.9 / 1.1 - 1.0);
    }

    #[test]
    fn test_max_drawdown_empty_is_zero() {
        assert_eq!(max_drawdown(&TimeSeries::new()), 0.0);
    }

    #[test]
    fn test_annualized_sharpe_zero_variance_is_zero() {
        let returns = series(&[0.01, 0.01, 0.01, 0.01]);
        assert_eq!(annualized_sharpe(&returns, 252.0), 0.0);
    }

    #[test]
    fn test_annualized_sharpe_single_observation_is_zero() {
        let returns = series(&[0.01]);
        assert_eq!(annualized_sharpe(&returns, 252.0), 0.0);
    }

    #[test]
    fn test_annualized_sharpe_skips_nan() {
        let with_nan = series(&[0.01, f64::NAN, -0.02, 0.03]);
        let clean = series(&[0.01, -0.02, 0.03]);
        assert_relative_eq!(
            annualized_sharpe(&with_nan, 252.0),
            annualized_sharpe(&clean, 252.0)
        );
    }

    #[test]
    fn test_annualized_sharpe_known_value() {
        let values = [0.01, -0.02, 0.03, 0.02];
        let m = mean(&values);
        let s = sample_std(&values);
        let expected = (m * 252.0) / (s * 252.0_f64.sqrt());

        assert_relative_eq!(annualized_sharpe(&series(&values), 252.0), expected);
    }

    #[test]
    fn test_cagr_stat_negative_equity_is_undefined() {
        // Fractional power of a negative base is NaN, not a crash
        assert_eq!(cagr_stat(Some(-0.5), 10), Stat::Undefined);
        assert_eq!(Stat::Undefined.or_zero(), 0.0);
    }

    #[test]
    fn test_cagr_stat_doubling_over_a_year() {
        let stat = cagr_stat(Some(2.0), 252);
        match stat {
            Stat::Value(v) => assert_relative_eq!(v, 1.0),
            other => panic!("expected value, got {:?}", other),
        }
    }

    #[test]
    fn test_stat_branches_collapse_to_zero() {
        assert_eq!(Stat::InsufficientData.or_zero(), 0.0);
        assert_eq!(Stat::Undefined.or_zero(), 0.0);
        assert_eq!(Stat::Value(1.5).or_zero(), 1.5);
    }

    #[test]
    fn test_sample_std_known_value() {
        // Sample variance of [1, 2, 3] is 1.0
        assert_relative_eq!(sample_std(&[1.0, 2.0, 3.0]), 1.0);
    }
}
