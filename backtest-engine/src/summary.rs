use std::path::Path;

use common::{BacktestConfig, BacktestResult, Result, SummaryStats};

use crate::data::load_file;
use crate::engine::run_vectorized_backtest;
use crate::metrics::max_drawdown;
use crate::signals::buy_and_hold_signal;

/// Expand an engine result into the full reporting mapping
///
/// All seven fields are always present and finite. An empty equity curve
/// reports a final equity of 1.0 and a total return of 0.0.
pub fn summarize(result: &BacktestResult) -> SummaryStats {
    let final_equity = result.equity_curve.last_value().unwrap_or(1.0);

    SummaryStats {
        cagr: result.stats.cagr,
        vol: result.stats.vol,
        sharpe: result.stats.sharpe,
        // Drawdown is computed on the equity curve, not raw prices
        max_drawdown: max_drawdown(&result.equity_curve),
        final_equity,
        n_obs: result.returns.len(),
        total_return: final_equity - 1.0,
    }
}

/// Buy-and-hold backtest over a price file
pub fn run_csv_backtest(path: &Path, config: &BacktestConfig) -> Result<SummaryStats> {
    let prices = load_file(path, config)?;
    let signal = buy_and_hold_signal(&prices);
    let result = run_vectorized_backtest(&prices, &signal, config.cost_bps);
    Ok(summarize(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, TimeZone, Utc};
    use common::TimeSeries;
    use std::fs::File;
    use std::io::Write;

    fn daily_series(values: &[f64]) -> TimeSeries {
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
    fn test_summarize_has_all_keys_finite() {
        let prices = daily_series(&[100.0, 101.0, 99.0, 103.0]);
        let signal = buy_and_hold_signal(&prices);
        let result = run_vectorized_backtest(&prices, &signal, 0.0);

        let stats = summarize(&result);

        assert_eq!(stats.n_obs, 4);
        assert_relative_eq!(stats.final_equity, 103.0 / 100.0, max_relative = 1e-12);
        assert_relative_eq!(stats.total_return, 0.03, max_relative = 1e-12);
        assert!(stats.max_drawdown <= 0.0);
        for value in [stats.cagr, stats.vol, stats.sharpe, stats.max_drawdown] {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_summarize_empty_result_defaults() {
        let result = run_vectorized_backtest(&TimeSeries::new(), &TimeSeries::new(), 0.0);

        let stats = summarize(&result);

        assert_eq!(stats.n_obs, 0);
        assert_eq!(stats.final_equity, 1.0);
        assert_eq!(stats.total_return, 0.0);
        assert_eq!(stats.max_drawdown, 0.0);
        assert_eq!(stats.cagr, 0.0);
    }

    #[test]
    fn test_run_csv_backtest_end_to_end() {
        let path = std::env::temp_dir().join(format!("{}-summary.csv", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(
            b"datetime,adj_close\n2020-01-01,100.0\n2020-01-02,110.0\n2020-01-03,121.0\n",
        )
        .unwrap();

        let stats = run_csv_backtest(&path, &BacktestConfig::default()).unwrap();

        assert_eq!(stats.n_obs, 3);
        // Buy-and-hold realizes the full price ratio
        assert_relative_eq!(stats.final_equity, 1.21, max_relative = 1e-12);
        assert_eq!(stats.max_drawdown, 0.0);
    }

    #[test]
    fn test_run_csv_backtest_missing_file() {
        let path = std::env::temp_dir().join("does-not-exist-anywhere.csv");
        assert!(run_csv_backtest(&path, &BacktestConfig::default()).is_err());
    }
}
