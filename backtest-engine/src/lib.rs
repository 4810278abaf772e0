pub mod data;
pub mod engine;
pub mod metrics;
pub mod optimize;
pub mod signals;
pub mod summary;

pub use data::{generate_synthetic_closes, load_file, load_price_series};
pub use engine::run_vectorized_backtest;
pub use metrics::{annualized_sharpe, max_drawdown, Stat, TRADING_DAYS_PER_YEAR};
pub use optimize::{ewma_covariance, mean_variance_optimize, sample_covariance};
pub use signals::{buy_and_hold_signal, constant_signal};
pub use summary::{run_csv_backtest, summarize};

// Re-export common types
pub use common::{
    BacktestConfig, BacktestError, BacktestResult, BacktestStats, Result, SummaryStats, TimeSeries,
};
