use serde::{Deserialize, Serialize};

/// Configuration for CSV-driven backtest runs
///
/// Only the ingestion layer and the CLI read this; the engine itself takes
/// in-memory series and reads no process-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Header of the timestamp column
    pub date_column: String,
    /// Header of the price column
    pub price_column: String,
    /// Transaction cost in basis points per unit of position change
    pub cost_bps: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            date_column: "datetime".to_string(),
            price_column: "adj_close".to_string(),
            cost_bps: 0.0,
        }
    }
}

impl BacktestConfig {
    pub fn with_date_column(mut self, column: &str) -> Self {
        self.date_column = column.to_string();
        self
    }

    pub fn with_price_column(mut self, column: &str) -> Self {
        self.price_column = column.to_string();
        self
    }

    pub fn with_cost_bps(mut self, cost_bps: f64) -> Self {
        self.cost_bps = cost_bps;
        self
    }
}
