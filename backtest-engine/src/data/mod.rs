pub mod loader;
pub mod synthetic;

pub use loader::{load_price_series, load_series_json};
pub use synthetic::{generate_synthetic_closes, generate_trending_closes};

use std::path::Path;

use common::{BacktestConfig, BacktestError, Result, TimeSeries};

/// Load a price series from file, detecting format from extension
pub fn load_file(path: &Path, config: &BacktestConfig) -> Result<TimeSeries> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_price_series(path, config),
        "json" => load_series_json(path),
        _ => Err(BacktestError::UnsupportedFormat(ext)),
    }
}
