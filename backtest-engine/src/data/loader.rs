use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use common::{BacktestConfig, BacktestError, Result, TimeSeries};

/// Load a price series from a CSV file
///
/// Date and price columns are located by header name from `config`; a
/// missing column is an error naming the column and file. Rows are sorted
/// by timestamp and de-duplicated. Empty price fields become NaN and are
/// dropped later at alignment; garbage price text is an error.
pub fn load_price_series(path: &Path, config: &BacktestConfig) -> Result<TimeSeries> {
    let file = File::open(path)
        .map_err(|e| BacktestError::DataLoadError(format!("{}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| BacktestError::CsvError(e.to_string()))?
        .clone();
    let date_idx = find_column(&headers, &config.date_column, path)?;
    let price_idx = find_column(&headers, &config.price_column, path)?;

    let mut points = Vec::new();

    for result in csv_reader.records() {
        let record = result.map_err(|e| BacktestError::CsvError(e.to_string()))?;

        // Short rows carry neither a date nor a price; skip them
        if record.len() <= date_idx.max(price_idx) {
            continue;
        }

        let timestamp = parse_timestamp(&record[date_idx])?;
        let raw = record[price_idx].trim();
        let price = if raw.is_empty() {
            f64::NAN
        } else {
            raw.parse::<f64>().map_err(|_| BacktestError::InvalidPrice {
                column: config.price_column.clone(),
                value: raw.to_string(),
            })?
        };

        points.push((timestamp, price));
    }

    Ok(TimeSeries::from_points(points))
}

/// Load a series from a JSON array of (timestamp, value) pairs
pub fn load_series_json(path: &Path) -> Result<TimeSeries> {
    let file = File::open(path)
        .map_err(|e| BacktestError::DataLoadError(format!("{}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);
    let points: Vec<(DateTime<Utc>, f64)> = serde_json::from_reader(reader)?;
    Ok(TimeSeries::from_points(points))
}

fn find_column(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| BacktestError::ColumnMissing {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
}

/// Parse a timestamp from the formats market-data CSVs commonly carry
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    for fmt in &datetime_formats {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in &date_formats {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()));
        }
    }

    // Unix timestamp in seconds
    if let Ok(ts) = s.parse::<i64>() {
        if let Some(dt) = DateTime::from_timestamp(ts, 0) {
            return Ok(dt);
        }
    }

    Err(BacktestError::DateParse(s.to_string()))
}
