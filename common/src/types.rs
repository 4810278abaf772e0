use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered (timestamp, value) series
///
/// Timestamps are strictly increasing and unique after construction. No
/// gap-filling is performed; NaN values are representable and are dropped
/// when two series are aligned, not at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<(DateTime<Utc>, f64)>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build from arbitrary points: sorts by timestamp and keeps the first
    /// value seen for a duplicated timestamp.
    pub fn from_points(mut points: Vec<(DateTime<Utc>, f64)>) -> Self {
        points.sort_by_key(|(ts, _)| *ts);
        points.dedup_by_key(|(ts, _)| *ts);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(DateTime<Utc>, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(DateTime<Utc>, f64)> {
        self.points.last().copied()
    }

    /// Value of the last point, if any
    pub fn last_value(&self) -> Option<f64> {
        self.last().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(DateTime<Utc>, f64)> {
        self.points.iter()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.points.iter().map(|(ts, _)| *ts)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    /// Inner-join on timestamp. Timestamps present in only one series are
    /// dropped, as are rows where either value is NaN.
    pub fn align(&self, other: &TimeSeries) -> Vec<(DateTime<Utc>, f64, f64)> {
        let mut joined = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.points.len() && j < other.points.len() {
            let (ta, va) = self.points[i];
            let (tb, vb) = other.points[j];
            match ta.cmp(&tb) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    if !va.is_nan() && !vb.is_nan() {
                        joined.push((ta, va, vb));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        joined
    }
}

/// Summary statistics produced by the backtest engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestStats {
    pub cagr: f64,
    pub vol: f64,
    pub sharpe: f64,
}

/// Backtest output: net returns, compounded equity, and summary stats
///
/// `returns` and `equity_curve` share the aligned timestamp index, so
/// `returns.len() == equity_curve.len()` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub returns: TimeSeries,
    pub equity_curve: TimeSeries,
    pub stats: BacktestStats,
}

/// Full reporting mapping for a single-asset buy-and-hold run
///
/// Every field is always present and finite, whatever the input looked like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub cagr: f64,
    pub vol: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
    pub final_equity: f64,
    pub n_obs: usize,
    pub total_return: f64,
}
