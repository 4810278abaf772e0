use common::TimeSeries;

/// Fully-invested signal on the price series' own timestamps
pub fn buy_and_hold_signal(prices: &TimeSeries) -> TimeSeries {
    constant_signal(prices, 1.0)
}

/// Constant fraction-invested signal
///
/// The fraction is not clamped to [0, 1]; the engine leaves signal domain
/// enforcement to the caller.
pub fn constant_signal(prices: &TimeSeries, fraction: f64) -> TimeSeries {
    TimeSeries::from_points(prices.timestamps().map(|ts| (ts, fraction)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn prices() -> TimeSeries {
        TimeSeries::from_points(
            (1..=5)
                .map(|d| {
                    (
                        Utc.with_ymd_and_hms(2020, 1, d, 0, 0, 0).unwrap(),
                        100.0 + d as f64,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_buy_and_hold_covers_every_timestamp() {
        let prices = prices();
        let signal = buy_and_hold_signal(&prices);

        assert_eq!(signal.len(), prices.len());
        assert!(signal.values().all(|v| v == 1.0));
        assert!(signal
            .timestamps()
            .zip(prices.timestamps())
            .all(|(a, b)| a == b));
    }

    #[test]
    fn test_constant_signal_keeps_fraction_unclamped() {
        let signal = constant_signal(&prices(), 1.5);
        assert!(signal.values().all(|v| v == 1.5));
    }
}
