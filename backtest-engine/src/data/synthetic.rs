use chrono::{Duration, Utc};
use common::TimeSeries;
use rand::Rng;

/// Generate a synthetic daily close series for demos and ad-hoc testing
pub fn generate_synthetic_closes(days: usize, initial_price: f64) -> TimeSeries {
    let mut rng = rand::thread_rng();
    let start_date = Utc::now() - Duration::days(days as i64);

    // Broad-index-like parameters
    let daily_volatility = 0.01;
    let drift = 0.0003;

    let mut price = initial_price;
    let mut points = Vec::with_capacity(days);

    for i in 0..days {
        let shock: f64 = rng.gen_range(-1.0..1.0);
        price *= 1.0 + drift + daily_volatility * shock;
        points.push((start_date + Duration::days(i as i64), price));
    }

    TimeSeries::from_points(points)
}

/// Generate a deterministic close series with a constant daily return
pub fn generate_trending_closes(days: usize, initial_price: f64, daily_return: f64) -> TimeSeries {
    let start_date = Utc::now() - Duration::days(days as i64);

    let mut price = initial_price;
    let mut points = Vec::with_capacity(days);

    for i in 0..days {
        price *= 1.0 + daily_return;
        points.push((start_date + Duration::days(i as i64), price));
    }

    TimeSeries::from_points(points)
}
