//! Portfolio-weight optimization over per-asset return columns.
//!
//! Weights are proportional to `inv(cov) * mean` with a small ridge on the
//! covariance diagonal, normalized to sum to 1.0. Degenerate systems fall
//! back to equal weighting instead of erroring.

use crate::metrics::mean;

const RIDGE_EPSILON: f64 = 1e-8;
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Sample covariance matrix (n - 1 denominator) across asset return columns
///
/// Columns must share the same length; fewer than two observations yields a
/// zero matrix.
pub fn sample_covariance(assets: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let k = assets.len();
    let n = assets.first().map_or(0, |col| col.len());
    let mut cov = vec![vec![0.0; k]; k];

    if n < 2 {
        return cov;
    }

    let means: Vec<f64> = assets.iter().map(|col| mean(col)).collect();

    for i in 0..k {
        for j in i..k {
            let mut sum = 0.0;
            for t in 0..n {
                sum += (assets[i][t] - means[i]) * (assets[j][t] - means[j]);
            }
            let value = sum / (n - 1) as f64;
            cov[i][j] = value;
            cov[j][i] = value;
        }
    }

    cov
}

/// RiskMetrics-style exponentially weighted covariance
///
/// Observation t gets weight lambda^(n-1-t), normalized to sum to 1, so the
/// most recent observation weighs the most.
pub fn ewma_covariance(assets: &[Vec<f64>], lambda: f64) -> Vec<Vec<f64>> {
    let k = assets.len();
    let n = assets.first().map_or(0, |col| col.len());
    let mut cov = vec![vec![0.0; k]; k];

    if n == 0 {
        return cov;
    }

    let mut weights: Vec<f64> = (0..n).map(|i| lambda.powi((n - 1 - i) as i32)).collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }

    let means: Vec<f64> = assets.iter().map(|col| mean(col)).collect();

    for i in 0..k {
        for j in i..k {
            let mut sum = 0.0;
            for t in 0..n {
                sum += weights[t] * (assets[i][t] - means[i]) * (assets[j][t] - means[j]);
            }
            cov[i][j] = sum;
            cov[j][i] = sum;
        }
    }

    cov
}

/// Mean-variance optimal weights, normalized to sum to 1.0
///
/// Under `long_only` negative weights are clipped to zero and the remainder
/// renormalized. All-non-positive raw weights, a singular covariance, or a
/// zero normalizer fall back to equal weighting `1/N`.
pub fn mean_variance_optimize(assets: &[Vec<f64>], long_only: bool) -> Vec<f64> {
    let k = assets.len();
    if k == 0 {
        return Vec::new();
    }

    let mu: Vec<f64> = assets.iter().map(|col| mean(col)).collect();
    let mut cov = sample_covariance(assets);
    for i in 0..k {
        cov[i][i] += RIDGE_EPSILON;
    }

    let Some(inv) = invert(&cov) else {
        return equal_weights(k);
    };

    let raw: Vec<f64> = (0..k)
        .map(|i| (0..k).map(|j| inv[i][j] * mu[j]).sum())
        .collect();

    if long_only && raw.iter().all(|r| *r <= 0.0) {
        return equal_weights(k);
    }

    let total: f64 = raw.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return equal_weights(k);
    }
    let mut weights: Vec<f64> = raw.iter().map(|r| r / total).collect();

    if long_only {
        for w in &mut weights {
            if *w < 0.0 {
                *w = 0.0;
            }
        }
        let clipped: f64 = weights.iter().sum();
        if clipped == 0.0 {
            return equal_weights(k);
        }
        for w in &mut weights {
            *w /= clipped;
        }
    }

    weights
}

fn equal_weights(k: usize) -> Vec<f64> {
    vec![1.0 / k as f64; k]
}

/// Gauss-Jordan elimination with partial pivoting
fn invert(matrix: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = matrix.len();

    let mut aug: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.clone();
            r.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
            r
        })
        .collect();

    for col in 0..n {
        let pivot_row = (col..n).max_by(|&a, &b| {
            aug[a][col]
                .abs()
                .partial_cmp(&aug[b][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if aug[pivot_row][col].abs() < PIVOT_TOLERANCE {
            return None;
        }
        aug.swap(col, pivot_row);

        let pivot = aug[col][col];
        for value in &mut aug[col] {
            *value /= pivot;
        }

        let pivot_values = aug[col].clone();
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                aug[row][j] -= factor * pivot_values[j];
            }
        }
    }

    Some(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}
