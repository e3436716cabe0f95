//! Regression quality metrics
//!
//! Plain formulas over parallel `actual` / `predicted` sequences. Degenerate
//! inputs (empty sequences, constant targets) are not special-cased: the NaN or
//! infinity they produce flows through to the caller unchanged.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Root mean squared error
pub fn rmse(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Mean absolute error
pub fn mae(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    let n = actual.len() as f64;
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n
}

/// Mean squared error
pub fn mse(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    let n = actual.len() as f64;
    squared_residuals(actual, predicted) / n
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// A constant `actual` gives `SS_tot = 0`, so the result is NaN or infinite.
pub fn r2(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    let n = actual.len() as f64;
    let mean = actual.sum() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res = squared_residuals(actual, predicted);
    1.0 - ss_res / ss_tot
}

fn squared_residuals(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum()
}

/// Error metrics computed against a validation dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// R-squared
    pub r2: f64,
}

impl RegressionMetrics {
    /// Compute every metric in one pass over the residuals
    pub fn compute(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> Self {
        let mse = mse(actual, predicted);
        Self {
            rmse: mse.sqrt(),
            mae: mae(actual, predicted),
            mse,
            r2: r2(actual, predicted),
        }
    }
}
