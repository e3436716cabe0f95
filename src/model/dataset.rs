//! Validation dataset and positional prediction

use crate::error::{InterpretError, Result};
use crate::model::LinearModel;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Labeled validation data
///
/// Feature rows are matched to coefficients **by position**, not by name:
/// `x[i][j]` multiplies `coefficients[j]`. Callers must order each row the
/// same way as the model's coefficient list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature rows
    pub x: Vec<Vec<f64>>,
    /// Target values
    pub y: Vec<f64>,
}

impl Dataset {
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    pub fn n_samples(&self) -> usize {
        self.y.len()
    }

    pub fn targets(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.y.as_slice())
    }

    /// Feature matrix with `n_features` columns.
    ///
    /// Fails when `x` and `y` disagree in length or any row is not exactly
    /// `n_features` wide.
    pub fn feature_matrix(&self, n_features: usize) -> Result<Array2<f64>> {
        if self.x.len() != self.y.len() {
            return Err(InterpretError::ShapeError {
                expected: format!("{} feature rows", self.y.len()),
                actual: format!("{} feature rows", self.x.len()),
            });
        }

        let mut flat = Vec::with_capacity(self.x.len() * n_features);
        for (i, row) in self.x.iter().enumerate() {
            if row.len() != n_features {
                return Err(InterpretError::ShapeError {
                    expected: format!("{} features per row", n_features),
                    actual: format!("{} features in row {}", row.len(), i),
                });
            }
            flat.extend_from_slice(row);
        }

        Ok(Array2::from_shape_vec((self.x.len(), n_features), flat)?)
    }

    /// Predictions of `model` for every row: `intercept + Σ coefficient_j * x_j`
    pub fn predict(&self, model: &LinearModel) -> Result<Array1<f64>> {
        let features = self.feature_matrix(model.coefficients.len())?;
        let weights: Array1<f64> = model.coefficients.iter().map(|c| c.value).collect();
        Ok(features.dot(&weights) + model.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coefficient;

    fn model() -> LinearModel {
        LinearModel::new(vec![Coefficient::new("x1", 2.0), Coefficient::new("x2", -1.0)])
            .with_intercept(1.0)
    }

    #[test]
    fn test_predict_positional() {
        let data = Dataset::new(vec![vec![1.0, 1.0], vec![3.0, 2.0]], vec![2.0, 5.0]);
        let preds = data.predict(&model()).unwrap();
        assert_eq!(preds.to_vec(), vec![2.0, 5.0]);
    }

    #[test]
    fn test_ragged_row_rejected() {
        let data = Dataset::new(vec![vec![1.0, 1.0], vec![3.0]], vec![2.0, 5.0]);
        let err = data.predict(&model()).unwrap_err();
        assert!(matches!(err, InterpretError::ShapeError { .. }));
    }

    #[test]
    fn test_row_count_mismatch_rejected() {
        let data = Dataset::new(vec![vec![1.0, 1.0]], vec![2.0, 5.0]);
        assert!(data.feature_matrix(2).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let data = Dataset::default();
        let preds = data.predict(&model()).unwrap();
        assert!(preds.is_empty());
    }
}
