//! Variable importance normalization
//!
//! Linear models and ensembles use different bases on purpose: coefficient
//! magnitudes are shares of their total, ensemble importances are relative to
//! the strongest variable. Keep the two functions separate.

use crate::model::{Coefficient, Direction, ImportanceItem};
use serde::{Deserialize, Serialize};

/// Normalized importance of one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableImportance {
    pub variable: String,
    /// Raw coefficient or importance value
    pub value: f64,
    /// Normalized importance in percent
    pub importance: f64,
    /// Sign of the coefficient; absent for ensemble importances
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// `|value|` of each coefficient as a percentage of the sum of all `|value|`s.
///
/// Keeps coefficient order. An all-zero model divides by zero and yields NaN.
pub fn normalize_by_sum(coefficients: &[Coefficient]) -> Vec<VariableImportance> {
    let total: f64 = coefficients.iter().map(|c| c.value.abs()).sum();
    coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| VariableImportance {
            variable: c.display_name(i),
            value: c.value,
            importance: c.value.abs() / total * 100.0,
            direction: Some(c.direction()),
        })
        .collect()
}

/// Each importance as a percentage of the largest one.
///
/// Keeps input order; a zero maximum yields NaN or infinity.
pub fn normalize_by_max(items: &[ImportanceItem]) -> Vec<VariableImportance> {
    let max = items
        .iter()
        .map(|item| item.value)
        .fold(f64::NEG_INFINITY, f64::max);
    items
        .iter()
        .map(|item| VariableImportance {
            variable: item.name.clone(),
            value: item.value,
            importance: item.value / max * 100.0,
            direction: None,
        })
        .collect()
}

/// Stable sort by normalized importance, highest first
pub fn sort_descending(ranked: &mut [VariableImportance]) {
    ranked.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// First item with the largest key; later ties never replace it
pub(crate) fn first_max_by<T, I, F>(items: I, key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> f64,
{
    items.into_iter().fold(None, |best, item| match best {
        Some(current) if !(key(&item) > key(&current)) => Some(current),
        _ => Some(item),
    })
}
