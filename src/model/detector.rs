//! Model type detection for loosely-typed model payloads
//!
//! Rules are applied in a fixed order and the first match wins:
//! 1. `is_linear_regression: true` marker
//! 2. `is_random_forest: true` marker (classification when `type == "classification"`)
//! 3. non-empty `coefficients` array
//! 4. non-empty `importance` / `variable_importance` array
//!
//! Markers always beat structural sniffing.

use crate::error::{InterpretError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Marker flag set by the fitting backend on linear/GLM models
pub const LINEAR_MARKER: &str = "is_linear_regression";
/// Marker flag set by the fitting backend on random forest models
pub const FOREST_MARKER: &str = "is_random_forest";

/// Detected model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LinearRegression,
    RandomForestRegression,
    RandomForestClassification,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "linear_regression",
            ModelKind::RandomForestRegression => "random_forest_regression",
            ModelKind::RandomForestClassification => "random_forest_classification",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an opaque model payload
pub fn detect(model: &Value) -> Result<ModelKind> {
    if has_marker(model, LINEAR_MARKER) {
        return Ok(ModelKind::LinearRegression);
    }

    if has_marker(model, FOREST_MARKER) {
        let is_classification = model.get("type").and_then(Value::as_str) == Some("classification");
        return Ok(if is_classification {
            ModelKind::RandomForestClassification
        } else {
            ModelKind::RandomForestRegression
        });
    }

    if non_empty_array(model, "coefficients") {
        return Ok(ModelKind::LinearRegression);
    }

    if non_empty_array(model, "importance") || non_empty_array(model, "variable_importance") {
        return Ok(ModelKind::RandomForestRegression);
    }

    Err(InterpretError::UnrecognizedModelType(
        "no model marker, coefficients or importance found".to_string(),
    ))
}

fn has_marker(model: &Value, marker: &str) -> bool {
    model.get(marker).and_then(Value::as_bool).unwrap_or(false)
}

fn non_empty_array(model: &Value, field: &str) -> bool {
    model
        .get(field)
        .and_then(Value::as_array)
        .map(|items| !items.is_empty())
        .unwrap_or(false)
}
