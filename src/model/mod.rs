//! Fitted model payloads consumed by the interpreters
//!
//! Models arrive as loosely-typed JSON from the fitting backend. [`Model::from_value`]
//! runs the detector and then deserializes the payload into the matching typed
//! variant; unknown fields are ignored.

mod dataset;
pub mod detector;

pub use dataset::Dataset;
pub use detector::{detect, ModelKind};

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Sign of a coefficient or contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Strictly positive values are `Positive`, everything else `Negative`
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

/// Fitted coefficient of a linear model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Variable name
    #[serde(default)]
    pub name: Option<String>,
    /// Estimated coefficient
    pub value: f64,
    /// p-value of the estimate
    #[serde(default)]
    pub p_value: Option<f64>,
}

impl Coefficient {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: Some(name.into()),
            value,
            p_value: None,
        }
    }

    pub fn with_p_value(mut self, p: f64) -> Self {
        self.p_value = Some(p);
        self
    }

    /// Name for display, falling back to a 1-based positional label
    pub fn display_name(&self, index: usize) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Variável {}", index + 1),
        }
    }

    /// Significant when the p-value is known and below `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value.map(|p| p < alpha).unwrap_or(false)
    }

    pub fn direction(&self) -> Direction {
        Direction::of(self.value)
    }
}

/// Linear / GLM-style regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Coefficients in report order
    pub coefficients: Vec<Coefficient>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub intercept: f64,
    #[serde(default)]
    pub r2: Option<f64>,
    #[serde(default)]
    pub r2_adj: Option<f64>,
    #[serde(default)]
    pub aic: Option<f64>,
    #[serde(default)]
    pub bic: Option<f64>,
    #[serde(default)]
    pub p_value: Option<f64>,
}

impl LinearModel {
    pub fn new(coefficients: Vec<Coefficient>) -> Self {
        Self {
            coefficients,
            intercept: 0.0,
            r2: None,
            r2_adj: None,
            aic: None,
            bic: None,
            p_value: None,
        }
    }

    pub fn with_intercept(mut self, intercept: f64) -> Self {
        self.intercept = intercept;
        self
    }

    pub fn with_r2(mut self, r2: f64) -> Self {
        self.r2 = Some(r2);
        self
    }
}

/// Variable importance entry of an ensemble model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceItem {
    pub name: String,
    /// Non-negative importance magnitude
    pub value: f64,
}

impl ImportanceItem {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Feature-importance style ensemble model (random forest)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnsembleModel {
    #[serde(default)]
    pub importance: Option<Vec<ImportanceItem>>,
    #[serde(default)]
    pub variable_importance: Option<Vec<ImportanceItem>>,
    /// `"classification"` or `"regression"`
    #[serde(default, rename = "type")]
    pub task: Option<String>,
    /// Metrics reported by the fitting backend
    #[serde(default)]
    pub metrics: Option<ReportedMetrics>,
}

impl EnsembleModel {
    /// Importance list, preferring `importance` over `variable_importance`
    pub fn importance_items(&self) -> &[ImportanceItem] {
        self.importance
            .as_deref()
            .or(self.variable_importance.as_deref())
            .unwrap_or(&[])
    }
}

/// Named metrics in the order the fitting backend reported them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ReportedMetrics(Vec<(String, f64)>);

impl ReportedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metric; a repeated name replaces the earlier value in place
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ReportedMetrics {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut metrics = ReportedMetrics::new();
        for (name, value) in iter {
            metrics.insert(name, value);
        }
        metrics
    }
}

impl TryFrom<Map<String, Value>> for ReportedMetrics {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        map.into_iter()
            .map(|(name, value)| match value.as_f64() {
                Some(v) => Ok((name, v)),
                None => Err(format!("metric '{}' is not a number: {}", name, value)),
            })
            .collect()
    }
}

impl From<ReportedMetrics> for Map<String, Value> {
    fn from(metrics: ReportedMetrics) -> Self {
        metrics
            .0
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect()
    }
}

/// Ensemble prediction task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsembleTask {
    Classification,
    Regression,
}

/// Detected and typed model
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Linear(LinearModel),
    RandomForest(EnsembleModel, EnsembleTask),
}

impl Model {
    /// Detect the model family and deserialize the payload into it
    pub fn from_value(value: &Value) -> Result<Self> {
        let kind = detect(value)?;
        tracing::debug!(model_type = %kind, "detected model type");

        let model = match kind {
            ModelKind::LinearRegression => Model::Linear(LinearModel::deserialize(value)?),
            ModelKind::RandomForestRegression => {
                Model::RandomForest(EnsembleModel::deserialize(value)?, EnsembleTask::Regression)
            }
            ModelKind::RandomForestClassification => Model::RandomForest(
                EnsembleModel::deserialize(value)?,
                EnsembleTask::Classification,
            ),
        };
        Ok(model)
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Linear(_) => ModelKind::LinearRegression,
            Model::RandomForest(_, EnsembleTask::Regression) => ModelKind::RandomForestRegression,
            Model::RandomForest(_, EnsembleTask::Classification) => {
                ModelKind::RandomForestClassification
            }
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InterpretError;
    use serde_json::json;

    #[test]
    fn test_linear_from_value_defaults() {
        let value = json!({
            "coefficients": [{"name": "x1", "value": 2.0, "p_value": 0.01}, {"value": -1.0}],
            "intercept": null,
            "extra_field": "ignored"
        });
        let model = Model::from_value(&value).unwrap();
        match model {
            Model::Linear(linear) => {
                assert_eq!(linear.intercept, 0.0);
                assert_eq!(linear.coefficients.len(), 2);
                assert_eq!(linear.coefficients[1].display_name(1), "Variável 2");
                assert!(linear.coefficients[0].is_significant(0.05));
                assert!(!linear.coefficients[1].is_significant(0.05));
                assert!(linear.r2.is_none());
            }
            other => panic!("expected linear model, got {:?}", other),
        }
    }

    #[test]
    fn test_linear_marker_without_coefficients_is_malformed() {
        let value = json!({"is_linear_regression": true});
        let err = Model::from_value(&value).unwrap_err();
        assert!(matches!(err, InterpretError::MalformedInput(_)));
    }

    #[test]
    fn test_non_numeric_coefficient_is_malformed() {
        let value = json!({"coefficients": [{"name": "x1", "value": "two"}]});
        let err = Model::from_value(&value).unwrap_err();
        assert!(matches!(err, InterpretError::MalformedInput(_)));
    }

    #[test]
    fn test_ensemble_prefers_importance_field() {
        let value = json!({
            "is_random_forest": true,
            "type": "classification",
            "importance": [{"name": "a", "value": 1.0}],
            "variable_importance": [{"name": "b", "value": 2.0}, {"name": "c", "value": 3.0}]
        });
        let model = Model::from_value(&value).unwrap();
        assert_eq!(model.kind(), ModelKind::RandomForestClassification);
        if let Model::RandomForest(ensemble, _) = model {
            let items = ensemble.importance_items();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].name, "a");
        }
    }

    #[test]
    fn test_ensemble_falls_back_to_variable_importance() {
        let ensemble = EnsembleModel {
            variable_importance: Some(vec![ImportanceItem::new("b", 2.0)]),
            ..Default::default()
        };
        assert_eq!(ensemble.importance_items()[0].name, "b");
        assert!(EnsembleModel::default().importance_items().is_empty());
    }

    #[test]
    fn test_reported_metrics_keep_backend_order() {
        let value = json!({
            "is_random_forest": true,
            "metrics": {"rmse": 2.5, "accuracy": 0.9, "f1": 0.8}
        });
        let model = Model::from_value(&value).unwrap();
        let Model::RandomForest(ensemble, _) = model else {
            panic!("expected random forest");
        };
        let metrics = ensemble.metrics.unwrap();
        let names: Vec<&str> = metrics.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["rmse", "accuracy", "f1"]);
        assert_eq!(metrics.get("f1"), Some(0.8));

        let echoed = serde_json::to_string(&metrics).unwrap();
        assert_eq!(echoed, r#"{"rmse":2.5,"accuracy":0.9,"f1":0.8}"#);
    }

    #[test]
    fn test_reported_metrics_reject_non_numbers() {
        let value = json!({"is_random_forest": true, "metrics": {"accuracy": "high"}});
        let err = Model::from_value(&value).unwrap_err();
        assert!(matches!(err, InterpretError::MalformedInput(_)));
    }

    #[test]
    fn test_direction_of_zero_is_negative() {
        assert_eq!(Direction::of(0.0), Direction::Negative);
        assert_eq!(Direction::of(0.1), Direction::Positive);
        assert_eq!(Coefficient::new("x", -2.0).direction(), Direction::Negative);
    }
}
