//! Model interpretation façade
//!
//! Detects the model family, routes to the matching interpreter and wraps the
//! outcome in a result envelope. This is the only place where errors become a
//! failure envelope; no partial interpretation is ever returned on failure.

mod forest;
mod importance;
mod linear;

pub use forest::RandomForestInterpreter;
pub use importance::{normalize_by_max, normalize_by_sum, sort_descending, VariableImportance};
pub use linear::{LinearMetrics, LinearRegressionInterpreter};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::format::{Locale, NumberFormatter};
use crate::model::{Coefficient, Dataset, Model, ModelKind, ReportedMetrics};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-request options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Overrides the engine locale for this request
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// Interpretation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretRequest {
    /// Opaque model payload from the fitting backend
    pub model: Value,
    #[serde(default)]
    pub data: Option<Dataset>,
    #[serde(default)]
    pub options: Option<RequestOptions>,
}

impl InterpretRequest {
    pub fn new(model: Value) -> Self {
        Self {
            model,
            data: None,
            options: None,
        }
    }

    pub fn with_data(mut self, data: Dataset) -> Self {
        self.data = Some(data);
        self
    }
}

/// Metrics block of a successful interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricsBlock {
    /// Linear model statistics
    Linear(LinearMetrics),
    /// Metrics echoed from an ensemble model
    Reported(ReportedMetrics),
}

/// Output of a single interpreter
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub text: String,
    pub metrics: MetricsBlock,
    pub coefficients: Vec<Coefficient>,
    pub variable_importance: Vec<VariableImportance>,
    pub recommendations: Vec<String>,
}

/// Successful interpretation envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationSuccess {
    pub success: bool,
    pub model_type: ModelKind,
    pub interpretation: String,
    pub metrics: MetricsBlock,
    pub coefficients: Vec<Coefficient>,
    pub variable_importance: Vec<VariableImportance>,
    pub recommendations: Vec<String>,
}

/// Failed interpretation envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationFailure {
    pub success: bool,
    pub error: String,
    pub model_type: String,
}

/// Result envelope returned by [`InterpretEngine::interpret`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterpretationResult {
    Success(InterpretationSuccess),
    Failure(InterpretationFailure),
}

impl InterpretationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InterpretationResult::Success(_))
    }

    /// Model type string as reported in the envelope
    pub fn model_type(&self) -> &str {
        match self {
            InterpretationResult::Success(s) => s.model_type.as_str(),
            InterpretationResult::Failure(f) => &f.model_type,
        }
    }

    fn from_outcome(kind: ModelKind, interpretation: Interpretation) -> Self {
        InterpretationResult::Success(InterpretationSuccess {
            success: true,
            model_type: kind,
            interpretation: interpretation.text,
            metrics: interpretation.metrics,
            coefficients: interpretation.coefficients,
            variable_importance: interpretation.variable_importance,
            recommendations: interpretation.recommendations,
        })
    }

    fn failure(message: String) -> Self {
        InterpretationResult::Failure(InterpretationFailure {
            success: false,
            error: message,
            model_type: "unknown".to_string(),
        })
    }
}

/// Stateless interpretation engine
#[derive(Debug, Clone, Default)]
pub struct InterpretEngine {
    config: EngineConfig,
}

impl InterpretEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Interpret a model, converting any error into a failure envelope
    pub fn interpret(&self, request: &InterpretRequest) -> InterpretationResult {
        match self.dispatch(request) {
            Ok((kind, interpretation)) => InterpretationResult::from_outcome(kind, interpretation),
            Err(e) => {
                tracing::warn!(error = %e, "model interpretation failed");
                InterpretationResult::failure(e.to_string())
            }
        }
    }

    /// Interpret a raw JSON request
    pub fn interpret_value(&self, request: Value) -> InterpretationResult {
        match serde_json::from_value::<InterpretRequest>(request) {
            Ok(request) => self.interpret(&request),
            Err(e) => {
                tracing::warn!(error = %e, "invalid interpretation request");
                InterpretationResult::failure(crate::error::InterpretError::from(e).to_string())
            }
        }
    }

    fn dispatch(&self, request: &InterpretRequest) -> Result<(ModelKind, Interpretation)> {
        let model = Model::from_value(&request.model)?;
        let kind = model.kind();
        let fmt = self.formatter(request.options.as_ref());
        tracing::debug!(model_type = %kind, locale = %fmt.locale(), "interpreting model");

        let interpretation = match &model {
            Model::Linear(linear) => LinearRegressionInterpreter::new(&self.config, fmt)
                .interpret(linear, request.data.as_ref())?,
            Model::RandomForest(ensemble, task) => {
                RandomForestInterpreter::new(fmt).interpret(ensemble, *task)
            }
        };
        Ok((kind, interpretation))
    }

    fn formatter(&self, options: Option<&RequestOptions>) -> NumberFormatter {
        let locale = options
            .and_then(|o| o.locale)
            .unwrap_or(self.config.locale);
        NumberFormatter::new(locale)
    }
}

/// Interpret a model with the default configuration
pub fn interpret_model(request: &InterpretRequest) -> InterpretationResult {
    InterpretEngine::default().interpret(request)
}
