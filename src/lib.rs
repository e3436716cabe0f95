//! Kolosal Interpret - Model interpretation and scenario simulation
//!
//! Turns already-fitted models into readable reports. This crate never fits
//! models; it consumes coefficients and importances produced elsewhere and
//! returns text, metrics, rankings and recommendations.
//!
//! # Modules
//!
//! - [`format`] - Locale-aware number rendering with several display modes
//! - [`metrics`] - RMSE, MAE, MSE and R² over actual/predicted sequences
//! - [`model`] - Typed model payloads and model type detection
//! - [`interpret`] - Linear and random forest interpreters behind one façade
//! - [`scenario`] - What-if simulation with per-variable contributions
//! - [`config`] - Engine configuration
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use kolosal_interpret::prelude::*;
//! use serde_json::json;
//!
//! let request = InterpretRequest::new(json!({
//!     "coefficients": [{"name": "x1", "value": 2.0, "p_value": 0.01}],
//!     "intercept": 1.0
//! }));
//! let result = interpret_model(&request);
//! assert!(result.is_success());
//! assert_eq!(result.model_type(), "linear_regression");
//! ```

pub mod error;

pub mod config;
pub mod format;
pub mod interpret;
pub mod metrics;
pub mod model;
pub mod scenario;

pub mod cli;

pub use error::{InterpretError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{EngineConfig, DEFAULT_NON_NEGATIVE_TARGETS};
    pub use crate::error::{InterpretError, Result};
    pub use crate::format::{format_number, FormatKind, FormatOptions, Locale, NumberFormatter};
    pub use crate::interpret::{
        interpret_model, InterpretEngine, InterpretRequest, InterpretationResult, MetricsBlock,
        RequestOptions, VariableImportance,
    };
    pub use crate::metrics::{mae, mse, r2, rmse, RegressionMetrics};
    pub use crate::model::{
        detect, Coefficient, Dataset, Direction, EnsembleModel, ImportanceItem, LinearModel,
        Model, ModelKind, ReportedMetrics,
    };
    pub use crate::scenario::{Contribution, ScenarioSimulator, SimulateRequest, SimulationResult};
}
