//! Engine configuration

use crate::error::{InterpretError, Result};
use crate::format::Locale;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dependent-variable name fragments denoting quantities that cannot be negative.
///
/// A scenario whose dependent variable contains one of these (case-insensitive)
/// has a negative estimate clipped to zero.
pub const DEFAULT_NON_NEGATIVE_TARGETS: &[&str] = &[
    "idade",
    "salario",
    "salário",
    "renda",
    "tempo",
    "duracao",
    "duração",
    "populacao",
    "população",
    "habitantes",
    "vendas",
    "quantidade",
    "preco",
    "preço",
    "custo",
    "receita",
    "faturamento",
    "peso",
    "altura",
    "distancia",
    "distância",
    "area",
    "área",
    "volume",
    "estoque",
    "horas",
    "dias",
    "anos",
    "numero",
    "número",
];

/// Configuration shared by the interpreters and the scenario simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Locale for number rendering
    pub locale: Locale,
    /// p-value threshold for statistical significance
    pub significance_level: f64,
    /// R² below this value triggers the unmodeled-factors caution
    pub r2_quality_threshold: f64,
    /// Dependent-variable fragments whose estimates are clipped at zero
    pub non_negative_targets: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: Locale::PtBr,
            significance_level: 0.05,
            r2_quality_threshold: 0.5,
            non_negative_targets: DEFAULT_NON_NEGATIVE_TARGETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    pub fn with_r2_quality_threshold(mut self, threshold: f64) -> Self {
        self.r2_quality_threshold = threshold;
        self
    }

    pub fn with_non_negative_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_negative_targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(InterpretError::ConfigError(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        if !(0.0..=1.0).contains(&self.r2_quality_threshold) {
            return Err(InterpretError::ConfigError(format!(
                "r2_quality_threshold must be in [0, 1], got {}",
                self.r2_quality_threshold
            )));
        }
        if self.non_negative_targets.iter().any(|t| t.trim().is_empty()) {
            return Err(InterpretError::ConfigError(
                "non_negative_targets must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a dependent variable names an inherently non-negative quantity
    pub fn is_non_negative_target(&self, dependent_variable: &str) -> bool {
        let name = dependent_variable.to_lowercase();
        self.non_negative_targets
            .iter()
            .any(|fragment| name.contains(&fragment.to_lowercase()))
    }
}
