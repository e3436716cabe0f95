//! What-if scenario simulation over linear models
//!
//! Decomposes the predicted value of a dependent variable into the intercept
//! plus one contribution per coefficient (`coefficient * input`), applies the
//! non-negative clipping rule and renders a narrative report.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::format::NumberFormatter;
use crate::interpret::RequestOptions;
use crate::model::{Direction, LinearModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Scenario simulation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    /// Input value per variable name; missing variables count as 0
    #[serde(default)]
    pub input_values: HashMap<String, f64>,
    pub model: LinearModel,
    pub dependent_variable: String,
    #[serde(default)]
    pub options: Option<RequestOptions>,
}

/// Contribution of one variable to the estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub variable: String,
    pub coefficient: f64,
    pub input_value: f64,
    /// `coefficient * input_value`
    pub contribution: f64,
    /// Sign of the coefficient
    pub direction: Direction,
}

/// Outcome of a scenario simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub success: bool,
    pub interpretation_text: String,
    /// Estimate after the non-negative clipping rule
    pub estimate: f64,
    /// `intercept + Σ contributions`, before clipping
    pub original_estimate: f64,
    pub contributions: Vec<Contribution>,
    /// Set when the estimate was clipped to zero
    pub has_warning: bool,
    pub recommendations: Vec<String>,
}

/// Scenario simulator
#[derive(Debug, Clone, Default)]
pub struct ScenarioSimulator {
    config: EngineConfig,
}

impl ScenarioSimulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Simulate a raw JSON request; malformed payloads are returned as errors
    pub fn simulate_value(&self, request: Value) -> Result<SimulationResult> {
        let request: SimulateRequest = serde_json::from_value(request)?;
        Ok(self.simulate_request(&request))
    }

    pub fn simulate_request(&self, request: &SimulateRequest) -> SimulationResult {
        let locale = request
            .options
            .as_ref()
            .and_then(|o| o.locale)
            .unwrap_or(self.config.locale);
        self.run(
            &request.model,
            &request.input_values,
            &request.dependent_variable,
            NumberFormatter::new(locale),
        )
    }

    /// Simulate with the configured locale
    pub fn simulate(
        &self,
        model: &LinearModel,
        input_values: &HashMap<String, f64>,
        dependent_variable: &str,
    ) -> SimulationResult {
        self.run(
            model,
            input_values,
            dependent_variable,
            NumberFormatter::new(self.config.locale),
        )
    }

    fn run(
        &self,
        model: &LinearModel,
        input_values: &HashMap<String, f64>,
        dependent_variable: &str,
        fmt: NumberFormatter,
    ) -> SimulationResult {
        let contributions = decompose(model, input_values);
        let original_estimate =
            model.intercept + contributions.iter().map(|c| c.contribution).sum::<f64>();

        let has_warning = original_estimate < 0.0
            && self.config.is_non_negative_target(dependent_variable);
        let estimate = if has_warning {
            tracing::warn!(
                dependent_variable,
                original_estimate,
                "negative estimate clipped to zero"
            );
            0.0
        } else {
            original_estimate
        };

        let report = Report {
            fmt,
            dependent_variable,
        };
        let interpretation_text = report.narrative(
            model.intercept,
            &contributions,
            estimate,
            original_estimate,
            has_warning,
        );
        let recommendations = report.recommendations(&contributions);

        SimulationResult {
            success: true,
            interpretation_text,
            estimate,
            original_estimate,
            contributions,
            has_warning,
            recommendations,
        }
    }
}

/// Per-variable contributions in coefficient order.
///
/// Inputs are looked up by coefficient name only; an unnamed coefficient
/// always gets input 0 even though it is labeled positionally.
pub fn decompose(model: &LinearModel, input_values: &HashMap<String, f64>) -> Vec<Contribution> {
    model
        .coefficients
        .iter()
        .enumerate()
        .map(|(i, coef)| {
            let input_value = coef
                .name
                .as_ref()
                .and_then(|name| input_values.get(name))
                .copied()
                .unwrap_or(0.0);
            let variable = coef.display_name(i);
            Contribution {
                coefficient: coef.value,
                input_value,
                contribution: coef.value * input_value,
                direction: coef.direction(),
                variable,
            }
        })
        .collect()
}

struct Report<'a> {
    fmt: NumberFormatter,
    dependent_variable: &'a str,
}

impl Report<'_> {
    fn narrative(
        &self,
        intercept: f64,
        contributions: &[Contribution],
        estimate: f64,
        original_estimate: f64,
        has_warning: bool,
    ) -> String {
        let dep = self.dependent_variable;
        let fmt = &self.fmt;

        let mut text = format!("🔮 **Simulação de Cenário: {}**\n\n", dep);
        text.push_str(&format!(
            "**Intercepto:** {}. Este é o valor base de {} quando todas as variáveis são iguais a zero.\n\n",
            fmt.accounting(intercept),
            dep
        ));

        text.push_str("**Contribuição de cada variável:**\n\n");
        for c in contributions {
            let tendency = match c.direction {
                Direction::Positive => "aumentar",
                Direction::Negative => "reduzir",
            };
            text.push_str(&format!("**{}**\n", c.variable));
            text.push_str(&format!("• Coeficiente: {}\n", fmt.accounting(c.coefficient)));
            text.push_str(&format!("• Valor informado: {}\n", fmt.accounting(c.input_value)));
            text.push_str(&format!("• Contribuição: {}\n", fmt.accounting(c.contribution)));
            text.push_str(&format!(
                "• Mantidas as demais variáveis constantes, cada unidade adicional em {} tende a {} {} em {}.\n\n",
                c.variable,
                tendency,
                dep,
                fmt.accounting(c.coefficient.abs())
            ));
        }

        text.push_str(&format!(
            "**Estimativa final de {}:** {}\n\n",
            dep,
            fmt.accounting(estimate)
        ));

        if has_warning {
            text.push_str(&format!(
                "⚠️ **Atenção:** o modelo estimou um valor negativo ({}) para {}, o que não é possível para esta variável. A estimativa foi ajustada para 0. Revise os valores informados ou o ajuste do modelo.\n\n",
                fmt.accounting(original_estimate),
                dep
            ));
        } else {
            text.push_str(
                "ℹ️ Esta é uma estimativa pontual baseada nos coeficientes do modelo; o valor real pode variar.\n\n",
            );
        }

        text.push_str("**Como usar esta simulação:**\n");
        text.push_str(&format!(
            "• Para diminuir {}, reduza as variáveis com os maiores coeficientes positivos.\n",
            dep
        ));
        text.push_str(&format!(
            "• Para aumentar {}, maximize as variáveis com os maiores coeficientes positivos.\n",
            dep
        ));
        text.push_str("• Use esta simulação para comparar diferentes cenários.\n");
        text
    }

    fn recommendations(&self, contributions: &[Contribution]) -> Vec<String> {
        let dep = self.dependent_variable;
        let mut recommendations = Vec::new();

        let raising = strongest(contributions, Direction::Positive);
        if !raising.is_empty() {
            recommendations.push(format!(
                "Para aumentar {}, priorize: {}.",
                dep,
                raising.join(" e ")
            ));
        }

        let lowering = strongest(contributions, Direction::Negative);
        if !lowering.is_empty() {
            recommendations.push(format!(
                "Para reduzir {}, priorize: {}.",
                dep,
                lowering.join(" e ")
            ));
        }
        recommendations
    }
}

/// Names of the two strongest coefficients of one sign, by `|coefficient|`
fn strongest(contributions: &[Contribution], direction: Direction) -> Vec<String> {
    let mut group: Vec<&Contribution> = contributions
        .iter()
        .filter(|c| match direction {
            Direction::Positive => c.coefficient > 0.0,
            Direction::Negative => c.coefficient < 0.0,
        })
        .collect();
    group.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    group
        .into_iter()
        .take(2)
        .map(|c| format!("**{}**", c.variable))
        .collect()
}
