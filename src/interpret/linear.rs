//! Linear / GLM regression interpretation

use super::importance::{first_max_by, normalize_by_sum};
use super::{Interpretation, MetricsBlock};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::format::NumberFormatter;
use crate::metrics::RegressionMetrics;
use crate::model::{Coefficient, Dataset, Direction, LinearModel};
use serde::{Deserialize, Serialize};

/// Quality metrics block of a linear model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMetrics {
    pub r2: f64,
    pub r2_adj: f64,
    pub aic: f64,
    pub bic: f64,
    pub p_value: f64,
    /// Only present when a validation dataset was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mae: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mse: Option<f64>,
}

impl LinearMetrics {
    /// Model-reported statistics, completed with dataset metrics when available.
    ///
    /// When the model omits `r2`, the dataset value (targets against model
    /// predictions) is used, then 0.
    pub fn collect(model: &LinearModel, validation: Option<&RegressionMetrics>) -> Self {
        Self {
            r2: model.r2.or(validation.map(|m| m.r2)).unwrap_or(0.0),
            r2_adj: model.r2_adj.unwrap_or(0.0),
            aic: model.aic.unwrap_or(0.0),
            bic: model.bic.unwrap_or(0.0),
            p_value: model.p_value.unwrap_or(0.0),
            rmse: validation.map(|m| m.rmse),
            mae: validation.map(|m| m.mae),
            mse: validation.map(|m| m.mse),
        }
    }
}

/// Interpreter for linear regression models
#[derive(Debug, Clone)]
pub struct LinearRegressionInterpreter<'a> {
    config: &'a EngineConfig,
    fmt: NumberFormatter,
}

impl<'a> LinearRegressionInterpreter<'a> {
    pub fn new(config: &'a EngineConfig, fmt: NumberFormatter) -> Self {
        Self { config, fmt }
    }

    pub fn interpret(&self, model: &LinearModel, data: Option<&Dataset>) -> Result<Interpretation> {
        let validation = match data {
            Some(dataset) => {
                let predictions = dataset.predict(model)?;
                Some(RegressionMetrics::compute(dataset.targets(), predictions.view()))
            }
            None => None,
        };
        let metrics = LinearMetrics::collect(model, validation.as_ref());

        let mut text = String::from("📊 **Interpretação do Modelo de Regressão Linear**\n\n");
        self.write_intercept(&mut text, model.intercept);
        self.write_coefficients(&mut text, &model.coefficients);
        self.write_metrics(&mut text, &metrics);

        let mut recommendations = vec![self.significance_recommendation(&model.coefficients)];
        recommendations.push(self.r2_remark(metrics.r2));

        Ok(Interpretation {
            text,
            metrics: MetricsBlock::Linear(metrics),
            coefficients: model.coefficients.clone(),
            variable_importance: normalize_by_sum(&model.coefficients),
            recommendations,
        })
    }

    fn write_intercept(&self, text: &mut String, intercept: f64) {
        if intercept == 0.0 {
            return;
        }
        text.push_str(&format!(
            "**Intercepto:** {}. Representa o valor estimado da variável dependente quando todas as variáveis independentes são iguais a zero.\n\n",
            self.fmt.accounting(intercept)
        ));
    }

    fn write_coefficients(&self, text: &mut String, coefficients: &[Coefficient]) {
        text.push_str("**Coeficientes:**\n");
        for (i, coef) in coefficients.iter().enumerate() {
            let name = coef.display_name(i);
            let significance = if coef.is_significant(self.config.significance_level) {
                "estatisticamente significativo"
            } else {
                "não significativo"
            };
            let verb = match coef.direction() {
                Direction::Positive => "aumenta",
                Direction::Negative => "diminui",
            };
            text.push_str(&format!(
                "• **{}**: coeficiente {} ({}). Cada aumento de uma unidade em {} {} a variável dependente em {} unidades (p-valor: {}).\n",
                name,
                self.fmt.accounting(coef.value),
                significance,
                name,
                verb,
                self.fmt.auto(coef.value.abs()),
                self.fmt.scientific(coef.p_value),
            ));
        }
    }

    fn write_metrics(&self, text: &mut String, metrics: &LinearMetrics) {
        let value = |v: Option<f64>| match v {
            Some(v) if !v.is_nan() => self.fmt.accounting(v),
            _ => self.fmt.metric(None),
        };

        text.push_str("\n📈 **Métricas de Qualidade do Modelo:**\n");
        text.push_str(&format!("• RMSE: {}\n", value(metrics.rmse)));
        text.push_str(&format!("• MAE: {}\n", value(metrics.mae)));
        text.push_str(&format!("• MSE: {}\n", value(metrics.mse)));
        text.push_str(&format!(
            "• R²: {} ({}% da variância explicada)\n",
            value(Some(metrics.r2)),
            self.fmt.metric(Some(metrics.r2 * 100.0)),
        ));
        text.push_str(&format!("• R² Ajustado: {}\n", value(Some(metrics.r2_adj))));
        text.push_str(&format!("• AIC: {}\n", value(Some(metrics.aic))));
        text.push_str(&format!("• BIC: {}\n", value(Some(metrics.bic))));
    }

    fn significance_recommendation(&self, coefficients: &[Coefficient]) -> String {
        let alpha = self.config.significance_level;
        let significant: Vec<(usize, &Coefficient)> = coefficients
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_significant(alpha))
            .collect();

        match significant.as_slice() {
            [] => "Nenhuma variável apresentou significância estatística. Considere coletar mais dados ou revisar as variáveis incluídas no modelo.".to_string(),
            [(i, coef)] => format!(
                "A variável **{}** é a única estatisticamente significativa e representa a principal alavanca de intervenção prática.",
                coef.display_name(*i)
            ),
            many => {
                let (i, top) = first_max_by(many.iter(), |(_, c)| c.value.abs())
                    .copied()
                    .unwrap_or(many[0]);
                format!(
                    "{} variáveis são estatisticamente significativas. A variável **{}** apresenta o maior impacto (coeficiente {}).",
                    many.len(),
                    top.display_name(i),
                    self.fmt.accounting(top.value)
                )
            }
        }
    }

    fn r2_remark(&self, r2: f64) -> String {
        let threshold = self.config.r2_quality_threshold;
        if r2 < threshold {
            let share = if threshold == 0.5 {
                "menos da metade".to_string()
            } else {
                format!("menos de {}%", self.fmt.auto(threshold * 100.0))
            };
            format!(
                "⚠️ O R² de {} indica que o modelo explica {} da variância. Outros fatores não incluídos no modelo podem ser relevantes.",
                self.fmt.accounting(r2),
                share
            )
        } else {
            format!(
                "✅ O R² de {} indica um bom poder explicativo do modelo.",
                self.fmt.accounting(r2)
            )
        }
    }
}
