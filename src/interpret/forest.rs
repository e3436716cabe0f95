//! Random forest interpretation from variable importances

use super::importance::{first_max_by, normalize_by_max, sort_descending};
use super::{Interpretation, MetricsBlock};
use crate::format::{pipeline, NumberFormatter};
use crate::model::{EnsembleModel, EnsembleTask};

/// Interpreter for importance-bearing ensemble models
#[derive(Debug, Clone)]
pub struct RandomForestInterpreter {
    fmt: NumberFormatter,
}

impl RandomForestInterpreter {
    pub fn new(fmt: NumberFormatter) -> Self {
        Self { fmt }
    }

    pub fn interpret(&self, model: &EnsembleModel, task: EnsembleTask) -> Interpretation {
        let items = model.importance_items();
        let mut ranked = normalize_by_max(items);
        sort_descending(&mut ranked);

        let mut text = match task {
            EnsembleTask::Classification => {
                String::from("🌲 **Interpretação do Modelo Random Forest (Classificação)**\n\n")
            }
            EnsembleTask::Regression => {
                String::from("🌲 **Interpretação do Modelo Random Forest (Regressão)**\n\n")
            }
        };

        text.push_str("**Importância das Variáveis:**\n");
        for entry in &ranked {
            text.push_str(&format!(
                "• **{}**: {}%\n",
                entry.variable,
                pipeline::to_fixed(entry.importance, 1)
            ));
        }

        if let [top, runner_up, ..] = ranked.as_slice() {
            text.push_str(&format!(
                "\nA variável **{}** é a mais importante ({}%), seguida por **{}** ({}%).\n",
                top.variable,
                pipeline::to_fixed(top.importance, 1),
                runner_up.variable,
                pipeline::to_fixed(runner_up.importance, 1),
            ));
        }

        let reported = model.metrics.clone().unwrap_or_default();
        if model.metrics.is_some() {
            text.push_str("\n📈 **Métricas do Modelo:**\n");
            for (name, value) in reported.iter() {
                text.push_str(&format!("• {}: {}\n", name, self.fmt.accounting(value)));
            }
        }

        let recommendation = match first_max_by(items.iter(), |item| item.value) {
            Some(top) => format!(
                "Concentre os esforços de coleta de dados na variável **{}**, que possui a maior importância no modelo.",
                top.name
            ),
            None => "Nenhuma importância de variável disponível. Treine o modelo com mais dados para obter insights.".to_string(),
        };

        Interpretation {
            text,
            metrics: MetricsBlock::Reported(reported),
            coefficients: Vec::new(),
            variable_importance: ranked,
            recommendations: vec![recommendation],
        }
    }
}
