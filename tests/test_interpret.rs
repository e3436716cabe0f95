//! Integration test: model interpretation through the public façade

use kolosal_interpret::prelude::*;
use serde_json::json;

fn linear_request() -> InterpretRequest {
    InterpretRequest::new(json!({
        "is_linear_regression": true,
        "coefficients": [
            {"name": "area", "value": 1500.0, "p_value": 0.001},
            {"name": "idade_imovel", "value": -800.0, "p_value": 0.03},
            {"name": "distancia_centro", "value": 50.0, "p_value": 0.4}
        ],
        "intercept": 25000.0,
        "r2": 0.78,
        "r2_adj": 0.76,
        "aic": 1520.3,
        "bic": 1534.9,
        "p_value": 0.0001,
        "fitted_by": "backend-v2"
    }))
}

fn success(result: InterpretationResult) -> kolosal_interpret::interpret::InterpretationSuccess {
    match result {
        InterpretationResult::Success(s) => s,
        InterpretationResult::Failure(f) => panic!("expected success, got error: {}", f.error),
    }
}

#[test]
fn test_linear_envelope() {
    let result = success(interpret_model(&linear_request()));
    assert!(result.success);
    assert_eq!(result.model_type, ModelKind::LinearRegression);
    assert_eq!(result.coefficients.len(), 3);
    assert_eq!(result.variable_importance.len(), 3);
    assert_eq!(result.recommendations.len(), 2);

    let text = &result.interpretation;
    assert!(text.contains("**Intercepto:** 25,000.00."));
    assert!(text.contains("• **area**: coeficiente 1,500.00 (estatisticamente significativo)"));
    assert!(text.contains("• **distancia_centro**: coeficiente 50.00 (não significativo)"));
    assert!(text.contains("• AIC: 1,520.30"));
    assert!(text.contains("• R²: 0.78 (78% da variância explicada)"));

    // Two significant coefficients, area has the largest magnitude
    assert!(result.recommendations[0].starts_with("2 variáveis são estatisticamente significativas"));
    assert!(result.recommendations[0].contains("**area**"));
    assert!(result.recommendations[1].starts_with("✅"));
}

#[test]
fn test_linear_variable_importance_is_sum_normalized() {
    let request = InterpretRequest::new(json!({
        "coefficients": [{"name": "x1", "value": 2}, {"name": "x2", "value": -3}]
    }));
    let result = success(interpret_model(&request));
    let x1 = &result.variable_importance[0];
    let x2 = &result.variable_importance[1];
    assert_eq!(x1.variable, "x1");
    assert!((x1.importance - 40.0).abs() < 1e-10);
    assert_eq!(x1.direction, Some(Direction::Positive));
    assert_eq!(x2.variable, "x2");
    assert!((x2.importance - 60.0).abs() < 1e-10);
    assert_eq!(x2.direction, Some(Direction::Negative));
}

#[test]
fn test_forest_importance_is_max_normalized() {
    let request = InterpretRequest::new(json!({
        "importance": [{"name": "A", "value": 10}, {"name": "B", "value": 5}]
    }));
    let result = success(interpret_model(&request));
    assert_eq!(result.model_type, ModelKind::RandomForestRegression);
    let pct: Vec<f64> = result.variable_importance.iter().map(|v| v.importance).collect();
    assert_eq!(pct, vec![100.0, 50.0]);
    assert!(result.coefficients.is_empty());
}

#[test]
fn test_forest_classification_with_metrics() {
    let request = InterpretRequest::new(json!({
        "is_random_forest": true,
        "type": "classification",
        "variable_importance": [
            {"name": "renda", "value": 0.12},
            {"name": "idade", "value": 0.48},
            {"name": "score", "value": 0.40}
        ],
        "metrics": {"accuracy": 0.91, "f1": 0.88}
    }));
    let result = success(interpret_model(&request));
    assert_eq!(result.model_type, ModelKind::RandomForestClassification);
    assert_eq!(result.variable_importance[0].variable, "idade");
    assert!(result.interpretation.contains("(Classificação)"));
    assert!(result.interpretation.contains("**idade** é a mais importante (100.0%), seguida por **score** (83.3%)"));
    assert!(result.interpretation.contains("• accuracy: 0.91"));
    assert!(result.recommendations[0].contains("**idade**"));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["model_type"], json!("random_forest_classification"));
    assert_eq!(value["metrics"]["f1"], json!(0.88));
}

#[test]
fn test_forest_metrics_echo_in_backend_order() {
    let raw = r#"{
        "model": {
            "is_random_forest": true,
            "importance": [{"name": "a", "value": 1.0}],
            "metrics": {"r2": 0.75, "mae": 1.5, "accuracy": 0.9}
        }
    }"#;
    let request: serde_json::Value = serde_json::from_str(raw).unwrap();
    let result = InterpretEngine::default().interpret_value(request);
    let value = serde_json::to_value(&result).unwrap();
    let keys: Vec<&str> = value["metrics"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["r2", "mae", "accuracy"]);

    let result = success(result);
    assert!(result
        .interpretation
        .contains("• r2: 0.75\n• mae: 1.50\n• accuracy: 0.90\n"));
}

#[test]
fn test_detection_failure_envelope() {
    let result = interpret_model(&InterpretRequest::new(json!({"name": "not a model"})));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["model_type"], json!("unknown"));
    assert!(value["error"].as_str().unwrap().contains("Unrecognized model type"));
    assert!(value.get("interpretation").is_none());
    assert!(value.get("recommendations").is_none());
}

#[test]
fn test_malformed_coefficients_envelope() {
    let result = interpret_model(&InterpretRequest::new(json!({
        "is_linear_regression": true,
        "coefficients": "not a list"
    })));
    assert!(!result.is_success());
    assert_eq!(result.model_type(), "unknown");
}

#[test]
fn test_dataset_metrics() {
    // y = 1 + 2 * x exactly, so every error metric is zero
    let request = InterpretRequest::new(json!({
        "coefficients": [{"name": "x", "value": 2.0, "p_value": 0.001}],
        "intercept": 1.0
    }))
    .with_data(Dataset::new(
        vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]],
        vec![3.0, 5.0, 7.0, 9.0],
    ));
    let result = success(interpret_model(&request));
    match result.metrics {
        MetricsBlock::Linear(m) => {
            assert_eq!(m.rmse, Some(0.0));
            assert_eq!(m.mae, Some(0.0));
            assert_eq!(m.mse, Some(0.0));
            assert!((m.r2 - 1.0).abs() < 1e-12);
        }
        other => panic!("unexpected metrics block {:?}", other),
    }
}

/// The model payload carries no R²; with a dataset, R² is computed from the
/// dataset targets (actual) against the model's own predictions for `x`
/// (predicted). Feature rows are never treated as actual values.
#[test]
fn test_r2_without_model_value_uses_targets_against_predictions() {
    let request = InterpretRequest::new(json!({
        "coefficients": [{"name": "x", "value": 1.0}]
    }))
    .with_data(Dataset::new(vec![vec![1.0], vec![2.0], vec![3.0]], vec![1.0, 2.0, 4.0]));
    let result = success(interpret_model(&request));
    if let MetricsBlock::Linear(m) = result.metrics {
        // mean 7/3, ss_tot = 14/3, ss_res = 1
        assert!((m.r2 - (1.0 - 3.0 / 14.0)).abs() < 1e-12);
    } else {
        panic!("expected linear metrics");
    }
}

#[test]
fn test_misaligned_dataset_fails_whole_request() {
    let request = InterpretRequest::new(json!({
        "coefficients": [{"name": "x1", "value": 1.0}, {"name": "x2", "value": 1.0}]
    }))
    .with_data(Dataset::new(vec![vec![1.0, 2.0, 3.0]], vec![1.0]));
    let result = interpret_model(&request);
    match result {
        InterpretationResult::Failure(f) => assert!(f.error.contains("Invalid shape")),
        InterpretationResult::Success(_) => panic!("misaligned rows must not interpret"),
    }
}

#[test]
fn test_raw_json_request_with_options() {
    let engine = InterpretEngine::new(EngineConfig::default().with_significance_level(0.5));
    let result = engine.interpret_value(json!({
        "model": {"coefficients": [{"name": "x", "value": 1.0, "p_value": 0.3}]},
        "options": {"locale": "en-US"}
    }));
    let result = success(result);
    // 0.3 < 0.5 under the configured level
    assert!(result.interpretation.contains("(estatisticamente significativo)"));
    assert!(result.recommendations[0].contains("**x** é a única"));
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = std::sync::Arc::new(InterpretEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                let request = InterpretRequest::new(json!({
                    "coefficients": [{"name": "x", "value": i as f64 + 1.0}]
                }));
                engine.interpret(&request).is_success()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
