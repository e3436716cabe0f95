//! Kolosal Interpret CLI Module
//!
//! Command-line interface for interpreting fitted models and simulating scenarios
//! from JSON request files.

use clap::{Parser, Subcommand};
use colored::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::format::{format_number, FormatKind, FormatOptions, Locale};
use crate::interpret::{InterpretEngine, InterpretationResult};
use crate::scenario::ScenarioSimulator;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn print_block(text: &str) {
    for line in text.lines() {
        println!("  {}", line);
    }
}

fn print_recommendations(recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    section("Recommendations");
    for rec in recommendations {
        println!("  {} {}", accent("›"), rec);
    }
    println!();
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "kolosal-interpret")]
#[command(author = "KolosalAI")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpret fitted models and simulate what-if scenarios")]
#[command(long_about = None)]
pub struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Locale for number rendering (pt-BR, en-US, de-DE, fr-FR)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interpret a fitted model
    Interpret {
        /// Request file: {"model": ..., "data": {"x": ..., "y": ...}}
        request: PathBuf,

        /// Print the raw JSON envelope
        #[arg(long)]
        json: bool,
    },

    /// Simulate a what-if scenario on a linear model
    Simulate {
        /// Request file: {"inputValues": ..., "model": ..., "dependentVariable": ...}
        request: PathBuf,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Format a single number
    Format {
        /// Value to render
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Display mode (auto, fixed, scientific, accounting)
        #[arg(short, long, default_value = "auto")]
        kind: String,

        /// Fractional digits for scientific mode
        #[arg(short, long, default_value = "2")]
        digits: usize,

        /// Unit appended to the output
        #[arg(short, long)]
        unit: Option<String>,
    },
}

/// Build the engine configuration from `--config` and `--locale`
pub fn load_config(path: Option<&Path>, locale: Option<&str>) -> anyhow::Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(tag) = locale {
        config.locale = tag.parse::<Locale>()?;
    }
    Ok(config)
}

fn read_request(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_interpret(request_path: &Path, config: EngineConfig, json: bool) -> anyhow::Result<()> {
    let request = read_request(request_path)?;
    let engine = InterpretEngine::new(config);

    if json {
        let result = engine.interpret_value(request);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    section("Interpret");
    step_run("Interpreting model");
    let start = Instant::now();
    let result = engine.interpret_value(request);
    step_done(&format!("{:?}", start.elapsed()));

    match result {
        InterpretationResult::Success(success) => {
            println!("  {}", kv("Model type", success.model_type.as_str()));
            println!();
            print_block(&success.interpretation);
            print_recommendations(&success.recommendations);
            Ok(())
        }
        InterpretationResult::Failure(failure) => {
            println!("  {}", failure.error.red());
            anyhow::bail!("interpretation failed: {}", failure.error)
        }
    }
}

pub fn cmd_simulate(request_path: &Path, config: EngineConfig, json: bool) -> anyhow::Result<()> {
    let request = read_request(request_path)?;
    let simulator = ScenarioSimulator::new(config);
    let result = simulator.simulate_value(request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    section("Simulate");
    let estimate = format!("{}", result.estimate);
    println!("  {}", kv("Estimate", &estimate));
    if result.has_warning {
        println!(
            "  {}",
            format!("clipped from {}", result.original_estimate).yellow()
        );
    }
    println!();
    print_block(&result.interpretation_text);
    print_recommendations(&result.recommendations);
    Ok(())
}

pub fn cmd_format(
    value: f64,
    kind: &str,
    digits: usize,
    unit: Option<&str>,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let kind: FormatKind = kind.parse()?;
    let mut options = FormatOptions::new(kind)
        .with_digits(digits)
        .with_locale(config.locale);
    if let Some(unit) = unit {
        options = options.with_unit(unit);
    }
    println!("{}", format_number(Some(value), &options));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parses_interpret() {
        let cli = Cli::try_parse_from(["kolosal-interpret", "interpret", "req.json", "--json"]).unwrap();
        match cli.command {
            Commands::Interpret { request, json } => {
                assert_eq!(request, PathBuf::from("req.json"));
                assert!(json);
            }
            _ => panic!("expected interpret command"),
        }
    }

    #[test]
    fn test_cli_parses_negative_format_value() {
        let cli = Cli::try_parse_from(["kolosal-interpret", "format", "-1234.5", "--kind", "accounting"]).unwrap();
        match cli.command {
            Commands::Format { value, kind, .. } => {
                assert_eq!(value, -1234.5);
                assert_eq!(kind, "accounting");
            }
            _ => panic!("expected format command"),
        }
    }

    #[test]
    fn test_load_config_locale_override() {
        let config = load_config(None, Some("en-US")).unwrap();
        assert_eq!(config.locale, Locale::EnUs);
        assert!(load_config(None, Some("zz")).is_err());
    }

    #[test]
    fn test_cmd_interpret_failure_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"model": {{}}}}"#).unwrap();
        assert!(cmd_interpret(file.path(), EngineConfig::default(), false).is_err());
    }

    #[test]
    fn test_cmd_simulate_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"inputValues": {{"x": 2}}, "model": {{"coefficients": [{{"name": "x", "value": 3}}]}}, "dependentVariable": "y"}}"#
        )
        .unwrap();
        assert!(cmd_simulate(file.path(), EngineConfig::default(), true).is_ok());
    }
}
