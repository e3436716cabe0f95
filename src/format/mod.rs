//! Number formatting for human-readable output
//!
//! Every piece of prose the engine produces renders its numbers through this
//! module. Display modes:
//! - `auto` / `fixed`: magnitude-based choice between exponential, 2 and 4
//!   fractional digits, then comma localization and zero trimming
//! - `scientific`: exponential notation, untouched afterwards
//! - `accounting`: two decimals with locale grouping, grouping and decimal
//!   marks swapped afterwards
//! - anything else: plain stringification

mod locale;
pub mod pipeline;

pub use locale::Locale;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Placeholder rendered for missing or NaN values
pub const NOT_AVAILABLE: &str = "N/A";

/// Display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    #[default]
    Auto,
    Fixed,
    Scientific,
    Accounting,
    /// Unrecognized mode: plain stringification
    #[serde(other)]
    Plain,
}

impl FromStr for FormatKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "auto" => FormatKind::Auto,
            "fixed" => FormatKind::Fixed,
            "scientific" => FormatKind::Scientific,
            "accounting" => FormatKind::Accounting,
            _ => FormatKind::Plain,
        })
    }
}

/// Options for [`format_number`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Fractional digits for scientific mode
    pub digits: usize,
    /// Display mode
    #[serde(rename = "type")]
    pub kind: FormatKind,
    /// Unit appended after a space
    pub unit: Option<String>,
    /// Locale used for grouping in accounting mode
    pub locale: Locale,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            digits: 2,
            kind: FormatKind::Auto,
            unit: None,
            locale: Locale::PtBr,
        }
    }
}

impl FormatOptions {
    /// Options for a given display mode with default digits
    pub fn new(kind: FormatKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Scientific display with the three digits used internally
    pub fn scientific() -> Self {
        Self::new(FormatKind::Scientific).with_digits(3)
    }

    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Render a number for display.
///
/// `None` and NaN render as `"N/A"`. See the module docs for the modes.
pub fn format_number(value: Option<f64>, options: &FormatOptions) -> String {
    let x = match value {
        Some(x) if !x.is_nan() => x,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let mut rendered = match options.kind {
        FormatKind::Scientific => pipeline::to_exponential(x, options.digits),
        FormatKind::Accounting => {
            pipeline::swap_separators(&options.locale.render_grouped(x, 2))
        }
        FormatKind::Auto | FormatKind::Fixed => pipeline::localize_decimal(&by_magnitude(x)),
        FormatKind::Plain => pipeline::plain(x),
    };

    if let Some(unit) = options.unit.as_deref().filter(|u| !u.is_empty()) {
        rendered.push(' ');
        rendered.push_str(unit);
    }
    rendered
}

/// Magnitude-based branch of auto/fixed mode, before localization.
///
/// Zero falls below `1e-4` and takes the exponential path.
fn by_magnitude(x: f64) -> String {
    let magnitude = x.abs();
    if magnitude >= 1e6 || magnitude < 1e-4 {
        pipeline::to_exponential(x, 3)
    } else if magnitude >= 1.0 {
        pipeline::to_fixed(x, 2)
    } else {
        pipeline::to_fixed(x, 4)
    }
}

/// Formatter bound to a locale, shared by the interpreters and the simulator
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberFormatter {
    locale: Locale,
}

impl NumberFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Render with explicit options; the bound locale wins over `options.locale`.
    pub fn format(&self, value: Option<f64>, options: &FormatOptions) -> String {
        let options = FormatOptions {
            locale: self.locale,
            ..options.clone()
        };
        format_number(value, &options)
    }

    pub fn auto(&self, value: f64) -> String {
        self.format(Some(value), &FormatOptions::default())
    }

    pub fn accounting(&self, value: f64) -> String {
        self.format(Some(value), &FormatOptions::new(FormatKind::Accounting))
    }

    pub fn scientific(&self, value: Option<f64>) -> String {
        self.format(value, &FormatOptions::scientific())
    }

    /// Auto display of an optional metric
    pub fn metric(&self, value: Option<f64>) -> String {
        self.format(value, &FormatOptions::default())
    }
}
