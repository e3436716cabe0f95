//! Locale-aware digit grouping

use super::pipeline;
use crate::error::{InterpretError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese: `1.234,50`
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// US English: `1,234.50`
    #[serde(rename = "en-US")]
    EnUs,
    /// German: `1.234,50`
    #[serde(rename = "de-DE")]
    DeDe,
    /// French: `1 234,50` with a narrow no-break space
    #[serde(rename = "fr-FR")]
    FrFr,
}

impl Locale {
    /// BCP 47 tag of this locale
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
        }
    }

    /// Decimal mark
    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::EnUs => '.',
            Locale::PtBr | Locale::DeDe | Locale::FrFr => ',',
        }
    }

    /// Thousands grouping mark
    pub fn group_separator(&self) -> char {
        match self {
            Locale::EnUs => ',',
            Locale::PtBr | Locale::DeDe => '.',
            Locale::FrFr => '\u{202f}',
        }
    }

    /// Render `x` with exactly `fraction_digits` decimals and thousands grouping.
    ///
    /// Exact ties round away from zero.
    pub fn render_grouped(&self, x: f64, fraction_digits: usize) -> String {
        if x.is_nan() {
            return "NaN".to_string();
        }
        if x.is_infinite() {
            return if x > 0.0 { "∞".to_string() } else { "-∞".to_string() };
        }

        let fixed = pipeline::to_fixed(x.abs(), fraction_digits);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        if x < 0.0 {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.group_separator()));
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator());
            out.push_str(frac);
        }
        out
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = InterpretError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            "de-de" | "de" => Ok(Locale::DeDe),
            "fr-fr" | "fr" => Ok(Locale::FrFr),
            _ => Err(InterpretError::ConfigError(format!("Unsupported locale: {}", s))),
        }
    }
}
