//! String stages of the number rendering pipeline
//!
//! Each stage is a small pure function so the two unusual display contracts
//! (separator inversion in accounting mode, comma substitution inside
//! exponential literals in auto mode) stay pinned by their own tests.

/// Sentinel used while swapping grouping and decimal marks
const SWAP_SENTINEL: char = '\u{0}';

/// Fractional digits that print any finite `f64` exactly
const EXACT_DIGITS: usize = 1074;

/// Render `x` in exponential notation with `digits` fractional mantissa digits.
///
/// The exponent always carries an explicit sign: `5e-5` renders as `5.000e-5`
/// and `1234.56` as `1.235e+3` for three digits. Exact ties round away from
/// zero, so `1.0625` renders as `1.063e+0`.
pub fn to_exponential(x: f64, digits: usize) -> String {
    if !x.is_finite() {
        return non_finite(x);
    }
    let x = if x == 0.0 { 0.0 } else { x };
    let sign = if x < 0.0 { "-" } else { "" };
    let (mantissa, exponent) = exponential_half_up(x.abs(), digits);
    format!("{}{}e{:+}", sign, mantissa, exponent)
}

/// Render `x` with exactly `digits` fractional digits and `.` as decimal mark.
///
/// Exact ties round away from zero: `1.125` gives `1.13` for two digits,
/// while `1.005` (stored slightly below the tie) gives `1.00`.
pub fn to_fixed(x: f64, digits: usize) -> String {
    if !x.is_finite() {
        return non_finite(x);
    }
    let x = if x == 0.0 { 0.0 } else { x };
    let sign = if x < 0.0 { "-" } else { "" };
    format!("{}{}", sign, fixed_half_up(x.abs(), digits))
}

fn fixed_half_up(magnitude: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    match tie_prefix(&exact, digits) {
        Some(truncated) => round_up_last_digit(truncated),
        None => format!("{:.*}", digits, magnitude),
    }
}

fn exponential_half_up(magnitude: f64, digits: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, magnitude);
    let (exact_mantissa, exponent) = split_exponent(&exact);

    let Some(truncated) = tie_prefix(exact_mantissa, digits) else {
        let rounded = format!("{:.*e}", digits, magnitude);
        let (mantissa, exponent) = split_exponent(&rounded);
        return (mantissa.to_string(), exponent);
    };

    let bumped = round_up_last_digit(truncated);
    if bumped.starts_with("10") {
        // 9.99.. rounded up moves to the next power of ten
        let mantissa = if digits == 0 {
            "1".to_string()
        } else {
            format!("1.{}", "0".repeat(digits))
        };
        (mantissa, exponent + 1)
    } else {
        (bumped, exponent)
    }
}

fn split_exponent(rendered: &str) -> (&str, i32) {
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or_default()),
        None => (rendered, 0),
    }
}

/// Digits kept when the exact expansion sits exactly halfway after `digits`
/// fractional places, `None` otherwise.
fn tie_prefix(exact: &str, digits: usize) -> Option<&str> {
    let point = exact.find('.')?;
    let cut = point + 1 + digits;
    let mut tail = exact.get(cut..)?.chars();
    if tail.next() != Some('5') || !tail.all(|c| c == '0') {
        return None;
    }
    Some(if digits == 0 { &exact[..point] } else { &exact[..cut] })
}

/// Add one unit in the last place of an unsigned decimal rendering
fn round_up_last_digit(rendered: &str) -> String {
    let mut chars: Vec<char> = rendered.chars().collect();
    let mut carry = true;
    for c in chars.iter_mut().rev() {
        if !carry {
            break;
        }
        match *c {
            '.' => {}
            '9' => *c = '0',
            d => {
                *c = char::from(d as u8 + 1);
                carry = false;
            }
        }
    }
    let bumped: String = chars.into_iter().collect();
    if carry {
        format!("1{}", bumped)
    } else {
        bumped
    }
}

/// Plain number stringification, no locale applied.
///
/// Follows the usual shortest round-trip rendering and switches to exponential
/// form outside `[1e-6, 1e21)`.
pub fn plain(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if !x.is_finite() {
        return non_finite(x);
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let magnitude = x.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let raw = format!("{:e}", x);
        return match raw.split_once('e') {
            Some((mantissa, exponent)) => with_exponent_sign(mantissa, exponent),
            None => raw,
        };
    }
    x.to_string()
}

/// Swap the roles of `.` and `,` in an already rendered number.
///
/// `"1.234,50"` becomes `"1,234.50"`.
pub fn swap_separators(rendered: &str) -> String {
    rendered
        .replace('.', &SWAP_SENTINEL.to_string())
        .replace(',', ".")
        .replace(SWAP_SENTINEL, ",")
}

/// Localize a `.`-decimal rendering for auto/fixed display.
///
/// Replaces the first `.` with `,`, strips a trailing run of zeros (with at
/// most one `,` right before it) and then a single trailing `,`. Applied to
/// exponential literals as well, so `"5.000e-5"` becomes `"5,000e-5"`.
pub fn localize_decimal(rendered: &str) -> String {
    let mut out = rendered.replacen('.', ",", 1);

    let without_zeros = out.trim_end_matches('0');
    if without_zeros.len() < out.len() {
        let keep = without_zeros
            .strip_suffix(',')
            .unwrap_or(without_zeros)
            .len();
        out.truncate(keep);
    }

    if out.ends_with(',') {
        out.pop();
    }
    out
}

fn with_exponent_sign(mantissa: &str, exponent: &str) -> String {
    if exponent.starts_with('-') {
        format!("{}e{}", mantissa, exponent)
    } else {
        format!("{}e+{}", mantissa, exponent)
    }
}

fn non_finite(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}
