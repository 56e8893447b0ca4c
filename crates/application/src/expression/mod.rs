//! Sandboxed arithmetic evaluation for variable values.
//!
//! A value is only treated as arithmetic when every character is a digit,
//! one of `+ - * / . ( )`, a space or a tab. That whitelist is checked
//! before any parsing happens. Anything else is ordinary text and is
//! returned unchanged.

mod parser;

pub use parser::{ExpressionError, evaluate_arithmetic};

use blockmark_domain::sentinel::INVALID_EXPRESSION;

/// Significant digits kept when a shorter form hides representation noise.
///
/// `10 * 1.1` prints as `11` rather than `11.000000000000002`.
const SIGNIFICANT_DIGITS: usize = 15;

/// Returns true if `c` may appear in an arithmetic expression.
#[must_use]
pub const fn is_expression_char(c: char) -> bool {
    matches!(
        c,
        '0'..='9' | '+' | '-' | '*' | '/' | '.' | '(' | ')' | ' ' | '\t'
    )
}

/// How a piece of text is classified before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Contains characters outside the arithmetic alphabet.
    Text,
    /// Blank, or only operators, dots and whitespace. Kept verbatim.
    Punctuation,
    /// Looks like arithmetic and will be evaluated.
    Arithmetic,
}

/// Classifies text against the arithmetic whitelist.
#[must_use]
pub fn classify(text: &str) -> Classification {
    if text.is_empty() || !text.chars().all(is_expression_char) {
        return Classification::Text;
    }
    let only_punctuation = text
        .trim()
        .chars()
        .all(|c| matches!(c, '+' | '-' | '*' | '/' | '.' | ' ' | '\t'));
    if only_punctuation {
        Classification::Punctuation
    } else {
        Classification::Arithmetic
    }
}

/// Evaluates `text` if it is an arithmetic expression.
///
/// Plain text and pure punctuation come back unchanged. Arithmetic that
/// fails to parse, or whose result is not finite, yields
/// `[Invalid Expression]`. This never fails.
#[must_use]
pub fn evaluate(text: &str) -> String {
    if classify(text) != Classification::Arithmetic {
        return text.to_string();
    }

    match evaluate_arithmetic(text) {
        Ok(value) => format_number(value),
        Err(error) => {
            tracing::warn!(expression = %text, %error, "could not evaluate expression");
            INVALID_EXPRESSION.to_string()
        }
    }
}

/// Formats a finite number in canonical decimal form.
///
/// Integral values print exactly. Fractional values print in the shorter
/// of their round-trip form and their 15-significant-digit form.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also folds negative zero.
        return "0".to_string();
    }

    let shortest = value.to_string();
    if value.fract() == 0.0 {
        return shortest;
    }

    let rounded = format!("{value:.prec$e}", prec = SIGNIFICANT_DIGITS - 1)
        .parse::<f64>()
        .map(|r| r.to_string());
    match rounded {
        Ok(rounded) if rounded.len() < shortest.len() => rounded,
        _ => shortest,
    }
}
