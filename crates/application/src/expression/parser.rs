//! Recursive-descent parser and evaluator for arithmetic expressions.
//!
//! Grammar (standard precedence, left associative):
//!
//! ```text
//! expr    := term   (('+' | '-') term)*
//! term    := unary  (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! ```
//!
//! Numbers are decimal literals (`12`, `1.5`, `.5`, `5.`). There are no
//! identifiers, calls or assignment: anything outside the grammar is an error.

use thiserror::Error;

/// Nesting limit for parentheses and unary operators.
const MAX_DEPTH: usize = 256;

/// Error produced while parsing or evaluating an expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// A character outside the arithmetic alphabet.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// A numeric literal such as `1.2.3` or a lone `.`.
    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    /// `++` or `--` written without a space between the signs.
    #[error("increment/decrement operator '{0}{0}' is not arithmetic")]
    AdjacentSigns(char),

    /// A token that cannot appear at this position.
    #[error("unexpected token {found} at offset {offset}")]
    UnexpectedToken {
        /// Human-readable description of the token.
        found: String,
        /// Byte offset into the input.
        offset: usize,
    },

    /// The input ended in the middle of an expression.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Parentheses or unary operators nested too deeply.
    #[error("expression nested more than 256 levels deep")]
    TooDeep,

    /// The result is infinite or not a number.
    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            ' ' | '\t' => continue,
            '+' | '-' => {
                if matches!(chars.peek(), Some((_, next)) if *next == ch) {
                    return Err(ExpressionError::AdjacentSigns(ch));
                }
                if ch == '+' { Token::Plus } else { Token::Minus }
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let mut literal = String::from(ch);
                while let Some((_, next)) = chars.peek() {
                    if next.is_ascii_digit() || *next == '.' {
                        literal.push(*next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Number(parse_number(&literal)?)
            }
            other => return Err(ExpressionError::UnexpectedChar(other)),
        };
        tokens.push((token, offset));
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<f64, ExpressionError> {
    let dots = literal.bytes().filter(|b| *b == b'.').count();
    let has_digit = literal.bytes().any(|b| b.is_ascii_digit());
    if dots > 1 || !has_digit {
        return Err(ExpressionError::MalformedNumber(literal.to_string()));
    }
    literal
        .parse()
        .map_err(|_| ExpressionError::MalformedNumber(literal.to_string()))
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self) -> ExpressionError {
        match self.tokens.get(self.pos) {
            Some((token, offset)) => ExpressionError::UnexpectedToken {
                found: token.describe(),
                offset: *offset,
            },
            None => ExpressionError::UnexpectedEnd,
        }
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    value /= self.unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Minus) => {
                self.advance();
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        match self.peek() {
            Some(Token::Number(n)) => {
                self.advance();
                Ok(n)
            }
            Some(Token::LParen) => {
                self.advance();
                self.descend()?;
                let value = self.expr()?;
                if self.peek() != Some(Token::RParen) {
                    return Err(self.unexpected());
                }
                self.advance();
                self.depth -= 1;
                Ok(value)
            }
            _ => Err(self.unexpected()),
        }
    }
}

/// Parses and evaluates an arithmetic expression with IEEE-754 doubles.
///
/// # Errors
///
/// Returns an error for malformed input, trailing tokens, or a result that
/// is infinite or NaN (for example division by zero).
pub fn evaluate_arithmetic(input: &str) -> Result<f64, ExpressionError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        depth: 0,
    };

    let value = parser.expr()?;
    if parser.peek().is_some() {
        return Err(parser.unexpected());
    }
    if !value.is_finite() {
        return Err(ExpressionError::NonFinite);
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate_arithmetic("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(evaluate_arithmetic("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(evaluate_arithmetic("8 / 4 / 2").unwrap(), 1.0);
        assert_eq!(evaluate_arithmetic("10 - 4 - 3").unwrap(), 3.0);
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(evaluate_arithmetic("-5 + 2").unwrap(), -3.0);
        assert_eq!(evaluate_arithmetic("- -5").unwrap(), 5.0);
        assert_eq!(evaluate_arithmetic("+-2 * 3").unwrap(), -6.0);
        assert_eq!(evaluate_arithmetic("1 - -1").unwrap(), 2.0);
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(evaluate_arithmetic(".5 + 5.").unwrap(), 5.5);
        assert_eq!(evaluate_arithmetic("\t2.25\t").unwrap(), 2.25);
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(
            evaluate_arithmetic("1.2.3"),
            Err(ExpressionError::MalformedNumber("1.2.3".to_string()))
        );
        assert!(matches!(
            evaluate_arithmetic("1 + ."),
            Err(ExpressionError::MalformedNumber(_))
        ));
    }

    #[test]
    fn test_incomplete_expressions() {
        assert_eq!(
            evaluate_arithmetic("1 +"),
            Err(ExpressionError::UnexpectedEnd)
        );
        assert_eq!(
            evaluate_arithmetic("(1 + 2"),
            Err(ExpressionError::UnexpectedEnd)
        );
        assert!(matches!(
            evaluate_arithmetic("1 + 2)"),
            Err(ExpressionError::UnexpectedToken { offset: 5, .. })
        ));
        assert!(evaluate_arithmetic("()").is_err());
        assert!(evaluate_arithmetic("1 2").is_err());
        assert!(evaluate_arithmetic("(1)(2)").is_err());
    }

    #[test]
    fn test_non_arithmetic_operators_rejected() {
        assert!(evaluate_arithmetic("2 ** 3").is_err());
        assert!(evaluate_arithmetic("4 // 2").is_err());
        assert_eq!(
            evaluate_arithmetic("1--1"),
            Err(ExpressionError::AdjacentSigns('-'))
        );
        assert_eq!(
            evaluate_arithmetic("1++1"),
            Err(ExpressionError::AdjacentSigns('+'))
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            evaluate_arithmetic("1 + x"),
            Err(ExpressionError::UnexpectedChar('x'))
        );
    }

    #[test]
    fn test_non_finite_results() {
        assert_eq!(
            evaluate_arithmetic("1 / 0"),
            Err(ExpressionError::NonFinite)
        );
        assert_eq!(
            evaluate_arithmetic("0 / 0"),
            Err(ExpressionError::NonFinite)
        );
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_DEPTH + 1;
        let deep = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(evaluate_arithmetic(&deep), Err(ExpressionError::TooDeep));

        let fine = format!("{}1{}", "(".repeat(16), ")".repeat(16));
        assert_eq!(evaluate_arithmetic(&fine).unwrap(), 1.0);
    }
}
