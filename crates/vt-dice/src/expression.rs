//! Expression validation and tokenizing.
//!
//! An expression is a flat, left-to-right signed sum:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := digits | ident ('[' spec ']')?
//! ```
//!
//! Whitespace is insignificant and removed before lexing. Validation is
//! all-or-nothing: a malformed operator sequence or an unmatched bracket
//! rejects the whole expression.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::lexer::{self, Token};

/// Sign carried by a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    /// Adds to the pool.
    Plus,
    /// Subtracts from the pool.
    Minus,
}

impl Sign {
    /// `1` or `-1`.
    pub fn factor(self) -> i32 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// What a term refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermKind {
    /// A literal number of dice.
    Number(u32),
    /// A trait, optionally qualified with a specialization.
    Trait {
        /// Identifier as written, including any `*` annotation.
        name: String,
        /// Bracketed specialization, if given.
        spec: Option<String>,
    },
}

/// One signed term of a validated expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTerm {
    /// Sign applied to the term's value.
    pub sign: Sign,
    /// The term itself.
    pub kind: TermKind,
}

impl ParsedTerm {
    /// A literal number term.
    pub fn number(sign: Sign, value: u32) -> Self {
        Self {
            sign,
            kind: TermKind::Number(value),
        }
    }

    /// A trait term.
    pub fn named(sign: Sign, name: impl Into<String>, spec: Option<String>) -> Self {
        Self {
            sign,
            kind: TermKind::Trait {
                name: name.into(),
                spec,
            },
        }
    }
}

impl fmt::Display for ParsedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign)?;
        match &self.kind {
            TermKind::Number(n) => write!(f, "{n}"),
            TermKind::Trait { name, spec: None } => write!(f, "{name}"),
            TermKind::Trait {
                name,
                spec: Some(spec),
            } => write!(f, "{name}[{spec}]"),
        }
    }
}

/// Render terms back into expression text with explicit signs.
pub fn render(terms: &[ParsedTerm]) -> String {
    terms.iter().map(ParsedTerm::to_string).collect()
}

/// Remove all whitespace.
pub fn compact(expression: &str) -> String {
    expression.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validate an expression and split it into signed terms.
pub fn tokenize(expression: &str) -> DiceResult<Vec<ParsedTerm>> {
    let source = compact(expression);
    if source.is_empty() {
        return Err(DiceError::syntax(expression, "expression is empty"));
    }

    let tokens =
        lexer::lex(&source).map_err(|e| DiceError::syntax(expression, e.to_string()))?;

    let mut terms = Vec::new();
    let mut sign = Sign::Plus;
    let mut expect_term = true;
    let mut tokens = tokens.into_iter().peekable();

    while let Some((token, span)) = tokens.next() {
        match (expect_term, token) {
            (true, Token::Number(text)) => {
                let value = text.parse::<u32>().map_err(|_| {
                    DiceError::syntax(expression, format!("number '{text}' is too large"))
                })?;
                terms.push(ParsedTerm::number(sign, value));
                expect_term = false;
            }
            (true, Token::Ident(name)) => {
                let spec = match tokens.next_if(|(t, _)| matches!(t, Token::Spec(_))) {
                    Some((Token::Spec(spec), _)) => Some(spec),
                    _ => None,
                };
                terms.push(ParsedTerm::named(sign, name, spec));
                expect_term = false;
            }
            (false, Token::Plus) => {
                sign = Sign::Plus;
                expect_term = true;
            }
            (false, Token::Minus) => {
                sign = Sign::Minus;
                expect_term = true;
            }
            (true, other) => {
                return Err(DiceError::syntax(
                    expression,
                    format!(
                        "expected a trait or number at position {}, found '{other}'",
                        span.start
                    ),
                ));
            }
            (false, other) => {
                return Err(DiceError::syntax(
                    expression,
                    format!(
                        "expected '+' or '-' at position {}, found '{other}'",
                        span.start
                    ),
                ));
            }
        }
    }

    if expect_term {
        return Err(DiceError::syntax(expression, "expression ends with an operator"));
    }

    Ok(terms)
}

/// A piece of an expression at bracket depth zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `+` or `-`.
    Operator(char),
    /// Text between operators, brackets included.
    Term(&'a str),
}

/// Split an expression into operators and term text without validating it.
///
/// Operators inside brackets belong to the term, so `Melee[Two-Handed]` is a
/// single segment.
pub fn segments(expression: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in expression.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '+' | '-' if depth == 0 => {
                if start < i {
                    out.push(Segment::Term(&expression[start..i]));
                }
                out.push(Segment::Operator(c));
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if start < expression.len() {
        out.push(Segment::Term(&expression[start..]));
    }
    out
}
