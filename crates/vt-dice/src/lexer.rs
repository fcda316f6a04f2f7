use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Token type for dice-pool expressions.
///
/// Lexing runs on whitespace-free input, so multi-word trait names arrive as
/// a single identifier (`AnimalKen`). Trait lookup ignores whitespace to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// Integer literal, kept as source text until the parser range-checks it.
    Number(String),
    /// Trait or macro name. May carry a trailing `*` sheet annotation.
    Ident(String),
    /// Bracketed specialization, without the brackets.
    Spec(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Spec(spec) => write!(f, "[{spec}]"),
        }
    }
}

#[derive(Logos, Debug)]
enum RawToken {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_*]*")]
    Ident,

    #[regex(r"\[[^\[\]]+\]")]
    Spec,
}

/// A lexer error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte range of the unrecognized input.
    pub span: Range<usize>,
    /// The unrecognized text.
    pub fragment: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected '{}' at position {}",
            self.fragment, self.span.start
        )
    }
}

/// Lex an expression into `(Token, Span)` pairs.
///
/// Stops at the first unrecognized character; an expression that does not
/// lex cannot be evaluated at all.
pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let token = match result {
            Ok(RawToken::Plus) => Token::Plus,
            Ok(RawToken::Minus) => Token::Minus,
            Ok(RawToken::Number) => Token::Number(slice.to_string()),
            Ok(RawToken::Ident) => Token::Ident(slice.to_string()),
            Ok(RawToken::Spec) => Token::Spec(slice[1..slice.len() - 1].to_string()),
            Err(()) => {
                return Err(LexError {
                    span,
                    fragment: slice.to_string(),
                });
            }
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}
