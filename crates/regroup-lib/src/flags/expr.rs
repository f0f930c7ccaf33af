//! Flags expressions.
//!
//! The host hands over the expression it found in the flags position. Only
//! names, integer literals and `|` carry meaning; any other shape is kept as
//! [`FlagExpr::Opaque`].
//!
//! A textual form can be parsed for hosts that only have source text:
//!
//! ```text
//! re.I | re.X
//! re.RegexFlag.VERBOSE
//! 0x40 | re.M
//! flags()            (opaque)
//! ```

use std::fmt;
use std::ops::Range;

use super::lexer::{Token, int_value, tokenize};

/// The expression supplying a call's flags argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagExpr {
    /// Reference to a name, fully qualified where the host could resolve it.
    Ref(String),
    Int(i64),
    BitOr(Box<FlagExpr>, Box<FlagExpr>),
    /// Calls, variables of unknown origin, other operators.
    Opaque,
}

impl FlagExpr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    pub fn bit_or(lhs: FlagExpr, rhs: FlagExpr) -> Self {
        Self::BitOr(Box::new(lhs), Box::new(rhs))
    }

    /// Parse the textual form of a flags argument.
    ///
    /// Fails only on characters that cannot appear in an expression; every
    /// lexable input yields some tree, possibly [`FlagExpr::Opaque`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(input).map_err(|span| ParseError {
            message: format!("unexpected character: {:?}", &input[span.clone()]),
            span,
        })?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_or();
        if parser.pos < parser.tokens.len() {
            return Ok(Self::Opaque);
        }
        Ok(expr)
    }
}

impl fmt::Display for FlagExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(name) => write!(f, "{name}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::BitOr(lhs, rhs) => write!(f, "{lhs} | {rhs}"),
            Self::Opaque => write!(f, "<opaque>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> FlagExpr {
        let mut expr = self.parse_term();
        while self.peek() == Some(Token::Pipe) {
            self.advance();
            let rhs = self.parse_term();
            expr = FlagExpr::bit_or(expr, rhs);
        }
        expr
    }

    /// An atom, or atoms joined by operators tighter than `|`.
    fn parse_term(&mut self) -> FlagExpr {
        let mut expr = self.parse_atom();
        while let Some(Token::Other(_)) = self.peek() {
            self.advance();
            self.parse_atom();
            expr = FlagExpr::Opaque;
        }
        expr
    }

    fn parse_atom(&mut self) -> FlagExpr {
        match self.peek() {
            Some(Token::Name(name)) => {
                self.advance();
                if self.peek() == Some(Token::LParen) {
                    self.skip_group();
                    return FlagExpr::Opaque;
                }
                FlagExpr::name(name)
            }
            Some(Token::Int(literal)) => {
                self.advance();
                int_value(literal).map_or(FlagExpr::Opaque, FlagExpr::Int)
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_or();
                if self.peek() != Some(Token::RParen) {
                    return FlagExpr::Opaque;
                }
                self.advance();
                inner
            }
            Some(Token::Other(_)) => {
                // Prefix operator: `~re.I`, `-1`.
                self.advance();
                self.parse_atom();
                FlagExpr::Opaque
            }
            Some(Token::Pipe | Token::RParen) | None => FlagExpr::Opaque,
        }
    }

    /// Skip a parenthesised group, including nested ones.
    fn skip_group(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}
