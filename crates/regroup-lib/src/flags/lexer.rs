//! Tokens of a flags argument as written at the call site.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
pub(crate) enum Token<'src> {
    #[token("|")]
    Pipe,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    /// Dotted name such as `re.X` or `re.RegexFlag.VERBOSE`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*", |lex| lex.slice())]
    Name(&'src str),

    #[regex(r"[0-9][0-9_]*", |lex| lex.slice())]
    #[regex(r"0[xX][0-9a-fA-F_]+", |lex| lex.slice())]
    Int(&'src str),

    /// Anything else an expression may contain: other operators, commas,
    /// subscripts, string literals. Its presence makes the expression opaque.
    #[regex(r#"[&+\-*/%~^<>=!,:\[\]{}]+"#, |lex| lex.slice())]
    #[regex(r#"'[^'\n]*'"#, |lex| lex.slice())]
    #[regex(r#""[^"\n]*""#, |lex| lex.slice())]
    Other(&'src str),
}

/// Lex `input` fully, or report the first character no token accepts.
pub(crate) fn tokenize(input: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, Range<usize>> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(span),
        }
    }
    Ok(tokens)
}

/// Value of a decimal or `0x` integer literal; `None` when it does not fit.
pub(crate) fn int_value(literal: &str) -> Option<i64> {
    let digits: String = literal.chars().filter(|&c| c != '_').collect();
    match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => digits.parse().ok(),
    }
}
