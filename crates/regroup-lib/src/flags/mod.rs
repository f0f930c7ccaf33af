//! Flags arguments: their expression trees and what they say about verbose mode.

mod expr;
mod lexer;
mod verbosity;

#[cfg(test)]
mod verbosity_tests;

pub use expr::{FlagExpr, ParseError};
pub use verbosity::resolve_verbose;
