//! Validation through the dialect's own compiler.
//!
//! The compiler is the only authority on whether a pattern is valid and on how
//! many groups it has. It is injected through [`PatternCompiler`], so the
//! scanner can be checked against crafted counts and diagnostics.

use indexmap::IndexMap;
use regroup_core::PatternError;

/// What the compiler reports about a valid pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPattern {
    /// Number of capturing groups, not counting the whole match.
    pub group_count: usize,
    /// Group name to its 1-based group number.
    pub group_names: IndexMap<String, usize>,
}

impl CompiledPattern {
    pub fn new(group_count: usize) -> Self {
        Self {
            group_count,
            group_names: IndexMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, number: usize) -> Self {
        self.group_names.insert(name.into(), number);
        self
    }

    /// Name of the group with the given 1-based number.
    pub fn name_of(&self, number: usize) -> Option<&str> {
        self.group_names
            .iter()
            .find(|&(_, &n)| n == number)
            .map(|(name, _)| name.as_str())
    }
}

/// The dialect compiler, reduced to what the analysis needs.
pub trait PatternCompiler {
    fn compile(&self, pattern: &str, verbose: bool) -> Result<CompiledPattern, PatternError>;
}

impl<F> PatternCompiler for F
where
    F: Fn(&str, bool) -> Result<CompiledPattern, PatternError>,
{
    fn compile(&self, pattern: &str, verbose: bool) -> Result<CompiledPattern, PatternError> {
        self(pattern, verbose)
    }
}

/// Default compiler backed by `fancy-regex`.
///
/// Supports the constructs the scanner understands: named groups in both
/// spellings, lookaround, backreferences, conditionals and `(?#...)` comments.
/// Verbose mode is requested with a leading `(?x)`.
///
/// The accepted dialect is the engine's: inline flags are `i m s x R U u`
/// (no `a` or `L`), and `[` inside a character class opens a nested class.
#[derive(Debug, Clone, Copy, Default)]
pub struct FancyRegexCompiler;

impl FancyRegexCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl PatternCompiler for FancyRegexCompiler {
    fn compile(&self, pattern: &str, verbose: bool) -> Result<CompiledPattern, PatternError> {
        let source = if verbose {
            format!("(?x){pattern}")
        } else {
            pattern.to_string()
        };
        let regex = fancy_regex::Regex::new(&source).map_err(|err| {
            let offset = if verbose { 4 } else { 0 };
            pattern_error(err, offset)
        })?;

        let mut compiled = CompiledPattern::new(regex.captures_len().saturating_sub(1));
        for (number, name) in regex.capture_names().enumerate() {
            if let Some(name) = name {
                compiled.group_names.insert(name.to_string(), number);
            }
        }
        Ok(compiled)
    }
}

/// Wrap a compiler error verbatim, shifting its position past any prefix we added.
fn pattern_error(err: fancy_regex::Error, offset: usize) -> PatternError {
    let message = err.to_string();
    match err {
        fancy_regex::Error::ParseError(position, _) => {
            PatternError::at(message, position.saturating_sub(offset))
        }
        _ => PatternError::new(message),
    }
}
