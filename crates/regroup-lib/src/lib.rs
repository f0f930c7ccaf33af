//! Regroup: static capture-group analysis for regular expression literals.
//!
//! Given a pattern literal and the flags it is compiled with, report each
//! capturing group in order, with its name and whether it is guaranteed to
//! participate in a successful match. Type checkers use this to refine the
//! types of match accessors.
//!
//! # Example
//!
//! ```
//! use regroup_lib::{FlagExpr, PatternAnalyzer};
//!
//! let analyzer = PatternAnalyzer::default();
//! let flags = FlagExpr::parse("re.X").unwrap();
//! let groups = analyzer
//!     .groups(r"(?P<year>\d{4}) - (?P<day>\d\d)?  # ISO-ish", Some("re.X"))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(groups.to_string(), "[(year, mandatory), (day, optional)]");
//! assert!(analyzer.resolve_verbose(Some(&flags)).known().unwrap());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyzer;
pub mod bridge;
pub mod config;
pub mod diagnostics;
pub mod flags;
pub mod memo;
pub mod refine;
pub mod scan;

#[cfg(test)]
mod analyzer_tests;
#[cfg(test)]
pub mod test_utils;

pub use analyzer::{CallOutcome, CallSite, PatternAnalyzer, analyze};
pub use bridge::{CompiledPattern, FancyRegexCompiler, PatternCompiler};
pub use config::AnalyzerConfig;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use flags::{FlagExpr, ParseError};
pub use refine::GroupRef;

pub use regroup_core::{
    AnalysisOutcome, GroupDescriptor, GroupSequence, PatternError, Presence, VerboseResolution,
};

/// Errors returned by the fallible analyzer entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The dialect compiler rejected the pattern.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("no such group: {0}")]
    NoSuchGroup(GroupRef),

    /// The flags argument could not be lexed.
    #[error("invalid flags expression: {0}")]
    FlagsSyntax(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
