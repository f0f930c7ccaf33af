//! The analyzer facade: validation, scanning and memoization behind one handle.

use std::ops::Range;
use std::sync::Arc;

use regroup_core::{AnalysisOutcome, GroupSequence, Presence, VerboseResolution};

use crate::bridge::{FancyRegexCompiler, PatternCompiler};
use crate::config::AnalyzerConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::flags::{FlagExpr, resolve_verbose};
use crate::memo::Memo;
use crate::refine::{self, GroupRef};
use crate::{Error, Result, scan};

/// Validate and scan one pattern, without memoization.
///
/// Panics if the scanner and the compiler disagree on the number of groups.
pub fn analyze<C>(pattern: &str, verbose: bool, compiler: &C) -> AnalysisOutcome
where
    C: PatternCompiler + ?Sized,
{
    let compiled = match compiler.compile(pattern, verbose) {
        Ok(compiled) => compiled,
        Err(err) => {
            tracing::debug!(pattern, verbose, error = %err, "pattern rejected by compiler");
            return AnalysisOutcome::Invalid(err);
        }
    };

    let mut groups = scan::scan(pattern, verbose);
    for (name, &number) in &compiled.group_names {
        if let Some(index) = number.checked_sub(1)
            && let Some(group) = groups.get_mut(index)
            && group.name.is_none()
        {
            group.name = Some(name.clone());
        }
    }

    let groups = GroupSequence::from(groups);
    groups.ensure_group_count(pattern, compiled.group_count);
    AnalysisOutcome::Groups(groups)
}

/// A call such as `re.search(pattern, text, flags)` as the host sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSite<'a> {
    /// Pattern text when the argument is a literal.
    pub pattern: Option<&'a str>,
    /// Where the pattern argument sits in the host's source.
    pub pattern_span: Range<usize>,
    /// The flags argument, if the call passes one.
    pub flags: Option<&'a FlagExpr>,
}

impl<'a> CallSite<'a> {
    pub fn literal(pattern: &'a str) -> Self {
        Self {
            pattern: Some(pattern),
            ..Self::default()
        }
    }

    /// A call whose pattern is not a literal.
    pub fn dynamic() -> Self {
        Self::default()
    }

    pub fn span(mut self, span: Range<usize>) -> Self {
        self.pattern_span = span;
        self
    }

    pub fn flags(mut self, flags: &'a FlagExpr) -> Self {
        self.flags = Some(flags);
        self
    }
}

/// What the host should do with a call's result type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Refine the result with these groups.
    Refined(GroupSequence),
    /// Keep the default type, silently.
    Unrefined,
    /// The pattern is invalid; a diagnostic was reported at the pattern.
    Error,
}

/// Analyzes pattern literals for a host, memoizing by `(pattern, verbose)`.
///
/// Shareable across threads when the compiler is.
#[derive(Debug)]
pub struct PatternAnalyzer<C = FancyRegexCompiler> {
    config: AnalyzerConfig,
    compiler: C,
    memo: Memo,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default(), FancyRegexCompiler)
    }
}

impl<C: PatternCompiler> PatternAnalyzer<C> {
    pub fn new(config: AnalyzerConfig, compiler: C) -> Self {
        let memo = Memo::with_limit(config.cache_limit);
        Self {
            config,
            compiler,
            memo,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    /// Memoized analysis of one pattern.
    pub fn analyze(&self, pattern: &str, verbose: bool) -> Arc<AnalysisOutcome> {
        self.memo.get_or_compute(pattern, verbose, || {
            analyze(pattern, verbose, &self.compiler)
        })
    }

    pub fn resolve_verbose(&self, flags: Option<&FlagExpr>) -> VerboseResolution {
        resolve_verbose(flags, &self.config)
    }

    /// Decide how a call's result should be refined.
    ///
    /// Abstains without a diagnostic when the pattern is not a literal or the
    /// verbose flag cannot be determined.
    pub fn analyze_call(&self, site: &CallSite<'_>, diagnostics: &mut Diagnostics) -> CallOutcome {
        let Some(pattern) = site.pattern else {
            tracing::debug!("pattern is not a literal, abstaining");
            return CallOutcome::Unrefined;
        };
        let Some(verbose) = self.resolve_verbose(site.flags).known() else {
            return CallOutcome::Unrefined;
        };

        match self.analyze(pattern, verbose).as_ref() {
            AnalysisOutcome::Groups(groups) => CallOutcome::Refined(groups.clone()),
            AnalysisOutcome::Invalid(err) => {
                diagnostics
                    .report(DiagnosticKind::InvalidPattern, site.pattern_span.clone())
                    .message(&err.message)
                    .emit();
                CallOutcome::Error
            }
        }
    }

    /// Groups of a pattern with flags given as source text.
    ///
    /// `Ok(None)` when the verbose flag cannot be determined.
    pub fn groups(&self, pattern: &str, flags: Option<&str>) -> Result<Option<GroupSequence>> {
        let flags = flags.map(FlagExpr::parse).transpose()?;
        let Some(verbose) = self.resolve_verbose(flags.as_ref()).known() else {
            return Ok(None);
        };
        let groups = self.analyze(pattern, verbose).as_ref().clone().into_result()?;
        Ok(Some(groups))
    }

    /// Presence of one group of a pattern analyzed without flags.
    pub fn lookup(&self, pattern: &str, group_ref: &GroupRef) -> Result<Presence> {
        let outcome = self.analyze(pattern, false);
        match outcome.as_ref() {
            AnalysisOutcome::Groups(groups) => refine::group(groups, group_ref),
            AnalysisOutcome::Invalid(err) => Err(Error::Pattern(err.clone())),
        }
    }
}
