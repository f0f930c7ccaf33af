//! Test doubles for the validation bridge.

use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use regroup_core::PatternError;

use crate::bridge::{CompiledPattern, FancyRegexCompiler, PatternCompiler};

/// Compiler answering from a script, falling back to `fancy-regex`, and
/// counting every call.
#[derive(Debug, Default)]
pub struct FakeCompiler {
    calls: AtomicUsize,
    scripted: IndexMap<String, Result<CompiledPattern, PatternError>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(
        mut self,
        pattern: &str,
        result: Result<CompiledPattern, PatternError>,
    ) -> Self {
        self.scripted.insert(pattern.to_string(), result);
        self
    }

    /// Accept `pattern` with a crafted group count.
    pub fn accept(self, pattern: &str, group_count: usize) -> Self {
        self.script(pattern, Ok(CompiledPattern::new(group_count)))
    }

    pub fn reject(self, pattern: &str, message: &str) -> Self {
        self.script(pattern, Err(PatternError::new(message)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PatternCompiler for FakeCompiler {
    fn compile(&self, pattern: &str, verbose: bool) -> Result<CompiledPattern, PatternError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted.get(pattern) {
            Some(result) => result.clone(),
            None => FancyRegexCompiler.compile(pattern, verbose),
        }
    }
}
