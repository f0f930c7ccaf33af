//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::GroupSequence;

impl GroupSequence {
    /// Panics unless the scanner found exactly as many groups as the compiler.
    ///
    /// A mismatch is a scanner defect, never a property of the user's pattern.
    pub fn ensure_group_count(&self, pattern: &str, compiled: usize) {
        if self.len() != compiled {
            panic!(
                "GroupSequence: scanned {} groups but the compiler reports {compiled} \
                 for pattern {pattern:?} (scanner and dialect disagree)",
                self.len()
            );
        }
    }
}
