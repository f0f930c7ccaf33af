//! Memoized analysis outcomes.
//!
//! Keyed by the exact `(pattern, verbose)` pair. Each key owns a cell that is
//! filled once; concurrent requests for the same key block on the cell and
//! share the outcome. The map lock is only held to find or create the cell,
//! never while computing.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use indexmap::IndexMap;
use regroup_core::AnalysisOutcome;

type MemoKey = (String, bool);
type Cell = Arc<OnceLock<Arc<AnalysisOutcome>>>;

#[derive(Debug, Default)]
pub struct Memo {
    /// Least recently used first.
    cells: Mutex<IndexMap<MemoKey, Cell>>,
    limit: Option<usize>,
}

impl Memo {
    /// Unbounded memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Memo evicting the least recently used entry beyond `limit` entries.
    pub fn bounded(limit: usize) -> Self {
        Self {
            cells: Mutex::default(),
            limit: Some(limit),
        }
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(limit) => Self::bounded(limit),
            None => Self::new(),
        }
    }

    /// Return the outcome for the key, running `compute` only if no outcome
    /// is stored or being computed for it.
    pub fn get_or_compute(
        &self,
        pattern: &str,
        verbose: bool,
        compute: impl FnOnce() -> AnalysisOutcome,
    ) -> Arc<AnalysisOutcome> {
        let cell = self.cell(pattern, verbose);
        if let Some(outcome) = cell.get() {
            tracing::debug!(pattern, verbose, "memo hit");
            return Arc::clone(outcome);
        }
        let outcome = cell.get_or_init(|| {
            tracing::debug!(pattern, verbose, "memo miss");
            Arc::new(compute())
        });
        Arc::clone(outcome)
    }

    /// Number of stored keys, including ones still being computed.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, pattern: &str, verbose: bool) -> bool {
        self.lock().contains_key(&(pattern.to_string(), verbose))
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn cell(&self, pattern: &str, verbose: bool) -> Cell {
        let key = (pattern.to_string(), verbose);
        let mut cells = self.lock();

        // Re-inserting moves the key to the most recently used end.
        let cell = cells.shift_remove(&key).unwrap_or_default();
        cells.insert(key, Arc::clone(&cell));

        if let Some(limit) = self.limit {
            while cells.len() > limit {
                cells.shift_remove_index(0);
            }
        }
        cell
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<MemoKey, Cell>> {
        // Cells are only created under the lock, so a poisoned map is still consistent.
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
