//! Run state shared between the run loop and the interrupt handler.
//!
//! The run loop owns the writes: it resets the current result set at the
//! start of every root and appends one outcome per candidate. Traversal errors
//! accumulate for the whole run. Readers (the interrupt handler) take
//! snapshots at any time through the same `Arc<RunState<_>>`.

use crate::traversal::TraversalError;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Current result set plus accumulated traversal errors.
pub struct RunState<O> {
    results: RwLock<Vec<O>>,
    errors: RwLock<Vec<TraversalError>>,
}

impl<O> Default for RunState<O> {
    fn default() -> Self {
        Self {
            results: RwLock::new(Vec::new()),
            errors: RwLock::new(Vec::new()),
        }
    }
}

// Appends are all-or-nothing, so a poisoned lock still holds consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl<O: Clone> RunState<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new root: the result set becomes empty.
    pub fn begin_root(&self) {
        write(&self.results).clear();
    }

    pub fn record(&self, outcome: O) {
        write(&self.results).push(outcome);
    }

    pub fn record_error(&self, err: TraversalError) {
        write(&self.errors).push(err);
    }

    /// Copy of the current root's outcomes, in processing order.
    pub fn results(&self) -> Vec<O> {
        read(&self.results).clone()
    }

    pub fn result_count(&self) -> usize {
        read(&self.results).len()
    }

    /// Rendered messages of all traversal errors so far.
    pub fn error_messages(&self) -> Vec<String> {
        read(&self.errors).iter().map(|e| e.to_string()).collect()
    }

    pub fn error_count(&self) -> usize {
        read(&self.errors).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn begin_root_resets_results_but_keeps_errors() {
        let state: RunState<u32> = RunState::new();
        state.record(1);
        state.record(2);
        state.record_error(TraversalError::NoMatches("*.x".into()));
        assert_eq!(state.results(), vec![1, 2]);

        state.begin_root();
        assert_eq!(state.result_count(), 0);
        assert_eq!(state.error_count(), 1);
        state.record(3);
        assert_eq!(state.results(), vec![3]);
    }

    #[test]
    fn readers_see_appends_from_other_thread() {
        let state: Arc<RunState<PathBuf>> = Arc::new(RunState::new());
        let writer = Arc::clone(&state);
        std::thread::spawn(move || {
            writer.record(PathBuf::from("/a"));
            writer.record_error(TraversalError::ChecksumFile(PathBuf::from("/b.sha512")));
        })
        .join()
        .unwrap();

        assert_eq!(state.results(), vec![PathBuf::from("/a")]);
        assert_eq!(state.error_messages(), vec!["/b.sha512 is a checksum file"]);
    }
}
