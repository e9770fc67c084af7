//! The run loop: gather roots, scan each one, classify candidates one at a
//! time, and record everything in the shared [`RunState`].
//!
//! [`check`] and [`create`] are the two entry operations. Presentation is
//! left to a [`RunObserver`]; the engine itself prints nothing.

use crate::config::CsuConfig;
use crate::create::create_with;
use crate::outcome::{CreateOutcome, Outcome, VerifyOutcome};
use crate::state::RunState;
use crate::traversal::{self, Root, TraversalError};
use crate::verify::verify_with;
use std::io::BufRead;
use std::path::Path;
use std::time::{Duration, Instant};

/// Hooks the presentation layer uses to follow a run. All default to no-ops.
pub trait RunObserver<O> {
    fn root_started(&mut self, _root: &Root) {}
    fn file_started(&mut self, _path: &Path) {}
    fn file_finished(&mut self, _outcome: &O, _elapsed: Duration) {}
    fn root_finished(&mut self, _root: &Root, _results: &[O]) {}
    fn traversal_error(&mut self, _err: &TraversalError) {}
}

/// Observer that ignores everything.
pub struct Silent;

impl<O> RunObserver<O> for Silent {}

/// Raw inputs of one run.
pub struct RunInput<'a> {
    pub args: &'a [String],
    pub stdin: Option<&'a mut dyn BufRead>,
}

impl<'a> RunInput<'a> {
    pub fn args(args: &'a [String]) -> Self {
        Self { args, stdin: None }
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub roots: usize,
    pub files: usize,
    pub errors: usize,
}

/// Verify sidecars for all inputs.
pub fn check<Obs>(
    input: RunInput<'_>,
    cfg: &CsuConfig,
    state: &RunState<VerifyOutcome>,
    observer: &mut Obs,
) -> RunReport
where
    Obs: RunObserver<VerifyOutcome>,
{
    let buf_size = cfg.read_buffer_bytes;
    run(input, cfg, state, observer, |p| verify_with(p, buf_size))
}

/// Create missing sidecars for all inputs.
pub fn create<Obs>(
    input: RunInput<'_>,
    cfg: &CsuConfig,
    state: &RunState<CreateOutcome>,
    observer: &mut Obs,
) -> RunReport
where
    Obs: RunObserver<CreateOutcome>,
{
    let buf_size = cfg.read_buffer_bytes;
    run(input, cfg, state, observer, |p| create_with(p, buf_size))
}

fn record_errors<O, Obs>(errors: Vec<TraversalError>, state: &RunState<O>, observer: &mut Obs)
where
    O: Outcome,
    Obs: RunObserver<O>,
{
    for err in errors {
        tracing::warn!(error = %err, "traversal error");
        observer.traversal_error(&err);
        state.record_error(err);
    }
}

/// Generic sequential loop shared by both operations.
pub fn run<O, Obs, F>(
    input: RunInput<'_>,
    cfg: &CsuConfig,
    state: &RunState<O>,
    observer: &mut Obs,
    mut classify: F,
) -> RunReport
where
    O: Outcome,
    Obs: RunObserver<O>,
    F: FnMut(&Path) -> O,
{
    let gathered = traversal::gather_roots(input.args, input.stdin);
    record_errors(gathered.errors, state, observer);

    let mut report = RunReport::default();
    for root in &gathered.roots {
        // The result set belongs to this root before its walk starts, so an
        // interrupt during a long walk never replays the previous root.
        state.begin_root();
        observer.root_started(root);
        report.roots += 1;

        let scan = traversal::scan_root(root, cfg.sort_entries);
        record_errors(scan.errors, state, observer);
        tracing::info!(root = %root.label, files = scan.candidates.len(), "processing root");

        for path in &scan.candidates {
            observer.file_started(path);
            let start = Instant::now();
            let outcome = classify(path.as_path());
            let elapsed = start.elapsed();
            match outcome.error() {
                Some(e) => tracing::debug!(
                    path = %path.display(),
                    status = outcome.status_name(),
                    error = %e,
                    "classified"
                ),
                None => tracing::debug!(
                    path = %path.display(),
                    status = outcome.status_name(),
                    "classified"
                ),
            }
            state.record(outcome.clone());
            observer.file_finished(&outcome, elapsed);
            report.files += 1;
        }

        tracing::debug!(root = %root.label, results = state.result_count(), "root finished");
        let results = state.results();
        observer.root_finished(root, &results);
    }

    report.errors = state.error_count();
    report
}
