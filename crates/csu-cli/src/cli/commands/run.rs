//! Shared driver for `check` and `create`: header, interrupt watcher, the
//! blocking checksum loop, and the final error list.

use anyhow::{Context, Result};
use csu_core::config::CsuConfig;
use csu_core::engine::{RunInput, RunReport};
use csu_core::state::RunState;
use std::io::{self, BufRead, IsTerminal};
use std::sync::Arc;

use crate::cli::interrupt;
use crate::cli::output::{self, Present, TerminalObserver};

/// Where the paths of a run come from.
#[derive(Debug, Clone)]
pub struct Sources {
    pub paths: Vec<String>,
    /// Also read a newline-delimited path list from stdin.
    pub read_stdin: bool,
}

/// Engine entry point for one operation (`engine::check` or `engine::create`).
pub type Operation<O> =
    fn(RunInput<'_>, &CsuConfig, &RunState<O>, &mut TerminalObserver) -> RunReport;

pub async fn run_operation<O: Present>(
    sources: Sources,
    cfg: &CsuConfig,
    op: Operation<O>,
) -> Result<RunReport> {
    output::print_header();

    let state: Arc<RunState<O>> = Arc::new(RunState::new());
    let watcher = interrupt::spawn_flush_on_signal(Arc::clone(&state));

    let cfg = cfg.clone();
    let worker_state = Arc::clone(&state);
    let report = tokio::task::spawn_blocking(move || -> io::Result<RunReport> {
        let stdin = io::stdin();
        let mut stdin_lock = stdin.lock();
        let input = RunInput {
            args: &sources.paths,
            stdin: if sources.read_stdin {
                Some(&mut stdin_lock as &mut dyn BufRead)
            } else {
                None
            },
        };
        let mut observer = TerminalObserver::new(cfg.progress.clone(), io::stdout().is_terminal());
        let report = op(input, &cfg, &worker_state, &mut observer);

        let stdout = io::stdout();
        output::write_errors(&mut stdout.lock(), &worker_state.error_messages())?;
        Ok(report)
    })
    .await
    .context("checksum worker failed")?
    .context("failed to write report")?;

    watcher.abort();
    Ok(report)
}
