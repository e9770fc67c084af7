//! Flush partial results on Ctrl-C / SIGTERM, then exit with status 1.
//!
//! The watcher task shares the run's `RunState` with the blocking checksum
//! loop and only reads from it.

use csu_core::state::RunState;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::cli::output::{self, Present};

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = term.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Print whatever the current root has accumulated, plus all traversal errors.
pub fn flush_partial<O: Present>(out: &mut dyn Write, state: &RunState<O>) -> io::Result<()> {
    writeln!(out)?;
    O::write_summary(out, &state.results())?;
    output::write_errors(out, &state.error_messages())?;
    out.flush()
}

/// Spawn the watcher. Abort the returned handle once the run has finished.
pub fn spawn_flush_on_signal<O: Present>(state: Arc<RunState<O>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = wait_for_signal().await {
            tracing::warn!(error = %e, "cannot listen for termination signals");
            return;
        }
        tracing::info!("interrupted; flushing partial results");
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = flush_partial(&mut out, &state);
        std::process::exit(1);
    })
}
