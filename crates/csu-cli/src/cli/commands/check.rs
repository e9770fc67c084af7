//! `checksum-utils check` – verify files against their `.sha512` sidecars.

use anyhow::Result;
use csu_core::config::CsuConfig;
use csu_core::engine;
use csu_core::outcome::VerifyOutcome;

use super::run::{run_operation, Sources};
use crate::cli::output::TerminalObserver;

pub async fn run_check(sources: Sources, cfg: &CsuConfig) -> Result<()> {
    let report =
        run_operation::<VerifyOutcome>(sources, cfg, engine::check::<TerminalObserver>).await?;
    tracing::info!(
        roots = report.roots,
        files = report.files,
        errors = report.errors,
        "check completed"
    );
    Ok(())
}
