//! `checksum-utils create` – write missing `.sha512` sidecars.

use anyhow::Result;
use csu_core::config::CsuConfig;
use csu_core::engine;
use csu_core::outcome::CreateOutcome;

use super::run::{run_operation, Sources};
use crate::cli::output::TerminalObserver;

pub async fn run_create(sources: Sources, cfg: &CsuConfig) -> Result<()> {
    let report =
        run_operation::<CreateOutcome>(sources, cfg, engine::create::<TerminalObserver>).await?;
    tracing::info!(
        roots = report.roots,
        files = report.files,
        errors = report.errors,
        "create completed"
    );
    Ok(())
}
