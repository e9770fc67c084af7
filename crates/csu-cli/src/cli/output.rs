//! Terminal presentation: per-file status lines, per-root summaries, errors.

use csu_core::config::ProgressConfig;
use csu_core::engine::RunObserver;
use csu_core::outcome::{CreateOutcome, CreateStatus, Outcome, VerifyOutcome, VerifyStatus};
use csu_core::progress::{self, Spinner};
use csu_core::report::{format_duration, CreateSummary, VerifySummary};
use csu_core::traversal::Root;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

pub const PROJECT_URL: &str = "https://github.com/JuanOrbegoso/checksum-utils";

/// How an outcome type is shown on the terminal.
pub trait Present: Outcome {
    fn icon(&self) -> &'static str;
    /// Whether the elapsed time is worth printing after the icon.
    fn show_timing(&self) -> bool;
    fn write_summary(out: &mut dyn Write, results: &[Self]) -> io::Result<()>;
}

impl Present for VerifyOutcome {
    fn icon(&self) -> &'static str {
        match self.status {
            VerifyStatus::Match => "✅",
            VerifyStatus::NotMatch => "⚠️",
            VerifyStatus::NotFound => "👻",
            VerifyStatus::Locked(_) => "🔒",
            VerifyStatus::CheckingFailed(_) => "❌",
        }
    }

    fn show_timing(&self) -> bool {
        !matches!(self.status, VerifyStatus::NotFound)
    }

    fn write_summary(out: &mut dyn Write, results: &[Self]) -> io::Result<()> {
        let s = VerifySummary::from_outcomes(results);
        if s.total > 0 {
            writeln!(out, "Results: {} files processed", s.total)?;
        }
        if s.matched > 0 {
            writeln!(out, "✅ : {} checksum files match", s.matched)?;
        }
        write_bucket(out, "⚠️", "checksum files not match", &s.not_matched)?;
        write_bucket(out, "👻", "files without a checksum file", &s.not_found)?;
        write_bucket(out, "🔒", "files could not be read due to permissions", &s.locked)?;
        write_bucket(out, "❌", "checksum files failed to check", &s.failed)?;
        Ok(())
    }
}

impl Present for CreateOutcome {
    fn icon(&self) -> &'static str {
        match self.status {
            CreateStatus::Created => "✅",
            CreateStatus::Existing => "📄",
            CreateStatus::LockedCreation(_) => "🔒",
            CreateStatus::Failed(_) => "❌",
        }
    }

    fn show_timing(&self) -> bool {
        !matches!(self.status, CreateStatus::Existing)
    }

    fn write_summary(out: &mut dyn Write, results: &[Self]) -> io::Result<()> {
        let s = CreateSummary::from_outcomes(results);
        if s.total > 0 {
            writeln!(out, "Results: {} files processed", s.total)?;
        }
        if s.created > 0 {
            writeln!(out, "✅ : {} checksum files created", s.created)?;
        }
        if !s.existing.is_empty() {
            writeln!(out, "📄 : {} files already had a checksum file", s.existing.len())?;
        }
        write_bucket(out, "🔒", "files could not be read due to permissions", &s.locked)?;
        write_bucket(out, "❌", "checksum files failed to create", &s.failed)?;
        Ok(())
    }
}

/// One summary line plus a `- path` line per entry (with the error, if any).
fn write_bucket<O: Outcome>(
    out: &mut dyn Write,
    icon: &str,
    label: &str,
    entries: &[&O],
) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out, "{icon} : {} {label}", entries.len())?;
    for o in entries {
        match o.error() {
            Some(e) => writeln!(out, "- {} | Error: {e}", o.path().display())?,
            None => writeln!(out, "- {}", o.path().display())?,
        }
    }
    Ok(())
}

/// Print the traversal errors collected during the run, if any.
pub fn write_errors(out: &mut dyn Write, errors: &[String]) -> io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Errors:")?;
    for e in errors {
        writeln!(out, "- {e}")?;
    }
    Ok(())
}

pub fn print_header() {
    println!("Checksum-Utils v{}", env!("CARGO_PKG_VERSION"));
    println!("{PROJECT_URL}");
}

/// Observer that draws the spinner and status lines on stdout.
pub struct TerminalObserver {
    progress: ProgressConfig,
    interactive: bool,
    spinner: Option<Spinner>,
    prefix: String,
}

impl TerminalObserver {
    /// `interactive` should be true only when stdout is a terminal.
    pub fn new(progress: ProgressConfig, interactive: bool) -> Self {
        Self {
            progress,
            interactive,
            spinner: None,
            prefix: String::new(),
        }
    }
}

impl<O: Present> RunObserver<O> for TerminalObserver {
    fn root_started(&mut self, root: &Root) {
        println!();
        println!("Processing {}", root.label);
    }

    fn file_started(&mut self, path: &Path) {
        self.prefix = format!("- {} ", path.display());
        self.spinner = Some(Spinner::start(&self.prefix, &self.progress, self.interactive));
    }

    fn file_finished(&mut self, outcome: &O, elapsed: Duration) {
        let was_spinning = match self.spinner.take() {
            Some(spinner) => {
                let enabled = spinner.is_enabled();
                spinner.stop();
                enabled
            }
            None => false,
        };

        let mut line = if was_spinning {
            progress::clear_line(&self.prefix, self.progress.bar_width.max(1))
        } else {
            self.prefix.clone()
        };
        line.push_str(outcome.icon());
        if outcome.show_timing() {
            line.push_str(&format!(" ({})", format_duration(elapsed)));
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }

    fn root_finished(&mut self, _root: &Root, results: &[O]) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = O::write_summary(&mut out, results) {
            tracing::warn!(error = %e, "failed to print summary");
        }
    }
}
