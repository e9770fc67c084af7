//! CLI for checksum-utils.

mod commands;
mod interrupt;
mod output;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use csu_core::config;
use std::io::{self, IsTerminal};

use commands::{run_check, run_completions, run_create, run_manpage};

/// Top-level CLI for checksum-utils.
#[derive(Debug, Parser)]
#[command(name = "checksum-utils", version)]
#[command(about = "Multiplatform checksum utils.")]
#[command(long_about = "A multiplatform checksum utils for NAS admins.\n\n\
Every file `name` gets a companion `name.sha512` holding the SHA-512 of its content.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Paths shared by `check` and `create`.
#[derive(Debug, Clone, Args)]
pub struct PathArgs {
    /// Files, directories (walked recursively) or glob patterns.
    /// With no paths, a newline-delimited path list is read from stdin.
    pub paths: Vec<String>,

    /// Never read a path list from stdin, even when it is piped.
    #[arg(long)]
    pub no_stdin: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check files against their .sha512 checksum files.
    #[command(long_about = "Compute the checksum of each file and compare it with its .sha512 checksum file.\n\n\
Examples:\n  checksum-utils check .\n  checksum-utils check ./work\n  checksum-utils check ~/documents\n  checksum-utils check /mnt/external-disk/budget.pdf\n  find /mnt/backup -name '*.iso' | checksum-utils check")]
    Check(PathArgs),

    /// Create missing .sha512 checksum files.
    #[command(long_about = "Create a .sha512 checksum file for every file that does not have one yet.\n\
Existing checksum files are never overwritten.\n\n\
Examples:\n  checksum-utils create .\n  checksum-utils create '/mnt/photos/*.jpg'")]
    Create(PathArgs),

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Manpage,
}

impl PathArgs {
    /// Resolve where the paths of this run come from. A piped stdin is read in
    /// addition to any arguments unless `--no-stdin` is given.
    pub fn sources(self, stdin_is_terminal: bool) -> Result<commands::Sources> {
        let read_stdin = !self.no_stdin && !stdin_is_terminal;
        if self.paths.is_empty() && !read_stdin {
            bail!("no paths given; pass files, directories or globs, or pipe a path list on stdin");
        }
        Ok(commands::Sources {
            paths: self.paths,
            read_stdin,
        })
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Check(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_check(args.sources(io::stdin().is_terminal())?, &cfg).await?;
            }
            CliCommand::Create(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_create(args.sources(io::stdin().is_terminal())?, &cfg).await?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
