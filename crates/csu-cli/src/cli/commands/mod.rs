//! CLI command handlers. Each command is in its own file.

mod check;
mod completions;
mod create;
mod run;

pub use check::run_check;
pub use completions::{run_completions, run_manpage};
pub use create::run_create;
pub use run::Sources;
