//! Per-file outcomes of the two operations.
//!
//! The error is carried inside the status variants that may fail, so a
//! `Match` or `Created` can never hold an error and a `Locked` or `Failed`
//! always does. Errors are behind `Arc` so outcomes can be snapshotted by the
//! interrupt handler while the run continues.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Common read access the engine and presentation need from an outcome.
pub trait Outcome: Clone + Send + Sync + 'static {
    fn path(&self) -> &Path;
    fn error(&self) -> Option<&io::Error>;
    /// Short status name, used in logs.
    fn status_name(&self) -> &'static str;
}

/// Verification status; `Locked` and `CheckingFailed` carry the error.
#[derive(Debug, Clone)]
pub enum VerifyStatus {
    Match,
    NotMatch,
    NotFound,
    Locked(Arc<io::Error>),
    CheckingFailed(Arc<io::Error>),
}

impl VerifyStatus {
    pub fn name(&self) -> &'static str {
        match self {
            VerifyStatus::Match => "Match",
            VerifyStatus::NotMatch => "NotMatch",
            VerifyStatus::NotFound => "NotFound",
            VerifyStatus::Locked(_) => "Locked",
            VerifyStatus::CheckingFailed(_) => "CheckingFailed",
        }
    }
}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of verifying one candidate.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub path: PathBuf,
    pub status: VerifyStatus,
}

impl VerifyOutcome {
    pub fn new(path: impl Into<PathBuf>, status: VerifyStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }

    pub fn locked(path: &Path, e: io::Error) -> Self {
        Self::new(path, VerifyStatus::Locked(Arc::new(e)))
    }

    pub fn failed(path: &Path, e: io::Error) -> Self {
        Self::new(path, VerifyStatus::CheckingFailed(Arc::new(e)))
    }
}

impl Outcome for VerifyOutcome {
    fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self) -> Option<&io::Error> {
        match &self.status {
            VerifyStatus::Locked(e) | VerifyStatus::CheckingFailed(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    fn status_name(&self) -> &'static str {
        self.status.name()
    }
}

/// Creation status; `LockedCreation` and `Failed` carry the error.
#[derive(Debug, Clone)]
pub enum CreateStatus {
    Created,
    Existing,
    LockedCreation(Arc<io::Error>),
    Failed(Arc<io::Error>),
}

impl CreateStatus {
    pub fn name(&self) -> &'static str {
        match self {
            CreateStatus::Created => "Created",
            CreateStatus::Existing => "Existing",
            CreateStatus::LockedCreation(_) => "LockedCreation",
            CreateStatus::Failed(_) => "Failed",
        }
    }
}

impl fmt::Display for CreateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of creating the sidecar for one candidate.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub path: PathBuf,
    pub status: CreateStatus,
}

impl CreateOutcome {
    pub fn new(path: impl Into<PathBuf>, status: CreateStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }

    pub fn locked(path: &Path, e: io::Error) -> Self {
        Self::new(path, CreateStatus::LockedCreation(Arc::new(e)))
    }

    pub fn failed(path: &Path, e: io::Error) -> Self {
        Self::new(path, CreateStatus::Failed(Arc::new(e)))
    }
}

impl Outcome for CreateOutcome {
    fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self) -> Option<&io::Error> {
        match &self.status {
            CreateStatus::LockedCreation(e) | CreateStatus::Failed(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    fn status_name(&self) -> &'static str {
        self.status.name()
    }
}
