//! Scratch directory trees for integration tests.
//!
//! Builds a small archive-like layout under a temp dir and exposes helpers to
//! read and tamper with sidecars.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Tree {
    dir: TempDir,
}

impl Tree {
    /// Empty tree rooted at a fresh temp dir.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Tree with a few nested files of varied content.
    pub fn archive() -> Self {
        let t = Self::new();
        t.file("photos/2024/beach.jpg", &[0xff, 0xd8, 0xff, 0xe0, 1, 2, 3]);
        t.file("photos/2024/city.jpg", b"not really a jpeg");
        t.file("docs/budget.pdf", b"%PDF-1.7 budget");
        t.file("docs/empty.txt", b"");
        t.file("readme.md", b"# archive\n");
        t
    }

    /// Canonical root path (so absolute candidate paths compare equal).
    pub fn root(&self) -> PathBuf {
        self.dir.path().canonicalize().unwrap()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let p = self.path(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&p, content).unwrap();
        p
    }

    pub fn arg(&self, rel: &str) -> String {
        self.path(rel).display().to_string()
    }

    pub fn root_arg(&self) -> String {
        self.root().display().to_string()
    }
}

/// Relative display of `p` under `root`, for readable assertions.
pub fn rel(root: &Path, p: &Path) -> String {
    p.strip_prefix(root).unwrap().to_string_lossy().into_owned()
}
