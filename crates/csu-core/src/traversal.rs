//! Turn raw path arguments into candidate files.
//!
//! Two steps: [`gather_roots`] groups the raw inputs (literal paths, glob
//! patterns, a path list from stdin) into roots, and [`scan_root`] expands one
//! root into absolute candidate paths, walking directories recursively.
//! Sidecar files are never candidates. Problems are collected as
//! [`TraversalError`]s and never stop the rest of the inputs.

use crate::sidecar::{self, SIDECAR_SUFFIX};
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Characters that make an argument a glob pattern.
const GLOB_META: &[char] = &['*', '?', '['];

/// Label of the root built from standard input.
pub const STDIN_LABEL: &str = "<stdin>";

/// Problem found while expanding inputs. Reported at the end of a run; never
/// aborts processing of other inputs.
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("invalid pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no matches for {0:?}")]
    NoMatches(String),

    #[error("{0}")]
    GlobEntry(#[from] glob::GlobError),

    #[error("reading paths from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("{}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is a checksum file", .0.display())]
    ChecksumFile(PathBuf),

    #[error("walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Literal,
    Glob,
    Stdin,
}

/// One top-level processing unit: a literal argument, all matches of one
/// glob pattern, or the path list read from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub label: String,
    pub source: RootSource,
    pub paths: Vec<PathBuf>,
}

/// Roots plus the errors found while building them.
#[derive(Debug, Default)]
pub struct Gathered {
    pub roots: Vec<Root>,
    pub errors: Vec<TraversalError>,
}

/// Candidates of one root plus the errors found while walking it.
#[derive(Debug, Default)]
pub struct Scan {
    pub candidates: Vec<PathBuf>,
    pub errors: Vec<TraversalError>,
}

pub fn has_glob_meta(arg: &str) -> bool {
    arg.contains(GLOB_META)
}

/// Read a newline-delimited path list. Lines are raw bytes, so names that are
/// not UTF-8 survive. Lines are trimmed; blank lines and lines ending in the
/// sidecar suffix are dropped. On a read error, the lines read so far are
/// returned together with the error.
pub fn read_path_list<R: BufRead>(reader: R) -> (Vec<PathBuf>, Option<io::Error>) {
    let mut paths = Vec::new();
    for line in reader.split(b'\n') {
        let line = match line {
            Ok(l) => l,
            Err(e) => return (paths, Some(e)),
        };
        let line = line.trim_ascii();
        if line.is_empty() || line.ends_with(SIDECAR_SUFFIX.as_bytes()) {
            continue;
        }
        paths.push(path_from_bytes(line));
    }
    (paths, None)
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

fn expand_glob(pattern: &str, errors: &mut Vec<TraversalError>) -> Vec<PathBuf> {
    let entries = match glob::glob(pattern) {
        Ok(entries) => entries,
        Err(source) => {
            errors.push(TraversalError::BadPattern {
                pattern: pattern.to_string(),
                source,
            });
            return Vec::new();
        }
    };
    let mut matches = Vec::new();
    let mut sidecars = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if sidecar::is_sidecar(&path) => sidecars.push(path),
            Ok(path) => matches.push(path),
            Err(e) => errors.push(e.into()),
        }
    }
    if matches.is_empty() {
        if sidecars.is_empty() {
            errors.push(TraversalError::NoMatches(pattern.to_string()));
        } else {
            // Nothing but sidecars: each one is reported like a literal argument.
            for path in sidecars {
                let abs = std::path::absolute(&path).unwrap_or(path);
                errors.push(TraversalError::ChecksumFile(abs));
            }
        }
    } else {
        for path in &sidecars {
            tracing::debug!(path = %path.display(), "glob match is a sidecar, skipped");
        }
    }
    matches
}

/// Group raw arguments (and the stdin path list, when given) into roots.
/// Arguments come first, in order; the stdin root, if any, comes last.
pub fn gather_roots(args: &[String], stdin: Option<&mut dyn BufRead>) -> Gathered {
    let mut gathered = Gathered::default();

    for arg in args {
        if has_glob_meta(arg) {
            let paths = expand_glob(arg, &mut gathered.errors);
            if !paths.is_empty() {
                gathered.roots.push(Root {
                    label: arg.clone(),
                    source: RootSource::Glob,
                    paths,
                });
            }
            continue;
        }
        gathered.roots.push(Root {
            label: arg.clone(),
            source: RootSource::Literal,
            paths: vec![PathBuf::from(arg)],
        });
    }

    if let Some(reader) = stdin {
        let (lines, err) = read_path_list(reader);
        if !lines.is_empty() {
            gathered.roots.push(Root {
                label: STDIN_LABEL.to_string(),
                source: RootSource::Stdin,
                paths: lines,
            });
        }
        if let Some(e) = err {
            gathered.errors.push(TraversalError::Stdin(e));
        }
    }

    gathered
}

/// Expand every path of `root` into candidates.
pub fn scan_root(root: &Root, sort_entries: bool) -> Scan {
    let mut scan = Scan::default();
    for path in &root.paths {
        scan_path(path, sort_entries, &mut scan);
    }
    scan
}

/// Expand one top-level path: a directory is walked, a regular file becomes a
/// candidate, a sidecar file or a missing path is an error.
pub fn scan_path(path: &Path, sort_entries: bool, scan: &mut Scan) {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(source) => {
            scan.errors.push(TraversalError::Stat {
                path: path.to_path_buf(),
                source,
            });
            return;
        }
    };
    let abs = match std::path::absolute(path) {
        Ok(p) => p,
        Err(source) => {
            scan.errors.push(TraversalError::Stat {
                path: path.to_path_buf(),
                source,
            });
            return;
        }
    };

    if meta.is_dir() {
        walk_dir(&abs, sort_entries, scan);
    } else if sidecar::is_sidecar(&abs) {
        scan.errors.push(TraversalError::ChecksumFile(abs));
    } else {
        scan.candidates.push(abs);
    }
}

/// Depth-first walk. An unreadable directory records an error and its subtree
/// is skipped; an entry that cannot be inspected records an error and the
/// walk continues with its siblings. Symlinked directories are not followed.
fn walk_dir(dir: &Path, sort_entries: bool, scan: &mut Scan) {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(source) => {
            tracing::warn!(dir = %dir.display(), error = %source, "cannot read directory");
            scan.errors.push(TraversalError::Walk {
                path: dir.to_path_buf(),
                source,
            });
            return;
        }
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(e) => entries.push(e),
            Err(source) => scan.errors.push(TraversalError::Walk {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }
    if sort_entries {
        entries.sort_by_key(|e| e.file_name());
    }

    for entry in entries {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(source) => {
                scan.errors.push(TraversalError::Walk { path, source });
                continue;
            }
        };

        if file_type.is_dir() {
            walk_dir(&path, sort_entries, scan);
            continue;
        }
        if sidecar::is_sidecar(&path) {
            continue;
        }
        if file_type.is_file() {
            scan.candidates.push(path);
        } else if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(m) if m.is_dir() => {
                    tracing::debug!(path = %path.display(), "not following directory symlink");
                }
                Ok(m) if !m.is_file() => {
                    tracing::debug!(path = %path.display(), "skipping symlink to special file");
                }
                // Broken links stay candidates; the classifier reports the failure.
                _ => scan.candidates.push(path),
            }
        } else {
            tracing::debug!(path = %path.display(), "skipping special file");
        }
    }
}

/// Gather roots and scan them all into one flat candidate list.
pub fn expand(args: &[String], stdin: Option<&mut dyn BufRead>, sort_entries: bool) -> Scan {
    let gathered = gather_roots(args, stdin);
    let mut scan = Scan {
        candidates: Vec::new(),
        errors: gathered.errors,
    };
    for root in &gathered.roots {
        let part = scan_root(root, sort_entries);
        scan.candidates.extend(part.candidates);
        scan.errors.extend(part.errors);
    }
    scan
}
