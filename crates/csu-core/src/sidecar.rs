//! Sidecar file I/O.
//!
//! Every data file `name` may have a companion `name.sha512` holding the
//! lowercase hex SHA-512 of its content. Sidecars are created with
//! create-new semantics so an existing one is never overwritten.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to a data file name to get its sidecar.
pub const SIDECAR_SUFFIX: &str = ".sha512";

/// Path of the sidecar for `data_path` (`<data_path>.sha512`).
pub fn sidecar_path(data_path: &Path) -> PathBuf {
    let mut s: OsString = data_path.as_os_str().to_owned();
    s.push(SIDECAR_SUFFIX);
    PathBuf::from(s)
}

/// True when the file name ends with the sidecar suffix.
pub fn is_sidecar(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(SIDECAR_SUFFIX))
        .unwrap_or(false)
}

/// Whether the sidecar for `data_path` exists. "Not found" is `Ok(false)`;
/// any other stat failure is returned as an error.
pub fn sidecar_exists(data_path: &Path) -> io::Result<bool> {
    match fs::metadata(sidecar_path(data_path)) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Full sidecar content as raw bytes, untrimmed. Content is not required to
/// be UTF-8; a corrupt sidecar is the comparison's problem, not an I/O error.
pub fn read_sidecar(data_path: &Path) -> io::Result<Vec<u8>> {
    fs::read(sidecar_path(data_path))
}

/// Write `digest_hex` to the sidecar unless one already exists.
/// Returns `Ok(false)` when a sidecar was already present (nothing written).
pub fn write_sidecar_if_absent(data_path: &Path, digest_hex: &str) -> io::Result<bool> {
    let path = sidecar_path(data_path);
    let mut file = match File::options().write(true).create_new(true).open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    file.write_all(digest_hex.as_bytes())?;
    file.sync_all()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_path_appends_suffix() {
        assert_eq!(
            sidecar_path(Path::new("/data/report.pdf")),
            PathBuf::from("/data/report.pdf.sha512")
        );
        assert_eq!(
            sidecar_path(Path::new("noext")),
            PathBuf::from("noext.sha512")
        );
    }

    #[test]
    fn is_sidecar_matches_suffix_only() {
        assert!(is_sidecar(Path::new("/a/b.txt.sha512")));
        assert!(is_sidecar(Path::new(".sha512")));
        assert!(!is_sidecar(Path::new("/a/b.sha512.txt")));
        assert!(!is_sidecar(Path::new("/a/sha512")));
        assert!(!is_sidecar(Path::new("/")));
    }

    #[test]
    fn exists_then_write_once() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("a.bin");
        fs::write(&data, b"x").unwrap();

        assert!(!sidecar_exists(&data).unwrap());
        assert!(write_sidecar_if_absent(&data, "abc").unwrap());
        assert!(sidecar_exists(&data).unwrap());
        assert!(!write_sidecar_if_absent(&data, "def").unwrap());
        assert_eq!(read_sidecar(&data).unwrap(), b"abc");
    }

    #[test]
    fn read_missing_sidecar_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_sidecar(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
