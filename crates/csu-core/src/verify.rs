//! Verify a data file against its sidecar.
//!
//! The data file is opened before the sidecar is looked at, so a file that
//! cannot be read is always reported as `Locked` (or `CheckingFailed`), even
//! when no sidecar exists either. The handle is dropped on every return.

use crate::checksum::{self, BUF_SIZE};
use crate::classify::{classify_io_error, ErrorKind};
use crate::outcome::{VerifyOutcome, VerifyStatus};
use crate::sidecar;
use std::fs::File;
use std::path::Path;

/// Verify `path` with the default read buffer.
pub fn verify(path: &Path) -> VerifyOutcome {
    verify_with(path, BUF_SIZE)
}

/// Verify `path`, streaming its content with a `buf_size` buffer.
pub fn verify_with(path: &Path, buf_size: usize) -> VerifyOutcome {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            return match classify_io_error(&e) {
                ErrorKind::PermissionDenied => VerifyOutcome::locked(path, e),
                _ => VerifyOutcome::failed(path, e),
            };
        }
    };

    match sidecar::sidecar_exists(path) {
        Ok(true) => {}
        Ok(false) => return VerifyOutcome::new(path, VerifyStatus::NotFound),
        Err(e) => return VerifyOutcome::failed(path, e),
    }

    let digest = match checksum::digest_reader_with(&mut file, buf_size) {
        Ok(d) => d,
        Err(e) => return VerifyOutcome::failed(path, e),
    };
    drop(file);

    let recorded = match sidecar::read_sidecar(path) {
        Ok(bytes) => bytes,
        Err(e) => return VerifyOutcome::failed(path, e),
    };

    if digest.matches_hex(recorded.trim_ascii()) {
        VerifyOutcome::new(path, VerifyStatus::Match)
    } else {
        VerifyOutcome::new(path, VerifyStatus::NotMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use std::fs;

    const HELLO_SHA512: &str = "9b71d224bd62f3785d96d46ad3ea3d73319bfbc2890caadae2dff72519673ca72323c3d99ba5c11d7c7acc6e14b8c5da0c4663475c2e5c3adef46f73bcdec043";

    fn data_file(dir: &Path, content: &[u8]) -> std::path::PathBuf {
        let p = dir.join("data.txt");
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn no_sidecar_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let p = data_file(dir.path(), b"hello");
        let out = verify(&p);
        assert!(matches!(out.status, VerifyStatus::NotFound));
        assert!(out.error().is_none());
    }

    #[test]
    fn uppercase_sidecar_matches() {
        let dir = tempfile::tempdir().unwrap();
        let p = data_file(dir.path(), b"hello");
        fs::write(sidecar::sidecar_path(&p), HELLO_SHA512.to_uppercase()).unwrap();
        let out = verify(&p);
        assert!(matches!(out.status, VerifyStatus::Match), "{:?}", out.status);
        assert!(out.error().is_none());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let p = data_file(dir.path(), b"hello");
        fs::write(sidecar::sidecar_path(&p), format!("  {HELLO_SHA512}\n")).unwrap();
        assert!(matches!(verify(&p).status, VerifyStatus::Match));
    }

    #[test]
    fn different_digest_is_not_match() {
        let dir = tempfile::tempdir().unwrap();
        let p = data_file(dir.path(), b"hello");
        fs::write(sidecar::sidecar_path(&p), "deadbeef").unwrap();
        let out = verify(&p);
        assert!(matches!(out.status, VerifyStatus::NotMatch));
        assert!(out.error().is_none());
    }

    #[test]
    fn binary_sidecar_is_not_match() {
        let dir = tempfile::tempdir().unwrap();
        let p = data_file(dir.path(), b"hello");
        fs::write(sidecar::sidecar_path(&p), [0xffu8, 0xfe, 0x00, 0x41]).unwrap();
        let out = verify(&p);
        assert!(matches!(out.status, VerifyStatus::NotMatch), "{:?}", out.status);
        assert!(out.error().is_none());
    }

    #[test]
    fn crlf_sidecar_matches() {
        let dir = tempfile::tempdir().unwrap();
        let p = data_file(dir.path(), b"hello");
        fs::write(sidecar::sidecar_path(&p), format!("{HELLO_SHA512}\r\n")).unwrap();
        assert!(matches!(verify(&p).status, VerifyStatus::Match));
    }

    #[test]
    fn hello_scenario_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let p = data_file(dir.path(), b"hello");
        assert!(matches!(verify(&p).status, VerifyStatus::NotFound));
        fs::write(sidecar::sidecar_path(&p), HELLO_SHA512.to_uppercase()).unwrap();
        assert!(matches!(verify(&p).status, VerifyStatus::Match));
        fs::write(sidecar::sidecar_path(&p), "deadbeef").unwrap();
        assert!(matches!(verify(&p).status, VerifyStatus::NotMatch));
    }

    #[test]
    fn missing_data_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = verify(&dir.path().join("missing.txt"));
        assert!(matches!(out.status, VerifyStatus::CheckingFailed(_)));
        assert!(out.error().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_locked_even_without_sidecar() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("locked.txt");
        fs::write(&p, b"secret").unwrap();
        fs::set_permissions(&p, fs::Permissions::from_mode(0o000)).unwrap();
        if File::open(&p).is_ok() {
            // Running as root: permission bits are not enforced.
            return;
        }

        let out = verify(&p);
        fs::set_permissions(&p, fs::Permissions::from_mode(0o600)).unwrap();
        assert!(matches!(out.status, VerifyStatus::Locked(_)), "{:?}", out.status);
        assert!(out.error().is_some());
    }
}
