//! Create the sidecar for a data file when it is missing.
//!
//! An existing sidecar short-circuits everything: the data file is not opened
//! and the sidecar is not checked for correctness. The sidecar is written only
//! after the full digest has been computed.

use crate::checksum::{self, BUF_SIZE};
use crate::classify::{classify_io_error, ErrorKind};
use crate::outcome::{CreateOutcome, CreateStatus};
use crate::sidecar;
use std::fs::File;
use std::path::Path;

/// Create the sidecar for `path` with the default read buffer.
pub fn create(path: &Path) -> CreateOutcome {
    create_with(path, BUF_SIZE)
}

/// Create the sidecar for `path`, streaming its content with a `buf_size` buffer.
pub fn create_with(path: &Path, buf_size: usize) -> CreateOutcome {
    match sidecar::sidecar_exists(path) {
        Ok(true) => return CreateOutcome::new(path, CreateStatus::Existing),
        Ok(false) => {}
        Err(e) => return CreateOutcome::failed(path, e),
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            return match classify_io_error(&e) {
                ErrorKind::PermissionDenied => CreateOutcome::locked(path, e),
                _ => CreateOutcome::failed(path, e),
            };
        }
    };

    let digest = match checksum::digest_reader_with(&mut file, buf_size) {
        Ok(d) => d,
        Err(e) => return CreateOutcome::failed(path, e),
    };
    drop(file);

    match sidecar::write_sidecar_if_absent(path, &digest.to_hex()) {
        Ok(true) => CreateOutcome::new(path, CreateStatus::Created),
        // Another process created it after our existence check.
        Ok(false) => CreateOutcome::new(path, CreateStatus::Existing),
        Err(e) => CreateOutcome::failed(path, e),
    }
}
