//! Classify I/O errors into the kinds the classifiers report on.

use std::io;

/// Coarse kind of an I/O failure, as far as outcome classification cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Access denied; the operator can usually fix this with permissions.
    PermissionDenied,
    /// The path does not exist.
    NotFound,
    /// Anything else (I/O error, not a file, ...).
    Other,
}

/// Classify an `io::Error` by its kind.
pub fn classify_io_error(e: &io::Error) -> ErrorKind {
    match e.kind() {
        io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        _ => ErrorKind::Other,
    }
}
