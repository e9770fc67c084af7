//! SHA-512 digest of a byte stream.
//!
//! Content is read in fixed-size chunks so memory stays bounded no matter how
//! large the file is. I/O errors are handed back untouched; callers decide
//! how to classify them.

use sha2::{Digest as _, Sha512};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default read buffer size for streaming file content into the hasher.
pub const BUF_SIZE: usize = 64 * 1024;

/// Length of a SHA-512 digest in bytes.
pub const DIGEST_LEN: usize = 64;

/// SHA-512 digest of a file's full content at one point in time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Lowercase hex encoding, the form stored in sidecar files.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Case-insensitive comparison against hex text (already trimmed). The
    /// text need not be UTF-8; anything that is not our hex is a mismatch.
    pub fn matches_hex(&self, text: impl AsRef<[u8]>) -> bool {
        self.to_hex().as_bytes().eq_ignore_ascii_case(text.as_ref())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Stream `reader` to EOF through SHA-512 using a `buf_size` chunk buffer.
pub fn digest_reader_with<R: Read>(reader: &mut R, buf_size: usize) -> io::Result<Digest> {
    let mut hasher = Sha512::new();
    let mut buf = vec![0u8; buf_size.max(1)];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    Ok(Digest(out))
}

/// Stream `reader` to EOF through SHA-512 with the default buffer size.
pub fn digest_reader<R: Read>(reader: &mut R) -> io::Result<Digest> {
    digest_reader_with(reader, BUF_SIZE)
}

/// Compute SHA-512 of the file at `path`.
pub fn sha512_path(path: &Path) -> io::Result<Digest> {
    let mut f = File::open(path)?;
    digest_reader(&mut f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";
    const HELLO_SHA512: &str = "9b71d224bd62f3785d96d46ad3ea3d73319bfbc2890caadae2dff72519673ca72323c3d99ba5c11d7c7acc6e14b8c5da0c4663475c2e5c3adef46f73bcdec043";

    #[test]
    fn sha512_path_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let digest = sha512_path(f.path()).unwrap();
        assert_eq!(digest.to_hex(), EMPTY_SHA512);
    }

    #[test]
    fn sha512_path_known_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello").unwrap();
        f.flush().unwrap();
        let digest = sha512_path(f.path()).unwrap();
        assert_eq!(digest.to_hex(), HELLO_SHA512);
    }

    #[test]
    fn tiny_buffer_gives_same_digest() {
        let data: Vec<u8> = (0u8..=255).cycle().take(10_000).collect();
        let a = digest_reader_with(&mut data.as_slice(), 7).unwrap();
        let b = digest_reader(&mut data.as_slice()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn matches_hex_ignores_case() {
        let digest = digest_reader(&mut &b"hello"[..]).unwrap();
        assert!(digest.matches_hex(&HELLO_SHA512.to_uppercase()));
        assert!(!digest.matches_hex("deadbeef"));
        assert!(!digest.matches_hex([0xffu8, 0xfe, 0x00, 0x41]));
    }

    #[test]
    fn read_error_is_returned() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }
        let err = digest_reader(&mut Broken).unwrap_err();
        assert_eq!(err.to_string(), "device gone");
    }
}
