use sha2::{Digest, Sha256};
use std::fmt;
use std::io;

use crate::Hash;

/// Failure to build a [`Hash`] from untrusted input
#[derive(Debug)]
pub enum HashError {
    InvalidLength(usize),
    Hex(hex::FromHexError),
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::InvalidLength(len) => write!(f, "Hash must be 32 bytes, got {}", len),
            HashError::Hex(e) => write!(f, "Invalid hash hex: {}", e),
        }
    }
}

impl std::error::Error for HashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HashError::Hex(e) => Some(e),
            HashError::InvalidLength(_) => None,
        }
    }
}

impl From<hex::FromHexError> for HashError {
    fn from(e: hex::FromHexError) -> Self {
        HashError::Hex(e)
    }
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA256(SHA256(data)), used for ids and base58check checksums
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Streaming double SHA256 behind [`io::Write`], so encoders can serialize straight into it
#[derive(Clone, Default)]
pub struct HashWriter {
    state: Sha256,
}

impl HashWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// SHA256(SHA256(written bytes))
    pub fn finalize(self) -> Hash {
        Hash::from_bytes(sha256(&self.state.finalize()))
    }
}

impl io::Write for HashWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
