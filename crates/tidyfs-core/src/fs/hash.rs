//! Streaming content fingerprints.
//!
//! [`Fingerprinter`] reads a file in fixed-size chunks and feeds them to a
//! SHA-2 digest, so memory use is bounded by the chunk size regardless of
//! the file length. Read failures produce the empty [`Fingerprint`], which
//! never compares as a match.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::config::settings::HashingConfig;

/// Digest used for content fingerprints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

/// Lower-case hex digest of a file's content.
///
/// The empty value is the failure sentinel: [`Fingerprint::matches`] is
/// always `false` when either side is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The sentinel returned when a file could not be read.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the failure sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Content equality that never matches the sentinel.
    pub fn matches(&self, other: &Fingerprint) -> bool {
        !self.is_empty() && self == other
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes fingerprints with a fixed algorithm, chunk size and size ceiling.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    algorithm: HashAlgorithm,
    chunk_size: usize,
    size_ceiling: u64,
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::from_config(&HashingConfig::default())
    }
}

impl Fingerprinter {
    pub fn new(algorithm: HashAlgorithm, chunk_size: usize, size_ceiling: u64) -> Self {
        Self {
            algorithm,
            chunk_size: chunk_size.max(1),
            size_ceiling,
        }
    }

    pub fn from_config(config: &HashingConfig) -> Self {
        Self::new(config.algorithm, config.chunk_size, config.size_ceiling)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn size_ceiling(&self) -> u64 {
        self.size_ceiling
    }

    /// Returns `true` if a file of `size` bytes may be fingerprinted by detectors.
    pub fn is_within_ceiling(&self, size: u64) -> bool {
        size <= self.size_ceiling
    }

    /// Fingerprints the file at `path`, or returns [`Fingerprint::empty`] on any read error.
    pub fn fingerprint(&self, path: &Path) -> Fingerprint {
        let result = match self.algorithm {
            HashAlgorithm::Sha256 => self.digest_file::<Sha256>(path),
            HashAlgorithm::Sha512 => self.digest_file::<Sha512>(path),
        };
        match result {
            Ok(hex) => Fingerprint(hex),
            Err(e) => {
                tracing::warn!("failed to hash file {}: {e}", path.display());
                Fingerprint::empty()
            }
        }
    }

    fn digest_file<D: Digest>(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path)?;
        let mut hasher = D::new();
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            let n = match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
        }
        Ok(hex_string(&hasher.finalize()))
    }
}

fn hex_string(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
