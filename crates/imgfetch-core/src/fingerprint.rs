//! Content fingerprints used for deduplication.
//!
//! A fingerprint is the SHA-256 digest of the raw bytes. Identical bytes give
//! identical fingerprints regardless of which URL served them; nothing else
//! (URL, headers, filename) takes part in dedup.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Fixed-size SHA-256 digest of a content unit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Lowercase hex form, as printed by `imgfetch checksum`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

/// Fingerprint of an in-memory body.
pub fn fingerprint(content: &[u8]) -> Fingerprint {
    Fingerprint(Sha256::digest(content).into())
}

/// Fingerprint of a file on disk, read in chunks. Matches `fingerprint` on the
/// same bytes, so a saved image can be checked against fetched content.
pub fn fingerprint_path(path: &Path) -> Result<Fingerprint> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Fingerprint(hasher.finalize().into()))
}
