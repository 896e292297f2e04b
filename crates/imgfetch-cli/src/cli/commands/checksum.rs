//! `imgfetch checksum` – fingerprint a local file.
//!
//! The digest is the same one the fetch pipeline uses as its dedup key, so a
//! file already in the collection can be matched against fetched content.

use anyhow::Result;
use imgfetch_core::fingerprint;
use std::path::Path;

/// Print the dedup fingerprint of `path`, in `sha256sum` layout.
pub async fn run_checksum(path: &Path) -> Result<()> {
    let digest = fingerprint::fingerprint_path(path)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
