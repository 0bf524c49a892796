// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output integrity — SHA-256 fingerprints of written files.

use logoconv_core::{FailureCause, StoredFile};
use logoconv_core::error::{ConvertError, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Verify that `data` matches the expected SHA-256 hex digest.
pub fn verify_hash(data: &[u8], expected_hex: &str) -> Result<()> {
    let actual = hash_bytes(data);
    if actual == expected_hex {
        Ok(())
    } else {
        Err(ConvertError::IntegrityMismatch {
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}

/// Re-read a stored file and check it still matches the digest recorded when
/// it was written.
pub fn verify_stored(stored: &StoredFile) -> Result<()> {
    let data = std::fs::read(&stored.path).map_err(|err| {
        ConvertError::decode(stored.path.display().to_string(), FailureCause::from_io(&err), err)
    })?;
    verify_hash(&data, &stored.sha256)?;
    debug!(path = %stored.path.display(), sha256 = %stored.sha256, "Stored file verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logoconv_core::{ErrorKind, OutputFormat};

    /// SHA-256 of the empty byte slice (well-known constant).
    const EMPTY_SHA256: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hash_empty_input() {
        assert_eq!(hash_bytes(b""), EMPTY_SHA256);
    }

    #[test]
    fn hash_known_value() {
        let expected = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
        assert_eq!(hash_bytes(b"hello"), expected);
    }

    #[test]
    fn verify_mismatched_hash() {
        match verify_hash(b"a", "0000").unwrap_err() {
            ConvertError::IntegrityMismatch { expected, actual } => {
                assert_eq!(expected, "0000");
                assert_eq!(actual, hash_bytes(b"a"));
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn tampered_file_fails_verification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pgm");
        std::fs::write(&path, b"P5 original").unwrap();
        let stored = StoredFile {
            path: path.clone(),
            format: OutputFormat::Pgm,
            bytes: 11,
            sha256: hash_bytes(b"P5 original"),
        };
        assert!(verify_stored(&stored).is_ok());

        std::fs::write(&path, b"P5 changed").unwrap();
        assert_eq!(verify_stored(&stored).unwrap_err().kind(), ErrorKind::Integrity);
    }
}
