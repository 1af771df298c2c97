//! Session signing-key loading and fingerprinting.
//!
//! The key is read from a file outside the repository (a mounted secret in
//! deployment). When the file is unreadable, debug builds and explicitly
//! opted-in environments fall back to an ephemeral generated key; release
//! builds refuse to start. A truncated SHA-256 fingerprint of the active key
//! is logged on startup so operators can verify which key is live without
//! exposing the key material.

use std::io;
use std::path::Path;

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};
use tracing::warn;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Generate a truncated SHA-256 fingerprint of the key's signing material.
///
/// Returns the first 8 bytes of the SHA-256 hash as a 16-character hex
/// string, enough for visual distinction in logs and rotation runbooks
/// without being security-sensitive.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.signing());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

/// Load the session signing key from `path`.
///
/// # Errors
/// Returns [`io::Error`] when the file is unreadable and neither a debug
/// build nor `allow_ephemeral` permits the generated-key fallback.
pub fn load_session_key(path: &Path, allow_ephemeral: bool) -> io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(err) => {
            if cfg!(debug_assertions) || allow_ephemeral {
                warn!(path = %path.display(), error = %err, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(io::Error::other(format!(
                    "failed to read session key at {}: {err}",
                    path.display()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_deterministic_per_key() {
        let key = Key::derive_from(&[b'a'; 64]);
        assert_eq!(key_fingerprint(&key), key_fingerprint(&key));
    }

    #[rstest]
    fn fingerprint_is_sixteen_hex_characters() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[rstest]
    fn different_keys_fingerprint_differently() {
        let first = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        let second = key_fingerprint(&Key::derive_from(&[b'b'; 64]));
        assert_ne!(first, second);
    }

    #[rstest]
    fn file_backed_keys_are_stable_across_loads() {
        let dir = std::env::temp_dir().join("razewatch-key-test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("session_key");
        std::fs::write(&path, [b'k'; 64]).expect("write key material");
        let first = load_session_key(&path, false).expect("load key");
        let second = load_session_key(&path, false).expect("load key again");
        assert_eq!(key_fingerprint(&first), key_fingerprint(&second));
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[rstest]
    fn missing_file_falls_back_when_ephemeral_is_allowed() {
        let path = Path::new("/nonexistent/razewatch/session_key");
        let key = load_session_key(path, true).expect("ephemeral fallback");
        assert_eq!(key_fingerprint(&key).len(), FINGERPRINT_BYTES * 2);
    }
}
