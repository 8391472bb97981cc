//! Username/password authentication.
//!
//! Orchestrates the store's credential lookup with the hasher: derive a
//! digest from the supplied password and the stored salt, then compare
//! in constant time. Both failure causes — unknown username and wrong
//! password — perform one PBKDF2 derivation and one comparison, and
//! return the same absent value, so a caller cannot tell them apart.

use super::hasher::{self, HASH_BYTES, SALT_BYTES};
use super::store::{AuthError, CredentialStore, Identity};

/// Salt used to burn an equivalent derivation when no account matches.
const DUMMY_SALT: [u8; SALT_BYTES] = [0u8; SALT_BYTES];

/// Authenticate a username/password pair.
///
/// Returns the credential-free [`Identity`] on success, `Ok(None)` on
/// any authentication failure. Only storage errors are distinguishable.
pub fn authenticate(
    store: &CredentialStore,
    username: &str,
    password: &str,
) -> Result<Option<Identity>, AuthError> {
    // Empty inputs short-circuit before any lookup, identically whether
    // or not the account exists.
    if username.trim().is_empty() || password.is_empty() {
        return Ok(None);
    }

    match store.stored_credentials(username)? {
        Some(creds) => {
            let candidate = hasher::hash_password(password, &creds.salt)?;
            if hasher::digests_match(&candidate, &creds.pw_hash) {
                Ok(Some(creds.into_identity()))
            } else {
                Ok(None)
            }
        }
        None => {
            // Same work as the wrong-password path: one derivation, one
            // comparison.
            let burned = hasher::hash_password(password, &DUMMY_SALT)?;
            let _ = hasher::digests_match(&burned, &[0u8; HASH_BYTES]);
            Ok(None)
        }
    }
}
