//! Salted password hashing (PBKDF2-HMAC-SHA256).
//!
//! Pure key-stretching helpers with no storage access: derive a digest
//! from a plaintext + per-account salt, generate fresh salts, and compare
//! digests in constant time. The plaintext never appears in errors or
//! logs.

use rand::rngs::SysRng;
use rand::TryRng;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Salt byte length for password hashing.
pub const SALT_BYTES: usize = 16;

/// Digest byte length produced by the KDF.
pub const HASH_BYTES: usize = 32;

/// PBKDF2 iteration count. Fixed work factor; changing it invalidates
/// every stored digest, so treat as part of the on-disk format.
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// Rejected before hashing: an empty plaintext is never derivable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Password must be a non-empty string.")]
pub struct EmptyPassword;

/// Derive a digest from a password and salt.
///
/// Deterministic for a fixed (password, salt) pair.
pub fn hash_password(password: &str, salt: &[u8]) -> Result<[u8; HASH_BYTES], EmptyPassword> {
    if password.is_empty() {
        return Err(EmptyPassword);
    }
    let mut digest = [0u8; HASH_BYTES];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut digest);
    Ok(digest)
}

/// Generate a fresh random salt from the OS CSPRNG.
pub fn generate_salt() -> [u8; SALT_BYTES] {
    let mut salt = [0u8; SALT_BYTES];
    SysRng
        .try_fill_bytes(&mut salt)
        .expect("OS CSPRNG failure");
    salt
}

/// Constant-time digest comparison.
///
/// Execution time does not depend on where the first differing byte
/// occurs; mismatched lengths compare unequal.
pub fn digests_match(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_for_same_salt() {
        let salt = [7u8; SALT_BYTES];
        let d1 = hash_password("test_password", &salt).unwrap();
        let d2 = hash_password("test_password", &salt).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn hash_differs_with_different_salt() {
        let d1 = hash_password("test_password", &[1u8; SALT_BYTES]).unwrap();
        let d2 = hash_password("test_password", &[2u8; SALT_BYTES]).unwrap();
        assert_ne!(d1, d2);
    }

    #[test]
    fn hash_differs_with_different_password() {
        let salt = [7u8; SALT_BYTES];
        let d1 = hash_password("password_one", &salt).unwrap();
        let d2 = hash_password("password_two", &salt).unwrap();
        assert_ne!(d1, d2);
    }

    #[test]
    fn empty_password_rejected_before_hashing() {
        assert_eq!(hash_password("", &[0u8; SALT_BYTES]), Err(EmptyPassword));
    }

    #[test]
    fn generated_salts_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn digests_match_works() {
        assert!(digests_match(b"same-bytes", b"same-bytes"));
        assert!(!digests_match(b"same-bytes", b"diff-bytes"));
        assert!(!digests_match(b"short", b"longer-value"));
    }
}
