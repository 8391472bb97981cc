//! Credential authority: accounts, password policy, authentication.
//!
//! Provides:
//! - Account creation with per-account salt + PBKDF2-HMAC-SHA256 digests (200k rounds)
//! - Password complexity validation with typed rejection reasons
//! - SQLite-backed persistent account storage (one connection per operation)
//! - Username/password authentication returning a credential-free [`Identity`]
//! - Idempotent schema init and demo-account seeding
//!
//! ## Design Decisions
//! - No session or token layer — callers hold the returned [`Identity`]
//!   for the lifetime of their interactive session.
//! - Digest comparison goes through the `subtle` crate so equality never
//!   short-circuits on the first differing byte.
//! - An unknown username burns the same PBKDF2 derivation as a wrong
//!   password, keeping both failure paths observably identical.

pub mod authenticator;
pub mod bootstrap;
pub mod hasher;
pub mod policy;
pub mod store;

pub use authenticator::authenticate;
pub use bootstrap::ensure_ready;
pub use policy::{validate_password, PolicyViolation};
pub use store::{AuthError, CredentialStore, Identity};
