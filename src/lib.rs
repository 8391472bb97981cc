//! credstore — local credential authority backed by a single SQLite table.
//!
//! Accounts carry a per-account random salt and a PBKDF2-HMAC-SHA256
//! digest; authentication returns a credential-free [`Identity`] that
//! gates access to whatever the embedding application protects. No
//! sessions, tokens, or network transport — one process, one database.

pub mod auth;
pub mod config;

pub use auth::{authenticate, ensure_ready, AuthError, CredentialStore, Identity};
pub use config::Config;
