//! SQLite-backed credential store.
//!
//! Sole owner of the persisted `users` table:
//! - `users`: username, salt, pw_hash, is_admin, created_at
//!
//! Every operation opens its own connection and drops it before
//! returning, so there is no pooled or long-lived connection state; the
//! UNIQUE constraint on `username` is the only guard racing creates need.

use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::hasher::{self, EmptyPassword};
use super::policy::{validate_password, PolicyViolation};

/// Failure modes for store and authentication operations.
///
/// "Not found" is an expected outcome and is reported as `Ok(false)` /
/// `Ok(None)` by the operations below, never as a variant here.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password failed a complexity rule; carries the specific reason.
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// The username already has an account.
    #[error("Username '{0}' is already taken.")]
    UsernameTaken(String),

    /// Empty (post-trim) username rejected before touching storage.
    #[error("Username cannot be empty.")]
    EmptyUsername,

    /// Empty password rejected before hashing.
    #[error(transparent)]
    EmptyPassword(#[from] EmptyPassword),

    /// Underlying persistence engine error; fatal for the operation.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// An authenticated application user.
///
/// Credential-free projection of an account row; a point-in-time
/// snapshot that may go stale if the account is later deleted or
/// modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// Full account row including credential material.
///
/// Only the authentication path may see this; it never leaves the crate.
pub(crate) struct StoredCredentials {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) salt: Vec<u8>,
    pub(crate) pw_hash: Vec<u8>,
    pub(crate) is_admin: bool,
}

impl StoredCredentials {
    pub(crate) fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            username: self.username,
            is_admin: self.is_admin,
        }
    }
}

/// SQLite-backed account store.
///
/// Holds only the database path; see the module docs for the
/// connection-per-operation model.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    db_path: PathBuf,
}

impl CredentialStore {
    /// Create a store handle for the given database path.
    ///
    /// No I/O happens here; call [`init`](Self::init) before the first
    /// operation.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// The database path this store operates on.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, AuthError> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Create the schema if absent. Idempotent; never alters existing
    /// rows, safe to call on every process start.
    pub fn init(&self) -> Result<(), AuthError> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                salt BLOB NOT NULL,
                pw_hash BLOB NOT NULL,
                is_admin INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    // ── Account Management ──────────────────────────────────────────

    /// Create a new account with a salted password digest.
    ///
    /// Trims the username and enforces the complexity rules before any
    /// mutation. Returns the new row id.
    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<i64, AuthError> {
        let username = trimmed(username).ok_or(AuthError::EmptyUsername)?;
        validate_password(password)?;
        self.insert(username, password, is_admin)
    }

    /// Seeding-only variant of [`create_user`](Self::create_user) that
    /// skips the complexity rules. Reachable only from bootstrap, never
    /// from user-facing flows.
    pub(crate) fn seed_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<i64, AuthError> {
        let username = trimmed(username).ok_or(AuthError::EmptyUsername)?;
        self.insert(username, password, is_admin)
    }

    fn insert(&self, username: &str, password: &str, is_admin: bool) -> Result<i64, AuthError> {
        let salt = hasher::generate_salt();
        let pw_hash = hasher::hash_password(password, &salt)?;
        let created_at = Utc::now().to_rfc3339();

        let conn = self.connect()?;
        let result = conn.execute(
            "INSERT INTO users (username, salt, pw_hash, is_admin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![username, &salt[..], &pw_hash[..], is_admin, created_at],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(AuthError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an account by username, removing all credential material.
    /// Returns whether a row was removed; absence is not a failure.
    pub fn delete_user(&self, username: &str) -> Result<bool, AuthError> {
        let Some(username) = trimmed(username) else {
            return Ok(false);
        };
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM users WHERE username = ?1", params![username])?;
        Ok(removed > 0)
    }

    /// List `(username, is_admin)` pairs, admins first, then
    /// alphabetical by username.
    pub fn list_users(&self) -> Result<Vec<(String, bool)>, AuthError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT username, is_admin FROM users ORDER BY is_admin DESC, username ASC",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Look up an account by exact (post-trim, case-sensitive) username.
    ///
    /// Never exposes salt or digest material.
    pub fn get_user(&self, username: &str) -> Result<Option<Identity>, AuthError> {
        let Some(username) = trimmed(username) else {
            return Ok(None);
        };
        let conn = self.connect()?;
        let row = conn.query_row(
            "SELECT id, username, is_admin FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(Identity {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    is_admin: row.get(2)?,
                })
            },
        );
        match row {
            Ok(identity) => Ok(Some(identity)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace an account's password: a fresh salt and digest are
    /// generated together in a single UPDATE.
    ///
    /// Policy rejection is a hard failure; an unknown username is
    /// `Ok(false)`.
    pub fn set_password(&self, username: &str, new_password: &str) -> Result<bool, AuthError> {
        let Some(username) = trimmed(username) else {
            return Ok(false);
        };
        validate_password(new_password)?;

        let salt = hasher::generate_salt();
        let pw_hash = hasher::hash_password(new_password, &salt)?;

        let conn = self.connect()?;
        let updated = conn.execute(
            "UPDATE users SET salt = ?1, pw_hash = ?2 WHERE username = ?3",
            params![&salt[..], &pw_hash[..], username],
        )?;
        Ok(updated > 0)
    }

    // ── Authentication Path ─────────────────────────────────────────

    /// Fetch the full credential row for the authenticator.
    pub(crate) fn stored_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AuthError> {
        let Some(username) = trimmed(username) else {
            return Ok(None);
        };
        let conn = self.connect()?;
        let row = conn.query_row(
            "SELECT id, username, salt, pw_hash, is_admin FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(StoredCredentials {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    salt: row.get(2)?,
                    pw_hash: row.get(3)?,
                    is_admin: row.get(4)?,
                })
            },
        );
        match row {
            Ok(creds) => Ok(Some(creds)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Trim a username, mapping whitespace-only input to `None`.
fn trimmed(username: &str) -> Option<&str> {
    let trimmed = username.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
