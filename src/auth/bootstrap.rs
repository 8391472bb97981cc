//! Schema init and demo-account seeding.
//!
//! `ensure_ready` is called once at process start: it creates the schema
//! if absent, then seeds a fixed set of demo accounts, skipping any that
//! already exist. Running it on every startup never duplicates or resets
//! an account.

use tracing::info;

use super::store::{AuthError, CredentialStore};

/// Demo accounts present after a fresh bootstrap.
const SEED_ACCOUNTS: &[(&str, &str, bool)] = &[
    ("admin", "Admin123!", true),
    ("student1", "Student123!", false),
    ("student2", "Student123!", false),
    ("guest", "Guest123!", false),
];

/// Make the store usable: idempotent schema init plus seeding.
pub fn ensure_ready(store: &CredentialStore) -> Result<(), AuthError> {
    store.init()?;
    for &(username, password, is_admin) in SEED_ACCOUNTS {
        if store.get_user(username)?.is_none() {
            store.seed_user(username, password, is_admin)?;
            info!(username, is_admin, "seeded demo account");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::authenticate;
    use tempfile::TempDir;

    fn bootstrapped_store() -> (TempDir, CredentialStore) {
        let tmp = TempDir::new().unwrap();
        let store = CredentialStore::new(tmp.path().join("users.db"));
        ensure_ready(&store).unwrap();
        (tmp, store)
    }

    #[test]
    fn ensure_ready_is_idempotent() {
        let (_tmp, store) = bootstrapped_store();

        let before = store.list_users().unwrap();
        ensure_ready(&store).unwrap();
        let after = store.list_users().unwrap();

        assert_eq!(before, after);
        assert_eq!(after.len(), 4);
    }

    #[test]
    fn seeded_admin_is_admin() {
        let (_tmp, store) = bootstrapped_store();

        let identity = authenticate(&store, "admin", "Admin123!").unwrap().unwrap();
        assert!(identity.is_admin);
        assert_eq!(identity.username, "admin");

        assert_eq!(authenticate(&store, "admin", "wrong").unwrap(), None);
    }

    #[test]
    fn deleted_admin_stays_gone_after_authentication() {
        let (_tmp, store) = bootstrapped_store();

        assert!(store.delete_user("admin").unwrap());
        assert_eq!(authenticate(&store, "admin", "Admin123!").unwrap(), None);
    }

    #[test]
    fn reseeding_does_not_reset_changed_password() {
        let (_tmp, store) = bootstrapped_store();

        assert!(store.set_password("guest", "Fresh456?").unwrap());
        ensure_ready(&store).unwrap();

        assert!(authenticate(&store, "guest", "Fresh456?").unwrap().is_some());
        assert!(authenticate(&store, "guest", "Guest123!").unwrap().is_none());
    }

    #[test]
    fn seeded_non_admins_authenticate() {
        let (_tmp, store) = bootstrapped_store();

        for (username, password) in [("student1", "Student123!"), ("guest", "Guest123!")] {
            let identity = authenticate(&store, username, password).unwrap().unwrap();
            assert!(!identity.is_admin);
        }
    }
}
