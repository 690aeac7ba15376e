//! Login credential checks.
//!
//! The API only asks "does this username/password pair match?", so any
//! backing store (env-configured pair, database, directory service) can sit
//! behind [`CredentialStore`].

use subtle::ConstantTimeEq;

/// Source of truth for login credentials.
pub trait CredentialStore: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Fixed set of username/password pairs, typically loaded from configuration.
#[derive(Clone, Default)]
pub struct StaticCredentialStore {
    entries: Vec<(String, String)>,
}

impl StaticCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.entries.push((username.into(), password.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl core::fmt::Debug for StaticCredentialStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StaticCredentialStore")
            .field("users", &self.entries.len())
            .finish()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Visit every entry so timing does not reveal which one matched.
        let mut matched = subtle::Choice::from(0u8);
        for (user, pass) in &self.entries {
            let user_ok = user.as_bytes().ct_eq(username.as_bytes());
            let pass_ok = pass.as_bytes().ct_eq(password.as_bytes());
            matched |= user_ok & pass_ok;
        }
        matched.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_configured_pair() {
        let store = StaticCredentialStore::new().with_user("admin", "1234");

        assert!(store.verify("admin", "1234"));
        assert!(!store.verify("admin", "12345"));
        assert!(!store.verify("Admin", "1234"));
        assert!(!store.verify("", ""));
    }

    #[test]
    fn empty_store_rejects_everything() {
        let store = StaticCredentialStore::new();
        assert!(store.is_empty());
        assert!(!store.verify("admin", "1234"));
    }

    #[test]
    fn supports_several_users() {
        let store = StaticCredentialStore::new()
            .with_user("admin", "1234")
            .with_user("caja", "navidad");

        assert_eq!(store.len(), 2);
        assert!(store.verify("caja", "navidad"));
        assert!(!store.verify("caja", "1234"));
    }
}
