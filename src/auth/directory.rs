use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use super::digest_password;

/// A user known to the identity directory: stable name, salted password
/// digest, and granted role tags.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub name: String,
    pub salt: String,
    pub password_digest: String,
    pub roles: Vec<String>,
}

impl UserAccount {
    /// Build an account from a cleartext password, generating a fresh salt.
    pub fn new(name: impl Into<String>, password: &str, roles: Vec<String>) -> Self {
        let name = name.into();
        let salt = Uuid::new_v4().simple().to_string();
        let password_digest = digest_password(password, &salt);
        Self {
            name,
            salt,
            password_digest,
            roles,
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("identity lookup failed: {0}")]
    Lookup(String),
}

/// Pluggable identity lookup. Production directories (LDAP, a users table,
/// an SSO introspection endpoint) are external collaborators implementing
/// this trait; the in-memory one below serves tests and dev runs.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn find_user(&self, name: &str) -> Result<Option<UserAccount>, DirectoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, UserAccount>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserAccount>) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.name.clone(), u))
            .collect();
        Self { users }
    }

    /// Seed from the CASHCARD_USERS env var:
    /// `name:password:role|role,name2:password2:role`.
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var("CASHCARD_USERS").ok()?;
        Some(Self::with_users(parse_users(&raw)))
    }
}

fn parse_users(raw: &str) -> Vec<UserAccount> {
    raw.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            let mut parts = entry.splitn(3, ':');
            let name = parts.next()?.trim();
            let password = parts.next()?;
            let roles: Vec<String> = parts
                .next()
                .unwrap_or_default()
                .split('|')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect();
            if name.is_empty() {
                tracing::warn!("skipping CASHCARD_USERS entry with empty name");
                return None;
            }
            Some(UserAccount::new(name, password, roles))
        })
        .collect()
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_user(&self, name: &str) -> Result<Option<UserAccount>, DirectoryError> {
        Ok(self.users.get(name).cloned())
    }
}
