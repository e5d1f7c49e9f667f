use sha2::{Digest, Sha256};

pub mod directory;

/// Role tag required to reach any card operation.
pub const CARD_OWNER_ROLE: &str = "card-owner";

/// Authenticated principal extracted by the authentication middleware and
/// injected into request extensions.
#[derive(Clone, Debug)]
pub struct Identity {
    pub name: String,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn new(name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Salted SHA-256 digest of a password, hex-encoded.
pub fn digest_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, salt: &str, expected_digest: &str) -> bool {
    digest_password(password, salt) == expected_digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_round_trips() {
        let digest = digest_password("abc123", "salt-a");
        assert!(verify_password("abc123", "salt-a", &digest));
        assert!(!verify_password("abc124", "salt-a", &digest));
        assert!(!verify_password("abc123", "salt-b", &digest));
    }

    #[test]
    fn role_lookup() {
        let identity = Identity::new("sarah1", vec![CARD_OWNER_ROLE.to_string()]);
        assert!(identity.has_role(CARD_OWNER_ROLE));
        assert!(!identity.has_role("admin"));
    }
}
