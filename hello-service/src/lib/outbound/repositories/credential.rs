use std::collections::HashMap;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;

use crate::config::UserSeed;
use crate::domain::authentication::errors::CredentialStoreError;
use crate::domain::authentication::models::Credential;
use crate::domain::authentication::ports::CredentialStore;

/// Credential store backed by an immutable in-memory map.
///
/// Populated once at startup and only read afterwards, so it is shared across
/// requests without locking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: HashMap<String, Credential>,
}

impl InMemoryCredentialStore {
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        Self {
            credentials: credentials
                .into_iter()
                .map(|credential| (credential.username.clone(), credential))
                .collect(),
        }
    }

    /// Build the store from configured seed users.
    ///
    /// Seeds with a plaintext `password` are hashed here; seeds with a
    /// `password_hash` are stored as given. A later seed with the same
    /// username replaces an earlier one.
    ///
    /// # Errors
    /// * `HashingFailed` - A seed password could not be hashed
    pub fn from_seeds(seeds: &[UserSeed], hasher: &PasswordHasher) -> Result<Self, PasswordError> {
        let credentials = seeds
            .iter()
            .filter_map(|seed| {
                let hash = match (&seed.password_hash, &seed.password) {
                    (Some(hash), _) => Ok(hash.clone()),
                    (None, Some(password)) => hasher.hash(password),
                    (None, None) => return None,
                };
                Some(hash.map(|hash| Credential::new(seed.username.clone(), hash)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(credentials))
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup(&self, username: &str) -> Result<Credential, CredentialStoreError> {
        self.credentials
            .get(username)
            .cloned()
            .ok_or_else(|| CredentialStoreError::UserNotFound(username.to_string()))
    }
}
