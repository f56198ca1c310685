use async_trait::async_trait;

use crate::domain::authentication::errors::CredentialStoreError;
use crate::domain::authentication::errors::LoginError;
use crate::domain::authentication::models::Credential;
use crate::domain::authentication::models::IssuedToken;
use crate::domain::authentication::models::LoginRequest;

/// Port for login operations.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Verify a username/password pair and mint an access token.
    ///
    /// # Arguments
    /// * `request` - Credentials presented by the client
    ///
    /// # Returns
    /// Signed bearer token with its expiry
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown username or wrong password
    /// * `Internal` - Store, hashing or signing failure
    async fn login(&self, request: LoginRequest) -> Result<IssuedToken, LoginError>;
}

/// Read access to stored credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the credential for a username.
    ///
    /// # Arguments
    /// * `username` - Username to look up
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this username
    /// * `Unavailable` - Backend could not be queried
    async fn lookup(&self, username: &str) -> Result<Credential, CredentialStoreError>;
}
