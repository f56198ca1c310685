use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::authentication::errors::CredentialStoreError;
use crate::domain::authentication::errors::LoginError;
use crate::domain::authentication::models::IssuedToken;
use crate::domain::authentication::models::LoginRequest;
use crate::domain::authentication::ports::CredentialStore;
use crate::domain::authentication::ports::LoginServicePort;

/// Domain service implementation for login.
///
/// Looks the user up in the credential store, checks the password and mints
/// a token. Nothing is written anywhere on success.
pub struct LoginService<CS>
where
    CS: CredentialStore,
{
    credential_store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> LoginService<CS>
where
    CS: CredentialStore,
{
    /// Create a new login service with injected dependencies.
    ///
    /// # Arguments
    /// * `credential_store` - Credential lookup implementation
    /// * `authenticator` - Password verification and token signing
    pub fn new(credential_store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            credential_store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> LoginServicePort for LoginService<CS>
where
    CS: CredentialStore,
{
    async fn login(&self, request: LoginRequest) -> Result<IssuedToken, LoginError> {
        let credential = match self.credential_store.lookup(&request.username).await {
            Ok(credential) => credential,
            Err(CredentialStoreError::UserNotFound(_)) => {
                self.authenticator.reject_unknown(&request.password);
                tracing::warn!(
                    username = %request.username,
                    reason = "unknown_user",
                    "Login rejected"
                );
                return Err(LoginError::AuthenticationFailed);
            }
            Err(e) => {
                tracing::error!(
                    username = %request.username,
                    error = %e,
                    "Credential lookup failed"
                );
                return Err(LoginError::Internal(e.to_string()));
            }
        };

        let result = self
            .authenticator
            .authenticate(
                &credential.username,
                &request.password,
                &credential.password_hash,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(
                        username = %request.username,
                        reason = "password_mismatch",
                        "Login rejected"
                    );
                    LoginError::AuthenticationFailed
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(
                        username = %request.username,
                        error = %err,
                        "Password verification failed"
                    );
                    LoginError::Internal(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    tracing::error!(
                        username = %request.username,
                        error = %err,
                        "Token generation failed"
                    );
                    LoginError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        let expires_at = result.claims.expires_at().ok_or_else(|| {
            LoginError::Internal(format!("Unrepresentable token expiry: {}", result.claims.exp))
        })?;

        tracing::info!(
            username = %credential.username,
            expires_at = %expires_at,
            "Login succeeded"
        );

        Ok(IssuedToken::bearer(result.access_token, expires_at))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::authentication::models::Credential;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn lookup(&self, username: &str) -> Result<Credential, CredentialStoreError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(SECRET, Duration::hours(1))
                .expect("Failed to create authenticator"),
        )
    }

    fn store_with_farhan(authenticator: &Authenticator) -> MockTestCredentialStore {
        let hash = authenticator
            .hash_password("123")
            .expect("Failed to hash password");

        let mut store = MockTestCredentialStore::new();
        store
            .expect_lookup()
            .returning(move |username| match username {
                "farhan" => Ok(Credential::new("farhan", hash.clone())),
                other => Err(CredentialStoreError::UserNotFound(other.to_string())),
            });
        store
    }

    #[tokio::test]
    async fn test_login_success() {
        let authenticator = authenticator();
        let store = store_with_farhan(&authenticator);
        let service = LoginService::new(Arc::new(store), Arc::clone(&authenticator));

        let token = service
            .login(LoginRequest::new("farhan", "123"))
            .await
            .expect("Login failed");

        assert_eq!(token.token_type, "Bearer");
        let claims = authenticator
            .validate_token(&token.access_token)
            .expect("Issued token does not verify");
        assert_eq!(claims.sub, "farhan");
        assert_eq!(token.expires_at.timestamp(), claims.exp);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = authenticator();
        let store = store_with_farhan(&authenticator);
        let service = LoginService::new(Arc::new(store), authenticator);

        let result = service.login(LoginRequest::new("farhan", "1234")).await;
        assert_eq!(result, Err(LoginError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_login_unknown_user_matches_wrong_password() {
        let authenticator = authenticator();
        let store = store_with_farhan(&authenticator);
        let service = LoginService::new(Arc::new(store), authenticator);

        let unknown = service.login(LoginRequest::new("nobody", "123")).await;
        let mismatch = service.login(LoginRequest::new("farhan", "wrong")).await;

        assert_eq!(unknown, Err(LoginError::AuthenticationFailed));
        assert_eq!(unknown, mismatch);
    }

    #[tokio::test]
    async fn test_login_store_unavailable() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_lookup()
            .times(1)
            .returning(|_| Err(CredentialStoreError::Unavailable("timeout".to_string())));

        let service = LoginService::new(Arc::new(store), authenticator());

        let result = service.login(LoginRequest::new("farhan", "123")).await;
        assert!(matches!(result, Err(LoginError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_corrupt_stored_hash() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_lookup()
            .withf(|username| username == "farhan")
            .times(1)
            .returning(|_| Ok(Credential::new("farhan", "plaintext-not-a-hash")));

        let service = LoginService::new(Arc::new(store), authenticator());

        let result = service.login(LoginRequest::new("farhan", "123")).await;
        assert!(matches!(result, Err(LoginError::Internal(_))));
    }
}
