use thiserror::Error;

/// Error for credential store lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialStoreError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for login attempts.
///
/// An unknown username and a wrong password both surface as
/// `AuthenticationFailed`; callers cannot tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("Internal authentication error: {0}")]
    Internal(String),
}
