use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::access::AccessPolicy;
use crate::domain::access::Requirement;
use crate::domain::access::RouteRule;

/// Minimum HS256 signing secret length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Upper bound on token lifetime (one year).
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub access: AccessConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Account loaded into the credential store at startup.
///
/// Exactly one of `password` (hashed at startup) or `password_hash` (a PHC
/// string) must be set.
#[derive(Deserialize, Clone)]
pub struct UserSeed {
    pub username: String,
    pub password: Option<String>,
    pub password_hash: Option<String>,
}

impl std::fmt::Debug for UserSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSeed")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_hash", &self.password_hash)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessConfig {
    #[serde(default = "AccessConfig::default_requirement")]
    pub default_requirement: Requirement,
    #[serde(default)]
    pub rules: Vec<RouteRule>,
}

impl AccessConfig {
    fn default_requirement() -> Requirement {
        Requirement::RequiresAuthentication
    }

    pub fn to_policy(&self) -> AccessPolicy {
        AccessPolicy::new(self.rules.clone(), self.default_requirement)
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        let policy = AccessPolicy::default();
        Self {
            default_requirement: policy.fallback(),
            rules: policy.rules().to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be supplied and at least {} bytes long",
                MIN_SECRET_LENGTH
            )));
        }

        if !(1..=MAX_EXPIRATION_HOURS).contains(&self.jwt.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}",
                MAX_EXPIRATION_HOURS
            )));
        }

        for seed in &self.users {
            if seed.username.is_empty() {
                return Err(ConfigError::Message(
                    "users entries need a non-empty username".to_string(),
                ));
            }

            if seed.password.is_some() == seed.password_hash.is_some() {
                return Err(ConfigError::Message(format!(
                    "user '{}' needs exactly one of password or password_hash",
                    seed.username
                )));
            }
        }

        Ok(())
    }
}
