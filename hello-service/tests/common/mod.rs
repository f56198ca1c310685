use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Duration;
use hello_service::config::AccessConfig;
use hello_service::config::Config;
use hello_service::config::JwtConfig;
use hello_service::config::ServerConfig;
use hello_service::config::UserSeed;
use hello_service::domain::authentication::service::LoginService;
use hello_service::inbound::http::router::create_router;
use hello_service::outbound::repositories::InMemoryCredentialStore;
use serde_json::json;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let config = Config {
            server: ServerConfig { http_port: port },
            jwt: JwtConfig {
                secret: JWT_SECRET.to_string(),
                expiration_hours: 1,
            },
            users: vec![UserSeed {
                username: "farhan".to_string(),
                password: Some("123".to_string()),
                password_hash: None,
            }],
            access: AccessConfig::default(),
        };
        config.validate().expect("Invalid test configuration");

        let credential_store = Arc::new(
            InMemoryCredentialStore::from_seeds(&config.users, &PasswordHasher::new())
                .expect("Failed to seed credential store"),
        );

        let authenticator = Arc::new(
            Authenticator::new(
                config.jwt.secret.as_bytes(),
                Duration::hours(config.jwt.expiration_hours),
            )
            .expect("Failed to create authenticator"),
        );
        let login_service = Arc::new(LoginService::new(
            credential_store,
            Arc::clone(&authenticator),
        ));

        let router = create_router(
            login_service,
            authenticator,
            Arc::new(config.access.to_policy()),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            // Same secret as the server, for minting tokens in tests
            authenticator: Authenticator::new(JWT_SECRET.as_bytes(), Duration::hours(1))
                .expect("Failed to create authenticator"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Log in and return the raw response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in with the seeded account and return the issued token
    pub async fn login_token(&self) -> String {
        let response = self.login("farhan", "123").await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }
}
