use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Duration;
use hello_service::config::Config;
use hello_service::domain::authentication::service::LoginService;
use hello_service::inbound::http::router::create_router;
use hello_service::outbound::repositories::InMemoryCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "hello-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        seeded_users = config.users.len(),
        access_rules = config.access.rules.len(),
        default_requirement = ?config.access.default_requirement,
        "Configuration loaded"
    );

    let credential_store = Arc::new(InMemoryCredentialStore::from_seeds(
        &config.users,
        &PasswordHasher::new(),
    )?);
    tracing::info!(
        users = credential_store.len(),
        backend = "in-memory",
        "Credential store populated"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    )?);
    let login_service = Arc::new(LoginService::new(
        credential_store,
        Arc::clone(&authenticator),
    ));
    let access_policy = Arc::new(config.access.to_policy());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(login_service, authenticator, access_policy);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
