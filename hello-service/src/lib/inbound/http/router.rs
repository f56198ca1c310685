use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::hello::hello;
use super::handlers::login::login;
use super::middleware::authenticate;
use super::middleware::enforce_access_policy;
use crate::domain::access::AccessPolicy;
use crate::domain::authentication::service::LoginService;
use crate::outbound::repositories::InMemoryCredentialStore;

#[derive(Clone)]
pub struct AppState {
    pub login_service: Arc<LoginService<InMemoryCredentialStore>>,
    pub authenticator: Arc<Authenticator>,
    pub access_policy: Arc<AccessPolicy>,
}

pub fn create_router(
    login_service: Arc<LoginService<InMemoryCredentialStore>>,
    authenticator: Arc<Authenticator>,
    access_policy: Arc<AccessPolicy>,
) -> Router {
    let state = AppState {
        login_service,
        authenticator,
        access_policy,
    };

    // Stages run top to bottom: the gate resolves the request context, then
    // the policy decides whether the route may be reached with it.
    let security_pipeline = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_access_policy,
        ));

    // Headers are left out of the span: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/login", post(login))
        .route("/hello", get(hello))
        .layer(security_pipeline)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
