use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::authentication::models::AuthenticatedIdentity;
use crate::domain::authentication::models::RequestContext;
use crate::inbound::http::router::AppState;

/// Bearer credentials as found in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BearerCredentials<'a> {
    /// No header, or a scheme other than Bearer.
    Absent,
    /// Bearer scheme without exactly one usable token.
    Malformed,
    Token(&'a str),
}

fn bearer_credentials(headers: &HeaderMap) -> BearerCredentials<'_> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return BearerCredentials::Absent;
    };

    let Ok(value) = value.to_str() else {
        return BearerCredentials::Malformed;
    };

    let mut parts = value.split_whitespace();
    match parts.next() {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {}
        _ => return BearerCredentials::Absent,
    }

    match (parts.next(), parts.next()) {
        (Some(token), None) => BearerCredentials::Token(token),
        _ => BearerCredentials::Malformed,
    }
}

/// Resolve the request context from request headers.
///
/// Never fails: a missing, malformed, tampered or expired token yields an
/// anonymous context and the access policy decides what happens next.
pub fn resolve_context(authenticator: &Authenticator, headers: &HeaderMap) -> RequestContext {
    let token = match bearer_credentials(headers) {
        BearerCredentials::Absent => {
            tracing::debug!("No bearer credentials, continuing unauthenticated");
            return RequestContext::anonymous();
        }
        BearerCredentials::Malformed => {
            tracing::debug!("Malformed Authorization header, continuing unauthenticated");
            return RequestContext::anonymous();
        }
        BearerCredentials::Token(token) => token,
    };

    match authenticator.validate_token(token) {
        Ok(claims) if !claims.sub.is_empty() => {
            tracing::debug!(username = %claims.sub, "Bearer token accepted");
            RequestContext::authenticated(AuthenticatedIdentity::new(claims.sub))
        }
        Ok(_) => {
            tracing::debug!("Bearer token has an empty subject, continuing unauthenticated");
            RequestContext::anonymous()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected, continuing unauthenticated");
            RequestContext::anonymous()
        }
    }
}

/// Authentication gate: attaches a [`RequestContext`] to every request.
///
/// Runs once per request; a request that already carries a context passes
/// through untouched. Never short-circuits the pipeline.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if req.extensions().get::<RequestContext>().is_none() {
        let context = resolve_context(&state.authenticator, req.headers());
        req.extensions_mut().insert(context);
    }

    next.run(req).await
}

/// Access policy stage: rejects protected routes reached without an identity.
///
/// Must run after [`authenticate`]. A request without a context is treated
/// as anonymous.
pub async fn enforce_access_policy(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let anonymous = RequestContext::anonymous();
    let context = req.extensions().get::<RequestContext>().unwrap_or(&anonymous);

    if let Err(denied) = state.access_policy.evaluate(req.uri().path(), context) {
        tracing::info!(
            method = %req.method(),
            path = %denied.path,
            "Access denied"
        );
        return Err(ApiError::from(denied));
    }

    Ok(next.run(req).await)
}
