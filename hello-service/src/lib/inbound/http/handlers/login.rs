use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::IssuedToken;
use crate::domain::authentication::models::LoginRequest;
use crate::domain::authentication::ports::LoginServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .login_service
        .login(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

impl From<LoginRequestBody> for LoginRequest {
    fn from(body: LoginRequestBody) -> Self {
        LoginRequest::new(body.username, body.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&IssuedToken> for LoginResponseData {
    fn from(token: &IssuedToken) -> Self {
        Self {
            token: token.access_token.clone(),
            token_type: token.token_type.to_string(),
            expires_at: token.expires_at,
        }
    }
}
