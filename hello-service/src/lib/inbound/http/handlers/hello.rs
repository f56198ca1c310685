use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::RequestContext;

pub async fn hello(
    Extension(context): Extension<RequestContext>,
) -> Result<ApiSuccess<HelloResponseData>, ApiError> {
    let identity = context
        .identity()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        HelloResponseData {
            message: "Hello".to_string(),
            username: identity.username.clone(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelloResponseData {
    pub message: String,
    pub username: String,
}
