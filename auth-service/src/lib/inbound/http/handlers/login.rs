use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use auth_core::Claims;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Unknown user and wrong password surface identically.
    let user = state
        .user_service
        .authenticate_user(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?;

    let claims = Claims::for_subject(
        user.username.as_str(),
        vec![user.role.as_str().to_string()],
        state.token_ttl_hours,
    );

    let token = state
        .authenticator
        .issue_token(&claims)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(Json(LoginResponse { token }))
}
