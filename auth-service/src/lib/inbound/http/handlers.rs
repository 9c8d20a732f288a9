use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod health;
pub mod login;
pub mod register;
pub mod update_user;

/// Error response body: every failure surfaces as `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unauthorized,
    Forbidden,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Access Denied".to_string()),
            ApiError::Internal(detail) => {
                // Full detail stays server-side; the body carries a generic message.
                tracing::error!(detail = %detail, "Unexpected error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::UsernameAlreadyExists(_) => {
                ApiError::BadRequest("Username already exists".to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::BadRequest("Invalid username or password".to_string())
            }
            UserError::InvalidRole(_) => ApiError::BadRequest("Invalid role".to_string()),
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::Password(e) => ApiError::Internal(e.to_string()),
            UserError::DatabaseError(e) | UserError::Unknown(e) => ApiError::Internal(e),
        }
    }
}

/// Canonical user representation returned by every user-shaped endpoint.
///
/// One shape for register, create, get, and update alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
        }
    }
}
