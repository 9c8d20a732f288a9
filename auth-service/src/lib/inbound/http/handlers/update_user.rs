use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserView;
use crate::inbound::http::router::AppState;

/// HTTP request body for partial user updates (raw JSON).
///
/// Only provided fields change; the username is the key and stays fixed.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let email = self.email.map(EmailAddress::new).transpose()?;
        let role = self.role.map(|name| name.parse::<Role>()).transpose()?;

        Ok(UpdateUserCommand {
            password: self.password,
            email,
            role,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    let username = Username::new(username).map_err(UserError::from)?;
    let command = body.try_into_command()?;

    state
        .user_service
        .update_user(&username, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| Json(user.into()))
}
