use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns the only two touch points with plaintext passwords: hashing on the
/// way into the store and verification during authentication. Plaintext never
/// leaves this layer.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth_core::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected credential store.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth_core::PasswordHasher::new(),
        }
    }

    async fn insert_user(
        &self,
        username: Username,
        email: EmailAddress,
        password: &str,
        role: Role,
    ) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(password)?;

        let user = User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        self.insert_user(command.username, command.email, &command.password, Role::User)
            .await
    }

    async fn authenticate_user(&self, username: &str, password: &str) -> Result<User, UserError> {
        // Malformed usernames, unknown usernames, and wrong passwords all
        // collapse to InvalidCredentials: the caller learns nothing about
        // which accounts exist.
        let username = Username::new(username.to_string())
            .map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify(password, &user.password_hash)?;

        if !is_valid {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.insert_user(
            command.username,
            command.email,
            &command.password,
            command.role,
        )
        .await
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))
    }

    async fn update_user(
        &self,
        username: &Username,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))?;

        if let Some(new_password) = command.password {
            user.password_hash = self.password_hasher.hash(&new_password)?;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_role) = command.role {
            user.role = new_role;
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, username: &Username) -> Result<(), UserError> {
        self.repository.delete(username).await
    }
}
