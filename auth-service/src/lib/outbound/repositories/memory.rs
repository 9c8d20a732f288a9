use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// In-memory credential store keyed by username.
///
/// Backs the integration test suite and database-less local runs. Same
/// contract as the Postgres adapter, including the duplicate-username error.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        let key = user.username.as_str().to_string();
        if users.contains_key(&key) {
            return Err(UserError::UsernameAlreadyExists(key));
        }

        users.insert(key, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.get(username.as_str()).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        let key = user.username.as_str().to_string();
        if !users.contains_key(&key) {
            return Err(UserError::NotFound(key));
        }

        users.insert(key, user.clone());
        Ok(user)
    }

    async fn delete(&self, username: &Username) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        users
            .remove(username.as_str())
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}
