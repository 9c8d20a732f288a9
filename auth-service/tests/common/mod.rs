use std::sync::Arc;

use auth_core::Authenticator;
use auth_core::Claims;
use auth_core::TokenCodec;
use auth_service::domain::user::models::EmailAddress;
use auth_service::domain::user::models::Role;
use auth_service::domain::user::models::User;
use auth_service::domain::user::models::UserId;
use auth_service::domain::user::models::Username;
use auth_service::domain::user::ports::UserRepository;
use auth_service::domain::user::service::UserService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use chrono::Utc;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_TTL_HOURS: i64 = 24;

/// Test application that spawns a real server on a random port.
///
/// The credential store is in-memory, so the suite needs no external
/// services; everything else is the production pipeline.
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let router = create_router(user_service, authenticator, TEST_TTL_HOURS);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(TEST_SECRET),
        }
    }

    /// Insert a user directly into the store, bypassing the HTTP surface.
    /// Registration only ever creates USER accounts, so elevated fixtures
    /// are seeded here.
    pub async fn seed_user(&self, username: &str, password: &str, role: Role) {
        let hasher = auth_core::PasswordHasher::new();
        let user = User {
            id: UserId::new(),
            username: Username::new(username.to_string()).expect("invalid fixture username"),
            email: EmailAddress::new(format!("{}@example.com", username))
                .expect("invalid fixture email"),
            password_hash: hasher.hash(password).expect("Failed to hash fixture password"),
            role,
            created_at: Utc::now(),
        };

        self.repository
            .create(user)
            .await
            .expect("Failed to seed user");
    }

    /// Log in through the API and return the issued token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute login request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["token"].as_str().expect("Missing token").to_string()
    }

    /// Issue a token directly with the test secret, without going through
    /// the login endpoint. Negative TTLs produce already-expired tokens.
    pub fn issue_token(&self, subject: &str, roles: &[&str], ttl_hours: i64) -> String {
        let roles = roles.iter().map(|r| r.to_string()).collect();
        let mut claims = Claims::for_subject(subject, roles, ttl_hours.max(0));
        if ttl_hours < 0 {
            claims.iat += ttl_hours * 60 * 60;
            claims.exp = claims.iat;
        }
        self.token_codec
            .encode(&claims)
            .expect("Failed to issue test token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
