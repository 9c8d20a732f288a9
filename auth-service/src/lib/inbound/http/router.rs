use std::sync::Arc;
use std::time::Duration;

use auth_core::Authenticator;
use axum::body::Body;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::middleware::attach_identity;
use super::middleware::authorize;
use super::policy::Access;
use super::policy::MethodMatcher;
use super::policy::Policy;
use super::policy::Rule;
use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub policy: Arc<Policy>,
    pub token_ttl_hours: i64,
}

/// Route access rules, in declaration order.
///
/// First match wins, so the method-qualified read rule for `/users/**` must
/// stay ahead of the admin-only catch-all for the same prefix.
pub fn access_policy() -> Policy {
    Policy::new(vec![
        Rule::new("/auth/**", MethodMatcher::Any, Access::Public),
        Rule::new("/health", MethodMatcher::Any, Access::Public),
        Rule::new(
            "/users/**",
            MethodMatcher::Only(Method::GET),
            Access::AnyRole(&[Role::Admin, Role::BookingService]),
        ),
        Rule::new(
            "/users/**",
            MethodMatcher::Any,
            Access::AnyRole(&[Role::Admin]),
        ),
    ])
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
    token_ttl_hours: i64,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        policy: Arc::new(access_policy()),
        token_ttl_hours,
    };

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

    // Every route goes through the same pipeline: identity interceptor
    // first, then the policy gate. Public routes are public because the
    // policy says so, not because they bypass the middleware.
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users", post(create_user))
        .route("/users/:username", get(get_user))
        .route("/users/:username", patch(update_user))
        .route("/users/:username", delete(delete_user))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            attach_identity,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
