use std::collections::HashSet;

use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use auth_core::Claims;

use crate::domain::user::errors::RoleError;
use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::policy::Decision;
use crate::inbound::http::router::AppState;

/// Verified identity attached to a request after token validation.
///
/// Exists only in request extensions for the lifetime of one request; the
/// pipeline never shares it across requests and nothing persists it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub roles: HashSet<Role>,
}

impl Identity {
    /// Build an identity from verified claims.
    ///
    /// Every role name in the claim set must parse into the closed role
    /// enum; a token granting a role this process does not know is not a
    /// trustworthy assertion and is rejected wholesale.
    pub fn from_claims(claims: &Claims) -> Result<Self, RoleError> {
        let roles = claims
            .roles
            .iter()
            .map(|name| name.parse::<Role>())
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self {
            subject: claims.sub.clone(),
            roles,
        })
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Identity interceptor, run once per inbound request.
///
/// No Authorization header, a non-UTF-8 value, or a value without the bearer
/// prefix passes the request through unauthenticated; the policy makes the
/// final call. A bearer token that fails verification aborts the request
/// here, before any handler runs.
pub async fn attach_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(header) = req.headers().get(http::header::AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let Ok(header) = header.to_str() else {
        return Ok(next.run(req).await);
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        return Ok(next.run(req).await);
    };

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::Unauthorized.into_response()
    })?;

    let identity = Identity::from_claims(&claims).map_err(|e| {
        tracing::warn!(error = %e, "Token carries an unrecognized role");
        ApiError::Unauthorized.into_response()
    })?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Authorization gate, run after the interceptor.
///
/// Evaluates the route policy against whatever identity the interceptor
/// attached. Deny without identity is 401; deny with an identity that lacks
/// the role is 403.
pub async fn authorize(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = req.extensions().get::<Identity>();

    match state
        .policy
        .evaluate(req.method(), req.uri().path(), identity)
    {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Unauthorized => Err(ApiError::Unauthorized.into_response()),
        Decision::Forbidden => Err(ApiError::Forbidden.into_response()),
    }
}
