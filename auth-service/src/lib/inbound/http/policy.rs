use axum::http::Method;

use crate::domain::user::models::Role;
use crate::inbound::http::middleware::Identity;

/// Access requirement a rule imposes on matching requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Always allowed; no identity required.
    Public,
    /// Allowed for any attached identity.
    Authenticated,
    /// Allowed when the identity holds at least one of the listed roles.
    AnyRole(&'static [Role]),
}

impl Access {
    fn decide(&self, identity: Option<&Identity>) -> Decision {
        match self {
            Access::Public => Decision::Allow,
            Access::Authenticated => match identity {
                Some(_) => Decision::Allow,
                None => Decision::Unauthorized,
            },
            Access::AnyRole(required) => match identity {
                None => Decision::Unauthorized,
                Some(identity) if required.iter().any(|role| identity.roles.contains(role)) => {
                    Decision::Allow
                }
                Some(_) => Decision::Forbidden,
            },
        }
    }
}

/// Method qualifier on a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatcher {
    Any,
    Only(Method),
}

impl MethodMatcher {
    fn matches(&self, method: &Method) -> bool {
        match self {
            MethodMatcher::Any => true,
            MethodMatcher::Only(m) => m == method,
        }
    }
}

/// Request path pattern: either an exact path or a prefix with a trailing
/// `/**` matching the prefix itself and anything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern(String);

impl PathPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    fn matches(&self, path: &str) -> bool {
        match self.0.strip_suffix("/**") {
            Some(prefix) => {
                path == prefix
                    || (path.starts_with(prefix) && path[prefix.len()..].starts_with('/'))
            }
            None => path == self.0,
        }
    }
}

/// One (pattern, method, access) entry in the policy.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: PathPattern,
    method: MethodMatcher,
    access: Access,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, method: MethodMatcher, access: Access) -> Self {
        Self {
            pattern: PathPattern::new(pattern),
            method,
            access,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.matches(method) && self.pattern.matches(path)
    }
}

/// Outcome of a policy evaluation.
///
/// `Unauthorized` (no identity) and `Forbidden` (identity lacks the role) are
/// deliberately distinct; they map to different responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Unauthorized,
    Forbidden,
}

/// Ordered route access rules, fixed for the process lifetime.
///
/// Rules are evaluated top to bottom and the FIRST match wins: there is no
/// specificity ranking, so a narrower rule must be declared before any wider
/// rule covering the same paths. A request matching no rule still requires
/// authentication.
#[derive(Debug, Clone)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Policy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, method: &Method, path: &str, identity: Option<&Identity>) -> Decision {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| rule.access)
            .unwrap_or(Access::Authenticated)
            .decide(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn identity_with(roles: &[Role]) -> Identity {
        Identity {
            subject: "someone".to_string(),
            roles: roles.iter().copied().collect::<HashSet<_>>(),
        }
    }

    fn test_policy() -> Policy {
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

    #[test]
    fn test_public_rule_needs_no_identity() {
        let policy = test_policy();
        assert_eq!(
            policy.evaluate(&Method::POST, "/auth/login", None),
            Decision::Allow
        );
        assert_eq!(
            policy.evaluate(&Method::GET, "/health", None),
            Decision::Allow
        );
    }

    #[test]
    fn test_role_rule_distinguishes_401_from_403() {
        let policy = test_policy();

        // No identity at all: unauthorized.
        assert_eq!(
            policy.evaluate(&Method::POST, "/users", None),
            Decision::Unauthorized
        );

        // Identity present but without the required role: forbidden.
        let user = identity_with(&[Role::User]);
        assert_eq!(
            policy.evaluate(&Method::POST, "/users", Some(&user)),
            Decision::Forbidden
        );
    }

    #[test]
    fn test_first_match_wins_for_method_qualified_rule() {
        let policy = test_policy();
        let booking = identity_with(&[Role::BookingService]);

        // The GET rule is declared before the ADMIN-only catch-all and wins.
        assert_eq!(
            policy.evaluate(&Method::GET, "/users/alice", Some(&booking)),
            Decision::Allow
        );

        // Any other method falls through to the ADMIN-only rule.
        assert_eq!(
            policy.evaluate(&Method::POST, "/users", Some(&booking)),
            Decision::Forbidden
        );
        assert_eq!(
            policy.evaluate(&Method::DELETE, "/users/alice", Some(&booking)),
            Decision::Forbidden
        );
    }

    #[test]
    fn test_admin_allowed_everywhere_under_users() {
        let policy = test_policy();
        let admin = identity_with(&[Role::Admin]);

        for method in [Method::GET, Method::POST, Method::PATCH, Method::DELETE] {
            assert_eq!(
                policy.evaluate(&method, "/users/alice", Some(&admin)),
                Decision::Allow
            );
        }
    }

    #[test]
    fn test_unmatched_path_defaults_to_authenticated() {
        let policy = test_policy();

        assert_eq!(
            policy.evaluate(&Method::GET, "/metrics", None),
            Decision::Unauthorized
        );
        let user = identity_with(&[Role::User]);
        assert_eq!(
            policy.evaluate(&Method::GET, "/metrics", Some(&user)),
            Decision::Allow
        );
    }

    #[test]
    fn test_prefix_pattern_does_not_match_sibling_paths() {
        let pattern = PathPattern::new("/users/**");
        assert!(pattern.matches("/users"));
        assert!(pattern.matches("/users/alice"));
        assert!(pattern.matches("/users/alice/anything"));
        assert!(!pattern.matches("/users-export"));
        assert!(!pattern.matches("/user"));
    }

    #[test]
    fn test_exact_pattern() {
        let pattern = PathPattern::new("/health");
        assert!(pattern.matches("/health"));
        assert!(!pattern.matches("/health/live"));
    }
}
