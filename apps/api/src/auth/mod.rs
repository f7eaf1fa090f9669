//! Layered session resolution.
//!
//! Authentication itself is an external collaborator; this module only
//! resolves "who owns this request" from whatever the auth provider issued.
//! Providers are tried in order, each returning a typed resolution —
//! authenticated, unauthenticated, or error. An error from one provider
//! falls through to the next; the first authenticated result wins.

use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Role issued by the auth provider. The core treats this as an opaque tag
/// attached to a report's owner and never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Recruiter,
    Candidate,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::Candidate => "candidate",
        }
    }

    fn parse(value: &str) -> Option<Role> {
        match value {
            "recruiter" => Some(Role::Recruiter),
            "candidate" => Some(Role::Candidate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub owner_id: Uuid,
    pub role: Role,
}

/// Typed outcome of one provider attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResolution {
    Authenticated(Session),
    Unauthenticated,
    Error(String),
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn resolve(&self, headers: &HeaderMap) -> SessionResolution;
}

/// Primary provider: `Authorization: Bearer <owner-uuid>.<role>` as issued
/// by the auth collaborator.
pub struct BearerTokenProvider;

#[async_trait]
impl SessionProvider for BearerTokenProvider {
    fn name(&self) -> &'static str {
        "bearer"
    }

    async fn resolve(&self, headers: &HeaderMap) -> SessionResolution {
        let Some(value) = headers.get("authorization") else {
            return SessionResolution::Unauthenticated;
        };
        let Ok(value) = value.to_str() else {
            return SessionResolution::Error("authorization header is not valid UTF-8".to_string());
        };
        let Some(token) = value.strip_prefix("Bearer ") else {
            return SessionResolution::Unauthenticated;
        };

        match parse_token(token) {
            Some(session) => SessionResolution::Authenticated(session),
            // Credential material stays out of logs; length is enough to
            // correlate with the issuer.
            None => SessionResolution::Error(format!(
                "malformed bearer token ({} bytes)",
                token.len()
            )),
        }
    }
}

/// Secondary provider: explicit identity headers, set by the OAuth callback
/// path when the primary token is unavailable (e.g. after a backend restart
/// while the upstream identity session is still valid).
pub struct IdentityHeaderProvider;

#[async_trait]
impl SessionProvider for IdentityHeaderProvider {
    fn name(&self) -> &'static str {
        "identity-header"
    }

    async fn resolve(&self, headers: &HeaderMap) -> SessionResolution {
        let Some(user) = headers.get("x-session-user").and_then(|v| v.to_str().ok()) else {
            return SessionResolution::Unauthenticated;
        };

        let Ok(owner_id) = user.parse::<Uuid>() else {
            return SessionResolution::Error(format!("x-session-user is not a UUID: {user}"));
        };

        let role = headers
            .get("x-session-role")
            .and_then(|v| v.to_str().ok())
            .and_then(Role::parse)
            .unwrap_or(Role::Recruiter);

        SessionResolution::Authenticated(Session { owner_id, role })
    }
}

fn parse_token(token: &str) -> Option<Session> {
    let (owner, role) = token.split_once('.')?;
    Some(Session {
        owner_id: owner.parse().ok()?,
        role: Role::parse(role)?,
    })
}

/// Runs the provider chain in order. The first authenticated result wins;
/// provider errors are logged and fall through; if every provider is
/// exhausted the request is unauthenticated.
pub async fn resolve_session(
    providers: &[Box<dyn SessionProvider>],
    headers: &HeaderMap,
) -> SessionResolution {
    for provider in providers {
        match provider.resolve(headers).await {
            SessionResolution::Authenticated(session) => {
                return SessionResolution::Authenticated(session)
            }
            SessionResolution::Unauthenticated => continue,
            SessionResolution::Error(message) => {
                warn!("Session provider '{}' errored: {message}", provider.name());
                continue;
            }
        }
    }
    SessionResolution::Unauthenticated
}

/// The default provider chain: bearer token first, identity headers second.
pub fn default_providers() -> Vec<Box<dyn SessionProvider>> {
    vec![Box::new(BearerTokenProvider), Box::new(IdentityHeaderProvider)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, String)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (key, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(key.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[tokio::test]
    async fn test_bearer_token_wins_over_identity_header() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let map = headers(&[
            ("authorization", format!("Bearer {owner}.recruiter")),
            ("x-session-user", other.to_string()),
        ]);

        let resolution = resolve_session(&default_providers(), &map).await;
        assert_eq!(
            resolution,
            SessionResolution::Authenticated(Session {
                owner_id: owner,
                role: Role::Recruiter,
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_bearer_falls_through_to_identity_header() {
        let owner = Uuid::new_v4();
        let map = headers(&[
            ("authorization", "Bearer not-a-token".to_string()),
            ("x-session-user", owner.to_string()),
            ("x-session-role", "candidate".to_string()),
        ]);

        let resolution = resolve_session(&default_providers(), &map).await;
        assert_eq!(
            resolution,
            SessionResolution::Authenticated(Session {
                owner_id: owner,
                role: Role::Candidate,
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_bearer_error_does_not_echo_the_token() {
        let map = headers(&[(
            "authorization",
            "Bearer super-secret-credential.value".to_string(),
        )]);

        let resolution = BearerTokenProvider.resolve(&map).await;
        match resolution {
            SessionResolution::Error(message) => {
                assert!(!message.contains("super-secret-credential"), "{message}");
                assert!(message.contains("bytes"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_credentials_resolves_unauthenticated() {
        let map = HeaderMap::new();
        let resolution = resolve_session(&default_providers(), &map).await;
        assert_eq!(resolution, SessionResolution::Unauthenticated);
    }

    #[tokio::test]
    async fn test_identity_header_defaults_role_to_recruiter() {
        let owner = Uuid::new_v4();
        let map = headers(&[("x-session-user", owner.to_string())]);

        let resolution = resolve_session(&default_providers(), &map).await;
        match resolution {
            SessionResolution::Authenticated(session) => {
                assert_eq!(session.role, Role::Recruiter)
            }
            other => panic!("expected authenticated, got {other:?}"),
        }
    }
}
