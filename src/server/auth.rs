//! Authentication stub
//!
//! Two ways in, tried in order:
//!
//! 1. `Authorization: Basic <base64(user:pass)>` with a non-empty user and password.
//!    Unless `auth.basic.allow_any_credentials` is off, any such pair passes.
//! 2. The MAuth signature header (default `X-MWS-Authentication`) with any value.
//!
//! This is a test double, not a security control: no signature is ever verified.

use super::response::xml_response;
use super::state::AppState;
use crate::config::{AuthConfig, TestCredential};
use crate::core::builders::ClinicalEnvelopeBuilder;
use crate::domain::{MockError, Result};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::ExposeSecret;

/// Protocol-error text returned with 401
pub const AUTH_REQUIRED_MESSAGE: &str =
    "Authentication required. Provide Basic Auth or MAuth headers.";

/// How a request got in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    Basic { username: String },
    MAuth,
}

/// Authentication rules built from `[auth]`
#[derive(Debug)]
pub struct AuthPolicy {
    basic_enabled: bool,
    allow_any_credentials: bool,
    credentials: Vec<TestCredential>,
    mauth_header: Option<HeaderName>,
}

impl AuthPolicy {
    /// # Errors
    ///
    /// Returns an error if the MAuth header name is not a valid HTTP header name.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let mauth_header = if config.mauth.enabled {
            let name = HeaderName::from_bytes(config.mauth.header.as_bytes()).map_err(|e| {
                MockError::Configuration(format!(
                    "Invalid auth.mauth.header '{}': {}",
                    config.mauth.header, e
                ))
            })?;
            Some(name)
        } else {
            None
        };

        Ok(Self {
            basic_enabled: config.basic.enabled,
            allow_any_credentials: config.basic.allow_any_credentials,
            credentials: config.test_credentials.clone(),
            mauth_header,
        })
    }

    /// Returns the method that admitted the request, if any
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<AuthMethod> {
        if self.basic_enabled {
            let basic = headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(decode_basic);

            if let Some((username, password)) = basic {
                if self.accepts(&username, &password) {
                    return Some(AuthMethod::Basic { username });
                }
            }
        }

        match &self.mauth_header {
            Some(name) if headers.contains_key(name) => Some(AuthMethod::MAuth),
            _ => None,
        }
    }

    fn accepts(&self, username: &str, password: &str) -> bool {
        if self.allow_any_credentials {
            return true;
        }
        self.credentials.iter().any(|credential| {
            credential.username == username && credential.password.expose_secret().matches(password)
        })
    }
}

/// Decodes a `Basic` authorization value into a non-empty user and password
///
/// The decoded text is split on the first `:`, so passwords may contain colons.
pub fn decode_basic(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}

/// Middleware guarding every `/RaveWebServices` route
pub async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match state.auth.authenticate(request.headers()) {
        Some(method) => {
            tracing::trace!(?method, "Request authenticated");
            next.run(request).await
        }
        None => {
            crate::log_auth_rejected!(request.method(), request.uri().path());
            let document =
                ClinicalEnvelopeBuilder::new(&state.catalog).build_protocol_error(AUTH_REQUIRED_MESSAGE);
            xml_response(StatusCode::UNAUTHORIZED, &document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, MockConfig};
    use axum::http::HeaderValue;

    fn basic(credentials: &str) -> String {
        format!("Basic {}", STANDARD.encode(credentials))
    }

    fn headers(name: HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn default_policy() -> AuthPolicy {
        AuthPolicy::from_config(&MockConfig::default().auth).unwrap()
    }

    #[test]
    fn test_decode_basic() {
        assert_eq!(
            decode_basic(&basic("user:pass")),
            Some(("user".to_string(), "pass".to_string()))
        );
        assert_eq!(
            decode_basic(&basic("user:pa:ss")),
            Some(("user".to_string(), "pa:ss".to_string()))
        );
        assert!(decode_basic(&basic("user:")).is_none());
        assert!(decode_basic(&basic(":pass")).is_none());
        assert!(decode_basic(&basic("nocolon")).is_none());
        assert!(decode_basic("Bearer token").is_none());
        assert!(decode_basic("Basic !!!not-base64!!!").is_none());
    }

    #[test]
    fn test_any_basic_credentials_accepted() {
        let policy = default_policy();
        let method = policy.authenticate(&headers(header::AUTHORIZATION, &basic("any:thing")));
        assert_eq!(
            method,
            Some(AuthMethod::Basic {
                username: "any".to_string()
            })
        );
    }

    #[test]
    fn test_mauth_header_presence() {
        let policy = default_policy();
        let name = HeaderName::from_static("x-mws-authentication");
        assert_eq!(
            policy.authenticate(&headers(name, "anything")),
            Some(AuthMethod::MAuth)
        );
        assert!(policy.authenticate(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_bad_basic_falls_through_to_mauth() {
        let policy = default_policy();
        let mut map = headers(header::AUTHORIZATION, &basic("user:"));
        assert!(policy.authenticate(&map).is_none());

        map.insert(
            HeaderName::from_static("x-mws-authentication"),
            HeaderValue::from_static("sig"),
        );
        assert_eq!(policy.authenticate(&map), Some(AuthMethod::MAuth));
    }

    #[test]
    fn test_configured_credentials_only() {
        let mut config = MockConfig::default().auth;
        config.basic.allow_any_credentials = false;
        config.test_credentials.push(TestCredential {
            username: "tester".to_string(),
            password: secret_string("s3cret".to_string()),
        });
        let policy = AuthPolicy::from_config(&config).unwrap();

        assert!(policy
            .authenticate(&headers(header::AUTHORIZATION, &basic("tester:s3cret")))
            .is_some());
        assert!(policy
            .authenticate(&headers(header::AUTHORIZATION, &basic("tester:wrong")))
            .is_none());
    }

    #[test]
    fn test_disabled_methods() {
        let mut config = MockConfig::default().auth;
        config.basic.enabled = false;
        config.mauth.enabled = false;
        let policy = AuthPolicy::from_config(&config).unwrap();

        assert!(policy
            .authenticate(&headers(header::AUTHORIZATION, &basic("user:pass")))
            .is_none());
        assert!(policy
            .authenticate(&headers(
                HeaderName::from_static("x-mws-authentication"),
                "sig"
            ))
            .is_none());
    }
}
