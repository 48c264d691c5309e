//! Session cookie transport.
//!
//! The token lives in an HttpOnly `access_token` cookie; API clients may send
//! it as `Authorization: Bearer <token>` instead.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::{Config, BEARER_TOKEN_PREFIX, SESSION_COOKIE_NAME};
use crate::services::IssuedToken;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookie {
    pub secure: bool,
}

impl SessionCookie {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secure: config.cookie_secure,
        }
    }

    /// Add the session cookie for a freshly issued token
    pub fn set(&self, jar: CookieJar, token: &IssuedToken) -> CookieJar {
        let cookie = Cookie::build((SESSION_COOKIE_NAME, token.value.clone()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .path("/")
            .max_age(time::Duration::seconds(token.ttl.num_seconds()));

        jar.add(cookie)
    }

    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"))
    }
}

/// Session token from the cookie, else from a Bearer header.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = CookieJar::from_headers(headers).get(SESSION_COOKIE_NAME) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    #[test]
    fn test_cookie_wins_over_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("access_token=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

        assert_eq!(extract_token(&headers), None);
    }
}
