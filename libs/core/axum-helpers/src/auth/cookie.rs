//! `auth_token` cookie helpers.

use super::tokens::SESSION_TTL_SECS;
use axum::http::{HeaderMap, HeaderValue, header::InvalidHeaderValue};

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "auth_token";

/// `Set-Cookie` value carrying a fresh session token.
///
/// `secure` adds `Secure` and relaxes SameSite to `None` so a frontend on
/// another HTTPS origin still sends the cookie.
pub fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let same_site = if secure { "None; Secure" } else { "Lax" };
    HeaderValue::from_str(&format!(
        "{AUTH_COOKIE}={token}; HttpOnly; Path=/; Max-Age={SESSION_TTL_SECS}; SameSite={same_site}"
    ))
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    let value = if secure {
        "auth_token=; HttpOnly; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=None; Secure"
    } else {
        "auth_token=; HttpOnly; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Lax"
    };
    HeaderValue::from_static(value)
}

/// Value of cookie `name` from the request's `Cookie` headers. Empty values count as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn test_session_cookie_attributes() {
        let dev = session_cookie("abc.def.ghi", false).unwrap();
        let dev = dev.to_str().unwrap();
        assert!(dev.starts_with("auth_token=abc.def.ghi;"));
        assert!(dev.contains("HttpOnly"));
        assert!(dev.contains("Path=/"));
        assert!(dev.contains("Max-Age=86400"));
        assert!(!dev.contains("Secure"));

        let prod = session_cookie("abc.def.ghi", true).unwrap();
        assert!(prod.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_clear_session_cookie_expires() {
        let cleared = clear_session_cookie(false);
        let cleared = cleared.to_str().unwrap();
        assert!(cleared.starts_with("auth_token=;"));
        assert!(cleared.contains("Max-Age=0"));
        assert!(cleared.contains("1970"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark; auth_token=tok123".parse().unwrap());
        assert_eq!(
            extract_cookie(&headers, AUTH_COOKIE),
            Some("tok123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "missing"), None);

        let mut empty = HeaderMap::new();
        empty.insert(COOKIE, "auth_token=".parse().unwrap());
        assert_eq!(extract_cookie(&empty, AUTH_COOKIE), None);
    }
}
