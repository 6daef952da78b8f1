use axum::http::{HeaderMap, HeaderValue, header};

use crate::error::AppError;

pub const COOKIE_NAME: &str = "token";

/// Session cookie attribute set, fixed at startup.
///
/// `set` and `clear` must emit the identical attribute set; browsers only
/// remove a cookie when the attributes match the ones it was set with.
#[derive(Clone, Debug)]
pub struct CookiePolicy {
    secure: bool,
    max_age_seconds: u64,
}

impl CookiePolicy {
    pub fn new(secure: bool, max_age_seconds: u64) -> Self {
        Self {
            secure,
            max_age_seconds,
        }
    }

    // HttpOnly + SameSite=Strict always; Secure only in production mode.
    fn attributes(&self) -> String {
        let mut attrs = String::from("HttpOnly; SameSite=Strict; Path=/");
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }

    /// `Set-Cookie` value carrying a freshly issued token.
    pub fn set(&self, token: &str) -> Result<HeaderValue, AppError> {
        HeaderValue::from_str(&format!(
            "{}={}; Max-Age={}; {}",
            COOKIE_NAME,
            token,
            self.max_age_seconds,
            self.attributes()
        ))
        .map_err(|_| AppError::Internal)
    }

    /// `Set-Cookie` value that removes the session cookie (logout).
    pub fn clear(&self) -> Result<HeaderValue, AppError> {
        HeaderValue::from_str(&format!("{}=; Max-Age=0; {}", COOKIE_NAME, self.attributes()))
            .map_err(|_| AppError::Internal)
    }

    /// Pull the session token out of a request `Cookie` header, if present.
    pub fn read(headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .map(|(_, value)| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_carries_the_full_attribute_set() {
        let policy = CookiePolicy::new(false, 604_800);
        let value = policy.set("abc.def.ghi").unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("token=abc.def.ghi;"));
        assert!(value.contains("Max-Age=604800"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Strict"));
        assert!(value.contains("Path=/"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn secure_is_added_in_production_mode() {
        let policy = CookiePolicy::new(true, 604_800);
        assert!(policy.set("t").unwrap().to_str().unwrap().contains("Secure"));
        assert!(policy.clear().unwrap().to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn clear_uses_the_same_attributes_with_zero_max_age() {
        let policy = CookiePolicy::new(false, 604_800);
        let set = policy.set("t").unwrap();
        let clear = policy.clear().unwrap();
        let clear = clear.to_str().unwrap();

        assert!(clear.starts_with("token=;"));
        assert!(clear.contains("Max-Age=0"));

        // Everything after Max-Age must match between set and clear.
        let attrs_of = |v: &str| v.split("; ").skip(2).map(String::from).collect::<Vec<_>>();
        assert_eq!(attrs_of(set.to_str().unwrap()), attrs_of(clear));
    }

    #[test]
    fn read_finds_the_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=abc.def.ghi; lang=en"),
        );
        assert_eq!(CookiePolicy::read(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn read_without_a_session_cookie_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(CookiePolicy::read(&headers), None);
        assert_eq!(CookiePolicy::read(&HeaderMap::new()), None);
    }
}
