//! Cookie-backed session marker for browser clients

use std::sync::Mutex;

use axum::http::{header, HeaderMap, HeaderValue};

use crate::domain::{DomainError, MarkerStore};

#[derive(Debug, Default)]
struct CookieSlot {
    value: Option<String>,
    changed: bool,
}

/// Marker slot read from the request's `Cookie` header.
///
/// Writes are turned back into a `Set-Cookie` header for the response.
#[derive(Debug)]
pub struct CookieMarkerStore {
    name: String,
    slot: Mutex<CookieSlot>,
}

impl CookieMarkerStore {
    /// Read the named cookie from request headers
    pub fn from_headers(headers: &HeaderMap, name: impl Into<String>) -> Self {
        let name = name.into();
        let value = read_cookie(headers, &name);

        Self {
            name,
            slot: Mutex::new(CookieSlot {
                value,
                changed: false,
            }),
        }
    }

    /// `Set-Cookie` header reflecting writes made during this request
    pub fn set_cookie_header(&self) -> Option<HeaderValue> {
        let slot = self.slot.lock().ok()?;

        if !slot.changed {
            return None;
        }

        let cookie = match &slot.value {
            Some(value) => format!("{}={}; Path=/; SameSite=Lax; HttpOnly", self.name, value),
            None => format!("{}=; Path=/; Max-Age=0", self.name),
        };

        HeaderValue::from_str(&cookie).ok()
    }
}

/// Value of the first cookie called `name` in the request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

fn is_cookie_safe(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_graphic() && !matches!(c, '"' | ',' | ';' | '\\'))
}

impl MarkerStore for CookieMarkerStore {
    fn read(&self) -> Result<Option<String>, DomainError> {
        self.slot
            .lock()
            .map(|slot| slot.value.clone())
            .map_err(|_| DomainError::internal("Session cookie lock poisoned"))
    }

    fn write(&self, value: &str) -> Result<(), DomainError> {
        if !is_cookie_safe(value) {
            return Err(DomainError::validation(
                "API key cannot be stored in a session cookie",
            ));
        }

        let mut slot = self
            .slot
            .lock()
            .map_err(|_| DomainError::internal("Session cookie lock poisoned"))?;
        slot.value = Some(value.to_string());
        slot.changed = true;
        Ok(())
    }

    fn clear(&self) -> Result<(), DomainError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| DomainError::internal("Session cookie lock poisoned"))?;
        slot.value = None;
        slot.changed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_reads_named_cookie() {
        let headers = headers_with_cookie("theme=dark; validApiKey=tvly-abc; other=1");
        let store = CookieMarkerStore::from_headers(&headers, "validApiKey");

        assert_eq!(store.read().unwrap(), Some("tvly-abc".to_string()));
    }

    #[test]
    fn test_missing_cookie() {
        let store = CookieMarkerStore::from_headers(&HeaderMap::new(), "validApiKey");

        assert_eq!(store.read().unwrap(), None);
        assert!(store.set_cookie_header().is_none());
    }

    #[test]
    fn test_write_produces_set_cookie() {
        let store = CookieMarkerStore::from_headers(&HeaderMap::new(), "validApiKey");
        store.write("tvly-abc").unwrap();

        let header = store.set_cookie_header().unwrap();
        assert!(header.to_str().unwrap().starts_with("validApiKey=tvly-abc;"));
    }

    #[test]
    fn test_clear_expires_cookie() {
        let headers = headers_with_cookie("validApiKey=tvly-abc");
        let store = CookieMarkerStore::from_headers(&headers, "validApiKey");
        store.clear().unwrap();

        let header = store.set_cookie_header().unwrap();
        assert!(header.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn test_rejects_unsafe_values() {
        let store = CookieMarkerStore::from_headers(&HeaderMap::new(), "validApiKey");

        assert!(store.write("a;b").is_err());
        assert!(store.write("with space").is_err());
    }
}
