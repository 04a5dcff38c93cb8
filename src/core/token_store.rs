//! Credential persistence.
//!
//! A dumb key-value shim over durable client-side storage: two opaque
//! strings under fixed keys, no validation, no decoding. The store is
//! injected into the HTTP client at construction so tests can substitute
//! the in-memory implementation.

use std::cell::RefCell;

/// localStorage keys, shared with the deployed frontend so an upgrade does
/// not log everyone out.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Persistence contract for the credential pair.
///
/// `set` replaces both entries; a refresh never leaves a mismatched pair
/// behind. Reads must observe a same-tick write (read-after-write within a
/// single process).
pub trait TokenStore {
    fn get_access(&self) -> Option<String>;
    fn get_refresh(&self) -> Option<String>;
    /// Overwrite both entries.
    fn set(&self, access: &str, refresh: &str);
    /// Remove both entries.
    fn clear(&self);
}

/// Browser-backed store over `window.localStorage`.
///
/// Storage access can fail (privacy mode, sandboxed iframe); reads then
/// behave as an empty store and writes are dropped, which degrades to an
/// anonymous session instead of crashing.
#[cfg(not(feature = "ssr"))]
pub struct BrowserTokenStore;

#[cfg(not(feature = "ssr"))]
impl BrowserTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(not(feature = "ssr"))]
impl TokenStore for BrowserTokenStore {
    fn get_access(&self) -> Option<String> {
        Self::storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
    }

    fn get_refresh(&self) -> Option<String> {
        Self::storage()?.get_item(REFRESH_TOKEN_KEY).ok()?
    }

    fn set(&self, access: &str, refresh: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(ACCESS_TOKEN_KEY, access);
            let _ = storage.set_item(REFRESH_TOKEN_KEY, refresh);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
            let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        }
    }
}

/// In-memory store for tests and the SSR fallback client.
#[derive(Default)]
pub struct MemoryTokenStore {
    pair: RefCell<Option<(String, String)>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, for tests that start authenticated.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.set(access, refresh);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_access(&self) -> Option<String> {
        self.pair.borrow().as_ref().map(|(access, _)| access.clone())
    }

    fn get_refresh(&self) -> Option<String> {
        self.pair.borrow().as_ref().map(|(_, refresh)| refresh.clone())
    }

    fn set(&self, access: &str, refresh: &str) {
        *self.pair.borrow_mut() = Some((access.to_string(), refresh.to_string()));
    }

    fn clear(&self) {
        *self.pair.borrow_mut() = None;
    }
}
