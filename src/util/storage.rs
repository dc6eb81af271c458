//! Durable client record for the bearer-token credential mode.
//!
//! SYSTEM CONTEXT
//! ==============
//! In bearer mode the token and a small identity mirror survive reloads in
//! `localStorage`, so the first identity query after a reload can already
//! carry `Authorization`. Cookie mode never touches this record.
//!
//! The three keys are written independently but always removed together;
//! there is no API for removing one of them.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::types::UserProfile;

const TOKEN_KEY: &str = "token";
const USER_ID_KEY: &str = "userId";
const CURRENT_USER_KEY: &str = "currentUser";

/// Key/value string storage.
pub trait ClientStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-process store for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl ClientStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Browser `localStorage`. Every failure (no window, storage disabled,
/// quota) degrades to "absent" or a dropped write.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "csr")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "csr")]
impl ClientStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Typed view over the `token` / `userId` / `currentUser` keys.
pub struct DurableRecord {
    store: Rc<dyn ClientStore>,
}

impl DurableRecord {
    pub fn new(store: Rc<dyn ClientStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Store a token issued by the login flow.
    pub fn set_token(&self, token: &str) {
        self.store.set_item(TOKEN_KEY, token);
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.store.get_item(USER_ID_KEY)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.load_json(CURRENT_USER_KEY)
    }

    /// Mirror a freshly resolved identity next to the token.
    pub fn mirror_identity(&self, profile: &UserProfile) {
        self.store.set_item(USER_ID_KEY, &profile.id);
        self.save_json(CURRENT_USER_KEY, profile);
    }

    /// Remove the token and the identity mirror together.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_ID_KEY, CURRENT_USER_KEY] {
            self.store.remove_item(key);
        }
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get_item(key)?;
        serde_json::from_str(&raw).ok()
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        self.store.set_item(key, &raw);
    }
}
