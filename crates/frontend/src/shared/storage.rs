//! Key-value persistence behind a trait so stores can be constructed with the
//! browser's `localStorage` in the app and an in-memory map in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const ACTIVE_WAREHOUSE_KEY: &str = "activeWarehouse";
pub const LAST_VEHICLE_KEY: &str = "lastVehicleNumber";
pub const MULTI_ENTRY_COLUMNS_KEY: &str = "multiEntryColumns";
pub const INBOUND_LIST_COLUMNS_KEY: &str = "inboundListColumns";
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar-collapsed";
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Writes are best effort: quota or privacy-mode
/// failures are logged and dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::local() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for '{}'", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

pub fn load_bool<S: KeyValueStorage>(storage: &S, key: &str) -> bool {
    storage.get(key).as_deref() == Some("true")
}

pub fn save_bool<S: KeyValueStorage>(storage: &S, key: &str, value: bool) {
    storage.set(key, if value { "true" } else { "false" });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let s = MemoryStorage::new();
        assert_eq!(s.get("k"), None);
        s.set("k", "v");
        assert_eq!(s.get("k").as_deref(), Some("v"));
        s.remove("k");
        assert_eq!(s.get("k"), None);
    }

    #[test]
    fn test_clones_share_state() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set(SIDEBAR_COLLAPSED_KEY, "true");
        assert!(load_bool(&b, SIDEBAR_COLLAPSED_KEY));
        save_bool(&b, SIDEBAR_COLLAPSED_KEY, false);
        assert!(!load_bool(&a, SIDEBAR_COLLAPSED_KEY));
    }
}
