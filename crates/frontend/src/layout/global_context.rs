use crate::shared::storage::{load_bool, save_bool, BrowserStorage, SIDEBAR_COLLAPSED_KEY};
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Open tabs and the active one. Plain data so the rules are testable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabStrip {
    pub tabs: Vec<Tab>,
    pub active: Option<String>,
}

impl TabStrip {
    /// Opens (or re-focuses) a tab.
    pub fn open(&mut self, key: &str, title: &str) {
        if !self.tabs.iter().any(|t| t.key == key) {
            self.tabs.push(Tab {
                key: key.to_string(),
                title: title.to_string(),
            });
        }
        self.active = Some(key.to_string());
    }

    pub fn activate(&mut self, key: &str) -> bool {
        if !self.tabs.iter().any(|t| t.key == key) {
            return false;
        }
        self.active = Some(key.to_string());
        true
    }

    /// Closing the active tab focuses its right neighbour, else the left one.
    pub fn close(&mut self, key: &str) {
        let Some(index) = self.tabs.iter().position(|t| t.key == key) else {
            return;
        };
        self.tabs.remove(index);
        if self.active.as_deref() == Some(key) {
            self.active = self
                .tabs
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .map(|t| t.key.clone());
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.as_deref() == Some(key)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub strip: RwSignal<TabStrip>,
    pub sidebar_collapsed: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            strip: RwSignal::new(TabStrip::default()),
            sidebar_collapsed: RwSignal::new(load_bool(&BrowserStorage, SIDEBAR_COLLAPSED_KEY)),
        }
    }

    /// Restores the active tab from `?active=` and keeps the URL in sync.
    pub fn init_router_integration(&self, title_for: fn(&str) -> Option<&'static str>) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(key) = params.get("active") {
            match title_for(key) {
                Some(title) => self.open_tab(key, title),
                None => log::warn!("unknown tab '{}' in URL ignored", key),
            }
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(key) = this.strip.with(|s| s.active.clone()) else {
                return;
            };
            let query = serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
            let new_url = format!("?{}", query);
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open tab '{}'", key);
        self.strip.update(|s| s.open(key, title));
    }

    pub fn activate_tab(&self, key: &str) {
        self.strip.update(|s| {
            s.activate(key);
        });
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close tab '{}'", key);
        self.strip.update(|s| s.close(key));
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.strip.with(|s| s.is_active(key))
    }

    pub fn toggle_sidebar(&self) {
        let collapsed = !self.sidebar_collapsed.get_untracked();
        save_bool(&BrowserStorage, SIDEBAR_COLLAPSED_KEY, collapsed);
        self.sidebar_collapsed.set(collapsed);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not provided")
}
