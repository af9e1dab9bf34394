use serde::{Deserialize, Serialize};

/// Склад (агрегат a001). Активный склад ограничивает почти все запросы сессии.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Warehouse {
    /// Label used by the selector and page headers, e.g. `"BLR-01 · Bengaluru Main"`.
    pub fn display_name(&self) -> String {
        if self.code.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} · {}", self.code, self.name)
        }
    }
}
