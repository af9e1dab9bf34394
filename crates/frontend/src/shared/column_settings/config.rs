use crate::shared::storage::KeyValueStorage;

/// A column from a fixed master list. Master order is canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    /// Locked columns are always visible.
    pub locked: bool,
}

impl ColumnDef {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            locked: false,
        }
    }

    pub const fn locked(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            locked: true,
        }
    }
}

/// Ordered visible subset of a master column list.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnConfig {
    master: &'static [ColumnDef],
    visible: Vec<&'static str>,
}

impl ColumnConfig {
    pub fn new(master: &'static [ColumnDef], defaults: &[&str]) -> Self {
        let mut cfg = Self {
            master,
            visible: Vec::new(),
        };
        cfg.set_columns(defaults.iter());
        cfg
    }

    /// Every master column visible.
    pub fn all(master: &'static [ColumnDef]) -> Self {
        Self {
            master,
            visible: master.iter().map(|c| c.key).collect(),
        }
    }

    /// Replaces the visible set. Unknown keys are dropped, locked columns are
    /// forced in, and the result follows master order.
    pub fn set_columns<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        self.visible = self
            .master
            .iter()
            .filter(|c| c.locked || keys.iter().any(|k| k.as_ref() == c.key))
            .map(|c| c.key)
            .collect();
    }

    /// Shows a hidden column at its canonical position or hides a visible one.
    /// Returns false for locked and unknown keys.
    pub fn toggle(&mut self, key: &str) -> bool {
        let Some(def) = self.master.iter().find(|c| c.key == key) else {
            return false;
        };
        if def.locked {
            return false;
        }
        let mut keys: Vec<&'static str> = self.visible.clone();
        if let Some(pos) = keys.iter().position(|k| *k == key) {
            keys.remove(pos);
        } else {
            keys.push(def.key);
        }
        self.set_columns(&keys);
        true
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.iter().any(|k| *k == key)
    }

    pub fn visible_keys(&self) -> &[&'static str] {
        &self.visible
    }

    pub fn visible_columns(&self) -> Vec<ColumnDef> {
        self.master
            .iter()
            .filter(|c| self.is_visible(c.key))
            .copied()
            .collect()
    }

    pub fn master(&self) -> &'static [ColumnDef] {
        self.master
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.visible).unwrap_or_else(|_| "[]".to_string())
    }

    /// Restores from JSON, falling back to `defaults` when the value is
    /// missing, unreadable, or names no known column.
    pub fn from_json(master: &'static [ColumnDef], raw: Option<&str>, defaults: &[&str]) -> Self {
        let saved: Option<Vec<String>> = raw.and_then(|r| match serde_json::from_str(r) {
            Ok(keys) => Some(keys),
            Err(e) => {
                log::warn!("ignoring saved column config: {}", e);
                None
            }
        });
        match saved {
            Some(keys) if keys.iter().any(|k| master.iter().any(|c| c.key == k)) => {
                let mut cfg = Self::new(master, &[]);
                cfg.set_columns(&keys);
                cfg
            }
            _ => Self::new(master, defaults),
        }
    }

    pub fn load<S: KeyValueStorage>(
        storage: &S,
        key: &str,
        master: &'static [ColumnDef],
        defaults: &[&str],
    ) -> Self {
        Self::from_json(master, storage.get(key).as_deref(), defaults)
    }

    pub fn save<S: KeyValueStorage>(&self, storage: &S, key: &str) {
        storage.set(key, &self.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    static MASTER: [ColumnDef; 5] = [
        ColumnDef::locked("wsn", "WSN"),
        ColumnDef::new("inbound_date", "Date"),
        ColumnDef::new("vehicle_no", "Vehicle"),
        ColumnDef::new("rack_no", "Rack"),
        ColumnDef::new("brand", "Brand"),
    ];

    #[test]
    fn test_toggle_off_then_on_restores_canonical_position() {
        let mut cfg = ColumnConfig::all(&MASTER);
        assert!(cfg.toggle("vehicle_no"));
        assert_eq!(cfg.visible_keys(), &["wsn", "inbound_date", "rack_no", "brand"]);
        assert!(cfg.toggle("vehicle_no"));
        assert_eq!(
            cfg.visible_keys(),
            &["wsn", "inbound_date", "vehicle_no", "rack_no", "brand"]
        );
    }

    #[test]
    fn test_set_columns_normalizes_order_and_drops_unknown() {
        let mut cfg = ColumnConfig::new(&MASTER, &[]);
        cfg.set_columns(["brand", "bogus", "inbound_date"]);
        assert_eq!(cfg.visible_keys(), &["wsn", "inbound_date", "brand"]);
    }

    #[test]
    fn test_locked_column_cannot_be_hidden() {
        let mut cfg = ColumnConfig::all(&MASTER);
        assert!(!cfg.toggle("wsn"));
        assert!(cfg.is_visible("wsn"));
        assert!(!cfg.toggle("nope"));
    }

    #[test]
    fn test_persistence_roundtrip_and_fallbacks() {
        let storage = MemoryStorage::new();
        let mut cfg = ColumnConfig::new(&MASTER, &["rack_no"]);
        cfg.toggle("brand");
        cfg.save(&storage, "cols");
        assert_eq!(storage.get("cols").as_deref(), Some(r#"["wsn","rack_no","brand"]"#));

        let restored = ColumnConfig::load(&storage, "cols", &MASTER, &["inbound_date"]);
        assert_eq!(restored, cfg);

        storage.set("cols", "not json");
        let fallback = ColumnConfig::load(&storage, "cols", &MASTER, &["inbound_date"]);
        assert_eq!(fallback.visible_keys(), &["wsn", "inbound_date"]);

        storage.set("cols", r#"["gone","also_gone"]"#);
        let fallback = ColumnConfig::load(&storage, "cols", &MASTER, &["inbound_date"]);
        assert_eq!(fallback.visible_keys(), &["wsn", "inbound_date"]);
    }
}
