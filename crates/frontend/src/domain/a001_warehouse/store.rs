//! Persisted active-warehouse selection.
//!
//! Schema: the `activeWarehouse` key holds the JSON of
//! [`contracts::domain::a001_warehouse::Warehouse`]; absence means no selection.

use crate::shared::storage::{KeyValueStorage, ACTIVE_WAREHOUSE_KEY};
use contracts::domain::a001_warehouse::Warehouse;

#[derive(Clone, Copy, Debug, Default)]
pub struct ActiveWarehouseStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> ActiveWarehouseStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads the saved selection. An unreadable value is removed.
    pub fn restore(&self) -> Option<Warehouse> {
        let raw = self.storage.get(ACTIVE_WAREHOUSE_KEY)?;
        match serde_json::from_str::<Warehouse>(&raw) {
            Ok(w) => Some(w),
            Err(e) => {
                log::warn!("discarding stored active warehouse: {}", e);
                self.storage.remove(ACTIVE_WAREHOUSE_KEY);
                None
            }
        }
    }

    pub fn persist(&self, warehouse: Option<&Warehouse>) {
        match warehouse.map(serde_json::to_string) {
            Some(Ok(json)) => self.storage.set(ACTIVE_WAREHOUSE_KEY, &json),
            Some(Err(e)) => log::error!("failed to serialize warehouse: {}", e),
            None => self.storage.remove(ACTIVE_WAREHOUSE_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    fn warehouse() -> Warehouse {
        Warehouse {
            id: 9,
            name: "Hosur DC".into(),
            code: "HSR".into(),
            address: None,
            city: Some("Hosur".into()),
            is_active: true,
        }
    }

    #[test]
    fn test_persist_and_restore() {
        let storage = MemoryStorage::new();
        let store = ActiveWarehouseStore::new(storage.clone());
        assert_eq!(store.restore(), None);

        store.persist(Some(&warehouse()));
        assert_eq!(store.restore(), Some(warehouse()));

        store.persist(None);
        assert_eq!(store.restore(), None);
        assert_eq!(storage.get(ACTIVE_WAREHOUSE_KEY), None);
    }

    #[test]
    fn test_corrupt_value_restores_as_none_and_is_cleared() {
        let storage = MemoryStorage::new();
        storage.set(ACTIVE_WAREHOUSE_KEY, "{\"id\":");
        let store = ActiveWarehouseStore::new(storage.clone());
        assert_eq!(store.restore(), None);
        assert_eq!(storage.get(ACTIVE_WAREHOUSE_KEY), None);
    }
}
