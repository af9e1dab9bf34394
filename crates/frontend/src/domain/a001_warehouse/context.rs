use super::store::ActiveWarehouseStore;
use crate::shared::storage::{BrowserStorage, KeyValueStorage};
use contracts::domain::a001_warehouse::Warehouse;
use leptos::prelude::*;

/// Active warehouse shared by all pages. Constructed once in `App` with an
/// explicit store and handed down through context.
pub struct WarehouseContext<S: 'static = BrowserStorage> {
    active: RwSignal<Option<Warehouse>>,
    store: StoredValue<ActiveWarehouseStore<S>>,
}

impl<S> Clone for WarehouseContext<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for WarehouseContext<S> {}

impl<S> WarehouseContext<S>
where
    S: KeyValueStorage + Send + Sync + 'static,
{
    /// Restores the saved selection once.
    pub fn new(store: ActiveWarehouseStore<S>) -> Self {
        let restored = store.restore();
        if let Some(w) = &restored {
            log::info!("active warehouse restored: {}", w.display_name());
        }
        Self {
            active: RwSignal::new(restored),
            store: StoredValue::new(store),
        }
    }

    /// Tracked read; re-runs the caller when the selection changes.
    pub fn get_active(&self) -> Option<Warehouse> {
        self.active.get()
    }

    pub fn get_active_untracked(&self) -> Option<Warehouse> {
        self.active.get_untracked()
    }

    pub fn active_id(&self) -> Option<i64> {
        self.active.with(|w| w.as_ref().map(|w| w.id))
    }

    pub fn active_id_untracked(&self) -> Option<i64> {
        self.active.with_untracked(|w| w.as_ref().map(|w| w.id))
    }

    pub fn set_active(&self, warehouse: Option<Warehouse>) {
        self.store
            .with_value(|store| store.persist(warehouse.as_ref()));
        self.active.set(warehouse);
    }
}

pub fn use_warehouse() -> WarehouseContext {
    use_context::<WarehouseContext>().expect("WarehouseContext not provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::{MemoryStorage, ACTIVE_WAREHOUSE_KEY};

    fn warehouse(id: i64) -> Warehouse {
        Warehouse {
            id,
            name: format!("DC {}", id),
            code: format!("DC{}", id),
            address: None,
            city: None,
            is_active: true,
        }
    }

    #[test]
    fn test_set_active_updates_signal_and_storage() {
        let owner = Owner::new();
        owner.set();

        let storage = MemoryStorage::new();
        let ctx = WarehouseContext::new(ActiveWarehouseStore::new(storage.clone()));
        assert_eq!(ctx.get_active_untracked(), None);

        ctx.set_active(Some(warehouse(4)));
        assert_eq!(ctx.get_active_untracked(), Some(warehouse(4)));
        assert_eq!(ctx.active_id_untracked(), Some(4));
        assert!(storage.get(ACTIVE_WAREHOUSE_KEY).is_some());

        // A fresh context over the same storage restores the selection.
        let restored = WarehouseContext::new(ActiveWarehouseStore::new(storage.clone()));
        assert_eq!(restored.active_id_untracked(), Some(4));

        ctx.set_active(None);
        assert_eq!(ctx.active_id_untracked(), None);
        assert_eq!(storage.get(ACTIVE_WAREHOUSE_KEY), None);
    }
}
