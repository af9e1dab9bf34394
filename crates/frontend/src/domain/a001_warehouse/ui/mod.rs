pub mod placeholder;
pub mod selector;

pub use placeholder::NoWarehouseSelected;
pub use selector::WarehouseSelector;
