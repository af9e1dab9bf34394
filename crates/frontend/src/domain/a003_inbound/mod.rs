pub mod api;
pub mod columns;
pub mod ui;
