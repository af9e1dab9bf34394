pub mod batches;
pub mod details;
pub mod list;
