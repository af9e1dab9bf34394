pub mod u501_multi_entry;
pub mod u502_bulk_upload;
