pub mod a001_warehouse;
pub mod a002_master_data;
pub mod a003_inbound;
