pub mod api_client;
pub mod column_settings;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod notifications;
pub mod page_frame;
pub mod storage;
