pub mod api;
pub mod poll;
pub mod view;

pub use view::BulkUploadPage;
