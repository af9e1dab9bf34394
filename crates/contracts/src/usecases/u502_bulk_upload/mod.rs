pub mod progress;
pub mod response;

pub use progress::{UploadProgress, UploadStatus};
pub use response::BulkUploadResponse;
