use crate::shared::lenient;
use serde::{Deserialize, Serialize};

/// Answer of `POST /inbound/bulk-upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadResponse {
    #[serde(deserialize_with = "lenient::string")]
    pub batch_id: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_rows: u64,
    #[serde(default)]
    pub timestamp: Option<String>,
}
