use crate::shared::lenient;
use serde::{Deserialize, Serialize};

/// Группа поступлений одной загрузки. Удаляется целиком.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchSummary {
    #[serde(alias = "batchId", deserialize_with = "lenient::string")]
    pub batch_id: String,
    #[serde(deserialize_with = "lenient::count")]
    pub count: u64,
    #[serde(default, alias = "lastUpdated")]
    pub last_updated: Option<String>,
}
