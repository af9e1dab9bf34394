use super::aggregate::InboundRecord;
use crate::shared::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Query string of `GET /inbound`. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InboundQuery {
    pub page: u32,
    pub limit: u32,
    pub warehouse_id: i64,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub search: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub brand: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
}

/// Answer of `GET /inbound`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundPage {
    #[serde(default)]
    pub data: Vec<InboundRecord>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total: u64,
}
