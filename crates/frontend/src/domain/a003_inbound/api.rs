use crate::shared::api_client::{self, segment};
use contracts::domain::a003_inbound::{
    BatchSummary, InboundPage, InboundQuery, InboundRecord, SingleEntryRequest,
};
use contracts::shared::api_error::ApiError;
use serde::Serialize;
use serde_json::Value;

pub async fn fetch_page(query: &InboundQuery) -> Result<InboundPage, ApiError> {
    api_client::get_json_with_query("/inbound", query).await
}

#[derive(Serialize)]
struct ScopeQuery {
    #[serde(rename = "warehouseId")]
    warehouse_id: i64,
}

pub async fn fetch_brands(warehouse_id: i64) -> Result<Vec<String>, ApiError> {
    api_client::get_json_with_query("/inbound/brands", &ScopeQuery { warehouse_id }).await
}

pub async fn fetch_categories(warehouse_id: i64) -> Result<Vec<String>, ApiError> {
    api_client::get_json_with_query("/inbound/categories", &ScopeQuery { warehouse_id }).await
}

/// All WSNs already stored, for the duplicate pre-check.
pub async fn fetch_existing_wsns() -> Result<Vec<String>, ApiError> {
    api_client::get_json("/inbound/wsns/all").await
}

/// Rack numbers for the dropdown. The endpoint answers either plain strings or
/// rack objects; both are reduced to the rack number.
pub async fn fetch_racks(warehouse_id: i64) -> Result<Vec<String>, ApiError> {
    let raw: Vec<Value> =
        api_client::get_json(&format!("/inbound/racks/{}", warehouse_id)).await?;
    Ok(raw.iter().filter_map(rack_label).collect())
}

pub fn rack_label(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ["rack_no", "rack_name", "name"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str).map(String::from)),
        _ => None,
    }?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub async fn save_single(request: &SingleEntryRequest) -> Result<InboundRecord, ApiError> {
    api_client::post_json("/inbound", request).await
}

#[derive(Serialize)]
struct BatchScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse_id: Option<i64>,
}

pub async fn fetch_batches(warehouse_id: Option<i64>) -> Result<Vec<BatchSummary>, ApiError> {
    api_client::get_json_with_query("/inbound/batches", &BatchScope { warehouse_id }).await
}

pub async fn delete_batch(batch_id: &str) -> Result<(), ApiError> {
    api_client::delete(&format!("/inbound/batches/{}", segment(batch_id))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rack_label_shapes() {
        assert_eq!(rack_label(&json!("R-01")).as_deref(), Some("R-01"));
        assert_eq!(rack_label(&json!({"id": 1, "rack_no": "A-2"})).as_deref(), Some("A-2"));
        assert_eq!(rack_label(&json!({"name": "Cold 3"})).as_deref(), Some("Cold 3"));
        assert_eq!(rack_label(&json!({"id": 4})), None);
        assert_eq!(rack_label(&json!("  ")), None);
        assert_eq!(rack_label(&json!(12)), None);
    }

    #[test]
    fn test_batch_scope_query() {
        assert_eq!(
            serde_qs::to_string(&BatchScope { warehouse_id: Some(3) }).unwrap(),
            "warehouse_id=3"
        );
        assert_eq!(serde_qs::to_string(&BatchScope { warehouse_id: None }).unwrap(), "");
    }
}
