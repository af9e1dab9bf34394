use crate::shared::api_client;
use contracts::shared::api_error::ApiError;
use contracts::usecases::u501_multi_entry::{MultiEntryRequest, MultiEntryResponse};

/// One request for the whole batch; results come back index-aligned.
pub async fn submit(request: &MultiEntryRequest) -> Result<MultiEntryResponse, ApiError> {
    log::info!(
        "multi-entry: submitting {} rows to warehouse {}",
        request.entries.len(),
        request.warehouse_id
    );
    api_client::post_json("/inbound/multi-entry", request).await
}
