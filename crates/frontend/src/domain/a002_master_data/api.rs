use crate::shared::api_client::{self, segment};
use contracts::domain::a002_master_data::MasterDataRecord;
use contracts::shared::api_error::ApiError;

/// Catalog entry for a WSN. `Ok(None)` when the catalog has no such WSN.
pub async fn fetch_by_wsn(wsn: &str) -> Result<Option<MasterDataRecord>, ApiError> {
    let path = format!("/inbound/master-data/{}", segment(wsn.trim()));
    match api_client::get_json::<MasterDataRecord>(&path).await {
        Ok(record) => Ok(Some(record)),
        Err(ApiError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
