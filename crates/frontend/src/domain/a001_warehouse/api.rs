use crate::shared::api_client;
use contracts::domain::a001_warehouse::Warehouse;
use contracts::shared::api_error::ApiError;

pub async fn fetch_warehouses() -> Result<Vec<Warehouse>, ApiError> {
    api_client::get_json("/warehouses").await
}
