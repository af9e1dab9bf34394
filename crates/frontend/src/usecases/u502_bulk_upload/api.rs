use crate::shared::api_client::{self, segment};
use contracts::shared::api_error::ApiError;
use contracts::usecases::u502_bulk_upload::{BulkUploadResponse, UploadProgress};
use web_sys::{File, FormData};

pub async fn upload(file: &File, warehouse_id: i64) -> Result<BulkUploadResponse, ApiError> {
    let form = FormData::new()
        .map_err(|e| ApiError::Validation(format!("cannot build form: {:?}", e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::Validation(format!("cannot attach file: {:?}", e)))?;
    form.append_with_str("warehouse_id", &warehouse_id.to_string())
        .map_err(|e| ApiError::Validation(format!("cannot attach warehouse: {:?}", e)))?;
    log::info!("bulk upload: sending {} ({} bytes)", file.name(), file.size());
    api_client::post_form("/inbound/bulk-upload", form).await
}

pub async fn fetch_progress(batch_id: &str) -> Result<UploadProgress, ApiError> {
    api_client::get_json(&format!("/inbound/bulk-upload/{}/progress", segment(batch_id))).await
}
