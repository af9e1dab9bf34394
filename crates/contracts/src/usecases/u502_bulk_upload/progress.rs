use crate::shared::lenient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    /// Файл принят, строки ещё не разобраны
    Queued,
    /// Идёт построчная обработка
    Processing,
    /// Все строки обработаны
    Completed,
    /// Обработка прервана
    Failed,
}

/// Answer of `GET /inbound/bulk-upload/{batchId}/progress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    #[serde(deserialize_with = "lenient::string")]
    pub batch_id: String,
    pub status: UploadStatus,
    #[serde(default, deserialize_with = "lenient::count")]
    pub processed_rows: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_rows: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub success_rows: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub error_rows: u64,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadProgress {
    pub fn is_finished(&self) -> bool {
        matches!(self.status, UploadStatus::Completed | UploadStatus::Failed)
    }

    /// Whole-number percentage, clamped to 100. Unknown totals report 0.
    pub fn percent(&self) -> u8 {
        if self.total_rows == 0 {
            return if self.status == UploadStatus::Completed { 100 } else { 0 };
        }
        let pct = self.processed_rows.saturating_mul(100) / self.total_rows;
        pct.min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(status: UploadStatus, processed: u64, total: u64) -> UploadProgress {
        UploadProgress {
            batch_id: "B1".into(),
            status,
            processed_rows: processed,
            total_rows: total,
            success_rows: processed,
            error_rows: 0,
            message: None,
        }
    }

    #[test]
    fn test_percent() {
        assert_eq!(progress(UploadStatus::Processing, 0, 200).percent(), 0);
        assert_eq!(progress(UploadStatus::Processing, 50, 200).percent(), 25);
        assert_eq!(progress(UploadStatus::Processing, 250, 200).percent(), 100);
        assert_eq!(progress(UploadStatus::Queued, 0, 0).percent(), 0);
        assert_eq!(progress(UploadStatus::Completed, 0, 0).percent(), 100);
    }

    #[test]
    fn test_finished() {
        assert!(!progress(UploadStatus::Queued, 0, 10).is_finished());
        assert!(!progress(UploadStatus::Processing, 5, 10).is_finished());
        assert!(progress(UploadStatus::Completed, 10, 10).is_finished());
        assert!(progress(UploadStatus::Failed, 3, 10).is_finished());
    }

    #[test]
    fn test_parse_progress() {
        let p: UploadProgress = serde_json::from_str(
            r#"{"batchId": 99, "status": "processing", "processedRows": "40", "totalRows": 80}"#,
        )
        .unwrap();
        assert_eq!(p.batch_id, "99");
        assert_eq!(p.percent(), 50);
        assert_eq!(p.error_rows, 0);
    }
}
