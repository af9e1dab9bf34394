//! Decisions of the upload progress loop, kept apart from the timer.

use contracts::shared::api_error::ApiError;
use contracts::usecases::u502_bulk_upload::UploadProgress;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

#[derive(Debug, Clone, PartialEq)]
pub enum PollStep {
    /// Show the snapshot and ask again after the interval.
    Continue(UploadProgress),
    /// Final snapshot; stop.
    Finished(UploadProgress),
    /// The server forgot the batch (404). Stop without a notice.
    Vanished,
    /// Stop and report.
    Abort(ApiError),
}

pub fn next_step(result: Result<UploadProgress, ApiError>) -> PollStep {
    match result {
        Ok(p) if p.is_finished() => PollStep::Finished(p),
        Ok(p) => PollStep::Continue(p),
        Err(ApiError::NotFound) => PollStep::Vanished,
        Err(e) => PollStep::Abort(e),
    }
}

/// Spreadsheet or CSV by extension, case-insensitive.
pub fn check_file_name(name: &str) -> Result<(), String> {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported file '{}': use {}",
            name,
            ACCEPTED_EXTENSIONS.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u502_bulk_upload::UploadStatus;

    fn progress(status: UploadStatus) -> UploadProgress {
        UploadProgress {
            batch_id: "B7".into(),
            status,
            processed_rows: 10,
            total_rows: 20,
            success_rows: 9,
            error_rows: 1,
            message: None,
        }
    }

    #[test]
    fn test_running_upload_continues() {
        let step = next_step(Ok(progress(UploadStatus::Processing)));
        assert!(matches!(step, PollStep::Continue(p) if p.processed_rows == 10));
        assert!(matches!(
            next_step(Ok(progress(UploadStatus::Queued))),
            PollStep::Continue(_)
        ));
    }

    #[test]
    fn test_terminal_statuses_finish() {
        assert!(matches!(
            next_step(Ok(progress(UploadStatus::Completed))),
            PollStep::Finished(_)
        ));
        assert!(matches!(
            next_step(Ok(progress(UploadStatus::Failed))),
            PollStep::Finished(_)
        ));
    }

    #[test]
    fn test_not_found_stops_silently() {
        assert_eq!(next_step(Err(ApiError::NotFound)), PollStep::Vanished);
        let err = ApiError::Transport("offline".into());
        assert_eq!(next_step(Err(err.clone())), PollStep::Abort(err));
    }

    #[test]
    fn test_check_file_name() {
        assert!(check_file_name("inbound-june.XLSX").is_ok());
        assert!(check_file_name("rows.csv").is_ok());
        assert!(check_file_name("notes.txt").is_err());
        assert!(check_file_name("no_extension").is_err());
    }
}
