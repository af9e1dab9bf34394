use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// Per-entry outcome; `results[i]` belongs to `entries[i]` of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResult {
    pub status: EntryStatus,
    #[serde(default)]
    pub wsn: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl EntryResult {
    pub fn is_success(&self) -> bool {
        self.status == EntryStatus::Success
    }

    /// Server explanation for a failed entry, whichever field carries it.
    pub fn reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiEntryResponse {
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub results: Vec<EntryResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "successCount": 1,
            "results": [
                {"status": "SUCCESS", "wsn": "A1"},
                {"status": "ERROR", "wsn": "A2", "error": "WSN already exists"},
                {"status": "SKIPPED"}
            ]
        }"#;
        let r: MultiEntryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.success_count, 1);
        assert!(r.results[0].is_success());
        assert_eq!(r.results[1].status, EntryStatus::Error);
        assert_eq!(r.results[1].reason(), Some("WSN already exists"));
        assert_eq!(r.results[2].status, EntryStatus::Unknown);
        assert_eq!(r.results[2].reason(), None);
    }
}
