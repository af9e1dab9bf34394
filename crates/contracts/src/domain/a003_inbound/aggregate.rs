use crate::domain::a002_master_data::MasterDataFields;
use crate::shared::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Поступление товара, как его отправляет клиент (одиночный ввод и мультиввод).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboundEntry {
    pub wsn: String,
    #[serde(deserialize_with = "lenient::naive_date")]
    pub inbound_date: NaiveDate,
    #[serde(default)]
    pub vehicle_no: String,
    #[serde(default)]
    pub product_serial_number: String,
    #[serde(default)]
    pub rack_no: String,
    #[serde(default)]
    pub unload_remarks: String,
    #[serde(flatten)]
    pub master: MasterDataFields,
}

impl InboundEntry {
    pub fn blank(inbound_date: NaiveDate) -> Self {
        Self {
            wsn: String::new(),
            inbound_date,
            vehicle_no: String::new(),
            product_serial_number: String::new(),
            rack_no: String::new(),
            unload_remarks: String::new(),
            master: MasterDataFields::default(),
        }
    }
}

/// Persisted inbound row (server-owned).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboundRecord {
    pub id: i64,
    #[serde(flatten)]
    pub entry: InboundEntry,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub batch_id: Option<String>,
    pub warehouse_id: i64,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /inbound`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleEntryRequest {
    #[serde(flatten)]
    pub entry: InboundEntry,
    pub warehouse_id: i64,
    /// Overwrite the record that already holds this WSN (after a 409).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub update_existing: bool,
}

/// Body of a 409 answer to `POST /inbound`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DuplicateWsnConflict {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub existing: Option<InboundRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_server_json() {
        let json = r#"{
            "id": 12,
            "wsn": "WSN-1",
            "inbound_date": "2024-05-01T00:00:00.000Z",
            "vehicle_no": "KA01AB1234",
            "rack_no": "R-3",
            "brand": "Acme",
            "mrp": "499",
            "batch_id": 1715000000,
            "warehouse_id": 2,
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let r: InboundRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.entry.wsn, "WSN-1");
        assert_eq!(r.entry.inbound_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(r.entry.product_serial_number, "");
        assert_eq!(r.entry.master.brand.as_deref(), Some("Acme"));
        assert_eq!(r.entry.master.mrp, Some(499.0));
        assert_eq!(r.batch_id.as_deref(), Some("1715000000"));
    }

    #[test]
    fn test_single_entry_request_omits_update_flag_by_default() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut req = SingleEntryRequest {
            entry: InboundEntry {
                wsn: "W1".into(),
                ..InboundEntry::blank(date)
            },
            warehouse_id: 4,
            update_existing: false,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["wsn"], "W1");
        assert_eq!(v["inbound_date"], "2024-05-01");
        assert_eq!(v["warehouse_id"], 4);
        assert!(v.get("update_existing").is_none());

        req.update_existing = true;
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["update_existing"], true);
    }

    #[test]
    fn test_conflict_body_without_existing() {
        let c: DuplicateWsnConflict =
            serde_json::from_str(r#"{"message":"WSN already exists"}"#).unwrap();
        assert_eq!(c.message.as_deref(), Some("WSN already exists"));
        assert!(c.existing.is_none());
    }
}
