use crate::domain::a002_master_data::api as master_data;
use crate::domain::a003_inbound::api;
use crate::shared::date_utils::today;
use crate::shared::notifications::Notifier;
use crate::shared::storage::{BrowserStorage, KeyValueStorage, LAST_VEHICLE_KEY};
use contracts::domain::a003_inbound::{
    DuplicateWsnConflict, InboundEntry, InboundRecord, SingleEntryRequest,
};
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// What the form does after a save attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(InboundRecord),
    /// 409: the WSN is already stored; the user may overwrite it.
    Duplicate(DuplicateWsnConflict),
    /// 403 with the server's reason.
    Denied(String),
    Failed(String),
}

pub fn classify_save(result: Result<InboundRecord, ApiError>) -> SaveOutcome {
    match result {
        Ok(record) => SaveOutcome::Saved(record),
        Err(ApiError::Conflict { message, body }) => {
            let mut conflict: DuplicateWsnConflict =
                serde_json::from_str(&body).unwrap_or_default();
            if conflict.message.is_none() {
                conflict.message = Some(message);
            }
            SaveOutcome::Duplicate(conflict)
        }
        Err(ApiError::Permission(reason)) => SaveOutcome::Denied(reason),
        Err(e) => SaveOutcome::Failed(e.user_message()),
    }
}

pub fn build_request(
    entry: &InboundEntry,
    warehouse_id: Option<i64>,
    update_existing: bool,
) -> Result<SingleEntryRequest, String> {
    let warehouse_id = warehouse_id.ok_or_else(|| "Select a warehouse first".to_string())?;
    let mut entry = entry.clone();
    entry.wsn = entry.wsn.trim().to_string();
    if entry.wsn.is_empty() {
        return Err("WSN is required".to_string());
    }
    for field in [
        &mut entry.vehicle_no,
        &mut entry.product_serial_number,
        &mut entry.rack_no,
        &mut entry.unload_remarks,
    ] {
        *field = field.trim().to_string();
    }
    Ok(SingleEntryRequest {
        entry,
        warehouse_id,
        update_existing,
    })
}

/// Blank form that keeps the date and vehicle of the previous entry.
fn next_blank(previous: &InboundEntry) -> InboundEntry {
    let mut entry = InboundEntry::blank(previous.inbound_date);
    entry.vehicle_no = previous.vehicle_no.clone();
    entry
}

#[derive(Clone, Copy)]
pub struct InboundEntryViewModel {
    pub form: RwSignal<InboundEntry>,
    pub conflict: RwSignal<Option<DuplicateWsnConflict>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    lookup_generation: StoredValue<u64>,
}

impl InboundEntryViewModel {
    pub fn new() -> Self {
        let mut entry = InboundEntry::blank(today());
        entry.vehicle_no = BrowserStorage.get(LAST_VEHICLE_KEY).unwrap_or_default();
        Self {
            form: RwSignal::new(entry),
            conflict: RwSignal::new(None),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            lookup_generation: StoredValue::new(0),
        }
    }

    pub fn edit(&self, apply: impl FnOnce(&mut InboundEntry)) {
        self.form.update(apply);
        self.error.set(None);
    }

    /// Preview of the catalog entry for the typed WSN. Soft fail: errors are
    /// only logged and the form stays usable.
    pub fn lookup_master_data(&self) {
        let wsn = self.form.with_untracked(|f| f.wsn.trim().to_string());
        let generation = self.lookup_generation.get_value() + 1;
        self.lookup_generation.set_value(generation);
        self.form.update(|f| f.master = Default::default());
        if wsn.is_empty() {
            return;
        }

        let form = self.form;
        let current = self.lookup_generation;
        spawn_local(async move {
            let result = master_data::fetch_by_wsn(&wsn).await;
            if current.try_get_value() != Some(generation) {
                return;
            }
            match result {
                Ok(Some(record)) => {
                    form.try_update(|f| f.master = record.fields);
                }
                Ok(None) => log::debug!("no master data for WSN {}", wsn),
                Err(e) => log::warn!("master data lookup for {} failed: {}", wsn, e),
            }
        });
    }

    pub fn reset(&self) {
        self.form.update(|f| *f = next_blank(f));
        self.conflict.set(None);
        self.error.set(None);
    }

    /// Posts the form. With `update_existing` the stored record holding the
    /// same WSN is overwritten.
    pub fn save(&self, warehouse_id: Option<i64>, update_existing: bool, notifier: Notifier) {
        if self.saving.get_untracked() {
            return;
        }
        let request = match self
            .form
            .with_untracked(|f| build_request(f, warehouse_id, update_existing))
        {
            Ok(r) => r,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };
        BrowserStorage.set(LAST_VEHICLE_KEY, &request.entry.vehicle_no);

        let vm = *self;
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match classify_save(api::save_single(&request).await) {
                SaveOutcome::Saved(record) => {
                    log::info!("inbound {} saved as #{}", record.entry.wsn, record.id);
                    notifier.success(format!("{} saved", record.entry.wsn));
                    vm.reset();
                }
                SaveOutcome::Duplicate(conflict) => {
                    vm.conflict.try_set(Some(conflict));
                }
                SaveOutcome::Denied(reason) => {
                    notifier.error(reason.clone());
                    vm.error.try_set(Some(reason));
                }
                SaveOutcome::Failed(msg) => {
                    notifier.error(msg.clone());
                    vm.error.try_set(Some(msg));
                }
            }
            vm.saving.try_set(false);
        });
    }
}

impl Default for InboundEntryViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(wsn: &str) -> InboundEntry {
        let mut e = InboundEntry::blank(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        e.wsn = wsn.to_string();
        e.vehicle_no = " KA01 ".to_string();
        e
    }

    #[test]
    fn test_conflict_carries_existing_record() {
        let body = r#"{
            "message": "WSN already inbounded",
            "existing": {
                "id": 41,
                "wsn": "W1",
                "inbound_date": "2024-05-01",
                "rack_no": "R-2",
                "warehouse_id": 3,
                "created_at": "2024-05-01T09:00:00Z"
            }
        }"#;
        let outcome = classify_save(Err(ApiError::from_status(409, body)));
        let SaveOutcome::Duplicate(conflict) = outcome else {
            panic!("expected duplicate, got {:?}", outcome);
        };
        assert_eq!(conflict.message.as_deref(), Some("WSN already inbounded"));
        let existing = conflict.existing.unwrap();
        assert_eq!(existing.id, 41);
        assert_eq!(existing.entry.rack_no, "R-2");
    }

    #[test]
    fn test_conflict_with_unreadable_body() {
        let outcome = classify_save(Err(ApiError::from_status(409, "conflict")));
        assert_eq!(
            outcome,
            SaveOutcome::Duplicate(DuplicateWsnConflict {
                message: Some("Record already exists".into()),
                existing: None,
            })
        );
    }

    #[test]
    fn test_forbidden_and_other_failures() {
        let denied = classify_save(Err(ApiError::from_status(
            403,
            r#"{"error": "Operators cannot inbound into this warehouse"}"#,
        )));
        assert_eq!(
            denied,
            SaveOutcome::Denied("Operators cannot inbound into this warehouse".into())
        );
        let failed = classify_save(Err(ApiError::Transport("offline".into())));
        assert_eq!(failed, SaveOutcome::Failed("Network error, please retry".into()));
    }

    #[test]
    fn test_build_request() {
        let request = build_request(&entry(" W1 "), Some(3), false).unwrap();
        assert_eq!(request.entry.wsn, "W1");
        assert_eq!(request.entry.vehicle_no, "KA01");
        assert_eq!(request.warehouse_id, 3);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("update_existing").is_none());

        let overwrite = build_request(&entry("W1"), Some(3), true).unwrap();
        let json = serde_json::to_value(&overwrite).unwrap();
        assert_eq!(json["update_existing"], serde_json::json!(true));
    }

    #[test]
    fn test_build_request_rejects_locally() {
        assert_eq!(
            build_request(&entry("W1"), None, false).unwrap_err(),
            "Select a warehouse first"
        );
        assert_eq!(
            build_request(&entry("   "), Some(1), false).unwrap_err(),
            "WSN is required"
        );
    }

    #[test]
    fn test_next_blank_keeps_date_and_vehicle() {
        let mut previous = entry("W1");
        previous.rack_no = "R-1".into();
        let next = next_blank(&previous);
        assert_eq!(next.inbound_date, previous.inbound_date);
        assert_eq!(next.vehicle_no, previous.vehicle_no);
        assert!(next.wsn.is_empty());
        assert!(next.rack_no.is_empty());
    }
}
