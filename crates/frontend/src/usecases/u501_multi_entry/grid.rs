//! Draft-row model behind the multi-entry screen.
//!
//! The view wraps a [`MultiEntryGrid`] in a signal and calls into it; nothing
//! here touches the DOM or the network, which keeps the bookkeeping testable.

use super::duplicates::DuplicateIndex;
use super::navigation::{next_focus, CellPos, FocusMove};
use chrono::NaiveDate;
use contracts::domain::a002_master_data::MasterDataFields;
use contracts::domain::a003_inbound::InboundEntry;
use contracts::usecases::u501_multi_entry::{EntryStatus, MultiEntryRequest, MultiEntryResponse};
use thiserror::Error;

pub const INITIAL_ROWS: usize = 5;
pub const MAX_ROWS: usize = 1000;
/// Sizes offered by the "add rows" buttons.
pub const ROW_BATCHES: [usize; 3] = [5, 10, 30];

pub type RowKey = u64;

/// User-editable columns. Master-data columns are filled by lookup only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridField {
    Wsn,
    InboundDate,
    VehicleNo,
    ProductSerialNumber,
    RackNo,
    UnloadRemarks,
}

impl GridField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "wsn" => Some(Self::Wsn),
            "inbound_date" => Some(Self::InboundDate),
            "vehicle_no" => Some(Self::VehicleNo),
            "product_serial_number" => Some(Self::ProductSerialNumber),
            "rack_no" => Some(Self::RackNo),
            "unload_remarks" => Some(Self::UnloadRemarks),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RowStatus {
    Draft,
    Saved,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommonFields {
    pub inbound_date: NaiveDate,
    pub vehicle_no: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DraftRow {
    pub key: RowKey,
    pub wsn: String,
    pub inbound_date: NaiveDate,
    pub vehicle_no: String,
    pub product_serial_number: String,
    pub rack_no: String,
    pub unload_remarks: String,
    pub master: Option<MasterDataFields>,
    pub status: RowStatus,
    lookup_generation: u64,
    /// Bumped on every change to the row's content.
    revision: u64,
}

impl DraftRow {
    fn blank(key: RowKey, common: &CommonFields) -> Self {
        Self {
            key,
            wsn: String::new(),
            inbound_date: common.inbound_date,
            vehicle_no: common.vehicle_no.clone(),
            product_serial_number: String::new(),
            rack_no: String::new(),
            unload_remarks: String::new(),
            master: None,
            status: RowStatus::Draft,
            lookup_generation: 0,
            revision: 0,
        }
    }

    pub fn has_wsn(&self) -> bool {
        !self.wsn.trim().is_empty()
    }

    pub fn is_saved(&self) -> bool {
        self.status == RowStatus::Saved
    }

    /// Text shown in a column: editable fields as typed, master data formatted.
    pub fn cell_text(&self, key: &str) -> String {
        match GridField::from_key(key) {
            Some(GridField::Wsn) => self.wsn.clone(),
            Some(GridField::InboundDate) => self.inbound_date.format("%Y-%m-%d").to_string(),
            Some(GridField::VehicleNo) => self.vehicle_no.clone(),
            Some(GridField::ProductSerialNumber) => self.product_serial_number.clone(),
            Some(GridField::RackNo) => self.rack_no.clone(),
            Some(GridField::UnloadRemarks) => self.unload_remarks.clone(),
            None => self
                .master
                .as_ref()
                .and_then(|m| m.field_text(key))
                .unwrap_or_default(),
        }
    }

    /// Content changed; a previous failure no longer describes the row.
    fn touch(&mut self) {
        self.revision += 1;
        if matches!(self.status, RowStatus::Failed(_)) {
            self.status = RowStatus::Draft;
        }
    }

    fn to_entry(&self) -> InboundEntry {
        InboundEntry {
            wsn: self.wsn.trim().to_string(),
            inbound_date: self.inbound_date,
            vehicle_no: self.vehicle_no.trim().to_string(),
            product_serial_number: self.product_serial_number.trim().to_string(),
            rack_no: self.rack_no.trim().to_string(),
            unload_remarks: self.unload_remarks.trim().to_string(),
            master: self.master.clone().unwrap_or_default(),
        }
    }
}

/// Issued when a WSN edit needs a master-data lookup. The answer is applied
/// only while the ticket's generation is still the row's latest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTicket {
    pub row_key: RowKey,
    pub generation: u64,
    pub wsn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {0} does not exist")]
    NoSuchRow(usize),
    #[error("row {0} is already saved")]
    RowSaved(usize),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Select a warehouse first")]
    NoWarehouse,
    #[error("No valid rows: enter at least one WSN")]
    NoValidRows,
    #[error("Resolve duplicate WSNs before submitting: {}", .0.join(", "))]
    Duplicates(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct SubmitPlan {
    pub request: MultiEntryRequest,
    /// `row_keys[i]` is the row sent as `request.entries[i]`.
    pub row_keys: Vec<RowKey>,
    /// Row revisions at planning time, aligned with `row_keys`.
    revisions: Vec<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitSummary {
    pub saved: usize,
    pub failed: usize,
}

#[derive(Clone, Debug)]
pub struct MultiEntryGrid {
    rows: Vec<DraftRow>,
    common: CommonFields,
    duplicates: DuplicateIndex,
    next_key: RowKey,
    next_generation: u64,
}

impl MultiEntryGrid {
    pub fn new(common: CommonFields) -> Self {
        let mut grid = Self {
            rows: Vec::new(),
            common,
            duplicates: DuplicateIndex::default(),
            next_key: 1,
            next_generation: 1,
        };
        grid.add_rows(INITIAL_ROWS);
        grid
    }

    pub fn rows(&self) -> &[DraftRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&DraftRow> {
        self.rows.get(index)
    }

    pub fn row_by_key(&self, key: RowKey) -> Option<&DraftRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn index_of(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|r| r.key == key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    /// Appends up to `n` blank rows carrying the common date and vehicle.
    /// Returns how many were added before reaching [`MAX_ROWS`].
    pub fn add_rows(&mut self, n: usize) -> usize {
        let room = MAX_ROWS.saturating_sub(self.rows.len());
        let count = n.min(room);
        for _ in 0..count {
            let row = DraftRow::blank(self.next_key, &self.common);
            self.next_key += 1;
            self.rows.push(row);
        }
        if count < n {
            log::warn!("multi-entry grid is capped at {} rows", MAX_ROWS);
        }
        count
    }

    pub fn remove_row(&mut self, index: usize) -> Option<DraftRow> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.rescan();
        Some(removed)
    }

    /// Drops every row and starts over with a fresh blank set.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.add_rows(INITIAL_ROWS);
        self.rescan();
    }

    pub fn update_cell(
        &mut self,
        index: usize,
        field: GridField,
        value: &str,
    ) -> Result<Option<LookupTicket>, GridError> {
        let generation = self.next_generation;
        let row = self.rows.get_mut(index).ok_or(GridError::NoSuchRow(index))?;
        if row.is_saved() {
            return Err(GridError::RowSaved(index));
        }

        let mut ticket = None;
        match field {
            GridField::Wsn => {
                if row.wsn == value {
                    return Ok(None);
                }
                row.wsn = value.to_string();
                // Master data belonged to the previous WSN; any lookup still
                // in flight for it is superseded.
                row.master = None;
                row.lookup_generation = generation;
                self.next_generation += 1;
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    ticket = Some(LookupTicket {
                        row_key: row.key,
                        generation,
                        wsn: trimmed.to_string(),
                    });
                }
            }
            GridField::InboundDate => {
                let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .map_err(|_| GridError::InvalidDate(value.to_string()))?;
                row.inbound_date = date;
            }
            GridField::VehicleNo => row.vehicle_no = value.to_string(),
            GridField::ProductSerialNumber => row.product_serial_number = value.to_string(),
            GridField::RackNo => row.rack_no = value.to_string(),
            GridField::UnloadRemarks => row.unload_remarks = value.to_string(),
        }
        row.touch();
        self.rescan();
        Ok(ticket)
    }

    /// Merges looked-up master data. Returns false when the ticket is stale
    /// (the row changed WSN again, was removed, or the grid was reset).
    pub fn apply_master_data(&mut self, ticket: &LookupTicket, fields: MasterDataFields) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.key == ticket.row_key) else {
            return false;
        };
        if row.lookup_generation != ticket.generation || row.is_saved() {
            log::debug!("discarding stale master data for {}", ticket.wsn);
            return false;
        }
        row.master = Some(fields);
        true
    }

    /// Sets the common date and writes it into every unsaved row, replacing
    /// dates typed per row. Failed rows return to draft.
    pub fn set_common_date(&mut self, date: NaiveDate) {
        self.common.inbound_date = date;
        for row in self.rows.iter_mut().filter(|r| !r.is_saved()) {
            if row.inbound_date != date {
                row.inbound_date = date;
                row.touch();
            }
        }
    }

    /// Same as [`Self::set_common_date`] for the vehicle number.
    pub fn set_common_vehicle(&mut self, vehicle_no: &str) {
        self.common.vehicle_no = vehicle_no.to_string();
        for row in self.rows.iter_mut().filter(|r| !r.is_saved()) {
            if row.vehicle_no != vehicle_no {
                row.vehicle_no = vehicle_no.to_string();
                row.touch();
            }
        }
    }

    pub fn set_existing_wsns(&mut self, wsns: Vec<String>) {
        self.duplicates.set_existing(wsns);
    }

    pub fn existing_wsn_count(&self) -> usize {
        self.duplicates.existing_len()
    }

    fn rescan(&mut self) {
        self.duplicates.rescan(
            self.rows
                .iter()
                .filter(|r| !r.is_saved())
                .map(|r| r.wsn.as_str()),
        );
    }

    pub fn is_duplicate(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .map(|r| !r.is_saved() && self.duplicates.is_duplicate(&r.wsn))
            .unwrap_or(false)
    }

    pub fn is_duplicate_key(&self, key: RowKey) -> bool {
        self.index_of(key).map(|i| self.is_duplicate(i)).unwrap_or(false)
    }

    /// Whether the flag comes from the stored set rather than the draft set.
    pub fn is_already_stored(&self, key: RowKey) -> bool {
        self.row_by_key(key)
            .map(|r| !r.is_saved() && self.duplicates.exists(&r.wsn))
            .unwrap_or(false)
    }

    /// Distinct duplicate WSNs among unsaved rows, sorted.
    pub fn duplicate_wsns(&self) -> Vec<String> {
        let mut found: Vec<String> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_duplicate(*i))
            .map(|(_, r)| r.wsn.trim().to_string())
            .collect();
        found.sort();
        found.dedup();
        found
    }

    pub fn pending_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_saved() && r.has_wsn()).count()
    }

    /// Validates locally and builds the batch request. No request may be sent
    /// when this fails.
    pub fn prepare_submit(&self, warehouse_id: Option<i64>) -> Result<SubmitPlan, SubmitError> {
        let warehouse_id = warehouse_id.ok_or(SubmitError::NoWarehouse)?;
        let candidates: Vec<&DraftRow> = self
            .rows
            .iter()
            .filter(|r| !r.is_saved() && r.has_wsn())
            .collect();
        if candidates.is_empty() {
            return Err(SubmitError::NoValidRows);
        }
        let duplicates = self.duplicate_wsns();
        if !duplicates.is_empty() {
            return Err(SubmitError::Duplicates(duplicates));
        }
        Ok(SubmitPlan {
            request: MultiEntryRequest {
                entries: candidates.iter().map(|r| r.to_entry()).collect(),
                warehouse_id,
            },
            row_keys: candidates.iter().map(|r| r.key).collect(),
            revisions: candidates.iter().map(|r| r.revision).collect(),
        })
    }

    /// Marks submitted rows from the index-aligned server results.
    ///
    /// A stored entry's WSN always joins the existing set, taken from the
    /// request rather than the row. Rows edited or removed while the request
    /// was in flight keep their current content as a draft.
    pub fn apply_results(
        &mut self,
        plan: &SubmitPlan,
        response: &MultiEntryResponse,
    ) -> SubmitSummary {
        let mut summary = SubmitSummary::default();
        for (i, key) in plan.row_keys.iter().enumerate() {
            let saved = response
                .results
                .get(i)
                .map(|r| r.status == EntryStatus::Success)
                .unwrap_or(false);
            if saved {
                summary.saved += 1;
                if let Some(entry) = plan.request.entries.get(i) {
                    self.duplicates.add_existing(&entry.wsn);
                }
            } else {
                summary.failed += 1;
            }

            let Some(row) = self.rows.iter_mut().find(|r| r.key == *key) else {
                continue;
            };
            if plan.revisions.get(i) != Some(&row.revision) {
                log::debug!("row {} changed during submission, kept as draft", key);
                continue;
            }
            let status = match response.results.get(i) {
                Some(result) if result.status == EntryStatus::Success => RowStatus::Saved,
                Some(result) => RowStatus::Failed(
                    result
                        .reason()
                        .unwrap_or(match result.status {
                            EntryStatus::Error => "Rejected by server",
                            _ => "Unknown result status",
                        })
                        .to_string(),
                ),
                None => RowStatus::Failed("No result returned".to_string()),
            };
            row.status = status;
        }
        self.rescan();
        summary
    }

    /// Enter-key handling; appends a row when leaving the last one.
    pub fn commit_move(&mut self, from: CellPos, columns: usize) -> CellPos {
        match next_focus(from, columns, self.rows.len()) {
            FocusMove::To(pos) => pos,
            FocusMove::AppendThen(pos) => {
                if self.add_rows(1) == 1 {
                    pos
                } else {
                    from
                }
            }
        }
    }
}
