//! Master column lists of the inbound screens, in canonical order.

use crate::shared::column_settings::ColumnDef;
use crate::shared::date_utils::format_date;
use crate::shared::export::CsvExportable;
use contracts::domain::a003_inbound::InboundRecord;

pub static MULTI_ENTRY_COLUMNS: [ColumnDef; 16] = [
    ColumnDef::locked("wsn", "WSN"),
    ColumnDef::new("inbound_date", "Inbound date"),
    ColumnDef::new("vehicle_no", "Vehicle no"),
    ColumnDef::new("product_serial_number", "Serial no"),
    ColumnDef::new("rack_no", "Rack"),
    ColumnDef::new("unload_remarks", "Unload remarks"),
    ColumnDef::new("fsn", "FSN"),
    ColumnDef::new("product_title", "Product"),
    ColumnDef::new("brand", "Brand"),
    ColumnDef::new("mrp", "MRP"),
    ColumnDef::new("fsp", "FSP"),
    ColumnDef::new("hsn_sac", "HSN/SAC"),
    ColumnDef::new("igst_rate", "IGST %"),
    ColumnDef::new("cms_vertical", "Category"),
    ColumnDef::new("fkt_link", "Link"),
    ColumnDef::new("wid", "WID"),
];

pub const MULTI_ENTRY_DEFAULTS: [&str; 9] = [
    "wsn",
    "inbound_date",
    "vehicle_no",
    "product_serial_number",
    "rack_no",
    "unload_remarks",
    "product_title",
    "brand",
    "mrp",
];

pub static INBOUND_LIST_COLUMNS: [ColumnDef; 16] = [
    ColumnDef::locked("wsn", "WSN"),
    ColumnDef::new("inbound_date", "Inbound date"),
    ColumnDef::new("vehicle_no", "Vehicle no"),
    ColumnDef::new("product_serial_number", "Serial no"),
    ColumnDef::new("rack_no", "Rack"),
    ColumnDef::new("unload_remarks", "Unload remarks"),
    ColumnDef::new("fsn", "FSN"),
    ColumnDef::new("product_title", "Product"),
    ColumnDef::new("brand", "Brand"),
    ColumnDef::new("mrp", "MRP"),
    ColumnDef::new("fsp", "FSP"),
    ColumnDef::new("hsn_sac", "HSN/SAC"),
    ColumnDef::new("igst_rate", "IGST %"),
    ColumnDef::new("cms_vertical", "Category"),
    ColumnDef::new("batch_id", "Batch"),
    ColumnDef::new("created_at", "Created"),
];

pub const INBOUND_LIST_DEFAULTS: [&str; 8] = [
    "wsn",
    "inbound_date",
    "vehicle_no",
    "rack_no",
    "product_title",
    "brand",
    "cms_vertical",
    "batch_id",
];

/// Text of one list column for a record; the same text goes into exports.
pub fn record_cell(record: &InboundRecord, key: &str) -> String {
    let entry = &record.entry;
    match key {
        "wsn" => entry.wsn.clone(),
        "inbound_date" => entry.inbound_date.format("%d.%m.%Y").to_string(),
        "vehicle_no" => entry.vehicle_no.clone(),
        "product_serial_number" => entry.product_serial_number.clone(),
        "rack_no" => entry.rack_no.clone(),
        "unload_remarks" => entry.unload_remarks.clone(),
        "batch_id" => record.batch_id.clone().unwrap_or_default(),
        "created_at" => format_date(&record.created_at),
        other => entry.master.field_text(other).unwrap_or_default(),
    }
}

impl CsvExportable for InboundRecord {
    fn cell(&self, key: &str) -> String {
        record_cell(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::column_settings::ColumnConfig;
    use chrono::NaiveDate;
    use contracts::domain::a003_inbound::InboundEntry;

    #[test]
    fn test_defaults_are_known_columns() {
        let grid = ColumnConfig::new(&MULTI_ENTRY_COLUMNS, &MULTI_ENTRY_DEFAULTS);
        assert_eq!(grid.visible_keys(), &MULTI_ENTRY_DEFAULTS);
        let list = ColumnConfig::new(&INBOUND_LIST_COLUMNS, &INBOUND_LIST_DEFAULTS);
        assert_eq!(list.visible_keys(), &INBOUND_LIST_DEFAULTS);
    }

    #[test]
    fn test_record_cell() {
        let mut entry = InboundEntry::blank(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        entry.wsn = "W-9".into();
        entry.master.mrp = Some(250.0);
        let record = InboundRecord {
            id: 1,
            entry,
            batch_id: Some("B-1".into()),
            warehouse_id: 2,
            created_at: "2024-05-02T08:00:00Z".into(),
        };
        assert_eq!(record_cell(&record, "wsn"), "W-9");
        assert_eq!(record_cell(&record, "inbound_date"), "01.05.2024");
        assert_eq!(record_cell(&record, "mrp"), "250");
        assert_eq!(record_cell(&record, "brand"), "");
        assert_eq!(record_cell(&record, "batch_id"), "B-1");
        assert_eq!(record_cell(&record, "created_at"), "02.05.2024");
    }
}
