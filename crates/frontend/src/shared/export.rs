//! CSV export of table data for the spreadsheet crowd.
//!
//! Output is `;`-separated with a UTF-8 BOM so that spreadsheet apps pick the
//! right encoding. Only the columns passed in are written, in the given order.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// A row that can be rendered into named columns.
pub trait CsvExportable {
    fn cell(&self, key: &str) -> String;
}

/// (key, header) pairs in output order.
pub type CsvColumns<'a> = &'a [(&'a str, &'a str)];

pub fn build_csv<T: CsvExportable>(rows: &[T], columns: CsvColumns<'_>) -> String {
    let mut csv = String::new();
    csv.push('\u{FEFF}');

    let headers: Vec<String> = columns.iter().map(|(_, h)| escape_csv_cell(h)).collect();
    csv.push_str(&headers.join(";"));
    csv.push('\n');

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|(key, _)| escape_csv_cell(&row.cell(key)))
            .collect();
        csv.push_str(&cells.join(";"));
        csv.push('\n');
    }
    csv
}

/// Builds the CSV and starts a browser download.
pub fn export_csv<T: CsvExportable>(
    rows: &[T],
    columns: CsvColumns<'_>,
    filename: &str,
) -> Result<(), String> {
    if rows.is_empty() {
        return Err("Nothing to export".to_string());
    }
    let blob = create_csv_blob(&build_csv(rows, columns))?;
    download_blob(&blob, filename)
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "Failed to cast to anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl CsvExportable for Row {
        fn cell(&self, key: &str) -> String {
            match key {
                "wsn" => self.0.to_string(),
                "remarks" => self.1.to_string(),
                _ => String::new(),
            }
        }
    }

    #[test]
    fn test_build_csv_escapes_and_orders() {
        let rows = [Row("W1", "fine"), Row("W2", "box; \"torn\"")];
        let csv = build_csv(&rows, &[("remarks", "Remarks"), ("wsn", "WSN")]);
        assert_eq!(
            csv,
            "\u{FEFF}Remarks;WSN\nfine;W1\n\"box; \"\"torn\"\"\";W2\n"
        );
    }

    #[test]
    fn test_unknown_column_is_blank() {
        let csv = build_csv(&[Row("W1", "")], &[("wsn", "WSN"), ("brand", "Brand")]);
        assert_eq!(csv, "\u{FEFF}WSN;Brand\nW1;\n");
    }
}
