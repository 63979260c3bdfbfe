/// CSV export of grid rows and browser download of generated files
use contracts::domain::common::EntityRecord;
use contracts::shared::date::normalize_date;
use contracts::shared::metadata::{list_fields, FieldType};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Write a header row and data rows as comma-separated CSV
pub fn rows_to_csv<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers.iter().map(|h| h.as_ref()))
        .map_err(|e| e.to_string())?;
    for row in rows {
        writer.write_record(row).map_err(|e| e.to_string())?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Grid columns of `records` as CSV, headed by field names.
///
/// Dates are written in canonical form, so the file can be uploaded back.
pub fn records_to_csv<T: EntityRecord>(records: &[T]) -> Result<String, String> {
    let fields = list_fields(T::fields());
    let headers: Vec<&str> = fields.iter().map(|f| f.name).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|f| {
                    let value = record.field_value(f.name).unwrap_or_default();
                    if f.field_type == FieldType::Date {
                        normalize_date(&value).unwrap_or(value)
                    } else {
                        value
                    }
                })
                .collect()
        })
        .collect();
    rows_to_csv(&headers, &rows)
}

/// Download CSV text as a file
pub fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    // UTF-8 BOM for spreadsheet applications
    let with_bom = format!("\u{FEFF}{}", content);
    let blob = create_csv_blob(&with_bom)?;
    download_blob(&blob, filename)
}

/// Export records and start the download
pub fn export_records<T: EntityRecord>(records: &[T], filename: &str) -> Result<(), String> {
    if records.is_empty() {
        return Err("No data to export".to_string());
    }
    let content = records_to_csv(records)?;
    download_csv(&content, filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a101_manufacture_order::aggregate::ManufactureOrder;

    #[test]
    fn test_cells_with_commas_are_quoted() {
        let csv = rows_to_csv(
            &["supplier_name", "product"],
            &[vec!["Acme, Inc.".to_string(), "Bolt".to_string()]],
        )
        .unwrap();
        assert_eq!(csv, "supplier_name,product\n\"Acme, Inc.\",Bolt\n");
    }

    #[test]
    fn test_records_export_uses_canonical_dates() {
        let order = ManufactureOrder {
            id: 7,
            supplier_name: "Supplier A".to_string(),
            product: "Product A".to_string(),
            sku: "SKU001".to_string(),
            quantity: 100,
            unit_cost: 12.5,
            currency: "USD".to_string(),
            order_date: "2024-03-20T00:00:00".to_string(),
            total_cost: 1250.0,
            quantity_left: 40,
        };
        let csv = records_to_csv(&[order]).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("id,supplier_name,product,sku"));
        let row = lines.next().unwrap();
        assert!(row.contains(",2024-03-20,"));
        assert!(!row.contains('T'));
    }
}
