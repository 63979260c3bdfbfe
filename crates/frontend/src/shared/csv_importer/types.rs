use crate::shared::export::rows_to_csv;
use contracts::domain::common::EntityRecord;
use contracts::shared::date::normalize_date;
use contracts::shared::form::{payload_from_values, validate_form, FormValues};
use contracts::shared::metadata::{form_fields, FieldMetadata, FieldType};
use std::collections::HashMap;
use thiserror::Error;

/// Failure of reading an uploaded CSV file
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsvImportError {
    #[error("The file is empty")]
    Empty,
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("The file has no data rows")]
    NoRows,
    #[error("Line {line}: {message}")]
    Row { line: u64, message: String },
    #[error("Invalid CSV: {0}")]
    Malformed(String),
}

/// Expected column of an upload file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvColumn {
    pub field: &'static FieldMetadata,
}

impl CsvColumn {
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    fn is_sku(&self) -> bool {
        self.field.name.eq_ignore_ascii_case("sku")
    }
}

/// Upload template of an entity: the create-form fields in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTemplate {
    pub columns: Vec<CsvColumn>,
    pub example: Vec<String>,
    pub file_name: &'static str,
}

impl CsvTemplate {
    pub fn for_entity<T: EntityRecord>() -> Self {
        Self {
            columns: form_fields(T::fields())
                .into_iter()
                .map(|field| CsvColumn { field })
                .collect(),
            example: T::csv_example().iter().map(|v| v.to_string()).collect(),
            file_name: T::metadata().ui.template_file,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(CsvColumn::name).collect()
    }

    /// Header row plus one example row
    pub fn to_csv(&self) -> Result<String, String> {
        rows_to_csv(&self.headers(), &[self.example.clone()])
    }

    /// Read raw rows keyed by field name.
    ///
    /// Headers match case-insensitively, extra columns are ignored and blank
    /// rows skipped. SKU values are upper-cased and dates normalized.
    pub fn parse(&self, text: &str) -> Result<Vec<(u64, FormValues)>, CsvImportError> {
        let text = text.trim_start_matches('\u{FEFF}');
        if text.trim().is_empty() {
            return Err(CsvImportError::Empty);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let header_indices: HashMap<String, usize> = reader
            .headers()
            .map_err(|e| CsvImportError::Malformed(e.to_string()))?
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.trim().to_lowercase(), idx))
            .collect();

        let mut indices = Vec::with_capacity(self.columns.len());
        let mut missing = Vec::new();
        for column in &self.columns {
            match header_indices.get(&column.name().to_lowercase()) {
                Some(&idx) => indices.push((column, idx)),
                None => missing.push(column.name().to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(CsvImportError::MissingColumns(missing));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| CsvImportError::Malformed(e.to_string()))?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let mut values = FormValues::new();
            for (column, idx) in &indices {
                let raw = record.get(*idx).unwrap_or("").trim();
                let value = if column.is_sku() {
                    raw.to_uppercase()
                } else if column.field.field_type == FieldType::Date && !raw.is_empty() {
                    normalize_date(raw).ok_or_else(|| CsvImportError::Row {
                        line,
                        message: format!("{} has an invalid date '{}'", column.name(), raw),
                    })?
                } else {
                    raw.to_string()
                };
                values.insert(column.name().to_string(), value);
            }
            rows.push((line, values));
        }

        if rows.is_empty() {
            return Err(CsvImportError::NoRows);
        }
        Ok(rows)
    }
}

/// Parse an upload file into create payloads.
///
/// The whole file is rejected on the first invalid row, so nothing is sent.
pub fn parse_records<T: EntityRecord>(text: &str) -> Result<Vec<T::Create>, CsvImportError> {
    let template = CsvTemplate::for_entity::<T>();
    let fields = form_fields(T::fields());
    template
        .parse(text)?
        .into_iter()
        .map(|(line, values)| {
            let errors = validate_form(&fields, &values);
            if let Some(message) = errors.values().next() {
                return Err(CsvImportError::Row {
                    line,
                    message: message.clone(),
                });
            }
            payload_from_values::<T::Create>(&fields, &values, false).map_err(|errors| {
                CsvImportError::Row {
                    line,
                    message: errors.into_values().collect::<Vec<_>>().join("; "),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::records_to_csv;
    use contracts::domain::a101_manufacture_order::aggregate::ManufactureOrder;
    use contracts::domain::a102_return_order::aggregate::ReturnOrder;
    use contracts::domain::a103_sales_record::aggregate::{SalesRecord, SalesRecordCreate};

    #[test]
    fn test_sales_row_is_normalized() {
        let text = "sales_record_id,sales_date,sku,quantity_sold,customer_name\n\
                    SR123,2024/03/20,sku001,10,Customer A\n";
        let records = parse_records::<SalesRecord>(text).unwrap();
        assert_eq!(
            records,
            vec![SalesRecordCreate {
                sales_record_id: "SR123".to_string(),
                sales_date: "2024-03-20".to_string(),
                sku: "SKU001".to_string(),
                quantity_sold: 10,
                customer_name: "Customer A".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_column_rejects_file() {
        let text = "sales_record_id,sales_date,sku,customer_name\nSR1,2024-03-20,A,B\n";
        assert_eq!(
            parse_records::<SalesRecord>(text),
            Err(CsvImportError::MissingColumns(vec!["quantity_sold".to_string()]))
        );
    }

    #[test]
    fn test_headers_match_case_insensitively_and_extra_columns_are_ignored() {
        let text = "\u{FEFF}Return_Order_ID,sku,RETURN_DATE,return_quantity,customer_name,reason,note\n\
                    RO-1,abc-9,20.03.2024,2,Customer A,Damaged,ignored\n\
                    ,,,,,,\n";
        let rows = CsvTemplate::for_entity::<ReturnOrder>().parse(text).unwrap();
        assert_eq!(rows.len(), 1);
        let (line, values) = &rows[0];
        assert_eq!(*line, 2);
        assert_eq!(values["SKU"], "ABC-9");
        assert_eq!(values["return_date"], "2024-03-20");
        assert!(!values.contains_key("note"));
    }

    #[test]
    fn test_invalid_row_reports_line() {
        let text = "sales_record_id,sales_date,sku,quantity_sold,customer_name\n\
                    SR1,2024-03-20,A,5,Customer A\n\
                    SR2,2024-03-21,B,-3,Customer A\n";
        match parse_records::<SalesRecord>(text) {
            Err(CsvImportError::Row { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected row error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let text = "sales_record_id,sales_date,sku,quantity_sold,customer_name\n";
        assert_eq!(parse_records::<SalesRecord>(text), Err(CsvImportError::NoRows));
        assert_eq!(parse_records::<SalesRecord>("  \n"), Err(CsvImportError::Empty));
    }

    #[test]
    fn test_template_lists_form_fields_with_example() {
        let csv = CsvTemplate::for_entity::<ManufactureOrder>().to_csv().unwrap();
        assert_eq!(
            csv,
            "supplier_name,product,sku,quantity,unit_cost,currency,order_date\n\
             Supplier A,Product A,SKU001,100,12.50,USD,2024-03-20\n"
        );
        assert_eq!(parse_records::<ManufactureOrder>(&csv).unwrap().len(), 1);
    }

    #[test]
    fn test_exported_records_upload_back() {
        let records = vec![
            SalesRecord {
                sales_record_id: "SR1".to_string(),
                sales_date: "2024-03-20T10:00:00".to_string(),
                sku: "SKU001".to_string(),
                quantity_sold: 3,
                customer_name: "Customer, Ltd".to_string(),
            },
            SalesRecord {
                sales_record_id: "SR2".to_string(),
                sales_date: "2024-03-21".to_string(),
                sku: "SKU002".to_string(),
                quantity_sold: 7,
                customer_name: "Customer B".to_string(),
            },
        ];
        let csv = records_to_csv(&records).unwrap();
        let parsed = parse_records::<SalesRecord>(&csv).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].sales_date, "2024-03-20");
        assert_eq!(parsed[0].customer_name, "Customer, Ltd");
        assert_eq!(parsed[1].quantity_sold, 7);
    }
}
