//! Record ingestion from CSV exports and JSON document dumps.
//!
//! The engine does not own a storage layer; collections arrive wholesale from
//! an external source. This module covers the two offline shapes that source
//! takes in practice: a superstore-style CSV export and a JSON dump of the
//! document database (either a bare array of records, a `{"docs": [...]}`
//! bulk payload, or a `{"rows": [{"doc": ...}]}` view result).

use crate::error::{IngestError, Result};
use crate::refresh::RecordSource;
use crate::types::SaleRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::info;

/// Read sale records from a CSV export with a header row.
pub fn read_csv_records<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>> {
    let file = File::open(path.as_ref())?;
    let records = parse_csv_records(BufReader::new(file))?;
    info!(
        count = records.len(),
        path = %path.as_ref().display(),
        "loaded sale records from CSV"
    );
    Ok(records)
}

/// Deserialize sale records from any CSV reader.
///
/// Empty numeric fields become `None`; columns absent from the header fall
/// back to the record defaults.
pub fn parse_csv_records<R: Read>(reader: R) -> Result<Vec<SaleRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Read sale records from a JSON document dump.
pub fn read_json_records<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>> {
    let file = File::open(path.as_ref())?;
    let records = parse_json_records(BufReader::new(file))?;
    info!(
        count = records.len(),
        path = %path.as_ref().display(),
        "loaded sale records from JSON"
    );
    Ok(records)
}

/// Deserialize sale records from any JSON reader, accepting the bare-array,
/// bulk-docs, and view-rows payload shapes.
pub fn parse_json_records<R: Read>(reader: R) -> Result<Vec<SaleRecord>> {
    let payload: JsonPayload = serde_json::from_reader(reader)?;
    Ok(match payload {
        JsonPayload::Records(records) => records,
        JsonPayload::Docs { docs } => docs,
        JsonPayload::Rows { rows } => rows.into_iter().map(|row| row.doc).collect(),
    })
}

/// Read sale records from a path, dispatching on the file extension.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => read_csv_records(path),
        Some("json") => read_json_records(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Records(Vec<SaleRecord>),
    Docs { docs: Vec<SaleRecord> },
    Rows { rows: Vec<JsonRow> },
}

#[derive(Deserialize)]
struct JsonRow {
    doc: SaleRecord,
}

/// A [`RecordSource`] that re-reads a CSV or JSON file on every poll.
///
/// Stands in for the live document database in deployments where the export
/// lands on disk; each fetch returns the file's current contents wholesale.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn fetch(&self) -> Result<Vec<SaleRecord>> {
        read_records(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CSV_SAMPLE: &str = "\
Order_ID,Order_Date,Ship_Date,Region,Country,Category,Sales,Quantity,Profit
US-1,2023-01-15,2023-01-20,West,United States,Furniture,261.96,2,41.91
US-2,2023-08-01,,East,United States,Technology,,1,-10.50
";

    #[test]
    fn csv_rows_deserialize_with_missing_numerics() {
        let records = parse_csv_records(Cursor::new(CSV_SAMPLE)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_id, "US-1");
        assert_eq!(records[0].sales, Some(261.96));
        assert_eq!(records[1].sales, None);
        assert_eq!(records[1].ship_date, "");
        // Columns absent from the header default.
        assert_eq!(records[0].segment, "");
    }

    #[test]
    fn json_bare_array_and_docs_payloads() {
        let array = r#"[{"Order_ID": "A", "Sales": 10.0}]"#;
        let records = parse_json_records(Cursor::new(array)).unwrap();
        assert_eq!(records[0].order_id, "A");

        let docs = r#"{"docs": [{"Order_ID": "B", "Sales": 5.0}, {"Order_ID": "C"}]}"#;
        let records = parse_json_records(Cursor::new(docs)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sales, None);
    }

    #[test]
    fn json_view_rows_payload() {
        let rows = r#"{"rows": [{"doc": {"Order_ID": "D", "Region": "South"}}]}"#;
        let records = parse_json_records(Cursor::new(rows)).unwrap();
        assert_eq!(records[0].region, "South");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_records("sales.parquet").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }
}
