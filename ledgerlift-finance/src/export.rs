//! Spreadsheet export of extracted or reviewed transactions.
//!
//! One CSV file per export, columns:
//!   Date,Category,Subcategory,Amount,Description

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use ledgerlift_ingest::TransactionRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::review::EditedRecord;

pub const COLUMNS: [&str; 5] = ["Date", "Category", "Subcategory", "Amount", "Description"];

pub const DEFAULT_PREFIX: &str = "expense_tracker";
pub const DEFAULT_UPDATED_PREFIX: &str = "updated_expense_tracker";

/// One output row, already rendered to cell text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportRow {
    pub date: String,
    pub category: String,
    pub subcategory: String,
    pub amount: String,
    pub description: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.category.as_str(),
            self.subcategory.as_str(),
            self.amount.as_str(),
            self.description.as_str(),
        ]
    }
}

impl From<&TransactionRecord> for ExportRow {
    fn from(r: &TransactionRecord) -> Self {
        ExportRow {
            date: r.date.clone(),
            category: r.category.clone(),
            subcategory: r.subcategory.clone(),
            amount: format_amount(r.amount),
            description: r.description.clone(),
        }
    }
}

/// Amount cell text, always two fractional digits ("-4.50", "0.00").
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// What an export produced
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub file_name: String,
    pub rows: usize,
}

/// `<prefix>_<YYYYMMDD_HHMMSS>.csv`
pub fn export_file_name(prefix: &str, now: NaiveDateTime) -> String {
    format!("{}_{}.csv", prefix, now.format("%Y%m%d_%H%M%S"))
}

/// Write the header and rows to any writer.
pub fn write_rows<W: io::Write>(writer: W, rows: &[ExportRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows to a new timestamped file in `dir`, creating `dir` if needed.
pub fn export_rows(dir: &Path, prefix: &str, now: NaiveDateTime, rows: &[ExportRow]) -> Result<ExportSummary> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let file_name = export_file_name(prefix, now);
    let path = dir.join(&file_name);
    let file = fs::File::create(&path).with_context(|| format!("create {}", path.display()))?;
    write_rows(file, rows).with_context(|| format!("write {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = rows.len(), "exported transactions");

    Ok(ExportSummary {
        path,
        file_name,
        rows: rows.len(),
    })
}

/// Export freshly extracted records.
pub fn export_records(
    dir: &Path,
    records: &[TransactionRecord],
    prefix: &str,
    now: NaiveDateTime,
) -> Result<ExportSummary> {
    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();
    export_rows(dir, prefix, now, &rows)
}

/// Export reviewed records, filling blanks for missing fields.
pub fn export_edited(dir: &Path, edits: &[EditedRecord], prefix: &str, now: NaiveDateTime) -> Result<ExportSummary> {
    let rows: Vec<ExportRow> = edits.iter().cloned().map(EditedRecord::into_row).collect();
    export_rows(dir, prefix, now, &rows)
}

/// Resolve a previously exported file by bare name.
///
/// Only plain file names are accepted, so callers can't reach outside `dir`.
pub fn locate_export(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let name = Path::new(file_name);
    let is_plain = name.components().count() == 1 && name.file_name().is_some_and(|n| n == name.as_os_str());
    if file_name.is_empty() || !is_plain {
        bail!("invalid export name: {}", file_name);
    }

    let path = dir.join(name);
    if !path.is_file() {
        bail!("File not found: {}", file_name);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 12)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap()
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(export_file_name(DEFAULT_PREFIX, at()), "expense_tracker_20260412_090503.csv");
    }

    #[test]
    fn test_format_amount_pads_scale() {
        assert_eq!(format_amount(Decimal::new(-45, 1)), "-4.50");
        assert_eq!(format_amount(Decimal::new(-123456, 2)), "-1234.56");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_write_rows_column_order_and_quoting() {
        let rec = TransactionRecord::new("04/12", "ACH PAYMENT, XYZ CORP", Decimal::new(-123456, 2));
        let mut buf = Vec::new();
        write_rows(&mut buf, &[ExportRow::from(&rec)]).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "Date,Category,Subcategory,Amount,Description\n04/12,,,-1234.56,\"ACH PAYMENT, XYZ CORP\"\n"
        );
    }

    #[test]
    fn test_export_edited_blank_amount() {
        let dir = tempfile::tempdir().unwrap();
        let edits = vec![EditedRecord {
            date: Some("05/01".into()),
            category: Some("Food".into()),
            ..Default::default()
        }];
        let summary = export_edited(dir.path(), &edits, DEFAULT_UPDATED_PREFIX, at()).unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.file_name, "updated_expense_tracker_20260412_090503.csv");

        let body = fs::read_to_string(&summary.path).unwrap();
        assert_eq!(body.lines().nth(1), Some("05/01,Food,,,"));
    }

    #[test]
    fn test_export_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results").join("2026");
        let summary = export_records(&nested, &[], DEFAULT_PREFIX, at()).unwrap();
        assert!(summary.path.is_file());
        assert_eq!(summary.rows, 0);
    }

    #[test]
    fn test_locate_export() {
        let dir = tempfile::tempdir().unwrap();
        let summary = export_records(dir.path(), &[], DEFAULT_PREFIX, at()).unwrap();

        assert_eq!(locate_export(dir.path(), &summary.file_name).unwrap(), summary.path);
        assert!(locate_export(dir.path(), "missing.csv").is_err());
        assert!(locate_export(dir.path(), "../etc/passwd").is_err());
        assert!(locate_export(dir.path(), "").is_err());
    }
}
