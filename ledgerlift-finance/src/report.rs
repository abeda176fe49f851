//! Per-document outcome summary, in the shape the review surface reads.

use ledgerlift_ingest::{Extraction, TextExtractionError, TransactionRecord};
use serde::Serialize;

use crate::export::ExportSummary;

pub const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found in the PDF using the primary pattern.";

/// Which of the three pipeline outcomes a report describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Found,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub success: bool,
    pub outcome: Outcome,
    pub message: String,
    /// Name of the uploaded document
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_count: Option<usize>,
    pub transaction_data: Vec<TransactionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_file: Option<String>,
}

impl UploadReport {
    pub fn found(filename: &str, records: Vec<TransactionRecord>, export: Option<&ExportSummary>) -> Self {
        let n = records.len();
        let message = match export {
            Some(e) => format!("Data exported to {} with {} transactions", e.file_name, n),
            None => format!("Extracted {} transactions", n),
        };
        Self {
            success: true,
            outcome: Outcome::Found,
            message,
            filename: filename.to_string(),
            transaction_count: Some(n),
            transaction_data: records,
            export_file: export.map(|e| e.file_name.clone()),
        }
    }

    pub fn empty(filename: &str) -> Self {
        Self {
            success: false,
            outcome: Outcome::Empty,
            message: NO_TRANSACTIONS_MESSAGE.to_string(),
            filename: filename.to_string(),
            transaction_count: None,
            transaction_data: Vec::new(),
            export_file: None,
        }
    }

    pub fn failed(filename: &str, err: &TextExtractionError) -> Self {
        Self {
            success: false,
            outcome: Outcome::Failed,
            message: format!("Error processing PDF: {}", err),
            filename: filename.to_string(),
            transaction_count: None,
            transaction_data: Vec::new(),
            export_file: None,
        }
    }

    /// Build a report for an extraction that has not been exported.
    pub fn from_outcome(filename: &str, outcome: &Result<Extraction, TextExtractionError>) -> Self {
        match outcome {
            Ok(Extraction::Found(records)) => Self::found(filename, records.clone(), None),
            Ok(Extraction::Empty) => Self::empty(filename),
            Err(e) => Self::failed(filename, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    #[test]
    fn test_found_with_export() {
        let recs = vec![TransactionRecord::new("04/12", "ACH", Decimal::new(-100, 2))];
        let summary = ExportSummary {
            path: PathBuf::from("/tmp/expense_tracker_20260412_090503.csv"),
            file_name: "expense_tracker_20260412_090503.csv".into(),
            rows: 1,
        };
        let report = UploadReport::found("april.pdf", recs, Some(&summary));
        assert!(report.success);
        assert_eq!(
            report.message,
            "Data exported to expense_tracker_20260412_090503.csv with 1 transactions"
        );
        assert_eq!(report.transaction_count, Some(1));
        assert_eq!(report.outcome, Outcome::Found);
    }

    #[test]
    fn test_empty_and_failed_are_distinct() {
        let empty = UploadReport::from_outcome("a.pdf", &Ok(Extraction::Empty));
        let failed = UploadReport::from_outcome("a.pdf", &Err(TextExtractionError::NotPdf));

        assert!(!empty.success && !failed.success);
        assert_eq!(empty.outcome, Outcome::Empty);
        assert_eq!(failed.outcome, Outcome::Failed);
        assert_eq!(empty.message, NO_TRANSACTIONS_MESSAGE);
        assert_eq!(failed.message, "Error processing PDF: not a PDF document");
        assert!(empty.transaction_data.is_empty() && failed.transaction_data.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let v = serde_json::to_value(UploadReport::empty("a.pdf")).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["outcome"], "empty");
        assert_eq!(v["transaction_data"], serde_json::json!([]));
        assert!(v.get("export_file").is_none());

        let failed = UploadReport::failed("a.pdf", &TextExtractionError::EmptyDocument);
        let v = serde_json::to_value(failed).unwrap();
        assert_eq!(v["outcome"], "failed");
    }
}
