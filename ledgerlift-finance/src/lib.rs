//! ledgerlift-finance: review taxonomy, edit normalization, and spreadsheet export

pub mod categories;
pub mod export;
pub mod report;
pub mod review;

pub use categories::{Category, LabelCheck};
pub use export::{ExportRow, ExportSummary, export_edited, export_records};
pub use report::{Outcome, UploadReport};
pub use review::{EditedRecord, UpdateRequest, validate_update};
