//! ledgerlift-ingest: statement text extraction, the transaction parser, and
//! the record type everything downstream consumes.

pub mod amount;
pub mod parsers;
pub mod pdf;
pub mod types;

use std::path::Path;

pub use parsers::parse_statement_text;
pub use pdf::{ExtractLimits, TextExtractionError};
pub use types::{Extraction, TransactionRecord};

/// Bytes to records: PDF text extraction followed by the statement parser.
///
/// `Err` means the document itself was unreadable. A readable document with
/// nothing transaction-shaped in it is `Ok(Extraction::Empty)`.
pub fn process_document(bytes: &[u8], limits: &ExtractLimits) -> Result<Extraction, TextExtractionError> {
    let text = pdf::extract_text(bytes, limits)?;
    Ok(parse_statement_text(&text))
}

/// Parse text that was extracted elsewhere (e.g. a saved debug dump).
pub fn process_text_file(path: impl AsRef<Path>, limits: &ExtractLimits) -> Result<Extraction, TextExtractionError> {
    let text = pdf::read_text(path, limits)?;
    Ok(parse_statement_text(&text))
}

/// Same as [`process_document`], reading the PDF from disk first.
pub fn process_file(path: impl AsRef<Path>, limits: &ExtractLimits) -> Result<Extraction, TextExtractionError> {
    let bytes = pdf::read_bytes(path.as_ref())?;
    process_document(&bytes, limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_failure_is_not_empty() {
        let res = process_document(b"plain text, not a pdf", &ExtractLimits::default());
        assert!(matches!(res, Err(TextExtractionError::NotPdf)));
    }
}
