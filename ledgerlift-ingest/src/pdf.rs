//! PDF-to-text stage.
//!
//! Produces one concatenated string for the whole document. Page and layout
//! information is discarded; the statement parser does not need it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Why a document could not be turned into text. None of these are retryable.
#[derive(Debug, Error)]
pub enum TextExtractionError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("document is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("not a PDF document")]
    NotPdf,

    #[error("could not decode document: {0}")]
    Decode(String),

    #[error("extracted text is {size} bytes, limit is {limit}")]
    TextTooLarge { size: usize, limit: usize },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Input caps that bound scan time on pathological documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractLimits {
    pub max_document_bytes: usize,
    pub max_text_bytes: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: 20 * 1024 * 1024,
            max_text_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Check size and magic bytes before handing the document to the decoder.
pub fn check_document(bytes: &[u8], limits: &ExtractLimits) -> Result<(), TextExtractionError> {
    if bytes.is_empty() {
        return Err(TextExtractionError::EmptyDocument);
    }
    if bytes.len() > limits.max_document_bytes {
        return Err(TextExtractionError::TooLarge {
            size: bytes.len(),
            limit: limits.max_document_bytes,
        });
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(TextExtractionError::NotPdf);
    }
    Ok(())
}

/// Extract the full text of a PDF held in memory.
pub fn extract_text(bytes: &[u8], limits: &ExtractLimits) -> Result<String, TextExtractionError> {
    check_document(bytes, limits)?;

    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| TextExtractionError::Decode(e.to_string()))?;

    if text.len() > limits.max_text_bytes {
        return Err(TextExtractionError::TextTooLarge {
            size: text.len(),
            limit: limits.max_text_bytes,
        });
    }

    tracing::debug!(document_bytes = bytes.len(), text_bytes = text.len(), "extracted pdf text");
    Ok(text)
}

/// Read a PDF from disk and extract its text.
pub fn read_document(path: impl AsRef<Path>, limits: &ExtractLimits) -> Result<String, TextExtractionError> {
    let bytes = read_bytes(path.as_ref())?;
    extract_text(&bytes, limits)
}

/// Read text that was already extracted elsewhere, under the same text cap.
pub fn read_text(path: impl AsRef<Path>, limits: &ExtractLimits) -> Result<String, TextExtractionError> {
    let bytes = read_bytes(path.as_ref())?;
    if bytes.len() > limits.max_text_bytes {
        return Err(TextExtractionError::TextTooLarge {
            size: bytes.len(),
            limit: limits.max_text_bytes,
        });
    }
    String::from_utf8(bytes).map_err(|e| TextExtractionError::Decode(e.to_string()))
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, TextExtractionError> {
    std::fs::read(path).map_err(|source| TextExtractionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        let err = extract_text(b"", &ExtractLimits::default()).unwrap_err();
        assert!(matches!(err, TextExtractionError::EmptyDocument));
    }

    #[test]
    fn test_rejects_oversized_before_decoding() {
        let limits = ExtractLimits {
            max_document_bytes: 8,
            ..ExtractLimits::default()
        };
        let err = extract_text(b"%PDF-1.7 and then some", &limits).unwrap_err();
        assert!(matches!(err, TextExtractionError::TooLarge { size: 22, limit: 8 }));
    }

    #[test]
    fn test_rejects_non_pdf() {
        let err = extract_text(b"Date,Description,Amount\n", &ExtractLimits::default()).unwrap_err();
        assert!(matches!(err, TextExtractionError::NotPdf));
        assert_eq!(err.to_string(), "not a PDF document");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_document("/definitely/not/here.pdf", &ExtractLimits::default()).unwrap_err();
        match err {
            TextExtractionError::Io { path, .. } => assert_eq!(path, PathBuf::from("/definitely/not/here.pdf")),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_read_text_caps_size() {
        let path = std::env::temp_dir().join(format!("ledgerlift-read-text-{}.txt", std::process::id()));
        std::fs::write(&path, "04/12 ACH PAYMENT 1,234.56").unwrap();

        let small = ExtractLimits {
            max_text_bytes: 4,
            ..ExtractLimits::default()
        };
        let err = read_text(&path, &small).unwrap_err();
        assert!(matches!(err, TextExtractionError::TextTooLarge { limit: 4, .. }));

        let text = read_text(&path, &ExtractLimits::default()).unwrap();
        assert!(text.starts_with("04/12"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let limits: ExtractLimits = serde_json::from_str(r#"{"max_text_bytes": 1024}"#).unwrap();
        assert_eq!(limits.max_text_bytes, 1024);
        assert_eq!(limits.max_document_bytes, ExtractLimits::default().max_document_bytes);
    }
}
