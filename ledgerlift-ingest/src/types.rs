use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One transaction recovered from statement text.
///
/// Field order is the column order every downstream consumer relies on:
/// date, category, subcategory, amount, description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// `MM/DD` as printed on the statement (no year, not calendar-checked)
    pub date: String,
    /// Assigned during review; always empty when produced by extraction
    pub category: String,
    pub subcategory: String,
    /// Ledger convention: outflows negative. Inverted from the statement's sign.
    pub amount: Decimal,
    /// Whitespace-normalized description text
    pub description: String,
}

impl TransactionRecord {
    pub fn new(date: impl Into<String>, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date: date.into(),
            category: String::new(),
            subcategory: String::new(),
            amount,
            description: description.into(),
        }
    }

    /// Money leaving the account (a negative ledger amount). Zero is neither.
    pub fn is_outflow(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// Result of scanning one document's text.
///
/// `Empty` is a normal outcome for documents that don't follow the expected
/// statement layout; it is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(Vec<TransactionRecord>),
    Empty,
}

impl Extraction {
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        if records.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Found(records)
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        match self {
            Extraction::Found(records) => records,
            Extraction::Empty => &[],
        }
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        match self {
            Extraction::Found(records) => records,
            Extraction::Empty => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Extraction::Empty)
    }
}
