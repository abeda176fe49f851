//! Records coming back from review.
//!
//! The review surface may drop fields, send capitalized keys (`Date`,
//! `Amount`, ...) or leave the amount blank; everything here tolerates that
//! and fills defaults instead of rejecting the row.

use anyhow::{Result, bail};
use ledgerlift_ingest::amount::parse_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::categories::{LabelCheck, check, owning_category};
use crate::export::{ExportRow, format_amount};

/// A transaction as edited during review. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedRecord {
    #[serde(default, alias = "Date")]
    pub date: Option<String>,
    #[serde(default, alias = "Category")]
    pub category: Option<String>,
    #[serde(default, alias = "Subcategory")]
    pub subcategory: Option<String>,
    #[serde(default, alias = "Amount", deserialize_with = "lenient_amount")]
    pub amount: Option<Decimal>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
}

impl EditedRecord {
    /// Missing text becomes an empty cell; a missing amount stays blank.
    ///
    /// A blank category is filled in from the subcategory when only one
    /// category owns it.
    pub fn into_row(self) -> ExportRow {
        let category = match self.category.filter(|c| !c.trim().is_empty()) {
            Some(c) => c,
            None => self
                .subcategory
                .as_deref()
                .and_then(owning_category)
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
        };
        ExportRow {
            date: self.date.unwrap_or_default(),
            category,
            subcategory: self.subcategory.unwrap_or_default(),
            amount: self.amount.map(format_amount).unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }

    pub fn label_check(&self) -> LabelCheck {
        check(
            self.category.as_deref().unwrap_or(""),
            self.subcategory.as_deref().unwrap_or(""),
        )
    }
}

/// Request to re-export a reviewed set of transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Name of the uploaded statement, kept for context in logs
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub transactions: Option<Vec<EditedRecord>>,
}

impl UpdateRequest {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Reject requests missing the upload name or carrying no transactions.
pub fn validate_update(req: &UpdateRequest) -> Result<&[EditedRecord]> {
    let Some(transactions) = req.transactions.as_deref() else {
        bail!("Missing required data (transactions or filename)");
    };
    if req.filename.trim().is_empty() {
        bail!("Missing required data (transactions or filename)");
    }
    if transactions.is_empty() {
        bail!("No transaction data provided");
    }
    Ok(transactions)
}

/// Rows whose labels fall outside the taxonomy, by index.
pub fn label_warnings(records: &[EditedRecord]) -> Vec<(usize, LabelCheck)> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (i, r.label_check()))
        .filter(|(_, c)| !c.is_ok())
        .collect()
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(Decimal),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        // "1,234.56" typed by hand during review
        Some(Raw::Text(s)) => parse_amount(&s)
            .map(Some)
            .ok_or_else(|| <D::Error as serde::de::Error>::custom(format!("amount is not a number: {s:?}"))),
    }
}
