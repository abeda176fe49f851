//! Layout-free statement text parser
//!
//! Works on the flat text a PDF-to-text pass produces. Line breaks carry no
//! meaning; a transaction is any `MM/DD`, followed by the shortest stretch of
//! text that reaches an amount token:
//!   04/12 ACH PAYMENT   XYZ CORP 1,234.56
//!   04/15 PPD ID 1234567891,000.00        (processor ID glued to the amount)

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::amount::{ledger_amount, normalize_description};
use crate::types::{Extraction, TransactionRecord};

fn transaction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?s)(?P<date>[0-9]{2}/[0-9]{2})",
            r"(?P<desc>.*?)",
            r"(?P<amount>-?[0-9]{1,3}(?:,[0-9]{3})*\.[0-9]{2})"
        ))
        .expect("transaction regex")
    })
}

fn glued_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<id>[0-9]{9,})(?P<amount>[0-9]{1,3},[0-9]{3}\.[0-9]{2})").expect("glued id regex")
    })
}

/// One primary-pattern hit, before cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    /// Byte range of the whole match in the scanned text
    pub span: Range<usize>,
    pub date: &'a str,
    pub description: &'a str,
    pub amount: &'a str,
    /// Description immediately followed by the amount, as they sit in the text
    pub tail: &'a str,
}

/// An identifier printed with no gap before an amount, e.g. `1234567891,000.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GluedIdentifier<'a> {
    pub identifier: &'a str,
    pub amount: &'a str,
}

/// Scan `text` left to right for non-overlapping transaction matches.
///
/// Each search resumes where the previous match ended, so consumed text is
/// never revisited.
pub fn scan_matches(text: &str) -> Vec<RawMatch<'_>> {
    let re = transaction_re();
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };

        let (Some(whole), Some(date), Some(desc), Some(amount)) =
            (caps.get(0), caps.name("date"), caps.name("desc"), caps.name("amount"))
        else {
            break;
        };

        out.push(RawMatch {
            span: whole.range(),
            date: date.as_str(),
            description: desc.as_str(),
            amount: amount.as_str(),
            tail: &text[desc.start()..amount.end()],
        });

        // date is never empty, so the scan always advances
        pos = whole.end();
    }

    out
}

/// Find the first identifier-glued-to-amount occurrence in `span`.
pub fn split_glued_identifier(span: &str) -> Option<GluedIdentifier<'_>> {
    let caps = glued_re().captures(span)?;
    Some(GluedIdentifier {
        identifier: caps.name("id")?.as_str(),
        amount: caps.name("amount")?.as_str(),
    })
}

/// Turn one raw match into a record.
///
/// Returns `None` only if the amount token overflows `Decimal`.
pub fn build_record(m: &RawMatch<'_>) -> Option<TransactionRecord> {
    let (description, amount_raw) = match split_glued_identifier(m.tail) {
        Some(glued) => (glued.identifier.to_string(), glued.amount),
        None => (normalize_description(m.description), m.amount),
    };

    let amount: Decimal = match ledger_amount(amount_raw) {
        Some(v) => v,
        None => {
            tracing::warn!(
                date = m.date,
                amount = amount_raw,
                offset = m.span.start,
                "skipping match with unrepresentable amount"
            );
            return None;
        }
    };

    Some(TransactionRecord::new(m.date, description, amount))
}

/// Parse extracted statement text into transactions, in text order.
///
/// Never fails: text with nothing transaction-shaped is `Extraction::Empty`.
pub fn parse_statement_text(text: &str) -> Extraction {
    let matches = scan_matches(text);
    let records: Vec<TransactionRecord> = matches.iter().filter_map(build_record).collect();

    tracing::debug!(
        text_bytes = text.len(),
        matches = matches.len(),
        records = records.len(),
        "scanned statement text"
    );

    Extraction::from_records(records)
}
