//! Value transforms for matched amount and description text.
//!
//! Statements print outflows as positive magnitudes with `,` thousands
//! separators; the ledger stores outflows as negative values.

use rust_decimal::Decimal;

/// Remove every `,` from an amount token ("1,234.56" -> "1234.56").
pub fn strip_thousands_separators(raw: &str) -> String {
    raw.replace(',', "")
}

/// Parse an amount token as a fixed-point decimal.
///
/// Returns `None` when the token is not a decimal number, or when it does
/// not fit in a `Decimal` without losing fractional digits. `FromStr` rounds
/// away trailing places once the mantissa is full, so the scale is checked
/// against the digits actually written.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let token = strip_thousands_separators(raw.trim());
    let places = token.split_once('.').map_or(0, |(_, frac)| frac.len());
    let value = token.parse::<Decimal>().ok()?;
    (value.scale() as usize == places).then_some(value)
}

/// Flip the statement sign into the ledger sign. Zero stays positive zero.
pub fn invert_sign(value: Decimal) -> Decimal {
    let mut inverted = -value;
    if inverted.is_zero() {
        inverted.set_sign_positive(true);
    }
    inverted
}

/// Parse and invert in one step: the value a record stores for a raw token.
pub fn ledger_amount(raw: &str) -> Option<Decimal> {
    parse_amount(raw).map(invert_sign)
}

/// Trim, then collapse every whitespace run (newlines and tabs included)
/// to a single ASCII space.
pub fn normalize_description(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
