//! Input line format handling
//!
//! Both line formats consist of exactly two whitespace separated tokens:
//!
//! - package line: `<weight> <postal code>`
//! - fee line: `<weight> <fee>`
//!
//! Numbers use a dot as decimal separator and no exponent or grouping. This
//! module only checks the shape of a line; the domain constraints (positive
//! weight, precision, postal code pattern) are enforced by the registry and
//! the fee table when the command is applied.

use crate::types::{Command, LineKind, TrackerError};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// Number of tokens in every command line
pub const FIELDS_PER_LINE: usize = 2;

static DECIMAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("decimal token pattern is valid")
});

/// Parse a single line of the given kind into a command
///
/// # Errors
///
/// - `TrackerError::WrongFieldCount` if the line does not have exactly two tokens
/// - `TrackerError::InvalidNumber` if the weight (or the fee) is not a decimal number
pub fn parse_line(kind: LineKind, line: &str) -> Result<Command, TrackerError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [first, second] = tokens.as_slice() else {
        return Err(TrackerError::wrong_field_count(
            kind,
            FIELDS_PER_LINE,
            tokens.len(),
        ));
    };

    let weight_kg = parse_decimal(kind, "weight", first)?;

    match kind {
        LineKind::Package => Ok(Command::InsertPackage {
            weight_kg,
            postal_code: second.to_string(),
        }),
        LineKind::Fee => Ok(Command::InsertFee {
            threshold_kg: weight_kg,
            fee: parse_decimal(kind, "fee", second)?,
        }),
    }
}

/// Parse a plain decimal token, keeping the number of fractional digits as written
fn parse_decimal(
    kind: LineKind,
    field: &'static str,
    token: &str,
) -> Result<Decimal, TrackerError> {
    if !DECIMAL_TOKEN.is_match(token) {
        return Err(TrackerError::invalid_number(kind, field, token));
    }
    Decimal::from_str(token).map_err(|_| TrackerError::invalid_number(kind, field, token))
}
