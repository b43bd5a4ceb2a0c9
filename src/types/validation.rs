//! Field guards for package and fee values
//!
//! Each guard inspects a single field and returns the constraints it violates
//! as [`Violation`] descriptors. Callers collect the descriptors of all fields
//! of a record before deciding whether the record is accepted, so a diagnostic
//! can name every broken rule at once.
//!
//! Fractional digits are counted as written: `Decimal` keeps the scale of the
//! parsed text, so `3.200` has three fractional digits and `3.2000` has four.

use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::LazyLock;

/// Maximum number of fractional digits allowed in a weight (grams precision)
pub const WEIGHT_MAX_FRACTION_DIGITS: u32 = 3;

/// Exact number of fractional digits required in a fee (cents)
pub const FEE_FRACTION_DIGITS: u32 = 2;

static POSTAL_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("postal code pattern is valid"));

/// The field a violation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Weight,
    PostalCode,
    Fee,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Weight => write!(f, "weight"),
            Field::PostalCode => write!(f, "postal code"),
            Field::Fee => write!(f, "fee"),
        }
    }
}

/// The rule that was broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be strictly greater than zero
    Positive,
    /// Value must be zero or greater
    NonNegative,
    /// Value may have at most this many fractional digits
    MaxFractionDigits(u32),
    /// Value must have exactly this many fractional digits
    ExactFractionDigits(u32),
    /// Value must consist of exactly five ASCII digits
    FiveDigits,
    /// Adding the value to its destination total must stay within `Decimal` range
    TotalInRange,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Positive => write!(f, "must be greater than 0"),
            Rule::NonNegative => write!(f, "must not be negative"),
            Rule::MaxFractionDigits(max) => {
                write!(f, "must have 0 to {} fractional digits", max)
            }
            Rule::ExactFractionDigits(digits) => {
                write!(f, "must have exactly {} fractional digits", digits)
            }
            Rule::FiveDigits => write!(f, "must be five digits"),
            Rule::TotalInRange => write!(f, "would overflow the destination total"),
        }
    }
}

/// A single broken constraint: which field, which rule, and the offending value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub rule: Rule,
    pub value: String,
}

impl Violation {
    pub fn new(field: Field, rule: Rule, value: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            value: value.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' {}", self.field, self.value, self.rule)
    }
}

/// Render a list of violations as a single comma separated string
pub fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a weight (package weight or fee threshold): `> 0`, at most 3 fractional digits
pub fn check_weight(weight: Decimal) -> Vec<Violation> {
    let mut violations = Vec::new();

    if weight <= Decimal::ZERO {
        violations.push(Violation::new(Field::Weight, Rule::Positive, weight.to_string()));
    }
    if weight.scale() > WEIGHT_MAX_FRACTION_DIGITS {
        violations.push(Violation::new(
            Field::Weight,
            Rule::MaxFractionDigits(WEIGHT_MAX_FRACTION_DIGITS),
            weight.to_string(),
        ));
    }

    violations
}

/// Check a fee amount: `>= 0`, exactly 2 fractional digits
pub fn check_fee(fee: Decimal) -> Vec<Violation> {
    let mut violations = Vec::new();

    if fee.is_sign_negative() && !fee.is_zero() {
        violations.push(Violation::new(Field::Fee, Rule::NonNegative, fee.to_string()));
    }
    if fee.scale() != FEE_FRACTION_DIGITS {
        violations.push(Violation::new(
            Field::Fee,
            Rule::ExactFractionDigits(FEE_FRACTION_DIGITS),
            fee.to_string(),
        ));
    }

    violations
}

/// Check a postal code: exactly five ASCII digits
pub fn check_postal_code(postal_code: &str) -> Option<Violation> {
    if POSTAL_CODE_PATTERN.is_match(postal_code) {
        None
    } else {
        Some(Violation::new(Field::PostalCode, Rule::FiveDigits, postal_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case::integer("2")]
    #[case::one_digit("3.2")]
    #[case::three_digits("15.960")]
    #[case::smallest("0.001")]
    fn test_check_weight_accepts(#[case] weight: &str) {
        assert!(check_weight(dec(weight)).is_empty());
    }

    #[rstest]
    #[case::zero("0", vec![Rule::Positive])]
    #[case::zero_with_digits("0.000", vec![Rule::Positive])]
    #[case::negative("-1.5", vec![Rule::Positive])]
    #[case::four_digits("3.2222", vec![Rule::MaxFractionDigits(3)])]
    #[case::trailing_zero_counts("3.2000", vec![Rule::MaxFractionDigits(3)])]
    #[case::both("-0.0001", vec![Rule::Positive, Rule::MaxFractionDigits(3)])]
    fn test_check_weight_rejects(#[case] weight: &str, #[case] expected: Vec<Rule>) {
        let rules: Vec<Rule> = check_weight(dec(weight)).iter().map(|v| v.rule).collect();
        assert_eq!(rules, expected);
    }

    #[rstest]
    #[case::zero("0.00", vec![])]
    #[case::typical("2.50", vec![])]
    #[case::one_digit("2.5", vec![Rule::ExactFractionDigits(2)])]
    #[case::integer("5", vec![Rule::ExactFractionDigits(2)])]
    #[case::three_digits("2.505", vec![Rule::ExactFractionDigits(2)])]
    #[case::negative("-1.00", vec![Rule::NonNegative])]
    #[case::negative_zero("-0.00", vec![])]
    fn test_check_fee(#[case] fee: &str, #[case] expected: Vec<Rule>) {
        let rules: Vec<Rule> = check_fee(dec(fee)).iter().map(|v| v.rule).collect();
        assert_eq!(rules, expected);
    }

    #[rstest]
    #[case::leading_zero("08801", true)]
    #[case::plain("90005", true)]
    #[case::letter("0930A", false)]
    #[case::too_short("0930", false)]
    #[case::too_long("093001", false)]
    #[case::empty("", false)]
    #[case::non_ascii_digits("٠٨٨٠١", false)]
    fn test_check_postal_code(#[case] code: &str, #[case] valid: bool) {
        assert_eq!(check_postal_code(code).is_none(), valid);
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new(Field::Weight, Rule::MaxFractionDigits(3), "3.2222");
        assert_eq!(
            violation.to_string(),
            "weight '3.2222' must have 0 to 3 fractional digits"
        );
    }

    #[test]
    fn test_format_violations_joins_with_comma() {
        let violations = vec![
            Violation::new(Field::Weight, Rule::Positive, "0"),
            Violation::new(Field::PostalCode, Rule::FiveDigits, "abc"),
        ];
        assert_eq!(
            format_violations(&violations),
            "weight '0' must be greater than 0, postal code 'abc' must be five digits"
        );
    }
}
