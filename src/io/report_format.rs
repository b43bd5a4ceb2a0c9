//! Report text rendering
//!
//! This module centralizes all output format concerns:
//! - one line per destination: `<postal code> <weight, 3 decimals>[ <fee, 2 decimals>]`
//! - the periodic report block: header, lines (or `none`), blank line
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::DestinationTotal;

/// First line of every report
pub const REPORT_HEADER: &str = "Packages:";

/// Body of a report when no package has been registered
pub const EMPTY_REPORT_BODY: &str = "none";

/// Render one destination line
///
/// The fee column is present only when the totals were computed with a
/// non-empty fee table.
pub fn format_total(total: &DestinationTotal) -> String {
    match total.total_fee {
        Some(fee) => format!(
            "{} {:.3} {:.2}",
            total.postal_code, total.total_weight_kg, fee
        ),
        None => format!("{} {:.3}", total.postal_code, total.total_weight_kg),
    }
}

/// Render all destination lines joined by `\n`, without a trailing newline
///
/// Returns an empty string for an empty slice.
pub fn render_totals(totals: &[DestinationTotal]) -> String {
    totals
        .iter()
        .map(format_total)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a complete periodic report block
///
/// ```text
/// Packages:
/// 08801 15.960
/// 90005 2.000
///
/// ```
pub fn render_report(totals: &[DestinationTotal]) -> String {
    let body = if totals.is_empty() {
        EMPTY_REPORT_BODY.to_string()
    } else {
        render_totals(totals)
    };
    format!("{}\n{}\n\n", REPORT_HEADER, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostalCode;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn total(code: &str, weight: Decimal, fee: Option<Decimal>) -> DestinationTotal {
        DestinationTotal {
            postal_code: PostalCode::parse(code).unwrap(),
            total_weight_kg: weight,
            total_fee: fee,
        }
    }

    #[rstest]
    #[case::no_fee(total("08801", Decimal::new(1596, 2), None), "08801 15.960")]
    #[case::integer_weight(total("90005", Decimal::new(2, 0), None), "90005 2.000")]
    #[case::with_fee(
        total("08801", Decimal::new(1596, 2), Some(Decimal::new(500, 2))),
        "08801 15.960 5.00"
    )]
    #[case::zero_fee(
        total("90005", Decimal::new(2, 0), Some(Decimal::ZERO)),
        "90005 2.000 0.00"
    )]
    #[case::three_decimals(total("12345", Decimal::new(1001, 3), None), "12345 1.001")]
    fn test_format_total(#[case] total: DestinationTotal, #[case] expected: &str) {
        assert_eq!(format_total(&total), expected);
    }

    #[test]
    fn test_render_totals_has_no_trailing_newline() {
        let totals = vec![
            total("08801", Decimal::new(1596, 2), None),
            total("08079", Decimal::new(55, 1), None),
        ];
        assert_eq!(render_totals(&totals), "08801 15.960\n08079 5.500");
    }

    #[test]
    fn test_render_totals_empty() {
        assert_eq!(render_totals(&[]), "");
    }

    #[rstest]
    #[case::empty(vec![], "Packages:\nnone\n\n")]
    #[case::single(
        vec![total("09300", Decimal::new(32, 1), None)],
        "Packages:\n09300 3.200\n\n"
    )]
    #[case::with_fees(
        vec![
            total("08801", Decimal::new(1596, 2), Some(Decimal::new(500, 2))),
            total("90005", Decimal::new(2, 0), Some(Decimal::ZERO)),
        ],
        "Packages:\n08801 15.960 5.00\n90005 2.000 0.00\n\n"
    )]
    fn test_render_report(#[case] totals: Vec<DestinationTotal>, #[case] expected: &str) {
        assert_eq!(render_report(&totals), expected);
    }
}
