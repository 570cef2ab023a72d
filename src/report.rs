//! Paycheck comparison report.
//!
//! Renders withholding results for several provinces as a fixed-width text
//! table: one left-aligned 20-character column per value, framed by
//! 110-hyphen dividers.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculation::calculate_with;
use crate::config::{Province, TaxTables};
use crate::error::EngineResult;
use crate::models::{CalculationRequest, CalculationResult, DEFAULT_PAY_PERIODS};

/// Width of each table column.
pub const COLUMN_WIDTH: usize = 20;

/// Width of the divider lines framing the table.
pub const DIVIDER_WIDTH: usize = 110;

/// Formats an amount as dollars with thousands separators and two decimals.
///
/// Amounts are rounded half away from zero. Negative amounts keep the sign
/// after the dollar sign.
///
/// # Examples
///
/// ```
/// use withholding_engine::report::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(200_000)), "$200,000.00");
/// assert_eq!(format_currency(Decimal::from_str("41720.445").unwrap()), "$41,720.45");
/// assert_eq!(format_currency(Decimal::from_str("-1234.5").unwrap()), "$-1,234.50");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, cents)
}

/// Returns the pay schedule name used in the table title and header.
pub fn pay_schedule_label(pay_periods: u32) -> &'static str {
    match pay_periods {
        52 => "Weekly",
        26 => "Biweekly",
        24 => "Semi-monthly",
        12 => "Monthly",
        _ => "Per-period",
    }
}

/// One formatted row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceRow {
    /// Province code.
    pub province: String,
    /// Formatted federal tax.
    pub federal_tax: String,
    /// Formatted provincial tax.
    pub provincial_tax: String,
    /// Formatted total tax, including CPP and EI.
    pub total_tax: String,
    /// Formatted net annual income.
    pub net_annual_income: String,
    /// Formatted net pay per period.
    pub paycheck: String,
}

impl ProvinceRow {
    /// Formats a calculation result as a table row.
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            province: result.province.code().to_string(),
            federal_tax: format_currency(result.federal_tax),
            provincial_tax: format_currency(result.provincial_tax),
            total_tax: format_currency(result.total_tax),
            net_annual_income: format_currency(result.net_annual_income),
            paycheck: format_currency(result.per_period_net),
        }
    }

    fn cells(&self) -> [&str; 6] {
        [
            self.province.as_str(),
            self.federal_tax.as_str(),
            self.provincial_tax.as_str(),
            self.total_tax.as_str(),
            self.net_annual_income.as_str(),
            self.paycheck.as_str(),
        ]
    }
}

fn format_line(cells: [&str; 6]) -> String {
    cells
        .iter()
        .map(|cell| format!("{:<width$}", cell, width = COLUMN_WIDTH))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Calculates withholdings for each province at the same income.
///
/// # Errors
///
/// Returns the first engine error encountered; no rows are returned in that case.
pub fn build_rows(
    annual_income: Decimal,
    pay_periods: u32,
    provinces: &[Province],
    tables: &TaxTables,
) -> EngineResult<Vec<CalculationResult>> {
    provinces
        .iter()
        .map(|province| {
            let request = CalculationRequest::new(annual_income, province.code())
                .with_pay_periods(pay_periods);
            calculate_with(&request, tables)
        })
        .collect()
}

/// Renders results as the fixed-width comparison table.
///
/// The output starts with a blank line and a title, then a divider, the
/// header, a divider, one line per result and a closing divider.
pub fn render_table(annual_income: Decimal, results: &[CalculationResult]) -> String {
    let label = pay_schedule_label(
        results
            .first()
            .map(|r| r.pay_periods)
            .unwrap_or(DEFAULT_PAY_PERIODS),
    );
    let divider = "-".repeat(DIVIDER_WIDTH);
    let paycheck_header = format!("{} Paycheck", label);

    let header = format_line([
        "Province",
        "Federal Tax",
        "Provincial Tax",
        "Total Tax",
        "Net Annual Income",
        paycheck_header.as_str(),
    ]);

    let mut lines = Vec::with_capacity(results.len() + 6);
    lines.push(String::new());
    lines.push(format!(
        "{} Paycheck Table for Annual Income: {}",
        label,
        format_currency(annual_income)
    ));
    lines.push(divider.clone());
    lines.push(header);
    lines.push(divider.clone());
    lines.extend(
        results
            .iter()
            .map(|result| format_line(ProvinceRow::from_result(result).cells())),
    );
    lines.push(divider);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Renders the biweekly comparison for Ontario, Alberta and British Columbia.
///
/// # Example
///
/// ```
/// use withholding_engine::report::paycheck_table;
/// use rust_decimal::Decimal;
///
/// let table = paycheck_table(Decimal::from(200_000)).unwrap();
/// assert!(table.contains("Biweekly Paycheck Table for Annual Income: $200,000.00"));
/// ```
pub fn paycheck_table(annual_income: Decimal) -> EngineResult<String> {
    let results = build_rows(
        annual_income,
        DEFAULT_PAY_PERIODS,
        &Province::ALL,
        TaxTables::canada_2024(),
    )?;
    Ok(render_table(annual_income, &results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(dec("0")), "$0.00");
        assert_eq!(format_currency(dec("999.999")), "$1,000.00");
        assert_eq!(format_currency(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_currency(dec("100000")), "$100,000.00");
        assert_eq!(format_currency(dec("12.3")), "$12.30");
    }

    #[test]
    fn test_format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec("18016.0199")), "$18,016.02");
        assert_eq!(format_currency(dec("0.005")), "$0.01");
        assert_eq!(format_currency(dec("0.004")), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(dec("-923.9")), "$-923.90");
        assert_eq!(format_currency(dec("-0.001")), "$0.00");
    }

    #[test]
    fn test_pay_schedule_labels() {
        assert_eq!(pay_schedule_label(26), "Biweekly");
        assert_eq!(pay_schedule_label(12), "Monthly");
        assert_eq!(pay_schedule_label(7), "Per-period");
    }

    #[test]
    fn test_province_row_from_result() {
        let request = CalculationRequest::new(dec("200000"), "ON");
        let result = calculate_with(&request, TaxTables::canada_2024()).unwrap();
        let row = ProvinceRow::from_result(&result);

        assert_eq!(row.province, "ON");
        assert_eq!(row.federal_tax, "$41,720.45");
        assert_eq!(row.provincial_tax, "$18,016.02");
        assert_eq!(row.total_tax, "$64,653.08");
        assert_eq!(row.net_annual_income, "$135,346.92");
        assert_eq!(row.paycheck, "$5,205.65");
    }

    #[test]
    fn test_format_line_pads_each_column() {
        let line = format_line(["ON", "a", "b", "c", "d", "e"]);
        assert_eq!(line.len(), COLUMN_WIDTH * 6 + 5);
        assert!(line.starts_with("ON                   a"));
    }

    #[test]
    fn test_render_table_layout() {
        let table = paycheck_table(dec("200000")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        let divider = "-".repeat(DIVIDER_WIDTH);

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "Biweekly Paycheck Table for Annual Income: $200,000.00"
        );
        assert_eq!(lines[2], divider);
        assert!(lines[3].starts_with("Province             Federal Tax          Provincial Tax"));
        assert!(lines[3].contains("Biweekly Paycheck"));
        assert_eq!(lines[4], divider);
        assert!(lines[5].starts_with("ON "));
        assert!(lines[6].starts_with("AB "));
        assert!(lines[7].starts_with("BC "));
        assert_eq!(lines[8], divider);
    }

    #[test]
    fn test_render_table_without_results() {
        let table = render_table(dec("1000"), &[]);
        let divider = "-".repeat(DIVIDER_WIDTH);
        let expected_lines = [
            "".to_string(),
            "Biweekly Paycheck Table for Annual Income: $1,000.00".to_string(),
            divider.clone(),
            format_line([
                "Province",
                "Federal Tax",
                "Provincial Tax",
                "Total Tax",
                "Net Annual Income",
                "Biweekly Paycheck",
            ]),
            divider.clone(),
            divider,
        ];

        assert_eq!(table, format!("{}\n", expected_lines.join("\n")));
    }

    #[test]
    fn test_render_table_rows_match_results() {
        let table = paycheck_table(dec("200000")).unwrap();
        assert!(table.contains("$19,066.55"));
        assert!(table.contains("$20,015.21"));
        assert!(table.contains("$5,165.25"));
        assert!(table.contains("$5,128.76"));
    }

    #[test]
    fn test_render_table_uses_monthly_label() {
        let results = build_rows(
            dec("90000"),
            12,
            &[Province::Ab],
            TaxTables::canada_2024(),
        )
        .unwrap();
        let table = render_table(dec("90000"), &results);

        assert!(table.contains("Monthly Paycheck Table for Annual Income: $90,000.00"));
        assert!(table.contains("Monthly Paycheck"));
    }

    #[test]
    fn test_build_rows_propagates_errors() {
        let result = build_rows(dec("50000"), 0, &Province::ALL, TaxTables::canada_2024());
        assert!(matches!(result, Err(EngineError::InvalidPayPeriods { .. })));
    }
}
