//! Progressive bracket tax calculation.
//!
//! This module evaluates a [`BracketTable`] against an income, taxing each
//! slice of income at the marginal rate of the bracket it falls in.

use rust_decimal::Decimal;

use crate::config::BracketTable;
use crate::models::AuditStep;

/// The result of evaluating a bracket table, including the tax and audit step.
#[derive(Debug, Clone)]
pub struct BracketTaxResult {
    /// The total tax owed under the table.
    pub tax: Decimal,
    /// The audit step recording the per-bracket breakdown.
    pub audit_step: AuditStep,
}

/// Computes progressive tax owed on `income` under `table`.
///
/// Negative income is clamped to zero. Brackets are walked in ascending order:
/// - income at or below the bracket's lower bound stops the walk;
/// - income within the bracket taxes `income - lower` at its rate and stops;
/// - income above the bracket taxes the full `upper - lower` range and
///   continues with the next bracket.
///
/// Income exactly equal to a lower bound takes the first branch, so that
/// bracket contributes nothing. With the published tables, whose brackets
/// are separated by one dollar, that dollar is never taxed.
///
/// # Examples
///
/// ```
/// use withholding_engine::calculation::apply_brackets;
/// use withholding_engine::config::TaxTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let federal = TaxTables::canada_2024().federal();
/// let tax = apply_brackets(federal, Decimal::from(50_000));
/// assert_eq!(tax, Decimal::from_str("5144.10").unwrap());
/// ```
pub fn apply_brackets(table: &BracketTable, income: Decimal) -> Decimal {
    bracket_breakdown(table, income)
        .into_iter()
        .map(|slice| slice.tax)
        .sum()
}

/// The portion of income taxed within a single bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BracketSlice {
    lower: Decimal,
    upper: Option<Decimal>,
    rate: Decimal,
    taxed_amount: Decimal,
    tax: Decimal,
}

fn bracket_breakdown(table: &BracketTable, income: Decimal) -> Vec<BracketSlice> {
    let taxable_income = income.max(Decimal::ZERO);
    let mut slices = Vec::new();

    for bracket in table.brackets() {
        if taxable_income <= bracket.lower {
            break;
        }

        let within = bracket.upper.is_none_or(|upper| taxable_income <= upper);
        let top = match bracket.upper {
            Some(upper) if !within => upper,
            _ => taxable_income,
        };
        let taxed_amount = top - bracket.lower;

        slices.push(BracketSlice {
            lower: bracket.lower,
            upper: bracket.upper,
            rate: bracket.rate,
            taxed_amount,
            tax: taxed_amount * bracket.rate,
        });

        if within {
            break;
        }
    }

    slices
}

/// Evaluates a bracket table and records the breakdown as an audit step.
///
/// # Arguments
///
/// * `table` - The bracket table to apply
/// * `income` - The annual income
/// * `rule_id` - Identifier for the audit step (e.g., "federal_tax")
/// * `rule_name` - Human-readable name for the audit step
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_bracket_tax(
    table: &BracketTable,
    income: Decimal,
    rule_id: &str,
    rule_name: &str,
    step_number: u32,
) -> BracketTaxResult {
    let slices = bracket_breakdown(table, income);
    let tax: Decimal = slices.iter().map(|s| s.tax).sum();
    let marginal_rate = table.marginal_rate(income);

    let breakdown: Vec<serde_json::Value> = slices
        .iter()
        .map(|s| {
            serde_json::json!({
                "lower": s.lower.to_string(),
                "upper": s.upper.map(|u| u.to_string()),
                "rate": s.rate.normalize().to_string(),
                "taxed_amount": s.taxed_amount.normalize().to_string(),
                "tax": s.tax.normalize().to_string()
            })
        })
        .collect();

    let reasoning = if slices.is_empty() {
        format!(
            "Income ${} falls below the first taxed bracket",
            income.normalize()
        )
    } else {
        format!(
            "Income ${} taxed across {} bracket(s) = ${} (marginal rate {}%)",
            income.normalize(),
            slices.len(),
            tax.normalize(),
            (marginal_rate * Decimal::ONE_HUNDRED).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "income": income.normalize().to_string(),
            "taxable_income": income.max(Decimal::ZERO).normalize().to_string(),
            "bracket_count": table.len()
        }),
        output: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "marginal_rate": marginal_rate.normalize().to_string(),
            "brackets": breakdown
        }),
        reasoning,
    };

    BracketTaxResult { tax, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bracket, TaxTables};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn federal() -> &'static BracketTable {
        TaxTables::canada_2024().federal()
    }

    fn provincial(code: &str) -> &'static BracketTable {
        TaxTables::canada_2024().provincial_brackets(code).unwrap()
    }

    fn audited_federal(income: Decimal, step_number: u32) -> BracketTaxResult {
        calculate_bracket_tax(federal(), income, "federal_tax", "Federal Income Tax", step_number)
    }

    /// PT-001: zero and negative income owe nothing
    #[test]
    fn test_zero_and_negative_income_owe_nothing() {
        assert_eq!(apply_brackets(federal(), dec("0")), dec("0"));
        assert_eq!(apply_brackets(federal(), dec("-25000")), dec("0"));
        assert_eq!(apply_brackets(provincial("ON"), dec("-1")), dec("0"));
    }

    /// PT-002: income inside the zero-rate bracket
    #[test]
    fn test_income_within_first_bracket() {
        assert_eq!(apply_brackets(federal(), dec("15000")), dec("0"));
        assert_eq!(apply_brackets(provincial("AB"), dec("21885")), dec("0"));
    }

    /// PT-003: income inside the second bracket
    #[test]
    fn test_income_within_second_bracket() {
        // (50000 - 15706) * 0.15
        assert_eq!(apply_brackets(federal(), dec("50000")), dec("5144.10"));
    }

    /// PT-004: federal tax at $200,000
    #[test]
    fn test_federal_tax_at_200k() {
        // 37653 * 0.15 + 53357 * 0.205 + 63906 * 0.26 + 29375 * 0.29
        assert_eq!(apply_brackets(federal(), dec("200000")), dec("41720.445"));
    }

    /// PT-005: provincial tax at $200,000
    #[test]
    fn test_provincial_tax_at_200k() {
        let income = dec("200000");
        assert_eq!(apply_brackets(provincial("ON"), income), dec("18016.0199"));
        assert_eq!(apply_brackets(provincial("AB"), income), dec("19066.55"));
        assert_eq!(apply_brackets(provincial("BC"), income), dec("20015.2099"));
    }

    /// PT-006: income in the unbounded top bracket
    #[test]
    fn test_income_in_top_bracket() {
        // 5647.95 + 10938.185 + 16615.56 + 74166 * 0.29 + 5208 * 0.33
        let expected = dec("5647.95")
            + dec("10938.185")
            + dec("16615.56")
            + dec("21508.14")
            + dec("1718.64");
        assert_eq!(apply_brackets(federal(), dec("250000")), expected);
    }

    /// PT-007: income exactly on a lower bound is not taxed in that bracket
    #[test]
    fn test_exact_lower_bound_contributes_nothing() {
        assert_eq!(apply_brackets(federal(), dec("15706")), dec("0"));
        assert_eq!(apply_brackets(federal(), dec("15707")), dec("0.15"));
    }

    /// PT-008: the dollar between two brackets is untaxed
    #[test]
    fn test_gap_between_brackets_is_untaxed() {
        let at_upper = apply_brackets(federal(), dec("53359"));
        let in_gap = apply_brackets(federal(), dec("53359.50"));
        let at_next_lower = apply_brackets(federal(), dec("53360"));

        assert_eq!(at_upper, dec("5647.95"));
        assert_eq!(in_gap, at_upper);
        assert_eq!(at_next_lower, at_upper);
        assert_eq!(apply_brackets(federal(), dec("53361")), dec("5648.155"));
    }

    #[test]
    fn test_empty_table_owes_nothing() {
        let table = BracketTable::new(vec![]);
        assert_eq!(apply_brackets(&table, dec("100000")), dec("0"));
    }

    #[test]
    fn test_single_unbounded_bracket() {
        let table = BracketTable::new(vec![Bracket::unbounded(dec("0"), dec("0.25"))]);
        assert_eq!(apply_brackets(&table, dec("1000")), dec("250"));
    }

    #[test]
    fn test_audit_step_records_breakdown() {
        let result = audited_federal(dec("200000"), 1);

        assert_eq!(result.tax, dec("41720.445"));
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.rule_id, "federal_tax");
        assert_eq!(result.audit_step.output["tax"], "41720.445");
        assert_eq!(result.audit_step.output["marginal_rate"], "0.29");

        let brackets = result.audit_step.output["brackets"].as_array().unwrap();
        assert_eq!(brackets.len(), 5);
        assert_eq!(brackets[4]["taxed_amount"], "29375");
        assert_eq!(brackets[4]["tax"], "8518.75");
        assert!(result.audit_step.reasoning.contains("41720.445"));
    }

    #[test]
    fn test_audit_step_top_bracket_has_null_upper() {
        let result = audited_federal(dec("300000"), 2);
        let brackets = result.audit_step.output["brackets"].as_array().unwrap();
        assert_eq!(brackets.len(), 6);
        assert!(brackets[5]["upper"].is_null());
    }

    #[test]
    fn test_audit_step_for_untaxed_income() {
        let result = audited_federal(dec("-10"), 1);

        assert_eq!(result.tax, dec("0"));
        assert_eq!(result.audit_step.input["taxable_income"], "0");
        assert!(result.audit_step.reasoning.contains("below the first taxed bracket"));
    }

    #[test]
    fn test_audited_tax_matches_plain_tax() {
        for income in ["0", "12000.99", "53359", "106718", "170625.01", "1000000"] {
            let audited = calculate_bracket_tax(
                provincial("BC"),
                dec(income),
                "provincial_tax",
                "Provincial Income Tax",
                1,
            );
            assert_eq!(audited.tax, apply_brackets(provincial("BC"), dec(income)));
        }
    }
}
