//! Flat-rate payroll deduction calculation.
//!
//! CPP contributions and EI premiums are both a flat percentage of income,
//! capped at an annual maximum.

use rust_decimal::Decimal;

use crate::config::DeductionRule;
use crate::models::AuditStep;

/// The result of applying a flat deduction rule, including the audit step.
#[derive(Debug, Clone)]
pub struct FlatDeductionResult {
    /// The deduction amount.
    pub amount: Decimal,
    /// Whether the annual maximum limited the amount.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns `min(income * rule.rate, rule.max)`.
///
/// Income is not clamped: a negative income produces a negative deduction.
///
/// # Examples
///
/// ```
/// use withholding_engine::calculation::apply_flat_deduction;
/// use withholding_engine::config::TaxTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let cpp = TaxTables::canada_2024().cpp();
/// assert_eq!(apply_flat_deduction(cpp, Decimal::from(40_000)), Decimal::from(2380));
/// assert_eq!(
///     apply_flat_deduction(cpp, Decimal::from(200_000)),
///     Decimal::from_str("3867.50").unwrap()
/// );
/// ```
pub fn apply_flat_deduction(rule: &DeductionRule, income: Decimal) -> Decimal {
    (income * rule.rate).min(rule.max)
}

/// Applies a flat deduction rule and records the decision as an audit step.
///
/// # Arguments
///
/// * `rule` - The rate and annual maximum
/// * `income` - The annual income
/// * `rule_id` - Identifier for the audit step (e.g., "cpp_contribution")
/// * `rule_name` - Human-readable name for the audit step
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_flat_deduction(
    rule: &DeductionRule,
    income: Decimal,
    rule_id: &str,
    rule_name: &str,
    step_number: u32,
) -> FlatDeductionResult {
    let uncapped_amount = income * rule.rate;
    let amount = apply_flat_deduction(rule, income);
    let cap_applied = uncapped_amount > rule.max;

    let reasoning = if cap_applied {
        format!(
            "${} × {}% = ${} (capped at annual maximum ${})",
            income.normalize(),
            (rule.rate * Decimal::ONE_HUNDRED).normalize(),
            uncapped_amount.normalize(),
            rule.max.normalize()
        )
    } else {
        format!(
            "${} × {}% = ${}",
            income.normalize(),
            (rule.rate * Decimal::ONE_HUNDRED).normalize(),
            amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "income": income.normalize().to_string(),
            "rate": rule.rate.normalize().to_string(),
            "annual_max": rule.max.normalize().to_string()
        }),
        output: serde_json::json!({
            "uncapped_amount": uncapped_amount.normalize().to_string(),
            "amount": amount.normalize().to_string(),
            "cap_applied": cap_applied
        }),
        reasoning,
    };

    FlatDeductionResult {
        amount,
        cap_applied,
        audit_step,
    }
}
