//! Calculation result models for the withholding engine.
//!
//! This module contains the [`CalculationResult`] type and the audit trace
//! structures that record every rule applied during a calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Province;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs the engine accepts but that produce unusual results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use withholding_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a withholding calculation.
///
/// All amounts are unrounded; rounding to cents happens only when the
/// result is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The province the calculation was made for.
    pub province: Province,
    /// The gross annual income the calculation was made for.
    pub annual_income: Decimal,
    /// The number of pay periods the net income was divided into.
    pub pay_periods: u32,
    /// Federal income tax.
    pub federal_tax: Decimal,
    /// Provincial income tax.
    pub provincial_tax: Decimal,
    /// Canada Pension Plan contribution.
    pub cpp: Decimal,
    /// Employment Insurance premium.
    pub ei: Decimal,
    /// Sum of federal tax, provincial tax, CPP and EI.
    pub total_tax: Decimal,
    /// Annual income less total tax.
    pub net_annual_income: Decimal,
    /// Net income per pay period.
    pub per_period_net: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Returns total tax as a fraction of annual income.
    ///
    /// Returns zero when the annual income is not positive.
    pub fn effective_rate(&self) -> Decimal {
        if self.annual_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_tax / self.annual_income
    }
}
