//! Payroll withholding aggregation.
//!
//! This module combines federal tax, provincial tax, CPP and EI into a single
//! [`CalculationResult`] and divides the net income across pay periods.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{Province, TaxTables};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, AuditWarning, CalculationRequest, CalculationResult};

use super::{calculate_bracket_tax, calculate_flat_deduction};

/// Computes withholdings for a request using the compiled-in 2024 tables.
///
/// # Errors
///
/// - `UnknownProvince` if the request's province is not configured
/// - `InvalidPayPeriods` if the request has zero pay periods
///
/// # Examples
///
/// ```
/// use withholding_engine::calculation::calculate;
/// use withholding_engine::models::CalculationRequest;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let request = CalculationRequest::new(Decimal::from(200_000), "ON");
/// let result = calculate(&request).unwrap();
///
/// assert_eq!(result.cpp, Decimal::from_str("3867.50").unwrap());
/// assert_eq!(result.ei, Decimal::from_str("1049.12").unwrap());
/// assert_eq!(result.net_annual_income + result.total_tax, result.annual_income);
/// ```
pub fn calculate(request: &CalculationRequest) -> EngineResult<CalculationResult> {
    calculate_with(request, TaxTables::canada_2024())
}

/// Computes withholdings for a request against the given tables.
///
/// The province and pay period count are validated before anything is
/// computed, so an error never leaves a partial result behind.
///
/// # Errors
///
/// - `UnknownProvince` if the request's province is not configured in `tables`
/// - `InvalidPayPeriods` if the request has zero pay periods
pub fn calculate_with(
    request: &CalculationRequest,
    tables: &TaxTables,
) -> EngineResult<CalculationResult> {
    let province: Province = request.province.parse()?;
    let profile = tables.profile(province)?;

    if request.pay_periods == 0 {
        return Err(EngineError::InvalidPayPeriods {
            pay_periods: request.pay_periods,
        });
    }

    let income = request.annual_income;
    let mut warnings = Vec::new();
    if income < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_INCOME".to_string(),
            message: format!(
                "Annual income ${} is negative; income tax is zero but CPP and EI are negative",
                income.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    let federal = calculate_bracket_tax(
        tables.federal(),
        income,
        "federal_tax",
        "Federal Income Tax",
        1,
    );
    let provincial = calculate_bracket_tax(
        &profile.brackets,
        income,
        "provincial_tax",
        &format!("{} Provincial Income Tax", province.name()),
        2,
    );
    let cpp = calculate_flat_deduction(
        tables.cpp(),
        income,
        "cpp_contribution",
        "CPP Contribution",
        3,
    );
    let ei = calculate_flat_deduction(tables.ei(), income, "ei_premium", "EI Premium", 4);

    let total_tax = federal.tax + provincial.tax + cpp.amount + ei.amount;
    let net_annual_income = income - total_tax;
    let per_period_net = net_annual_income / Decimal::from(request.pay_periods);

    debug!(
        province = %province,
        annual_income = %income,
        federal_tax = %federal.tax,
        provincial_tax = %provincial.tax,
        cpp = %cpp.amount,
        ei = %ei.amount,
        total_tax = %total_tax,
        per_period_net = %per_period_net,
        "Withholding calculated"
    );

    Ok(CalculationResult {
        province,
        annual_income: income,
        pay_periods: request.pay_periods,
        federal_tax: federal.tax,
        provincial_tax: provincial.tax,
        cpp: cpp.amount,
        ei: ei.amount,
        total_tax,
        net_annual_income,
        per_period_net,
        audit_trace: AuditTrace {
            steps: vec![
                federal.audit_step,
                provincial.audit_step,
                cpp.audit_step,
                ei.audit_step,
            ],
            warnings,
        },
    })
}
