//! Calculation request model.
//!
//! This module defines the input to a withholding calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The default number of pay periods per year (biweekly pay).
pub const DEFAULT_PAY_PERIODS: u32 = 26;

fn default_pay_periods() -> u32 {
    DEFAULT_PAY_PERIODS
}

/// A request to compute withholdings for one income in one province.
///
/// The province is carried as a code so that unknown jurisdictions are
/// reported by the engine rather than rejected at construction.
///
/// # Example
///
/// ```
/// use withholding_engine::models::{CalculationRequest, DEFAULT_PAY_PERIODS};
/// use rust_decimal::Decimal;
///
/// let request = CalculationRequest::new(Decimal::from(85_000), "ON");
/// assert_eq!(request.pay_periods, DEFAULT_PAY_PERIODS);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The gross annual income.
    pub annual_income: Decimal,
    /// The province code (e.g., "ON").
    pub province: String,
    /// The number of pay periods per year.
    #[serde(default = "default_pay_periods")]
    pub pay_periods: u32,
}

impl CalculationRequest {
    /// Creates a request with the default biweekly pay schedule.
    pub fn new(annual_income: Decimal, province: impl Into<String>) -> Self {
        Self {
            annual_income,
            province: province.into(),
            pay_periods: DEFAULT_PAY_PERIODS,
        }
    }

    /// Returns the request with a different number of pay periods.
    pub fn with_pay_periods(mut self, pay_periods: u32) -> Self {
        self.pay_periods = pay_periods;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_uses_biweekly_default() {
        let request = CalculationRequest::new(dec("200000"), "BC");
        assert_eq!(request.annual_income, dec("200000"));
        assert_eq!(request.province, "BC");
        assert_eq!(request.pay_periods, 26);
    }

    #[test]
    fn test_with_pay_periods_overrides_default() {
        let request = CalculationRequest::new(dec("60000"), "AB").with_pay_periods(12);
        assert_eq!(request.pay_periods, 12);
    }

    #[test]
    fn test_deserialize_without_pay_periods() {
        let json = r#"{
            "annual_income": "75000.50",
            "province": "ON"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.annual_income, dec("75000.50"));
        assert_eq!(request.province, "ON");
        assert_eq!(request.pay_periods, DEFAULT_PAY_PERIODS);
    }

    #[test]
    fn test_deserialize_with_pay_periods() {
        let json = r#"{
            "annual_income": "75000",
            "province": "AB",
            "pay_periods": 52
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.pay_periods, 52);
    }

    #[test]
    fn test_deserialize_negative_pay_periods_is_rejected() {
        let json = r#"{
            "annual_income": "75000",
            "province": "AB",
            "pay_periods": -2
        }"#;

        let result: Result<CalculationRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
