//! Calculation logic for the withholding engine.
//!
//! This module contains the progressive bracket evaluation, the flat-rate
//! CPP/EI deduction, and the aggregation of both into net pay per period.

mod flat_deduction;
mod progressive_tax;
mod withholding;

pub use flat_deduction::{FlatDeductionResult, apply_flat_deduction, calculate_flat_deduction};
pub use progressive_tax::{BracketTaxResult, apply_brackets, calculate_bracket_tax};
pub use withholding::{calculate, calculate_with};
