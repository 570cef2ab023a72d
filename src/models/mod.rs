//! Core data models for the withholding engine.
//!
//! This module contains the request and result types exchanged with the engine.

mod calculation_request;
mod calculation_result;

pub use calculation_request::{CalculationRequest, DEFAULT_PAY_PERIODS};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
