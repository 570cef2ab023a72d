//! Payroll Withholding Engine for Canadian Income Tax
//!
//! This crate computes federal and provincial income tax, Canada Pension Plan
//! contributions and Employment Insurance premiums for an annual income, and
//! reports the resulting net pay per pay period.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
