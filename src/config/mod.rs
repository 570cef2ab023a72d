//! Rate configuration for the withholding engine.
//!
//! This module holds the bracket tables and deduction rules the engine
//! evaluates, along with the compiled-in 2024 data for Canada.
//!
//! # Example
//!
//! ```
//! use withholding_engine::config::TaxTables;
//!
//! let tables = TaxTables::canada_2024();
//! let ontario = tables.provincial_brackets("ON").unwrap();
//! println!("Ontario has {} brackets", ontario.len());
//! ```

mod tables;
mod types;

pub use tables::TAX_YEAR;
pub use types::{
    BRACKET_STEP, Bracket, BracketTable, DeductionRule, Province, TaxProfile, TaxTables,
};
