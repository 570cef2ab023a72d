//! Compiled-in 2024 rate tables.
//!
//! Federal and provincial brackets for Ontario, Alberta and British Columbia,
//! plus the employee CPP contribution and EI premium rules. The tables are
//! built once on first use and shared read-only for the life of the process.

use std::sync::LazyLock;

use rust_decimal_macros::dec;

use super::types::{Bracket, BracketTable, DeductionRule, Province, TaxProfile, TaxTables};

/// The tax year the compiled-in tables describe.
pub const TAX_YEAR: u16 = 2024;

static CANADA_2024: LazyLock<TaxTables> = LazyLock::new(|| {
    TaxTables::new(
        TAX_YEAR,
        federal_2024(),
        vec![
            TaxProfile {
                province: Province::On,
                brackets: ontario_2024(),
            },
            TaxProfile {
                province: Province::Ab,
                brackets: alberta_2024(),
            },
            TaxProfile {
                province: Province::Bc,
                brackets: british_columbia_2024(),
            },
        ],
        cpp_2024(),
        ei_2024(),
    )
});

impl TaxTables {
    /// Returns the shared 2024 tables.
    ///
    /// # Example
    ///
    /// ```
    /// use withholding_engine::config::TaxTables;
    ///
    /// let tables = TaxTables::canada_2024();
    /// assert_eq!(tables.tax_year(), 2024);
    /// assert_eq!(tables.federal().len(), 6);
    /// ```
    pub fn canada_2024() -> &'static TaxTables {
        &CANADA_2024
    }
}

fn federal_2024() -> BracketTable {
    BracketTable::new(vec![
        Bracket::new(dec!(0), dec!(15705), dec!(0)),
        Bracket::new(dec!(15706), dec!(53359), dec!(0.15)),
        Bracket::new(dec!(53360), dec!(106717), dec!(0.205)),
        Bracket::new(dec!(106718), dec!(170624), dec!(0.26)),
        Bracket::new(dec!(170625), dec!(244791), dec!(0.29)),
        Bracket::unbounded(dec!(244792), dec!(0.33)),
    ])
}

fn ontario_2024() -> BracketTable {
    BracketTable::new(vec![
        Bracket::new(dec!(0), dec!(12399), dec!(0)),
        Bracket::new(dec!(12400), dec!(51446), dec!(0.0505)),
        Bracket::new(dec!(51447), dec!(102894), dec!(0.0915)),
        Bracket::new(dec!(102895), dec!(150000), dec!(0.1116)),
        Bracket::new(dec!(150001), dec!(220000), dec!(0.1216)),
        Bracket::unbounded(dec!(220001), dec!(0.1316)),
    ])
}

fn alberta_2024() -> BracketTable {
    BracketTable::new(vec![
        Bracket::new(dec!(0), dec!(21885), dec!(0)),
        Bracket::new(dec!(21886), dec!(148269), dec!(0.10)),
        Bracket::new(dec!(148270), dec!(177922), dec!(0.12)),
        Bracket::new(dec!(177923), dec!(237230), dec!(0.13)),
        Bracket::new(dec!(237231), dec!(355845), dec!(0.14)),
        Bracket::unbounded(dec!(355846), dec!(0.15)),
    ])
}

fn british_columbia_2024() -> BracketTable {
    BracketTable::new(vec![
        Bracket::new(dec!(0), dec!(12580), dec!(0)),
        Bracket::new(dec!(12581), dec!(47937), dec!(0.0506)),
        Bracket::new(dec!(47938), dec!(95875), dec!(0.077)),
        Bracket::new(dec!(95876), dec!(110076), dec!(0.105)),
        Bracket::new(dec!(110077), dec!(133664), dec!(0.1229)),
        Bracket::new(dec!(133665), dec!(181232), dec!(0.147)),
        Bracket::new(dec!(181233), dec!(252752), dec!(0.168)),
        Bracket::unbounded(dec!(252753), dec!(0.205)),
    ])
}

/// Employee CPP contribution: 5.95% up to $3,867.50.
fn cpp_2024() -> DeductionRule {
    DeductionRule {
        rate: dec!(0.0595),
        max: dec!(3867.50),
    }
}

/// Employee EI premium: 1.66% up to $1,049.12.
fn ei_2024() -> DeductionRule {
    DeductionRule {
        rate: dec!(0.0166),
        max: dec!(1049.12),
    }
}
