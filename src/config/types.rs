//! Rate table types for withholding calculations.
//!
//! This module contains the strongly-typed structures that describe a tax
//! year: progressive bracket tables, flat-rate deduction rules and the
//! province profiles that tie them together.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// A Canadian province with a configured provincial bracket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Province {
    /// Ontario.
    On,
    /// Alberta.
    Ab,
    /// British Columbia.
    Bc,
}

impl Province {
    /// All configured provinces, in report order.
    pub const ALL: [Province; 3] = [Province::On, Province::Ab, Province::Bc];

    /// Returns the two-letter postal code of the province.
    pub fn code(&self) -> &'static str {
        match self {
            Province::On => "ON",
            Province::Ab => "AB",
            Province::Bc => "BC",
        }
    }

    /// Returns the full name of the province.
    pub fn name(&self) -> &'static str {
        match self {
            Province::On => "Ontario",
            Province::Ab => "Alberta",
            Province::Bc => "British Columbia",
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Province {
    type Err = EngineError;

    /// Parses an exact two-letter upper-case province code.
    ///
    /// # Examples
    ///
    /// ```
    /// use withholding_engine::config::Province;
    ///
    /// assert_eq!("ON".parse::<Province>().unwrap(), Province::On);
    /// assert!("on".parse::<Province>().is_err());
    /// assert!("ZZ".parse::<Province>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Province::ALL
            .into_iter()
            .find(|p| p.code() == s)
            .ok_or_else(|| EngineError::UnknownProvince {
                code: s.to_string(),
            })
    }
}

/// Largest step allowed between one bracket's upper bound and the next lower bound.
///
/// Published tables step by one dollar from an inclusive upper bound to the
/// next inclusive lower bound.
pub const BRACKET_STEP: Decimal = Decimal::ONE;

/// A single progressive tax bracket.
///
/// Both bounds are inclusive as written in the published tables. The last
/// bracket of a table has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// The lower bound of the bracket.
    pub lower: Decimal,
    /// The upper bound of the bracket, `None` when unbounded.
    pub upper: Option<Decimal>,
    /// The marginal rate as a fraction (e.g., 0.205 for 20.5%).
    pub rate: Decimal,
}

impl Bracket {
    /// Creates a bounded bracket.
    pub fn new(lower: Decimal, upper: Decimal, rate: Decimal) -> Self {
        Self {
            lower,
            upper: Some(upper),
            rate,
        }
    }

    /// Creates the open-ended top bracket.
    pub fn unbounded(lower: Decimal, rate: Decimal) -> Self {
        Self {
            lower,
            upper: None,
            rate,
        }
    }
}

/// An ordered sequence of brackets sorted ascending by lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Creates a bracket table from brackets in ascending order.
    ///
    /// The table is not checked here; call [`BracketTable::validate`] on
    /// tables that do not come from the compiled-in configuration.
    pub fn new(brackets: Vec<Bracket>) -> Self {
        Self { brackets }
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Returns the number of brackets.
    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Returns true if the table has no brackets.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Checks the table invariant.
    ///
    /// A valid table is non-empty and starts at 0. Each bracket begins above
    /// the previous upper bound by at most [`BRACKET_STEP`]. Only the last
    /// bracket is unbounded and every rate lies between 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBracketTable` describing the first violation.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidBracketTable { message });

        let Some(first) = self.brackets.first() else {
            return invalid("table has no brackets".to_string());
        };
        if !first.lower.is_zero() {
            return invalid(format!("first bracket starts at {}, expected 0", first.lower));
        }

        let last_index = self.brackets.len() - 1;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return invalid(format!("bracket {} has rate {} outside [0, 1]", i, bracket.rate));
            }
            match bracket.upper {
                Some(upper) if upper < bracket.lower => {
                    return invalid(format!(
                        "bracket {} upper bound {} is below its lower bound {}",
                        i, upper, bracket.lower
                    ));
                }
                None if i != last_index => {
                    return invalid(format!("bracket {} is unbounded but is not the last", i));
                }
                _ => {}
            }
        }

        for (i, pair) in self.brackets.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            // prev.upper is Some here: only the last bracket may be unbounded
            if let Some(upper) = prev.upper {
                if next.lower <= upper {
                    return invalid(format!(
                        "bracket {} starts at {} inside bracket {} ending at {}",
                        i + 1,
                        next.lower,
                        i,
                        upper
                    ));
                }
                if next.lower - upper > BRACKET_STEP {
                    return invalid(format!(
                        "gap between bracket {} ending at {} and bracket {} starting at {}",
                        i,
                        upper,
                        i + 1,
                        next.lower
                    ));
                }
            }
        }

        if self.brackets[last_index].upper.is_some() {
            return invalid("last bracket must be unbounded".to_string());
        }

        Ok(())
    }

    /// Returns the marginal rate applying to the next dollar above `income`.
    ///
    /// Income is clamped to zero. An income sitting exactly on a lower bound
    /// is still taxed at the previous bracket's rate, matching how
    /// progressive tax is accumulated.
    pub fn marginal_rate(&self, income: Decimal) -> Decimal {
        let income = income.max(Decimal::ZERO);
        self.brackets
            .iter()
            .take_while(|b| income > b.lower || b.lower.is_zero())
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// A flat-rate payroll deduction with an annual maximum.
///
/// Used identically for CPP contributions and EI premiums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// The contribution or premium rate as a fraction.
    pub rate: Decimal,
    /// The maximum annual contribution or premium.
    pub max: Decimal,
}

/// A provincial jurisdiction and its bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxProfile {
    /// The province this profile applies to.
    pub province: Province,
    /// The provincial bracket table.
    pub brackets: BracketTable,
}

/// The complete rate configuration for one tax year.
///
/// Immutable once built; the compiled-in 2024 instance is shared through
/// [`TaxTables::canada_2024`].
#[derive(Debug, Clone)]
pub struct TaxTables {
    tax_year: u16,
    federal: BracketTable,
    provinces: HashMap<Province, TaxProfile>,
    cpp: DeductionRule,
    ei: DeductionRule,
}

impl TaxTables {
    /// Creates a configuration from its component parts.
    pub fn new(
        tax_year: u16,
        federal: BracketTable,
        profiles: Vec<TaxProfile>,
        cpp: DeductionRule,
        ei: DeductionRule,
    ) -> Self {
        let provinces = profiles.into_iter().map(|p| (p.province, p)).collect();
        Self {
            tax_year,
            federal,
            provinces,
            cpp,
            ei,
        }
    }

    /// Returns the tax year these tables apply to.
    pub fn tax_year(&self) -> u16 {
        self.tax_year
    }

    /// Returns the federal bracket table.
    pub fn federal(&self) -> &BracketTable {
        &self.federal
    }

    /// Returns the CPP contribution rule.
    pub fn cpp(&self) -> &DeductionRule {
        &self.cpp
    }

    /// Returns the EI premium rule.
    pub fn ei(&self) -> &DeductionRule {
        &self.ei
    }

    /// Returns the configured provinces in report order.
    pub fn provinces(&self) -> Vec<Province> {
        let mut provinces: Vec<Province> = self.provinces.keys().copied().collect();
        provinces.sort();
        provinces
    }

    /// Gets the profile for a province.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvince` if the province has no profile in these tables.
    pub fn profile(&self, province: Province) -> EngineResult<&TaxProfile> {
        self.provinces
            .get(&province)
            .ok_or_else(|| EngineError::UnknownProvince {
                code: province.code().to_string(),
            })
    }

    /// Gets the provincial bracket table for a province code.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvince` if the code is not a known province or the
    /// province is not configured.
    ///
    /// # Example
    ///
    /// ```
    /// use withholding_engine::config::TaxTables;
    ///
    /// let tables = TaxTables::canada_2024();
    /// assert_eq!(tables.provincial_brackets("BC").unwrap().len(), 8);
    /// assert!(tables.provincial_brackets("ZZ").is_err());
    /// ```
    pub fn provincial_brackets(&self, code: &str) -> EngineResult<&BracketTable> {
        let province: Province = code.parse()?;
        self.profile(province).map(|p| &p.brackets)
    }

    /// Validates every bracket table in the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        self.federal.validate()?;
        for province in self.provinces() {
            self.profile(province)?.brackets.validate()?;
        }
        Ok(())
    }
}
