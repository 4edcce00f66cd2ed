//! Units of measurement
//!
//! Handles distance units (inch, millimeter and the job-relative `board`
//! unit) and multi-unit amounts such as `1/8in` or `1in+3mm`. Amounts stay
//! exact rationals until they are decoded into a job's native unit.

use crate::error::UnitError;
use crate::rational::Rational;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Measurement system a G-code program can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// The modal G-code word selecting this system.
    pub fn gcode_word(&self) -> &'static str {
        match self {
            Self::Metric => "G21",
            Self::Imperial => "G20",
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

/// A named distance unit.
///
/// `value_in_mm` is the exact length of one unit in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub aliases: &'static [&'static str],
    pub value_in_mm: Rational,
}

impl Unit {
    /// Measurement system for units a controller understands natively.
    pub fn measurement_system(&self) -> Option<MeasurementSystem> {
        match self.name {
            INCH_NAME => Some(MeasurementSystem::Imperial),
            MILLIMETER_NAME => Some(MeasurementSystem::Metric),
            _ => None,
        }
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.abbreviation == name || self.aliases.contains(&name)
    }
}

const INCH_NAME: &str = "inch";
const MILLIMETER_NAME: &str = "millimeter";
const BOARD_NAME: &str = "board";

pub const INCH: Unit = Unit {
    name: INCH_NAME,
    abbreviation: "in",
    aliases: &["inch", "in", "\"", "inches"],
    value_in_mm: Rational::new_reduced(127, 5),
};

pub const MILLIMETER: Unit = Unit {
    name: MILLIMETER_NAME,
    abbreviation: "mm",
    aliases: &["millimeter", "mm", "millimeters"],
    value_in_mm: Rational::ONE,
};

/// The board unit for a workpiece of the given thickness.
///
/// One board is always the full stock thickness, whatever that is for the job.
pub fn board_unit(thickness_mm: Rational) -> Unit {
    Unit {
        name: BOARD_NAME,
        abbreviation: BOARD_NAME,
        aliases: &["board", "boards"],
        value_in_mm: thickness_mm,
    }
}

/// Resolves any alias to the unit's canonical name, without needing a job.
fn canonical_unit_name(name: &str) -> Option<&'static str> {
    if let Some(unit) = [INCH, MILLIMETER].iter().find(|u| u.answers_to(name)) {
        return Some(unit.name);
    }
    matches!(name, "board" | "boards").then_some(BOARD_NAME)
}

/// Set of units an amount may be decoded against.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    units: Vec<Unit>,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl UnitTable {
    /// Inch and millimeter.
    pub fn standard() -> Self {
        Self {
            units: vec![INCH, MILLIMETER],
        }
    }

    /// This table plus a board unit of the given thickness.
    pub fn with_board(mut self, thickness_mm: Rational) -> Self {
        self.units.retain(|u| u.name != BOARD_NAME);
        self.units.push(board_unit(thickness_mm));
        self
    }

    pub fn find(&self, name: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.name == name)
            .or_else(|| self.units.iter().find(|u| u.answers_to(name)))
    }

    pub fn get(&self, name: &str) -> Result<&Unit, UnitError> {
        self.find(name).ok_or_else(|| UnitError::UnknownUnit {
            name: name.to_string(),
        })
    }
}

/// A sum of quantities in possibly different units, e.g. `1in+3mm`.
///
/// Keys are canonical unit names; values are exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplexAmount {
    terms: BTreeMap<String, Rational>,
}

impl ComplexAmount {
    /// A single-unit amount. The unit name may be any alias.
    pub fn new(unit_name: &str, value: Rational) -> Result<Self, UnitError> {
        let name = canonical_unit_name(unit_name).ok_or_else(|| UnitError::UnknownUnit {
            name: unit_name.to_string(),
        })?;
        let mut terms = BTreeMap::new();
        terms.insert(name.to_string(), value);
        Ok(Self { terms })
    }

    pub fn inches(value: Rational) -> Self {
        Self::single(INCH_NAME, value)
    }

    pub fn millimeters(value: Rational) -> Self {
        Self::single(MILLIMETER_NAME, value)
    }

    pub fn boards(value: Rational) -> Self {
        Self::single(BOARD_NAME, value)
    }

    fn single(name: &'static str, value: Rational) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(name.to_string(), value);
        Self { terms }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, Rational)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether any term is measured in boards.
    pub fn uses_board(&self) -> bool {
        self.terms.contains_key(BOARD_NAME)
    }

    /// Multiplies every term by `s`.
    pub fn scale(&self, s: Rational) -> Result<Self, UnitError> {
        if s.is_one() {
            return Ok(self.clone());
        }
        let mut terms = BTreeMap::new();
        for (unit, value) in &self.terms {
            terms.insert(unit.clone(), value.checked_mul(s)?);
        }
        Ok(Self { terms })
    }

    /// Adds two amounts, merging terms of the same unit.
    pub fn add(&self, other: &Self) -> Result<Self, UnitError> {
        let mut terms = self.terms.clone();
        for (unit, value) in &other.terms {
            let sum = match terms.get(unit) {
                Some(existing) => existing.checked_add(*value)?,
                None => *value,
            };
            terms.insert(unit.clone(), sum);
        }
        Ok(Self { terms })
    }

    /// Exact value of this amount expressed in `native` units.
    pub fn decode_exact(&self, native: &Unit, table: &UnitTable) -> Result<Rational, UnitError> {
        let mut total = Rational::ZERO;
        for (unit_name, value) in &self.terms {
            let converted = if unit_name == native.name {
                *value
            } else {
                let unit = table.get(unit_name)?;
                value
                    .checked_mul(unit.value_in_mm)?
                    .checked_div(native.value_in_mm)?
            };
            total = total.checked_add(converted)?;
        }
        Ok(total)
    }

    /// Value of this amount in `native` units.
    pub fn decode(&self, native: &Unit, table: &UnitTable) -> Result<f64, UnitError> {
        self.decode_exact(native, table).map(|r| r.to_f64())
    }

    /// Parses `<number><unit>` terms joined by `+`, e.g. `5/32in`, `1+1/2in`,
    /// `1in+3mm` or `1board`.
    pub fn parse(input: &str) -> Result<Self, UnitError> {
        let malformed = || UnitError::MalformedAmount {
            input: input.to_string(),
        };
        let mut amount = ComplexAmount::default();
        let mut pending = String::new();
        for term in input.trim().split('+') {
            let term = term.trim();
            let split = term
                .find(|c: char| c.is_alphabetic() || c == '"')
                .unwrap_or(term.len());
            let (number, unit) = term.split_at(split);
            if !pending.is_empty() {
                pending.push('+');
            }
            pending.push_str(number);
            if unit.is_empty() {
                continue;
            }
            if number.trim().is_empty() {
                return Err(malformed());
            }
            let value = Rational::parse(&pending)?;
            amount = amount.add(&ComplexAmount::new(unit.trim(), value)?)?;
            pending.clear();
        }
        if !pending.is_empty() || amount.is_empty() {
            return Err(malformed());
        }
        Ok(amount)
    }
}

impl FromStr for ComplexAmount {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ComplexAmount {
    type Error = UnitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ComplexAmount> for String {
    fn from(a: ComplexAmount) -> Self {
        a.to_string()
    }
}

impl fmt::Display for ComplexAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (unit, value) in &self.terms {
            if !first {
                write!(f, "+")?;
            }
            first = false;
            let suffix = canonical_unit_name(unit)
                .and_then(|name| [INCH, MILLIMETER].into_iter().find(|u| u.name == name))
                .map(|u| u.abbreviation)
                .unwrap_or(unit.as_str());
            write!(f, "{value}{suffix}")?;
        }
        Ok(())
    }
}
