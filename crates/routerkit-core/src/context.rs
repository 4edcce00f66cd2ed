//! Job context
//!
//! Everything about a machining run that is fixed before traversal starts:
//! the native unit, the stock thickness and the router bit. Built once and
//! shared by reference with every backend.

use crate::data::RouterBit;
use crate::error::{CutError, Result, UnitError};
use crate::rational::Rational;
use crate::units::{ComplexAmount, MeasurementSystem, Unit, UnitTable};

/// Fixed parameters of a single machining run.
#[derive(Debug, Clone, PartialEq)]
pub struct JobContext {
    native_unit: Unit,
    units: UnitTable,
    thickness: Rational,
    router_bit: RouterBit,
}

impl JobContext {
    /// Builds a context for stock of the given thickness.
    ///
    /// The thickness may not itself be measured in boards, since the board
    /// unit is derived from it.
    pub fn new(native_unit: &str, thickness: &ComplexAmount, router_bit: RouterBit) -> Result<Self> {
        let standard = UnitTable::standard();
        let native_unit = *standard.get(native_unit)?;

        if thickness.is_empty() {
            return Err(CutError::InvalidParameter {
                name: "thickness".to_string(),
                reason: "workpiece thickness is required".to_string(),
            }
            .into());
        }
        if thickness.uses_board() {
            return Err(CutError::InvalidParameter {
                name: "thickness".to_string(),
                reason: "cannot be measured in boards".to_string(),
            }
            .into());
        }

        let thickness = thickness.decode_exact(&native_unit, &standard)?;
        if thickness <= Rational::ZERO {
            return Err(CutError::InvalidParameter {
                name: "thickness".to_string(),
                reason: format!("must be positive, got {thickness}"),
            }
            .into());
        }

        let thickness_mm = thickness.checked_mul(native_unit.value_in_mm)?;
        Ok(Self {
            native_unit,
            units: standard.with_board(thickness_mm),
            thickness,
            router_bit,
        })
    }

    /// Swaps the router bit, keeping stock and units.
    pub fn with_router_bit(mut self, router_bit: RouterBit) -> Self {
        self.router_bit = router_bit;
        self
    }

    pub fn native_unit(&self) -> &Unit {
        &self.native_unit
    }

    /// Units amounts may be written in, including `board`.
    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    pub fn router_bit(&self) -> &RouterBit {
        &self.router_bit
    }

    /// Stock thickness in native units.
    pub fn thickness(&self) -> Rational {
        self.thickness
    }

    /// Lowest Z any toolpath may reach: the bottom face of the stock.
    pub fn min_z(&self) -> f64 {
        -self.thickness.to_f64()
    }

    /// G-code unit mode for the native unit.
    pub fn measurement_system(&self) -> std::result::Result<MeasurementSystem, CutError> {
        self.native_unit
            .measurement_system()
            .ok_or_else(|| CutError::UnsupportedNativeUnit {
                unit: self.native_unit.name.to_string(),
            })
    }

    /// Exact native-unit length of one of the named unit.
    pub fn unit_value(&self, unit_name: &str) -> std::result::Result<Rational, UnitError> {
        let unit = self.units.get(unit_name)?;
        unit.value_in_mm.checked_div(self.native_unit.value_in_mm)
    }

    pub fn decode_exact(&self, amount: &ComplexAmount) -> std::result::Result<Rational, UnitError> {
        amount.decode_exact(&self.native_unit, &self.units)
    }

    /// Value of `amount` in native units.
    pub fn decode(&self, amount: &ComplexAmount) -> std::result::Result<f64, UnitError> {
        amount.decode(&self.native_unit, &self.units)
    }
}
