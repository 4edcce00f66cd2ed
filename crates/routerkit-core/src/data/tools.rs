//! Router bit definitions
//!
//! A router bit is modelled by the one property toolpath generation needs:
//! the width of the cut it makes at a given depth below its tip.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cutting profile of a bit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BitProfile {
    /// Straight-sided end mill; same width at every depth
    Flat {
        /// Cutting diameter (native units)
        diameter: f64,
    },
    /// Tapered engraving bit widening with depth
    VBit {
        /// Included angle of the cutting edges in degrees
        angle_degrees: f64,
        /// Flat tip width (native units); zero for a sharp point
        tip_diameter: f64,
    },
}

impl fmt::Display for BitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat { .. } => write!(f, "Flat End Mill"),
            Self::VBit { .. } => write!(f, "V-Bit"),
        }
    }
}

/// A named router bit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterBit {
    pub name: String,
    pub profile: BitProfile,
}

impl RouterBit {
    pub fn new(name: impl Into<String>, profile: BitProfile) -> Self {
        Self {
            name: name.into(),
            profile,
        }
    }

    /// A flat end mill named after its diameter.
    pub fn flat(diameter: f64) -> Self {
        Self::new(
            format!("{diameter} flat end mill"),
            BitProfile::Flat { diameter },
        )
    }

    /// A V-bit named after its tip and angle.
    pub fn v_bit(angle_degrees: f64, tip_diameter: f64) -> Self {
        let name = if tip_diameter > 0.0 {
            format!("{tip_diameter}-tip {angle_degrees}-degree carving bit")
        } else {
            format!("{angle_degrees}-degree carving bit")
        };
        Self::new(
            name,
            BitProfile::VBit {
                angle_degrees,
                tip_diameter,
            },
        )
    }

    /// Width of the cut at `depth` below the tip. Negative depths count as zero.
    pub fn diameter_at(&self, depth: f64) -> f64 {
        let depth = depth.max(0.0);
        match self.profile {
            BitProfile::Flat { diameter } => diameter,
            BitProfile::VBit {
                angle_degrees,
                tip_diameter,
            } => {
                let half_angle = (angle_degrees / 2.0).to_radians();
                tip_diameter + 2.0 * depth * half_angle.tan()
            }
        }
    }

    /// Effective cutting width at zero depth.
    pub fn tip_diameter(&self) -> f64 {
        self.diameter_at(0.0)
    }

    /// Validate the bit geometry
    pub fn is_valid(&self) -> bool {
        match self.profile {
            BitProfile::Flat { diameter } => diameter.is_finite() && diameter > 0.0,
            BitProfile::VBit {
                angle_degrees,
                tip_diameter,
            } => {
                angle_degrees > 0.0
                    && angle_degrees < 180.0
                    && tip_diameter.is_finite()
                    && tip_diameter >= 0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_bit_constant_diameter() {
        let bit = RouterBit::flat(0.125);
        assert_eq!(bit.tip_diameter(), 0.125);
        assert_eq!(bit.diameter_at(1.0), 0.125);
        assert!(bit.is_valid());
    }

    #[test]
    fn test_v_bit_widens_with_depth() {
        let bit = RouterBit::v_bit(90.0, 0.0);
        assert_eq!(bit.tip_diameter(), 0.0);
        assert!((bit.diameter_at(0.5) - 1.0).abs() < 1e-12);
        assert_eq!(bit.diameter_at(-1.0), 0.0);
    }

    #[test]
    fn test_v_bit_name() {
        assert_eq!(
            RouterBit::v_bit(30.0, 0.05).name,
            "0.05-tip 30-degree carving bit"
        );
        assert_eq!(RouterBit::v_bit(60.0, 0.0).name, "60-degree carving bit");
    }

    #[test]
    fn test_invalid_bits() {
        assert!(!RouterBit::flat(0.0).is_valid());
        assert!(!RouterBit::v_bit(180.0, 0.1).is_valid());
        assert!(!RouterBit::v_bit(30.0, -0.1).is_valid());
    }

    #[test]
    fn test_profile_serialization() {
        let bit = RouterBit::v_bit(30.0, 0.05);
        let json = serde_json::to_string(&bit.profile).unwrap();
        assert!(json.contains("\"kind\":\"v-bit\""));
        let back: BitProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bit.profile);
    }
}
