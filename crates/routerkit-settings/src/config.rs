//! Job configuration for RouterKit
//!
//! A job file describes everything fixed for one run: the stock, the router
//! bit and how G-code is written. Supports JSON and TOML file formats.
//!
//! Configuration is organized into sections:
//! - `[job]`: name, native unit, stock thickness
//! - `[bit]`: router bit profile and dimensions
//! - `[gcode]`: heights, step-down, feed, spindle speed and formatting
//!
//! Lengths are unit amounts such as `"1/16in"`, `"3mm"` or `"1/2board"`,
//! decoded against the job once the thickness is known.

use routerkit_camtools::{CommentMode, GCodeOptions};
use routerkit_core::{ComplexAmount, JobContext, Rational, RouterBit, UnitTable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

fn inches(numerator: i64, denominator: i64) -> ComplexAmount {
    ComplexAmount::inches(Rational::from_integer(numerator) / Rational::from_integer(denominator))
}

fn invalid(key: &str, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Stock and units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit the machine works in: `inch` or `mm`
    pub native_unit: String,
    /// Stock thickness; may not be given in boards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<ComplexAmount>,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            name: None,
            native_unit: "inch".to_string(),
            thickness: None,
        }
    }
}

/// Router bit shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BitKind {
    #[default]
    Flat,
    VBit,
}

/// Router bit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub profile: BitKind,
    /// Cutting diameter of a flat bit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<ComplexAmount>,
    /// Included angle of a V-bit, in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Tip width of a V-bit; pointed when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip_diameter: Option<ComplexAmount>,
}

impl Default for BitSettings {
    fn default() -> Self {
        Self {
            name: None,
            profile: BitKind::Flat,
            diameter: Some(inches(1, 8)),
            angle: None,
            tip_diameter: None,
        }
    }
}

/// G-code output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GCodeSettings {
    pub safe_height: ComplexAmount,
    pub minimum_fast_z: ComplexAmount,
    pub step_down: ComplexAmount,
    /// Feed rate in native units per minute
    pub feed_rate: f64,
    pub spindle_speed: f64,
    pub fraction_digits: usize,
    pub comment_mode: CommentMode,
}

impl Default for GCodeSettings {
    fn default() -> Self {
        Self {
            safe_height: inches(1, 4),
            minimum_fast_z: inches(1, 16),
            step_down: inches(1, 50),
            feed_rate: 3.0,
            spindle_speed: 1000.0,
            fraction_digits: 4,
            comment_mode: CommentMode::Parentheses,
        }
    }
}

/// Complete job configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub job: JobSettings,
    pub bit: BitSettings,
    pub gcode: GCodeSettings,
}

impl JobConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML job description.
    pub fn from_toml(content: &str) -> SettingsResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON job description.
    pub fn from_json(content: &str) -> SettingsResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Self::format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), format, "Loading job config");
        match format {
            "json" => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match Self::format_of(path)? {
            "json" => serde_json::to_string_pretty(self)?,
            _ => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    fn format_of(path: &Path) -> SettingsResult<&'static str> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok("json"),
            Some("toml") => Ok("toml"),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        UnitTable::standard().get(&self.job.native_unit)?;
        match &self.job.thickness {
            None => return Err(SettingsError::MissingThickness),
            Some(t) if t.is_empty() => return Err(SettingsError::MissingThickness),
            Some(t) if t.uses_board() => {
                return Err(invalid("job.thickness", "cannot be measured in boards"))
            }
            Some(_) => {}
        }

        match self.bit.profile {
            BitKind::Flat if self.bit.diameter.is_none() => {
                return Err(invalid("bit.diameter", "a flat bit needs a diameter"));
            }
            BitKind::VBit => match self.bit.angle {
                Some(angle) if angle > 0.0 && angle < 180.0 => {}
                Some(angle) => {
                    return Err(invalid(
                        "bit.angle",
                        format!("must be between 0 and 180 degrees, got {angle}"),
                    ))
                }
                None => return Err(invalid("bit.angle", "a V-bit needs an angle")),
            },
            _ => {}
        }

        if self.gcode.feed_rate.is_nan() || self.gcode.feed_rate <= 0.0 {
            return Err(invalid("gcode.feed_rate", "must be > 0"));
        }
        if self.gcode.spindle_speed.is_nan() || self.gcode.spindle_speed <= 0.0 {
            return Err(invalid("gcode.spindle_speed", "must be > 0"));
        }
        Ok(())
    }

    /// Builds the job context: stock, units and router bit.
    pub fn build_context(&self) -> SettingsResult<JobContext> {
        let thickness = self
            .job
            .thickness
            .as_ref()
            .ok_or(SettingsError::MissingThickness)?;
        // Bit sizes may be given in boards, so the stock comes first.
        let stock = JobContext::new(&self.job.native_unit, thickness, RouterBit::flat(0.0))?;
        let bit = self.router_bit(&stock)?;
        if !bit.is_valid() {
            return Err(invalid("bit", format!("'{}' has no usable cutting width", bit.name)));
        }
        debug!(
            unit = stock.native_unit().name,
            thickness = %stock.thickness(),
            bit = %bit.name,
            "Built job context"
        );
        Ok(stock.with_router_bit(bit))
    }

    /// The router bit, sized in the job's native unit.
    pub fn router_bit(&self, job: &JobContext) -> SettingsResult<RouterBit> {
        let mut bit = match self.bit.profile {
            BitKind::Flat => {
                let diameter = self
                    .bit
                    .diameter
                    .as_ref()
                    .ok_or_else(|| invalid("bit.diameter", "a flat bit needs a diameter"))?;
                RouterBit::flat(job.decode(diameter)?)
            }
            BitKind::VBit => {
                let angle = self
                    .bit
                    .angle
                    .ok_or_else(|| invalid("bit.angle", "a V-bit needs an angle"))?;
                let tip = match &self.bit.tip_diameter {
                    Some(tip) => job.decode(tip)?,
                    None => 0.0,
                };
                RouterBit::v_bit(angle, tip)
            }
        };
        if let Some(name) = &self.bit.name {
            bit.name = name.clone();
        }
        Ok(bit)
    }

    /// Generator options in the job's native unit.
    pub fn gcode_options(&self, job: &JobContext) -> SettingsResult<GCodeOptions> {
        let options = GCodeOptions {
            safe_height: job.decode(&self.gcode.safe_height)?,
            minimum_fast_z: job.decode(&self.gcode.minimum_fast_z)?,
            step_down: job.decode(&self.gcode.step_down)?,
            feed_rate: self.gcode.feed_rate,
            spindle_speed: self.gcode.spindle_speed,
            fraction_digits: self.gcode.fraction_digits,
            comment_mode: self.gcode.comment_mode,
        };
        options.validate()?;
        Ok(options)
    }
}
