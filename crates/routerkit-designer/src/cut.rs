//! # Cut IR
//!
//! A cut tree describes machining intent: holes, traced outlines, conic
//! pockets, pauses, and compound groups that fan their components out over a
//! list of transforms. Trees are immutable values; backends only read them.
//!
//! All lengths are in the unit active at the node, which is the job's native
//! unit unless an enclosing [`Compound`] declares another. A depth of
//! infinity means "through the remaining stock".

use routerkit_core::{ComplexAmount, Transform, Vector3D};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::Path;

/// Which side of a traced path is material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceSide {
    Left,
    Right,
    #[default]
    Middle,
}

/// A 3×4 affine matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixTransform {
    pub xx: f64,
    pub xy: f64,
    pub xz: f64,
    pub x1: f64,
    pub yx: f64,
    pub yy: f64,
    pub yz: f64,
    pub y1: f64,
    pub zx: f64,
    pub zy: f64,
    pub zz: f64,
    pub z1: f64,
}

/// A 2D placement: scale, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimpleTransform {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Counter-clockwise, in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// Anything that can be turned into a [`Transform`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transformish {
    Matrix(MatrixTransform),
    Simple(SimpleTransform),
}

impl Transformish {
    pub fn identity() -> Self {
        Self::Simple(SimpleTransform::default())
    }

    /// Pure translation in the XY plane.
    pub fn offset(x: f64, y: f64) -> Self {
        Self::Simple(SimpleTransform {
            x,
            y,
            ..Default::default()
        })
    }

    pub fn to_transform(&self) -> Transform {
        match self {
            Self::Matrix(m) => Transform::from_rows([
                [m.xx, m.xy, m.xz, m.x1],
                [m.yx, m.yy, m.yz, m.y1],
                [m.zx, m.zy, m.zz, m.z1],
            ]),
            Self::Simple(s) => {
                let translation =
                    Transform::translation(Vector3D::new(s.x, s.y, s.z.unwrap_or(0.0)));
                let rotation = match s.rotation {
                    Some(degrees) if degrees != 0.0 => Transform::rotation_z(degrees.to_radians()),
                    _ => Transform::identity(),
                };
                let scale = match s.scale {
                    Some(factor) if factor != 1.0 => Transform::scale(factor),
                    _ => Transform::identity(),
                };
                translation * rotation * scale
            }
        }
    }
}

impl From<Transform> for Transformish {
    fn from(t: Transform) -> Self {
        let [x, y, z] = t.to_rows();
        Self::Matrix(MatrixTransform {
            xx: x[0],
            xy: x[1],
            xz: x[2],
            x1: x[3],
            yx: y[0],
            yy: y[1],
            yz: y[2],
            y1: y[3],
            zx: z[0],
            zy: z[1],
            zz: z[2],
            z1: z[3],
        })
    }
}

fn identity_transforms() -> Vec<Transformish> {
    vec![Transformish::identity()]
}

/// Lengths are written as plain numbers; infinity is written `"Infinity"`.
mod depth_serde {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DepthRepr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(depth: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if depth.is_infinite() && *depth > 0.0 {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_f64(*depth)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match DepthRepr::deserialize(deserializer)? {
            DepthRepr::Number(n) => Ok(n),
            DepthRepr::Text(s) if matches!(s.as_str(), "Infinity" | "inf" | "through") => {
                Ok(f64::INFINITY)
            }
            DepthRepr::Text(s) => Err(serde::de::Error::custom(format!(
                "Failed to parse '{s}' as depth"
            ))),
        }
    }
}

/// Fans `components` out over `transforms`, optionally switching units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    #[serde(default = "identity_transforms")]
    pub transforms: Vec<Transformish>,
    pub components: Vec<Cut>,
    /// Length of one local unit inside this compound, e.g. `1in`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<ComplexAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Compound {
    /// A single untransformed instance of `components`.
    pub fn new(components: Vec<Cut>) -> Self {
        Self {
            transforms: identity_transforms(),
            components,
            unit: None,
            comment: None,
        }
    }

    pub fn with_transforms(mut self, transforms: Vec<Transformish>) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn with_unit(mut self, unit: ComplexAmount) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// Carves along a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracePath {
    pub path: Path,
    #[serde(default, with = "depth_serde")]
    pub depth: f64,
    #[serde(default)]
    pub space_side: SpaceSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A cylindrical hole centered on the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundHole {
    pub diameter: f64,
    #[serde(default, with = "depth_serde")]
    pub depth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A cone-shaped recess (countersink) centered on the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConicPocket {
    pub diameter: f64,
    #[serde(default)]
    pub edge_depth: f64,
    pub bottom_diameter: f64,
    #[serde(with = "depth_serde")]
    pub bottom_depth: f64,
    #[serde(default)]
    pub cuts_bottom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Machine pause; no geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A node of a cut tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Cut {
    Compound(Compound),
    TracePath(TracePath),
    RoundHole(RoundHole),
    ConicPocket(ConicPocket),
    Pause(Pause),
}

impl Cut {
    pub fn compound(components: Vec<Cut>) -> Self {
        Self::Compound(Compound::new(components))
    }

    pub fn trace_path(path: Path, depth: f64) -> Self {
        Self::TracePath(TracePath {
            path,
            depth,
            space_side: SpaceSide::Middle,
            comment: None,
        })
    }

    pub fn round_hole(diameter: f64, depth: f64) -> Self {
        Self::RoundHole(RoundHole {
            diameter,
            depth,
            comment: None,
        })
    }

    pub fn pause() -> Self {
        Self::Pause(Pause::default())
    }

    /// Attaches a free-text comment to this node.
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::Compound(c) => &mut c.comment,
            Self::TracePath(c) => &mut c.comment,
            Self::RoundHole(c) => &mut c.comment,
            Self::ConicPocket(c) => &mut c.comment,
            Self::Pause(c) => &mut c.comment,
        };
        *slot = Some(text.into());
        self
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Compound(c) => c.comment.as_deref(),
            Self::TracePath(c) => c.comment.as_deref(),
            Self::RoundHole(c) => c.comment.as_deref(),
            Self::ConicPocket(c) => c.comment.as_deref(),
            Self::Pause(c) => c.comment.as_deref(),
        }
    }

    /// Variant name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Compound(_) => "Compound",
            Self::TracePath(_) => "TracePath",
            Self::RoundHole(_) => "RoundHole",
            Self::ConicPocket(_) => "ConicPocket",
            Self::Pause(_) => "Pause",
        }
    }
}

impl From<Compound> for Cut {
    fn from(c: Compound) -> Self {
        Self::Compound(c)
    }
}

impl From<ConicPocket> for Cut {
    fn from(c: ConicPocket) -> Self {
        Self::ConicPocket(c)
    }
}
