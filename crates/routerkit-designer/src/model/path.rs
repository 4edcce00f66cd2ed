//! Path model
//!
//! A path is a list of vertices and a list of segments indexing into it.
//! Arc segments additionally reference the vertex at their center.

use routerkit_core::{CutError, Vector3D};
use serde::{Deserialize, Serialize};

/// Direction an arc is swept in, viewed from +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationSense {
    Clockwise,
    CounterClockwise,
}

impl RotationSense {
    /// Sense of a turn by `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        if angle < 0.0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }

    /// +1 for counter-clockwise, -1 for clockwise.
    pub fn sign(&self) -> i32 {
        match self {
            Self::Clockwise => -1,
            Self::CounterClockwise => 1,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// One piece of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PathSegment {
    Straight {
        start: usize,
        end: usize,
    },
    Arc {
        start: usize,
        end: usize,
        /// Vertex at the arc's center
        axis: usize,
        sense: RotationSense,
    },
}

impl PathSegment {
    pub fn start(&self) -> usize {
        match *self {
            Self::Straight { start, .. } | Self::Arc { start, .. } => start,
        }
    }

    pub fn end(&self) -> usize {
        match *self {
            Self::Straight { end, .. } | Self::Arc { end, .. } => end,
        }
    }
}

/// Vertices plus the segments connecting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub vertices: Vec<Vector3D>,
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn new(vertices: Vec<Vector3D>, segments: Vec<PathSegment>) -> Self {
        Self { vertices, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Checks that every segment references existing vertices.
    pub fn validate(&self) -> Result<(), CutError> {
        let count = self.vertices.len();
        for (index, segment) in self.segments.iter().enumerate() {
            for vertex in [segment.start(), segment.end()] {
                if vertex >= count {
                    return Err(CutError::MissingVertex {
                        segment: index,
                        vertex,
                    });
                }
            }
            if let PathSegment::Arc { axis, .. } = *segment {
                if axis >= count {
                    return Err(CutError::MissingArcAxis {
                        segment: index,
                        axis,
                    });
                }
            }
        }
        Ok(())
    }

    /// Position of the first segment's start vertex.
    pub fn start_point(&self) -> Option<Vector3D> {
        self.segments
            .first()
            .and_then(|s| self.vertices.get(s.start()))
            .copied()
    }

    /// Position of the last segment's end vertex.
    pub fn end_point(&self) -> Option<Vector3D> {
        self.segments
            .last()
            .and_then(|s| self.vertices.get(s.end()))
            .copied()
    }

    /// Whether the path ends where it starts.
    pub fn is_closed(&self) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Path {
        Path::new(
            vec![
                Vector3D::new(0.0, 0.0, 0.0),
                Vector3D::new(1.0, 0.0, 0.0),
                Vector3D::new(0.0, 1.0, 0.0),
            ],
            vec![
                PathSegment::Straight { start: 0, end: 1 },
                PathSegment::Straight { start: 1, end: 2 },
                PathSegment::Straight { start: 2, end: 0 },
            ],
        )
    }

    #[test]
    fn test_closed_path() {
        let path = triangle();
        assert!(path.validate().is_ok());
        assert!(path.is_closed());
    }

    #[test]
    fn test_open_path() {
        let mut path = triangle();
        path.segments.pop();
        assert!(!path.is_closed());
        assert_eq!(path.end_point(), Some(Vector3D::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_missing_arc_axis() {
        let mut path = triangle();
        path.segments.push(PathSegment::Arc {
            start: 0,
            end: 1,
            axis: 7,
            sense: RotationSense::Clockwise,
        });
        assert_eq!(
            path.validate(),
            Err(CutError::MissingArcAxis {
                segment: 3,
                axis: 7
            })
        );
    }

    #[test]
    fn test_missing_vertex() {
        let mut path = triangle();
        path.segments[1] = PathSegment::Straight { start: 1, end: 5 };
        assert!(matches!(
            path.validate(),
            Err(CutError::MissingVertex { segment: 1, vertex: 5 })
        ));
    }

    #[test]
    fn test_rotation_sense() {
        assert_eq!(RotationSense::from_angle(-0.1), RotationSense::Clockwise);
        assert_eq!(
            RotationSense::from_angle(0.1),
            RotationSense::CounterClockwise
        );
        assert_eq!(RotationSense::Clockwise.sign(), -1);
        assert_eq!(
            RotationSense::Clockwise.reversed(),
            RotationSense::CounterClockwise
        );
    }

    #[test]
    fn test_segment_serialization() {
        let segment = PathSegment::Arc {
            start: 0,
            end: 1,
            axis: 2,
            sense: RotationSense::CounterClockwise,
        };
        let json = serde_json::to_string(&segment).unwrap();
        assert!(json.contains("\"type\":\"arc\""));
        assert!(json.contains("\"sense\":\"counter-clockwise\""));
    }
}
