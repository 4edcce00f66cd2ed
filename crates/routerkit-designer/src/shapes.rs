//! Path primitives built with [`PathBuilder`].

use crate::model::Path;
use crate::path_builder::{CornerStyle, PathBuilder, FULL_TURN, QUARTER_TURN};
use routerkit_core::{CutError, Vector3D};

/// Corner treatment shared by all four corners of a box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerOptions {
    pub style: CornerStyle,
    pub radius: f64,
}

/// Placement and size of a box. Each axis is positioned either by its
/// low edge (`x0`/`y0`) or by its center (`cx`/`cy`); the edge wins when
/// both are given.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxOptions {
    pub x0: Option<f64>,
    pub y0: Option<f64>,
    pub cx: Option<f64>,
    pub cy: Option<f64>,
    pub width: f64,
    pub height: f64,
    pub corners: CornerOptions,
}

impl BoxOptions {
    /// Box with its lower-left corner at `(x0, y0)` and sharp corners.
    pub fn from_corner(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self {
            x0: Some(x0),
            y0: Some(y0),
            width,
            height,
            ..Default::default()
        }
    }

    /// Box centered on `(cx, cy)` and sharp corners.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            cx: Some(cx),
            cy: Some(cy),
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_corners(mut self, style: CornerStyle, radius: f64) -> Self {
        self.corners = CornerOptions { style, radius };
        self
    }
}

fn figure_edge(edge: Option<f64>, center: Option<f64>, size: f64, axis: &str) -> Result<f64, CutError> {
    match (edge, center) {
        (Some(edge), _) => Ok(edge),
        (None, Some(center)) => Ok(center - size / 2.0),
        (None, None) => Err(CutError::InvalidParameter {
            name: format!("{axis}0"),
            reason: format!("either '{axis}0' or 'c{axis}' must be specified for box"),
        }),
    }
}

/// Traces a rectangle counter-clockwise from the bottom edge, with
/// optionally rounded or chamfered corners.
pub fn box_path(options: &BoxOptions) -> Result<Path, CutError> {
    let w = options.width;
    let h = options.height;
    let x0 = figure_edge(options.x0, options.cx, w, "x")?;
    let y0 = figure_edge(options.y0, options.cy, h, "y")?;
    let c = options.corners.radius;
    let style = options.corners.style;

    let mut pb = PathBuilder::new(Vector3D::new(x0 + c, y0, 0.0));
    for corner in [
        Vector3D::new(x0 + w, y0, 0.0),
        Vector3D::new(x0 + w, y0 + h, 0.0),
        Vector3D::new(x0, y0 + h, 0.0),
        Vector3D::new(x0, y0, 0.0),
    ] {
        pb.line_to_corner_start(corner, QUARTER_TURN, c);
        pb.turn(QUARTER_TURN, c, style);
    }
    pb.close_loop();
    Ok(pb.into_path())
}

/// A full circle of `radius` around the origin, starting at `(0, -radius)`.
pub fn circle_path(radius: f64) -> Path {
    let mut pb = PathBuilder::new(Vector3D::new(0.0, -radius, 0.0));
    pb.turn(FULL_TURN, radius, CornerStyle::Round).close_loop();
    pb.into_path()
}
