//! Pie sectors

use quill_core::{Error, Extents, Length, Point, Rect, Result};
use quill_path::{ArcOptions, Path};

use crate::{finite, Shape};

/// Wider arcs are drawn as two arcs through the point opposite the start
const TRANSIT_THRESHOLD: f64 = 270.0;

/// Slice of an ellipse between two radii
///
/// Angles are in degrees, measured clockwise on a y-down canvas from the
/// positive x-axis. A negative `center_angle` sweeps counter-clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    center: Point,
    radius_x: f64,
    radius_y: f64,
    start_angle: f64,
    center_angle: f64,
    path: Path,
    bounds: Rect,
}

impl Sector {
    /// Fails when `|center_angle|` exceeds 360° or any input is not finite
    pub fn new(
        center: impl Into<Point>,
        radius_x: impl Into<Length>,
        radius_y: impl Into<Length>,
        start_angle: f64,
        center_angle: f64,
    ) -> Result<Self> {
        let center = center.into();
        let radius_x = finite(radius_x.into().to_user_units(), "sector radius")?.abs();
        let radius_y = finite(radius_y.into().to_user_units(), "sector radius")?.abs();
        let start_angle = finite(start_angle, "sector start angle")?;
        let center_angle = finite(center_angle, "sector angle")?;
        if center_angle.abs() > 360.0 {
            return Err(Error::invalid_argument(format!(
                "center angle is out of range: {center_angle}"
            )));
        }

        let mut sector = Self {
            center,
            radius_x,
            radius_y,
            start_angle,
            center_angle,
            path: Path::new(center)?,
            bounds: Rect::ZERO,
        };
        sector.path = sector.outline()?;
        sector.bounds = sector.path.bounds();
        Ok(sector)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn center_angle(&self) -> f64 {
        self.center_angle
    }

    /// Point where the arc begins
    pub fn arc_start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// Point where the arc ends
    pub fn arc_end_point(&self) -> Point {
        self.point_at(self.start_angle + self.center_angle)
    }

    fn point_at(&self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.center + Point::new(self.radius_x * cos, self.radius_y * sin)
    }

    fn outline(&self) -> Result<Path> {
        let (rx, ry) = (self.radius_x, self.radius_y);
        let start = self.arc_start_point();
        let end = self.arc_end_point();
        let options = ArcOptions::new().with_clockwise(self.center_angle >= 0.0);

        Path::draw_and_close(self.center, |p| {
            p.line_to([start])?;
            if self.center_angle.abs() > TRANSIT_THRESHOLD {
                let transit = start.reflect(self.center);
                tracing::trace!(%transit, angle = self.center_angle, "splitting sector arc");
                p.arc_to(transit, rx, ry, options.with_large_arc(true))?
                    .arc_to(end, rx, ry, options)?;
            } else {
                let large_arc = self.center_angle.abs() > 180.0;
                p.arc_to(end, rx, ry, options.with_large_arc(large_arc))?;
            }
            Ok(())
        })
    }
}

impl Extents for Sector {
    fn left(&self) -> f64 {
        self.bounds.left()
    }

    fn right(&self) -> f64 {
        self.bounds.right()
    }

    fn top(&self) -> f64 {
        self.bounds.top()
    }

    fn bottom(&self) -> f64 {
        self.bounds.bottom()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Shape for Sector {
    fn to_path(&self) -> Result<Path> {
        Ok(self.path.clone())
    }
}
