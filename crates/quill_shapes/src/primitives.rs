//! Rectangles, lines, circles and ellipses

use quill_core::{Extents, Length, Point, Result};
use quill_path::{ArcOptions, Path};

use crate::{finite, Shape};

fn finite_point(point: Point, what: &str) -> Result<Point> {
    Ok(Point::new(finite(point.x, what)?, finite(point.y, what)?))
}

fn finite_length(length: Length, what: &str) -> Result<f64> {
    finite(length.to_user_units(), what)
}

// ─────────────────────────────────────────────────────────────────────────────
// Rectangle
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    left_top: Point,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// Rectangle spanning `width` and `height` from `left_top`
    ///
    /// A negative width or height extends the rectangle to the left or
    /// upwards instead.
    pub fn new(
        left_top: impl Into<Point>,
        width: impl Into<Length>,
        height: impl Into<Length>,
    ) -> Result<Self> {
        let mut left_top = finite_point(left_top.into(), "rectangle corner")?;
        let width = finite_length(width.into(), "rectangle width")?;
        let height = finite_length(height.into(), "rectangle height")?;
        if width < 0.0 {
            left_top.x += width;
        }
        if height < 0.0 {
            left_top.y += height;
        }
        Ok(Self {
            left_top,
            width: width.abs(),
            height: height.abs(),
        })
    }

    /// Rectangle from its four edges, in any order
    pub fn from_edges(top: f64, right: f64, bottom: f64, left: f64) -> Result<Self> {
        Rectangle::new(
            (left.min(right), top.min(bottom)),
            (right - left).abs(),
            (bottom - top).abs(),
        )
    }

    pub fn left_top(&self) -> Point {
        self.left_top
    }

    pub fn center(&self) -> Point {
        self.left_top + Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Extents for Rectangle {
    fn left(&self) -> f64 {
        self.left_top.x
    }

    fn right(&self) -> f64 {
        self.left_top.x + self.width
    }

    fn top(&self) -> f64 {
        self.left_top.y
    }

    fn bottom(&self) -> f64 {
        self.left_top.y + self.height
    }
}

impl Shape for Rectangle {
    fn to_path(&self) -> Result<Path> {
        Path::draw_and_close(self.left_top, |p| {
            p.horizontal_line_to([self.right()])?
                .vertical_line_to([self.bottom()])?
                .horizontal_line_to([self.left()])?;
            Ok(())
        })
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line
// ─────────────────────────────────────────────────────────────────────────────

/// Single straight segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Result<Self> {
        Ok(Self {
            start: finite_point(start.into(), "line start")?,
            end: finite_point(end.into(), "line end")?,
        })
    }

    /// Line from `start` along the vector `direction`
    pub fn from_direction(start: impl Into<Point>, direction: impl Into<Point>) -> Result<Self> {
        let start = start.into();
        Line::new(start, start + direction.into())
    }

    pub fn start_point(&self) -> Point {
        self.start
    }

    pub fn end_point(&self) -> Point {
        self.end
    }
}

impl Extents for Line {
    fn left(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    fn right(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    fn top(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    fn bottom(&self) -> f64 {
        self.start.y.max(self.end.y)
    }
}

impl Shape for Line {
    fn to_path(&self) -> Result<Path> {
        Path::draw(self.start, |p| {
            p.line_to([self.end])?;
            Ok(())
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ellipse / Circle
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned ellipse
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    center: Point,
    radius_x: f64,
    radius_y: f64,
}

impl Ellipse {
    /// Negative radii are taken by absolute value
    pub fn new(
        center: impl Into<Point>,
        radius_x: impl Into<Length>,
        radius_y: impl Into<Length>,
    ) -> Result<Self> {
        Ok(Self {
            center: finite_point(center.into(), "ellipse center")?,
            radius_x: finite_length(radius_x.into(), "ellipse radius")?.abs(),
            radius_y: finite_length(radius_y.into(), "ellipse radius")?.abs(),
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius_x(&self) -> f64 {
        self.radius_x
    }

    pub fn radius_y(&self) -> f64 {
        self.radius_y
    }
}

impl Extents for Ellipse {
    fn left(&self) -> f64 {
        self.center.x - self.radius_x
    }

    fn right(&self) -> f64 {
        self.center.x + self.radius_x
    }

    fn top(&self) -> f64 {
        self.center.y - self.radius_y
    }

    fn bottom(&self) -> f64 {
        self.center.y + self.radius_y
    }
}

impl Shape for Ellipse {
    /// Two clockwise half turns starting from the rightmost point
    fn to_path(&self) -> Result<Path> {
        let east = Point::new(self.right(), self.center.y);
        let west = Point::new(self.left(), self.center.y);
        let (rx, ry) = (self.radius_x, self.radius_y);
        Path::draw_and_close(east, |p| {
            p.arc_to(west, rx, ry, ArcOptions::default())?
                .arc_to(east, rx, ry, ArcOptions::default())?;
            Ok(())
        })
    }

    fn width(&self) -> f64 {
        self.radius_x * 2.0
    }

    fn height(&self) -> f64 {
        self.radius_y * 2.0
    }
}

/// Circle, an ellipse with equal radii
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle(Ellipse);

impl Circle {
    pub fn new(center: impl Into<Point>, radius: impl Into<Length>) -> Result<Self> {
        let radius = radius.into();
        Ok(Circle(Ellipse::new(center, radius, radius)?))
    }

    pub fn center(&self) -> Point {
        self.0.center
    }

    pub fn radius(&self) -> f64 {
        self.0.radius_x
    }
}

impl Extents for Circle {
    fn left(&self) -> f64 {
        self.0.left()
    }

    fn right(&self) -> f64 {
        self.0.right()
    }

    fn top(&self) -> f64 {
        self.0.top()
    }

    fn bottom(&self) -> f64 {
        self.0.bottom()
    }
}

impl Shape for Circle {
    fn to_path(&self) -> Result<Path> {
        self.0.to_path()
    }

    fn width(&self) -> f64 {
        self.0.width()
    }

    fn height(&self) -> f64 {
        self.0.height()
    }
}
