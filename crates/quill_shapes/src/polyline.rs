//! Open and closed point sequences

use quill_core::{Error, Extents, Point, Result};
use quill_path::Path;

use crate::Shape;

/// Connected straight segments through a list of points
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(start: impl Into<Point>) -> Result<Self> {
        Ok(Self {
            points: vec![checked(start.into())?],
        })
    }

    pub fn line_to(&mut self, point: impl Into<Point>) -> Result<&mut Self> {
        let point = checked(point.into())?;
        self.points.push(point);
        Ok(self)
    }

    /// Append a point given as an offset from the current point
    pub fn relative_line_to(&mut self, offset: impl Into<Point>) -> Result<&mut Self> {
        let point = self.current_point() + checked(offset.into())?;
        self.points.push(point);
        Ok(self)
    }

    /// Remove the last point, keeping the start point
    pub fn undo(&mut self) -> Option<Point> {
        if self.points.len() > 1 {
            self.points.pop()
        } else {
            None
        }
    }

    pub fn start_point(&self) -> Point {
        self.points[0]
    }

    pub fn current_point(&self) -> Point {
        // Never empty
        self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn outline(&self) -> Result<Path> {
        let mut path = Path::new(self.start_point())?;
        if self.points.len() > 1 {
            path.line_to(self.points[1..].iter().copied())?;
        }
        Ok(path)
    }

    fn extent(&self, pick: impl Fn(&Point) -> f64, fold: fn(f64, f64) -> f64) -> f64 {
        self.points
            .iter()
            .map(pick)
            .reduce(fold)
            .unwrap_or_default()
    }
}

fn checked(point: Point) -> Result<Point> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(Error::invalid_argument(format!("polyline point {point} is not finite")))
    }
}

impl Extents for Polyline {
    fn left(&self) -> f64 {
        self.extent(|p| p.x, f64::min)
    }

    fn right(&self) -> f64 {
        self.extent(|p| p.x, f64::max)
    }

    fn top(&self) -> f64 {
        self.extent(|p| p.y, f64::min)
    }

    fn bottom(&self) -> f64 {
        self.extent(|p| p.y, f64::max)
    }
}

impl Shape for Polyline {
    fn to_path(&self) -> Result<Path> {
        self.outline()
    }
}

/// A polyline whose last point connects back to its start
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    outline: Polyline,
}

impl Polygon {
    pub fn new(start: impl Into<Point>) -> Result<Self> {
        Ok(Self {
            outline: Polyline::new(start)?,
        })
    }

    /// Polygon through `points`; fails when `points` is empty
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        let mut points = points.into_iter();
        let start = points
            .next()
            .ok_or_else(|| Error::invalid_argument("polygon needs at least one point"))?;
        let mut polygon = Polygon::new(start)?;
        for point in points {
            polygon.line_to(point)?;
        }
        Ok(polygon)
    }

    pub fn line_to(&mut self, point: impl Into<Point>) -> Result<&mut Self> {
        self.outline.line_to(point)?;
        Ok(self)
    }

    pub fn relative_line_to(&mut self, offset: impl Into<Point>) -> Result<&mut Self> {
        self.outline.relative_line_to(offset)?;
        Ok(self)
    }

    pub fn undo(&mut self) -> Option<Point> {
        self.outline.undo()
    }

    pub fn start_point(&self) -> Point {
        self.outline.start_point()
    }

    pub fn current_point(&self) -> Point {
        self.outline.current_point()
    }

    pub fn points(&self) -> &[Point] {
        self.outline.points()
    }
}

impl Extents for Polygon {
    fn left(&self) -> f64 {
        self.outline.left()
    }

    fn right(&self) -> f64 {
        self.outline.right()
    }

    fn top(&self) -> f64 {
        self.outline.top()
    }

    fn bottom(&self) -> f64 {
        self.outline.bottom()
    }
}

impl Shape for Polygon {
    fn to_path(&self) -> Result<Path> {
        let mut path = self.outline.outline()?;
        path.close_path();
        Ok(path)
    }
}
