//! Path builder
//!
//! [`Path`] owns one command chain and exposes the builder calls shapes and
//! applications use to extend it. Every call validates all of its arguments
//! before touching the chain, so a failing call leaves the path unchanged.
//!
//! # Example
//!
//! ```rust
//! use quill_core::Extents;
//! use quill_path::{ArcOptions, Path};
//!
//! # fn main() -> quill_core::Result<()> {
//! let mut path = Path::new((0.0, 0.0))?;
//! path.line_to([(10.0, 0.0)])?
//!     .arc_to((10.0, 20.0), 10.0, 10.0, ArcOptions::default())?
//!     .close_path();
//!
//! assert!(path.is_closed());
//! assert!(path.right() > 10.0);
//! # Ok(())
//! # }
//! ```

use quill_core::{Error, Extents, Length, Point, Rect, Result};
use smallvec::SmallVec;

use crate::bounds;
use crate::canonical::CanonicalChain;
use crate::chain::{ChainEntry, CommandChain};
use crate::command::{ArcParams, Command};
use crate::path_data::{self, PathDataFormat};

type Staged = SmallVec<[(Command, bool); 8]>;

/// Optional arc parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcOptions {
    /// Rotation of the ellipse's x-axis in degrees
    pub rotation: f64,
    pub large_arc: bool,
    pub clockwise: bool,
}

impl Default for ArcOptions {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            large_arc: false,
            clockwise: true,
        }
    }
}

impl ArcOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_large_arc(mut self, large_arc: bool) -> Self {
        self.large_arc = large_arc;
        self
    }

    pub fn with_clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }
}

/// A mutable vector path
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    chain: CommandChain,
}

impl Path {
    /// Create a path starting at `start`
    pub fn new(start: impl Into<Point>) -> Result<Self> {
        let start = finite_point(start.into())?;
        Ok(Self {
            chain: CommandChain::new(start),
        })
    }

    /// Create a path and hand it to `draw` for construction
    pub fn draw<F>(start: impl Into<Point>, draw: F) -> Result<Self>
    where
        F: FnOnce(&mut Path) -> Result<()>,
    {
        let mut path = Path::new(start)?;
        draw(&mut path)?;
        Ok(path)
    }

    /// Like [`Path::draw`], closing the path unless `draw` already did
    pub fn draw_and_close<F>(start: impl Into<Point>, draw: F) -> Result<Self>
    where
        F: FnOnce(&mut Path) -> Result<()>,
    {
        let mut path = Path::draw(start, draw)?;
        if !path.is_closed() {
            path.close_path();
        }
        Ok(path)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Builder calls
    // ─────────────────────────────────────────────────────────────────────

    /// Start a new sub-path; extra points draw lines from the first
    pub fn move_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_move(points, false)
    }

    pub fn relative_move_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_move(points, true)
    }

    /// One straight line per point
    pub fn line_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_lines(points, false)
    }

    pub fn relative_line_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_lines(points, true)
    }

    pub fn horizontal_line_to<I>(&mut self, xs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = f64>,
    {
        self.push_axis_lines(xs, false, Command::HorizontalLine)
    }

    pub fn relative_horizontal_line_to<I>(&mut self, xs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = f64>,
    {
        self.push_axis_lines(xs, true, Command::HorizontalLine)
    }

    pub fn vertical_line_to<I>(&mut self, ys: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = f64>,
    {
        self.push_axis_lines(ys, false, Command::VerticalLine)
    }

    pub fn relative_vertical_line_to<I>(&mut self, ys: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = f64>,
    {
        self.push_axis_lines(ys, true, Command::VerticalLine)
    }

    /// Cubic curves: `control1, control2, end`, then `(control2, end)` pairs
    /// that continue as shorthand curves
    pub fn curve_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_cubics(points, false)
    }

    pub fn relative_curve_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_cubics(points, true)
    }

    /// Quadratic curves: `control, end`, then end points that continue as
    /// shorthand curves
    pub fn quadratic_curve_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_quadratics(points, false)
    }

    pub fn relative_quadratic_curve_to<I>(&mut self, points: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.push_quadratics(points, true)
    }

    /// Elliptical arc from the current point to `end`
    pub fn arc_to(
        &mut self,
        end: impl Into<Point>,
        radius_x: impl Into<Length>,
        radius_y: impl Into<Length>,
        options: ArcOptions,
    ) -> Result<&mut Self> {
        self.push_arc(end.into(), radius_x.into(), radius_y.into(), options, false)
    }

    pub fn relative_arc_to(
        &mut self,
        end: impl Into<Point>,
        radius_x: impl Into<Length>,
        radius_y: impl Into<Length>,
        options: ArcOptions,
    ) -> Result<&mut Self> {
        self.push_arc(end.into(), radius_x.into(), radius_y.into(), options, true)
    }

    /// Close the current sub-path
    ///
    /// Each call appends a `Close`, even right after another one.
    pub fn close_path(&mut self) -> &mut Self {
        self.chain.push(Command::Close, false);
        self
    }

    /// Remove the most recently appended command
    ///
    /// Returns `None` once only the initial `Move` is left.
    pub fn pop_last(&mut self) -> Option<ChainEntry> {
        self.chain.pop_last()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Resolved absolute end point of the last command
    pub fn current_point(&self) -> Point {
        self.chain.current_point()
    }

    /// Point of the initial `Move`
    pub fn start_point(&self) -> Point {
        self.chain.start_point()
    }

    /// Start of the current sub-path
    pub fn current_start_point(&self) -> Point {
        self.chain.current_start_point()
    }

    pub fn is_closed(&self) -> bool {
        self.chain.is_closed()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false; a path holds at least its initial `Move`
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn commands(&self) -> &CommandChain {
        &self.chain
    }

    pub fn path_points(&self) -> Vec<Point> {
        self.chain.path_points()
    }

    /// Equivalent chain of moves, lines, cubic curves and closes
    pub fn canonicalize(&self) -> CanonicalChain {
        CanonicalChain::from_chain(&self.chain)
    }

    /// Tight bounding rectangle
    pub fn bounds(&self) -> Rect {
        bounds::bounds(&self.canonicalize())
    }

    /// SVG path data for the path as built
    pub fn path_data(&self, format: &PathDataFormat) -> String {
        path_data::write(&self.chain, format)
    }

    /// SVG path data using only `M`, `L`, `C` and `Z`
    pub fn canonical_path_data(&self, format: &PathDataFormat) -> String {
        path_data::write(self.canonicalize().as_chain(), format)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Staging
    // ─────────────────────────────────────────────────────────────────────

    fn push_move<I>(&mut self, points: I, relative: bool) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        let points = collect_points(points)?;
        let Some((first, rest)) = points.split_first() else {
            return Err(Error::invalid_argument("move_to needs at least one point"));
        };
        let mut staged = Staged::new();
        staged.push((Command::Move(*first), relative));
        staged.extend(rest.iter().map(|p| (Command::Line(*p), relative)));
        Ok(self.append(staged))
    }

    fn push_lines<I>(&mut self, points: I, relative: bool) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        let points = collect_points(points)?;
        if points.is_empty() {
            return Err(Error::invalid_argument("line_to needs at least one point"));
        }
        let staged = points
            .iter()
            .map(|p| (Command::Line(*p), relative))
            .collect();
        Ok(self.append(staged))
    }

    fn push_axis_lines<I>(
        &mut self,
        values: I,
        relative: bool,
        command: fn(f64) -> Command,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values: SmallVec<[f64; 8]> = values.into_iter().collect();
        if values.is_empty() {
            return Err(Error::invalid_argument("axis line needs at least one coordinate"));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(Error::invalid_argument(format!("coordinate {bad} is not finite")));
        }
        let staged = values.iter().map(|v| (command(*v), relative)).collect();
        Ok(self.append(staged))
    }

    fn push_cubics<I>(&mut self, points: I, relative: bool) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        let points = collect_points(points)?;
        if points.len() < 3 || points.len() % 2 == 0 {
            return Err(Error::invalid_argument(
                "number of points must be odd and at least 3",
            ));
        }
        let mut staged = Staged::new();
        staged.push((
            Command::CubicCurve {
                control1: points[0],
                control2: points[1],
                end: points[2],
            },
            relative,
        ));
        staged.extend(points[3..].chunks_exact(2).map(|pair| {
            (
                Command::ShorthandCubicCurve {
                    control2: pair[0],
                    end: pair[1],
                },
                relative,
            )
        }));
        Ok(self.append(staged))
    }

    fn push_quadratics<I>(&mut self, points: I, relative: bool) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        let points = collect_points(points)?;
        if points.len() < 2 {
            return Err(Error::invalid_argument("number of points must be 2 or more"));
        }
        let mut staged = Staged::new();
        staged.push((
            Command::QuadraticCurve {
                control: points[0],
                end: points[1],
            },
            relative,
        ));
        staged.extend(
            points[2..]
                .iter()
                .map(|end| (Command::ShorthandQuadraticCurve { end: *end }, relative)),
        );
        Ok(self.append(staged))
    }

    fn push_arc(
        &mut self,
        end: Point,
        radius_x: Length,
        radius_y: Length,
        options: ArcOptions,
        relative: bool,
    ) -> Result<&mut Self> {
        let end = finite_point(end)?;
        let radius_x = radius_x.to_user_units();
        let radius_y = radius_y.to_user_units();
        if !radius_x.is_finite() || !radius_y.is_finite() {
            return Err(Error::invalid_argument(format!(
                "arc radii ({radius_x}, {radius_y}) must be finite"
            )));
        }
        if !options.rotation.is_finite() {
            return Err(Error::invalid_argument(format!(
                "arc rotation {} must be finite",
                options.rotation
            )));
        }

        let mut staged = Staged::new();
        staged.push((
            Command::Arc(ArcParams {
                radius_x: radius_x.abs(),
                radius_y: radius_y.abs(),
                rotation: options.rotation,
                large_arc: options.large_arc,
                sweep: options.clockwise,
                end,
            }),
            relative,
        ));
        Ok(self.append(staged))
    }

    fn append(&mut self, staged: Staged) -> &mut Self {
        for (command, relative) in staged {
            self.chain.push(command, relative);
        }
        self
    }
}

impl Extents for Path {
    fn left(&self) -> f64 {
        self.bounds().left()
    }

    fn right(&self) -> f64 {
        self.bounds().right()
    }

    fn top(&self) -> f64 {
        self.bounds().top()
    }

    fn bottom(&self) -> f64 {
        self.bounds().bottom()
    }

    fn bounds(&self) -> Rect {
        Path::bounds(self)
    }
}

fn finite_point(point: Point) -> Result<Point> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(Error::invalid_argument(format!("point {point} is not finite")))
    }
}

fn collect_points<I>(points: I) -> Result<SmallVec<[Point; 8]>>
where
    I: IntoIterator,
    I::Item: Into<Point>,
{
    points
        .into_iter()
        .map(|p| finite_point(p.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_fans_lines() {
        let mut path = Path::new((0.0, 0.0)).unwrap();
        path.move_to([(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)]).unwrap();

        assert_eq!(path.len(), 4);
        assert_eq!(path.current_start_point(), Point::new(1.0, 1.0));
        assert_eq!(path.current_point(), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_relative_move_fan_is_relative() {
        let mut path = Path::new((10.0, 10.0)).unwrap();
        path.relative_move_to([(1.0, 0.0), (0.0, 1.0)]).unwrap();

        assert_eq!(path.current_start_point(), Point::new(11.0, 10.0));
        assert_eq!(path.current_point(), Point::new(11.0, 11.0));
    }

    #[test]
    fn test_curve_to_arity() {
        let mut path = Path::new((0.0, 0.0)).unwrap();

        for count in [0usize, 1, 2, 4, 6] {
            let points = vec![(1.0, 1.0); count];
            let err = path.curve_to(points).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
            assert_eq!(path.len(), 1);
        }

        path.curve_to([(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (2.0, -1.0), (2.0, 0.0)])
            .unwrap();
        assert_eq!(path.len(), 3);
        assert!(matches!(
            path.commands().last().command(),
            Command::ShorthandCubicCurve { .. }
        ));
    }

    #[test]
    fn test_quadratic_arity() {
        let mut path = Path::new((0.0, 0.0)).unwrap();
        assert!(path.quadratic_curve_to([(1.0, 1.0)]).is_err());
        assert_eq!(path.len(), 1);

        path.quadratic_curve_to([(1.0, 1.0), (2.0, 0.0), (4.0, 0.0), (6.0, 0.0)])
            .unwrap();
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let mut path = Path::new((0.0, 0.0)).unwrap();
        path.line_to([(1.0, 1.0)]).unwrap();

        assert!(path.line_to([(2.0, 2.0), (f64::NAN, 0.0)]).is_err());
        assert!(path.horizontal_line_to([f64::INFINITY]).is_err());
        assert!(path
            .arc_to((5.0, 5.0), f64::NAN, 1.0, ArcOptions::default())
            .is_err());
        assert!(path
            .arc_to((5.0, 5.0), 1.0, 1.0, ArcOptions::new().with_rotation(f64::NAN))
            .is_err());
        assert_eq!(path.len(), 2);

        assert!(Path::new((f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_arc_radii_accept_lengths() {
        let mut path = Path::new((0.0, 0.0)).unwrap();
        let radius: Length = "1in".parse().unwrap();
        path.arc_to((180.0, 0.0), radius, -90.0, ArcOptions::default())
            .unwrap();

        match path.commands().last().command() {
            Command::Arc(arc) => {
                assert_eq!(arc.radius_x, 90.0);
                assert_eq!(arc.radius_y, 90.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_close_path_is_not_idempotent() {
        let mut path = Path::new((0.0, 0.0)).unwrap();
        path.line_to([(1.0, 0.0)]).unwrap();
        path.close_path().close_path();

        assert_eq!(path.len(), 4);
        assert!(path.is_closed());
        assert_eq!(path.current_point(), Point::ZERO);
    }

    #[test]
    fn test_pop_last() {
        let mut path = Path::new((0.0, 0.0)).unwrap();
        path.line_to([(1.0, 0.0), (2.0, 0.0)]).unwrap();

        let popped = path.pop_last().unwrap();
        assert_eq!(popped.end_point(), Point::new(2.0, 0.0));
        assert_eq!(path.current_point(), Point::new(1.0, 0.0));

        path.pop_last();
        assert!(path.pop_last().is_none());
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_draw_and_close() {
        let triangle = Path::draw_and_close((0.0, 0.0), |p| {
            p.line_to([(4.0, 0.0), (2.0, 3.0)])?;
            Ok(())
        })
        .unwrap();
        assert!(triangle.is_closed());
        assert_eq!(triangle.len(), 4);

        let already = Path::draw_and_close((0.0, 0.0), |p| {
            p.line_to([(4.0, 0.0)])?.close_path();
            Ok(())
        })
        .unwrap();
        assert_eq!(already.len(), 3);

        let failed = Path::draw((0.0, 0.0), |p| {
            p.curve_to([(1.0, 1.0)])?;
            Ok(())
        });
        assert!(failed.is_err());
    }

    #[test]
    fn test_path_points() {
        let mut path = Path::new((0.0, 0.0)).unwrap();
        path.relative_line_to([(1.0, 0.0)])
            .unwrap()
            .vertical_line_to([5.0])
            .unwrap()
            .close_path();

        assert_eq!(
            path.path_points(),
            vec![Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 5.0)]
        );
    }
}
