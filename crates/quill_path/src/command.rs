//! Path command variants

use quill_core::Point;

/// Elliptical arc parameters in the SVG endpoint parameterization
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcParams {
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse's x-axis in degrees
    pub rotation: f64,
    pub large_arc: bool,
    /// Clockwise sweep (positive-angle direction on a y-down canvas)
    pub sweep: bool,
    pub end: Point,
}

impl ArcParams {
    /// True when either radius is zero and the arc is drawn as a line
    pub fn is_degenerate(&self) -> bool {
        self.radius_x == 0.0 || self.radius_y == 0.0
    }
}

/// Path command for building vector paths
///
/// Points are stored as given: offsets from the preceding command's end point
/// when the owning chain entry is relative, absolute coordinates otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Start a new sub-path
    Move(Point),
    /// Close the current sub-path back to its start
    Close,
    /// Straight line
    Line(Point),
    /// Line along the x-axis
    HorizontalLine(f64),
    /// Line along the y-axis
    VerticalLine(f64),
    /// Cubic Bézier curve
    CubicCurve {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Cubic Bézier curve whose first control point is reflected from the
    /// preceding cubic curve
    ShorthandCubicCurve { control2: Point, end: Point },
    /// Quadratic Bézier curve
    QuadraticCurve { control: Point, end: Point },
    /// Quadratic Bézier curve whose control point is reflected from the
    /// preceding quadratic curve
    ShorthandQuadraticCurve { end: Point },
    /// Elliptical arc
    Arc(ArcParams),
}

impl Command {
    /// SVG instruction letter for this command
    pub fn instruction(&self, relative: bool) -> char {
        let letter = match self {
            Command::Move(_) => 'M',
            Command::Close => return 'Z',
            Command::Line(_) => 'L',
            Command::HorizontalLine(_) => 'H',
            Command::VerticalLine(_) => 'V',
            Command::CubicCurve { .. } => 'C',
            Command::ShorthandCubicCurve { .. } => 'S',
            Command::QuadraticCurve { .. } => 'Q',
            Command::ShorthandQuadraticCurve { .. } => 'T',
            Command::Arc(_) => 'A',
        };
        if relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    /// Raw end point, if the command carries one
    pub fn point(&self) -> Option<Point> {
        match self {
            Command::Move(p) | Command::Line(p) => Some(*p),
            Command::CubicCurve { end, .. }
            | Command::ShorthandCubicCurve { end, .. }
            | Command::QuadraticCurve { end, .. }
            | Command::ShorthandQuadraticCurve { end } => Some(*end),
            Command::Arc(arc) => Some(arc.end),
            Command::HorizontalLine(_) | Command::VerticalLine(_) | Command::Close => None,
        }
    }

    pub fn is_cubic(&self) -> bool {
        matches!(
            self,
            Command::CubicCurve { .. } | Command::ShorthandCubicCurve { .. }
        )
    }

    pub fn is_quadratic(&self) -> bool {
        matches!(
            self,
            Command::QuadraticCurve { .. } | Command::ShorthandQuadraticCurve { .. }
        )
    }

    /// True for commands that may appear in a canonical chain
    pub fn is_canonical(&self) -> bool {
        matches!(
            self,
            Command::Move(_) | Command::Line(_) | Command::CubicCurve { .. } | Command::Close
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_letters() {
        let line = Command::Line(Point::ZERO);
        assert_eq!(line.instruction(false), 'L');
        assert_eq!(line.instruction(true), 'l');
        assert_eq!(Command::Close.instruction(true), 'Z');
        assert_eq!(
            Command::ShorthandQuadraticCurve { end: Point::ZERO }.instruction(true),
            't'
        );
    }

    #[test]
    fn test_curve_kinds() {
        let s = Command::ShorthandCubicCurve {
            control2: Point::ZERO,
            end: Point::ZERO,
        };
        assert!(s.is_cubic());
        assert!(!s.is_quadratic());
        assert!(!s.is_canonical());
        assert!(Command::Close.is_canonical());
        assert_eq!(Command::HorizontalLine(3.0).point(), None);
    }
}
