//! Elliptical arc subdivision
//!
//! Converts an SVG endpoint-parameterized arc into at most twelve cubic
//! Bézier curves, none of them sweeping more than 30°.
//!
//! The arc is solved in the ellipse's own frame: the chord midpoint is
//! rotated by `-rotation` and both axes are divided by the radii, which maps
//! the ellipse onto the unit circle. Each sub-curve is built on the unit
//! circle and mapped back through `translate(center) · rotate · scale(rx, ry)`.

use quill_core::{Affine2D, Point};
use smallvec::SmallVec;

use crate::command::ArcParams;

/// Largest angle, in degrees, swept by a single cubic sub-curve
pub const MAX_SEGMENT_DEGREES: f64 = 30.0;

/// Upper bound on sub-curves for one arc (a full turn)
pub const MAX_SEGMENTS: usize = 12;

// Absorbs acos rounding so a 90° arc is three curves, not four
const ANGLE_EPSILON: f64 = 1e-9;

/// One cubic Bézier piece of an arc, in absolute coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// Result of subdividing an arc
#[derive(Clone, Debug, PartialEq)]
pub enum ArcApproximation {
    /// Zero radius or coincident endpoints: a straight line to the end point
    Line,
    /// Chained cubic curves; the last one ends exactly at the arc's end point
    Curves(SmallVec<[CubicSegment; MAX_SEGMENTS]>),
}

/// Arc between two absolute points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipticalArc {
    pub from: Point,
    pub to: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Center parameterization of an arc, angles in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterParameters {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Start point on the unit circle of the ellipse frame
    pub start: Point,
    /// End point on the unit circle of the ellipse frame
    pub end: Point,
    /// Unsigned swept angle
    pub sweep_angle: f64,
}

impl EllipticalArc {
    pub fn new(from: Point, params: &ArcParams, to: Point) -> Self {
        Self {
            from,
            to,
            radius_x: params.radius_x.abs(),
            radius_y: params.radius_y.abs(),
            rotation: params.rotation,
            large_arc: params.large_arc,
            sweep: params.sweep,
        }
    }

    /// Chord midpoint `(from - to) / 2` in the rotated ellipse frame
    fn frame_midpoint(&self) -> Point {
        Affine2D::rotation(-self.rotation).transform_point((self.from - self.to) * 0.5)
    }

    /// Radii scaled up uniformly until the ellipse can span the chord
    pub fn corrected_radii(&self) -> (f64, f64) {
        let (rx, ry) = (self.radius_x, self.radius_y);
        if rx == 0.0 || ry == 0.0 {
            return (rx, ry);
        }
        let mid = self.frame_midpoint();
        // Distance of the chord midpoint from the center, in radii
        let scale = (mid.x / rx).hypot(mid.y / ry);
        if scale > 1.0 {
            tracing::debug!(scale, "arc radii too small for chord, scaling up");
            // rx * scale and ry * scale, without the overflowing quotients
            (mid.x.hypot(mid.y * (rx / ry)), (mid.x * (ry / rx)).hypot(mid.y))
        } else {
            (rx, ry)
        }
    }

    /// Solve the ellipse center and swept angle
    ///
    /// Returns `None` when the arc is drawn as a line: a zero radius, or
    /// endpoints that coincide at the ellipse's scale.
    pub fn center_parameterization(&self) -> Option<CenterParameters> {
        if self.from == self.to {
            tracing::debug!(at = %self.to, "arc endpoints coincide, emitting a line");
            return None;
        }
        let (rx, ry) = self.corrected_radii();
        if rx == 0.0 || ry == 0.0 || !rx.is_finite() || !ry.is_finite() {
            return None;
        }

        // Solved on the unit circle so no radius is ever squared
        let mid = self.frame_midpoint();
        let unit_mid = Point::new(mid.x / rx, mid.y / ry);
        let distance = unit_mid.abs();
        if distance == 0.0 {
            tracing::debug!(at = %self.to, "arc chord vanishes against its radii, emitting a line");
            return None;
        }

        let radicand = (1.0 - distance) * (1.0 + distance);
        let solved = (radicand > 0.0)
            .then(|| {
                let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
                let k = radicand.sqrt() * sign;
                Point::new(unit_mid.y / distance * k, -unit_mid.x / distance * k)
            })
            .filter(|center| center.is_finite());

        let half_turn = solved.is_none();
        let unit_center = solved.unwrap_or_else(|| {
            // No distinct solution pair: the chord is a diameter
            tracing::debug!(distance, "arc center solve degenerate, using half turn");
            Point::ZERO
        });

        let start = unit_mid - unit_center;
        let end = -unit_mid - unit_center;

        let sweep_angle = if half_turn {
            180.0
        } else {
            // sin and cos of the small angle are 2d·√(1−d²) and 1 − 2d²
            let angle = (2.0 * distance * radicand.sqrt())
                .atan2(radicand - distance * distance)
                .to_degrees();
            if self.large_arc {
                360.0 - angle
            } else {
                angle
            }
        };

        let frame_center = Point::new(unit_center.x * rx, unit_center.y * ry);
        let center = Affine2D::rotation(self.rotation).transform_point(frame_center)
            + (self.from + self.to) * 0.5;

        Some(CenterParameters {
            center,
            radius_x: rx,
            radius_y: ry,
            start,
            end,
            sweep_angle,
        })
    }

    /// Subdivide the arc into cubic Bézier curves
    ///
    /// Handles are placed relative to each curve's own end points, so arcs
    /// whose center lies far outside the drawing stay exact at both ends.
    pub fn to_cubics(&self) -> ArcApproximation {
        let Some(params) = self.center_parameterization() else {
            return ArcApproximation::Line;
        };

        let count = segment_count(params.sweep_angle);
        let direction = if self.sweep { 1.0 } else { -1.0 };
        let step = params.sweep_angle / count as f64 * direction;

        let to_frame = Affine2D::rotation(self.rotation)
            .then(&Affine2D::scale(params.radius_x, params.radius_y));
        let to_user = Affine2D::translation(params.center.x, params.center.y).then(&to_frame);
        let rotate_step = Affine2D::rotation(step);
        let handle = handle_length(step);
        // Tangent handle h * (-y, x) at a unit-circle point, mapped without translation
        let tangent = |p: Point| to_frame.transform_point(Point::new(-p.y, p.x) * handle);

        let mut curves = SmallVec::new();
        let mut current = params.start;
        let mut current_point = self.from;
        for i in 0..count {
            let last = i + 1 == count;
            let (next, next_point) = if last {
                (params.end, self.to)
            } else {
                let next = rotate_step.transform_point(current);
                (next, to_user.transform_point(next))
            };
            curves.push(CubicSegment {
                control1: current_point + tangent(current),
                control2: next_point - tangent(next),
                end: next_point,
            });
            current = next;
            current_point = next_point;
        }

        ArcApproximation::Curves(curves)
    }
}

/// Number of equal sub-curves needed so that none exceeds 30°
pub fn segment_count(sweep_degrees: f64) -> usize {
    let count = (sweep_degrees.abs() / MAX_SEGMENT_DEGREES - ANGLE_EPSILON).ceil();
    (count as usize).clamp(1, MAX_SEGMENTS)
}

/// Bézier handle length, relative to the radius, for a sub-curve sweeping
/// `degrees`
pub fn handle_length(degrees: f64) -> f64 {
    (degrees / 4.0).to_radians().tan() * 4.0 / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(from: Point, to: Point, r: f64, large_arc: bool, sweep: bool) -> EllipticalArc {
        EllipticalArc {
            from,
            to,
            radius_x: r,
            radius_y: r,
            rotation: 0.0,
            large_arc,
            sweep,
        }
    }

    fn curves(approx: ArcApproximation) -> SmallVec<[CubicSegment; MAX_SEGMENTS]> {
        match approx {
            ArcApproximation::Curves(curves) => curves,
            ArcApproximation::Line => panic!("expected curves"),
        }
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count(10.0), 1);
        assert_eq!(segment_count(30.0), 1);
        assert_eq!(segment_count(30.5), 2);
        assert_eq!(segment_count(90.0), 3);
        assert_eq!(segment_count(90.0 + 1e-12), 3);
        assert_eq!(segment_count(360.0), 12);
        assert_eq!(segment_count(0.0), 1);
    }

    #[test]
    fn test_quarter_circle_center() {
        let quarter = arc(Point::new(10.0, 0.0), Point::new(0.0, 10.0), 10.0, false, true);
        let params = quarter.center_parameterization().unwrap();

        assert!(params.center.distance(Point::ZERO) < 1e-9);
        assert!((params.sweep_angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_flags_select_center() {
        let from = Point::new(10.0, 0.0);
        let to = Point::new(0.0, 10.0);

        let small_ccw = arc(from, to, 10.0, false, false).center_parameterization().unwrap();
        assert!(small_ccw.center.distance(Point::new(10.0, 10.0)) < 1e-9);

        let large_cw = arc(from, to, 10.0, true, true).center_parameterization().unwrap();
        assert!(large_cw.center.distance(Point::new(10.0, 10.0)) < 1e-9);
        assert!((large_cw.sweep_angle - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_subdivided_points_lie_on_circle() {
        let quarter = arc(Point::new(10.0, 0.0), Point::new(0.0, 10.0), 10.0, false, true);
        let curves = curves(quarter.to_cubics());

        assert_eq!(curves.len(), 3);
        for curve in &curves {
            assert!((curve.end.abs() - 10.0).abs() < 1e-9);
        }
        // Clockwise on a y-down canvas passes through the positive quadrant
        assert!(curves[0].end.x > 0.0 && curves[0].end.y > 0.0);
        assert_eq!(curves[2].end, Point::new(0.0, 10.0));
    }

    #[test]
    fn test_control_points_match_handle_length() {
        let quarter = arc(Point::new(10.0, 0.0), Point::new(0.0, 10.0), 10.0, false, true);
        let curves = curves(quarter.to_cubics());

        let h = handle_length(30.0) * 10.0;
        assert!(curves[0].control1.distance(Point::new(10.0, h)) < 1e-9);
    }

    #[test]
    fn test_small_radii_scaled_up() {
        // Chord of 20 with radius 1: radii grow to 10 and the arc is a half turn
        let tiny = arc(Point::new(-10.0, 0.0), Point::new(10.0, 0.0), 1.0, false, true);
        assert_eq!(tiny.corrected_radii(), (10.0, 10.0));

        let params = tiny.center_parameterization().unwrap();
        assert!(params.center.distance(Point::ZERO) < 1e-9);
        assert!((params.sweep_angle - 180.0).abs() < 1e-9);
        assert_eq!(curves(tiny.to_cubics()).len(), 6);
    }

    #[test]
    fn test_degenerate_arcs_become_lines() {
        let flat = EllipticalArc {
            radius_x: 0.0,
            ..arc(Point::ZERO, Point::new(10.0, 0.0), 5.0, false, true)
        };
        assert_eq!(flat.to_cubics(), ArcApproximation::Line);

        let closed = arc(Point::new(3.0, 3.0), Point::new(3.0, 3.0), 5.0, true, true);
        assert_eq!(closed.to_cubics(), ArcApproximation::Line);
    }

    #[test]
    fn test_rotated_ellipse_endpoint_exact() {
        let tilted = EllipticalArc {
            from: Point::new(1.0, 2.0),
            to: Point::new(37.5, -4.25),
            radius_x: 30.0,
            radius_y: 12.0,
            rotation: 33.0,
            large_arc: true,
            sweep: false,
        };
        let curves = curves(tilted.to_cubics());

        assert!(curves.len() <= MAX_SEGMENTS);
        assert_eq!(curves.last().unwrap().end, tilted.to);
    }

    fn assert_finite(curves: &[CubicSegment]) {
        for curve in curves {
            assert!(
                curve.control1.is_finite() && curve.control2.is_finite() && curve.end.is_finite(),
                "{curve:?}"
            );
        }
    }

    #[test]
    fn test_tiny_radii_scale_up_without_overflow() {
        let tiny = arc(Point::ZERO, Point::new(10.0, 3.0), 1e-200, false, true);
        let (rx, ry) = tiny.corrected_radii();
        let half_chord = 5.0f64.hypot(1.5);
        assert!((rx - half_chord).abs() < 1e-9, "{rx}");
        assert!((ry - half_chord).abs() < 1e-9, "{ry}");

        let curves = curves(tiny.to_cubics());
        assert_eq!(curves.len(), 6);
        assert_finite(&curves);
        assert_eq!(curves.last().unwrap().end, Point::new(10.0, 3.0));

        // Subnormal radii overflow the quotient itself
        let subnormal = arc(Point::ZERO, Point::new(10.0, 3.0), 1e-320, false, true);
        assert!(subnormal.corrected_radii().0.is_finite());
        assert_finite(&curves_of(&subnormal));
    }

    fn curves_of(arc: &EllipticalArc) -> SmallVec<[CubicSegment; MAX_SEGMENTS]> {
        curves(arc.to_cubics())
    }

    #[test]
    fn test_huge_radii_approach_the_chord() {
        let flat = arc(Point::ZERO, Point::new(10.0, 3.0), 1e200, false, true);
        assert_eq!(flat.corrected_radii(), (1e200, 1e200));

        let params = flat.center_parameterization().unwrap();
        assert!(params.sweep_angle > 0.0 && params.sweep_angle < 1e-150);

        let curves = curves_of(&flat);
        assert_eq!(curves.len(), 1);
        assert_finite(&curves);

        // Handles sit a third of the way along the chord
        let curve = curves[0];
        assert!(curve.control1.distance(Point::new(10.0, 3.0) * (1.0 / 3.0)) < 1e-6);
        assert!(curve.control2.distance(Point::new(10.0, 3.0) * (2.0 / 3.0)) < 1e-6);
        assert_eq!(curve.end, Point::new(10.0, 3.0));
    }

    #[test]
    fn test_subdivision_is_deterministic() {
        let tilted = EllipticalArc {
            from: Point::new(0.5, 0.25),
            to: Point::new(-7.0, 19.0),
            radius_x: 11.0,
            radius_y: 4.0,
            rotation: -71.0,
            large_arc: false,
            sweep: true,
        };
        assert_eq!(tilted.to_cubics(), tilted.to_cubics());
    }
}
