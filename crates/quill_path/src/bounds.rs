//! Axis-aligned extents of canonical chains
//!
//! Lines contribute their end points. Cubic curves additionally contribute
//! the curve's value at every root in `[0, 1]` of the derivative along each
//! axis.

use quill_core::{Point, Rect};
use smallvec::SmallVec;

use crate::canonical::{CanonicalChain, Segment};

/// Tight bounding rectangle of a canonical chain
pub fn bounds(chain: &CanonicalChain) -> Rect {
    let mut current = chain.as_chain().start_point();
    let mut rect = Rect::from_points(current, current);

    for segment in chain.segments() {
        match segment {
            Segment::MoveTo(p) | Segment::LineTo(p) => {
                rect = rect.expand_to_include(p);
                current = p;
            }
            Segment::CubicTo {
                control1,
                control2,
                end,
            } => {
                rect = rect.expand_to_include(end);
                let xs = extremum_parameters(current.x, control1.x, control2.x, end.x);
                let ys = extremum_parameters(current.y, control1.y, control2.y, end.y);
                for t in xs.into_iter().chain(ys) {
                    rect = rect.expand_to_include(cubic_point(current, control1, control2, end, t));
                }
                current = end;
            }
            Segment::Close { start } => current = start,
        }
    }

    rect
}

/// Parameters in `[0, 1]` where a 1-D cubic Bézier has zero derivative
///
/// The derivative divided by 3 is `a t² + b t + c`. When both `a` and `b`
/// vanish the derivative is constant and only the endpoints matter.
pub fn extremum_parameters(p0: f64, p1: f64, p2: f64, p3: f64) -> SmallVec<[f64; 2]> {
    let a = p3 - 3.0 * p2 + 3.0 * p1 - p0;
    let b = 2.0 * (p2 - 2.0 * p1 + p0);
    let c = p1 - p0;

    let scale = p0.abs().max(p1.abs()).max(p2.abs()).max(p3.abs()).max(1.0);
    let epsilon = 1e-12 * scale;

    let mut roots = SmallVec::new();
    if a.abs() <= epsilon {
        if b.abs() <= epsilon {
            tracing::trace!(p0, p1, p2, p3, "cubic derivative degenerate, using endpoints");
            return roots;
        }
        roots.push(-c / b);
    } else {
        let half_b = b / 2.0;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return roots;
        }
        let root = discriminant.sqrt();
        roots.push((-half_b + root) / a);
        roots.push((-half_b - root) / a);
    }

    roots.retain(|t| (0.0..=1.0).contains(t));
    roots
}

/// Point on a cubic Bézier curve at parameter `t`
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}
