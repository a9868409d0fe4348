//! Canonicalization
//!
//! Rewrites a command chain into an equivalent chain that only uses `Move`,
//! `Line`, `CubicCurve` and `Close`:
//!
//! - shorthand curves get their reflected control point spelled out
//! - quadratic curves are degree-elevated to cubics
//! - axis-constrained lines become plain lines
//! - arcs are subdivided into at most twelve cubic curves
//!
//! The source chain is left untouched. Copied commands keep their addressing;
//! curves derived from arcs are absolute.

use quill_core::Point;
use smallvec::SmallVec;

use crate::arc::{ArcApproximation, EllipticalArc, MAX_SEGMENTS};
use crate::chain::{ChainEntry, CommandChain, Controls};
use crate::command::Command;

const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Absolute-coordinate view of one canonical command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the sub-path; `start` is the point it returns to
    Close { start: Point },
}

/// Command chain restricted to `Move`, `Line`, `CubicCurve` and `Close`
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalChain {
    chain: CommandChain,
}

impl CanonicalChain {
    /// Canonicalize `source` into a new, independent chain
    pub fn from_chain(source: &CommandChain) -> Self {
        let mut chain = CommandChain::new(source.first().end_point());

        for (id, entry) in source.iter().skip(1) {
            let prev = source
                .preceding(id)
                .map(ChainEntry::end_point)
                .unwrap_or(Point::ZERO);
            for (command, relative) in canonical_commands(prev, entry) {
                chain.push(command, relative);
            }
        }

        tracing::trace!(
            source_len = source.len(),
            canonical_len = chain.len(),
            "canonicalized path"
        );
        Self { chain }
    }

    pub fn as_chain(&self) -> &CommandChain {
        &self.chain
    }

    pub fn into_chain(self) -> CommandChain {
        self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false; see [`CommandChain::is_empty`]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn current_point(&self) -> Point {
        self.chain.current_point()
    }

    /// Commands in order, as absolute segments
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.chain.entries().iter().map(|entry| match *entry.command() {
            Command::Move(_) => Segment::MoveTo(entry.end_point()),
            Command::Close => Segment::Close {
                start: entry.end_point(),
            },
            Command::CubicCurve { .. } => match entry.controls() {
                Controls::Cubic(control1, control2) => Segment::CubicTo {
                    control1,
                    control2,
                    end: entry.end_point(),
                },
                _ => Segment::LineTo(entry.end_point()),
            },
            // Only lines remain
            _ => Segment::LineTo(entry.end_point()),
        })
    }
}

/// Canonical replacement for one source entry
///
/// `prev` is the resolved end point of the entry's predecessor.
fn canonical_commands(prev: Point, entry: &ChainEntry) -> SmallVec<[(Command, bool); MAX_SEGMENTS]> {
    let relative = entry.is_relative();
    let end = entry.end_point();
    // Control points are resolved absolute; re-express them for relative entries
    let local = |p: Point| if relative { p - prev } else { p };
    let raw_end = entry.command().point().unwrap_or(end);

    let mut out = SmallVec::new();
    match *entry.command() {
        Command::Move(_) | Command::Line(_) | Command::Close | Command::CubicCurve { .. } => {
            out.push((*entry.command(), relative));
        }
        Command::HorizontalLine(x) => {
            let point = if relative {
                Point::new(x, 0.0)
            } else {
                Point::new(x, prev.y)
            };
            out.push((Command::Line(point), relative));
        }
        Command::VerticalLine(y) => {
            let point = if relative {
                Point::new(0.0, y)
            } else {
                Point::new(prev.x, y)
            };
            out.push((Command::Line(point), relative));
        }
        Command::ShorthandCubicCurve { control2, .. } => {
            let control1 = match entry.controls() {
                Controls::Cubic(c1, _) => c1,
                _ => prev,
            };
            out.push((
                Command::CubicCurve {
                    control1: local(control1),
                    control2,
                    end: raw_end,
                },
                relative,
            ));
        }
        Command::QuadraticCurve { .. } | Command::ShorthandQuadraticCurve { .. } => {
            let q = match entry.controls() {
                Controls::Quadratic(q) => q,
                _ => prev,
            };
            let control1 = prev + (q - prev) * TWO_THIRDS;
            let control2 = end + (q - end) * TWO_THIRDS;
            out.push((
                Command::CubicCurve {
                    control1: local(control1),
                    control2: local(control2),
                    end: raw_end,
                },
                relative,
            ));
        }
        Command::Arc(params) => {
            let arc = EllipticalArc::new(prev, &params, end);
            match arc.to_cubics() {
                ArcApproximation::Line => out.push((Command::Line(raw_end), relative)),
                ArcApproximation::Curves(curves) => {
                    out.extend(curves.into_iter().map(|curve| {
                        (
                            Command::CubicCurve {
                                control1: curve.control1,
                                control2: curve.control2,
                                end: curve.end,
                            },
                            false,
                        )
                    }));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ArcParams;

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_only_canonical_commands_remain() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(Command::HorizontalLine(5.0), false);
        chain.push(
            Command::QuadraticCurve {
                control: Point::new(1.0, 5.0),
                end: Point::new(2.0, 0.0),
            },
            true,
        );
        chain.push(Command::ShorthandQuadraticCurve { end: Point::new(2.0, 0.0) }, true);
        chain.push(
            Command::Arc(ArcParams {
                radius_x: 4.0,
                radius_y: 4.0,
                rotation: 0.0,
                large_arc: false,
                sweep: true,
                end: Point::new(0.0, 8.0),
            }),
            true,
        );
        chain.push(Command::Close, false);

        let canonical = CanonicalChain::from_chain(&chain);
        assert!(canonical
            .as_chain()
            .entries()
            .iter()
            .all(|entry| entry.command().is_canonical()));
        assert_eq!(canonical.current_point(), chain.current_point());
    }

    #[test]
    fn test_source_unchanged() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(Command::VerticalLine(3.0), true);
        let before = chain.clone();

        let _ = CanonicalChain::from_chain(&chain);
        assert_eq!(chain, before);
    }

    #[test]
    fn test_quadratic_elevation() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(
            Command::QuadraticCurve {
                control: Point::new(3.0, 3.0),
                end: Point::new(6.0, 0.0),
            },
            false,
        );

        let canonical = CanonicalChain::from_chain(&chain);
        let elevated = canonical.segments().nth(1);
        match elevated {
            Some(Segment::CubicTo {
                control1,
                control2,
                end,
            }) => {
                assert_close(control1, Point::new(2.0, 2.0));
                assert_close(control2, Point::new(4.0, 2.0));
                assert_eq!(end, Point::new(6.0, 0.0));
            }
            other => panic!("unexpected segment {other:?}"),
        }
    }

    #[test]
    fn test_relative_cubic_keeps_addressing() {
        let mut chain = CommandChain::new(Point::new(10.0, 10.0));
        chain.push(
            Command::CubicCurve {
                control1: Point::new(1.0, 0.0),
                control2: Point::new(2.0, 1.0),
                end: Point::new(3.0, 1.0),
            },
            true,
        );
        chain.push(
            Command::ShorthandCubicCurve {
                control2: Point::new(2.0, 0.0),
                end: Point::new(3.0, 0.0),
            },
            true,
        );

        let canonical = CanonicalChain::from_chain(&chain);
        let last = canonical.as_chain().last();
        assert!(last.is_relative());
        match *last.command() {
            Command::CubicCurve { control1, .. } => {
                // Reflection of (12, 11) through (13, 11), relative to (13, 11)
                assert_close(control1, Point::new(1.0, 0.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(canonical.current_point(), Point::new(16.0, 11.0));
    }
}
