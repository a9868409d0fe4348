//! Command chain
//!
//! An append-only arena of path commands. Every entry records the index of
//! the command that precedes it, plus its resolved absolute geometry, which
//! is derived from that predecessor alone when the entry is appended. Relative
//! resolution therefore never needs a scan of the chain.

use quill_core::Point;

use crate::arc::EllipticalArc;
use crate::command::{ArcParams, Command};

/// Index of a command in its chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u32);

impl CommandId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Resolved absolute control points of a curve command
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Controls {
    #[default]
    None,
    Quadratic(Point),
    Cubic(Point, Point),
}

/// A command together with its place in the chain
#[derive(Clone, Debug, PartialEq)]
pub struct ChainEntry {
    command: Command,
    relative: bool,
    preceding: Option<CommandId>,
    end: Point,
    subpath_start: Point,
    controls: Controls,
}

impl ChainEntry {
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Whether the command's points are offsets from the preceding end point
    ///
    /// `Close` carries no point and always reports `false`.
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn preceding(&self) -> Option<CommandId> {
        self.preceding
    }

    /// Resolved absolute end point
    pub fn end_point(&self) -> Point {
        self.end
    }

    /// Start point of the sub-path this command belongs to
    pub fn subpath_start(&self) -> Point {
        self.subpath_start
    }

    /// Resolved absolute control points, shorthand reflections included
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Last control point of a curve command, used for shorthand reflection
    pub fn last_control_point(&self) -> Option<Point> {
        match self.controls {
            Controls::None => None,
            Controls::Quadratic(q) => Some(q),
            Controls::Cubic(_, c2) => Some(c2),
        }
    }

    /// SVG instruction letter
    pub fn instruction(&self) -> char {
        self.command.instruction(self.relative)
    }
}

/// Ordered sequence of path commands starting with a `Move`
#[derive(Clone, Debug, PartialEq)]
pub struct CommandChain {
    entries: Vec<ChainEntry>,
}

impl CommandChain {
    /// Create a chain holding a single absolute `Move` to `start`
    pub fn new(start: Point) -> Self {
        Self {
            entries: vec![ChainEntry {
                command: Command::Move(start),
                relative: false,
                preceding: None,
                end: start,
                subpath_start: start,
                controls: Controls::None,
            }],
        }
    }

    /// Append a command after the current last entry
    ///
    /// Arc radii are normalized on the way in: negative radii are made
    /// positive and radii too small to span the chord are scaled up.
    pub fn push(&mut self, command: Command, relative: bool) -> CommandId {
        let id = CommandId(self.entries.len() as u32);
        let prev = self.last();
        let entry = resolve(prev, self.last_id(), command, relative);
        tracing::trace!(index = id.index(), instruction = %entry.instruction(), "append path command");
        self.entries.push(entry);
        id
    }

    /// Remove the most recent command
    ///
    /// The initial `Move` is never removed; `None` is returned instead.
    pub fn pop_last(&mut self) -> Option<ChainEntry> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a chain holds at least its initial `Move`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommandId, &ChainEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (CommandId(i as u32), entry))
    }

    pub fn get(&self, id: CommandId) -> Option<&ChainEntry> {
        self.entries.get(id.index())
    }

    pub fn first(&self) -> &ChainEntry {
        &self.entries[0]
    }

    pub fn last(&self) -> &ChainEntry {
        // Non-empty by construction
        &self.entries[self.entries.len() - 1]
    }

    pub fn first_id(&self) -> CommandId {
        CommandId(0)
    }

    pub fn last_id(&self) -> CommandId {
        CommandId(self.entries.len() as u32 - 1)
    }

    /// Predecessor of `id`, if any
    pub fn preceding(&self, id: CommandId) -> Option<&ChainEntry> {
        self.get(id)?.preceding.and_then(|prev| self.get(prev))
    }

    /// Whether `id` uses the same instruction letter as its predecessor
    ///
    /// Serializers use this to omit repeated letters in concise path data.
    pub fn uses_same_instruction(&self, id: CommandId) -> bool {
        match (self.get(id), self.preceding(id)) {
            (Some(entry), Some(prev)) => entry.instruction() == prev.instruction(),
            _ => false,
        }
    }

    /// Resolved end point of the last command
    pub fn current_point(&self) -> Point {
        self.last().end
    }

    /// Resolved point of the chain's initial `Move`
    pub fn start_point(&self) -> Point {
        self.first().end
    }

    /// Start of the sub-path the last command belongs to
    pub fn current_start_point(&self) -> Point {
        self.last().subpath_start
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.last().command, Command::Close)
    }

    /// Resolved end point of every command that carries a point
    pub fn path_points(&self) -> Vec<Point> {
        self.entries
            .iter()
            .filter(|entry| !matches!(entry.command, Command::Close))
            .map(|entry| entry.end)
            .collect()
    }
}

/// Resolve a new entry from its predecessor
fn resolve(prev: &ChainEntry, prev_id: CommandId, command: Command, relative: bool) -> ChainEntry {
    let origin = prev.end;
    let at = |p: Point| if relative { origin + p } else { p };

    let mut subpath_start = prev.subpath_start;
    let mut controls = Controls::None;
    let mut stored_relative = relative;
    let mut stored = command;

    let end = match command {
        Command::Move(p) => {
            subpath_start = at(p);
            subpath_start
        }
        Command::Close => {
            stored_relative = false;
            prev.subpath_start
        }
        Command::Line(p) => at(p),
        Command::HorizontalLine(x) => {
            if relative {
                origin + Point::new(x, 0.0)
            } else {
                Point::new(x, origin.y)
            }
        }
        Command::VerticalLine(y) => {
            if relative {
                origin + Point::new(0.0, y)
            } else {
                Point::new(origin.x, y)
            }
        }
        Command::CubicCurve {
            control1,
            control2,
            end,
        } => {
            controls = Controls::Cubic(at(control1), at(control2));
            at(end)
        }
        Command::ShorthandCubicCurve { control2, end } => {
            let control1 = reflected_control(prev, origin, Command::is_cubic);
            controls = Controls::Cubic(control1, at(control2));
            at(end)
        }
        Command::QuadraticCurve { control, end } => {
            controls = Controls::Quadratic(at(control));
            at(end)
        }
        Command::ShorthandQuadraticCurve { end } => {
            let control = reflected_control(prev, origin, Command::is_quadratic);
            controls = Controls::Quadratic(control);
            at(end)
        }
        Command::Arc(params) => {
            let end = at(params.end);
            let arc = EllipticalArc::new(origin, &params, end);
            let (radius_x, radius_y) = arc.corrected_radii();
            stored = Command::Arc(ArcParams {
                radius_x,
                radius_y,
                ..params
            });
            end
        }
    };

    ChainEntry {
        command: stored,
        relative: stored_relative,
        preceding: Some(prev_id),
        end,
        subpath_start,
        controls,
    }
}

/// Reflection of the predecessor's last control point through `origin`, or
/// `origin` itself when the predecessor is not a curve of the same kind
fn reflected_control(prev: &ChainEntry, origin: Point, same_kind: fn(&Command) -> bool) -> Point {
    match prev.last_control_point() {
        Some(last) if same_kind(&prev.command) => last.reflect(origin),
        _ => origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_resolution() {
        let mut chain = CommandChain::new(Point::new(10.0, 10.0));
        chain.push(Command::Line(Point::new(5.0, 0.0)), true);
        chain.push(Command::Line(Point::new(0.0, 5.0)), true);
        chain.push(Command::Line(Point::new(0.0, 0.0)), false);

        let ends: Vec<Point> = chain.entries().iter().map(ChainEntry::end_point).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(10.0, 10.0),
                Point::new(15.0, 10.0),
                Point::new(15.0, 15.0),
                Point::new(0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_predecessor_links() {
        let mut chain = CommandChain::new(Point::ZERO);
        let a = chain.push(Command::Line(Point::new(1.0, 0.0)), false);
        let b = chain.push(Command::Line(Point::new(1.0, 1.0)), false);

        assert_eq!(chain.first().preceding(), None);
        assert_eq!(chain.get(b).unwrap().preceding(), Some(a));
        assert_eq!(chain.preceding(b).unwrap().end_point(), Point::new(1.0, 0.0));
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(Command::Line(Point::new(10.0, 0.0)), false);
        chain.push(Command::Move(Point::new(5.0, 5.0)), true);
        chain.push(Command::Line(Point::new(20.0, 20.0)), false);
        chain.push(Command::Close, true);

        assert!(chain.is_closed());
        assert!(!chain.last().is_relative());
        assert_eq!(chain.current_point(), Point::new(15.0, 5.0));
        assert_eq!(chain.start_point(), Point::ZERO);

        // Relative commands after a close are offsets from the sub-path start
        chain.push(Command::Line(Point::new(1.0, 1.0)), true);
        assert_eq!(chain.current_point(), Point::new(16.0, 6.0));
        assert_eq!(chain.current_start_point(), Point::new(15.0, 5.0));
    }

    #[test]
    fn test_axis_lines() {
        let mut chain = CommandChain::new(Point::new(3.0, 4.0));
        chain.push(Command::HorizontalLine(10.0), false);
        assert_eq!(chain.current_point(), Point::new(10.0, 4.0));
        chain.push(Command::VerticalLine(-2.0), true);
        assert_eq!(chain.current_point(), Point::new(10.0, 2.0));
    }

    #[test]
    fn test_shorthand_cubic_reflection() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(
            Command::CubicCurve {
                control1: Point::new(1.0, 1.0),
                control2: Point::new(2.0, 0.0),
                end: Point::new(3.0, 0.0),
            },
            false,
        );
        chain.push(
            Command::ShorthandCubicCurve {
                control2: Point::new(5.0, 1.0),
                end: Point::new(6.0, 0.0),
            },
            false,
        );

        assert_eq!(
            chain.last().controls(),
            Controls::Cubic(Point::new(4.0, 0.0), Point::new(5.0, 1.0))
        );
    }

    #[test]
    fn test_shorthand_without_curve_uses_current_point() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(Command::Line(Point::new(2.0, 2.0)), false);
        chain.push(
            Command::ShorthandCubicCurve {
                control2: Point::new(3.0, 3.0),
                end: Point::new(4.0, 2.0),
            },
            false,
        );
        assert_eq!(
            chain.last().controls(),
            Controls::Cubic(Point::new(2.0, 2.0), Point::new(3.0, 3.0))
        );

        // A quadratic predecessor does not feed a cubic reflection
        chain.push(
            Command::QuadraticCurve {
                control: Point::new(5.0, 0.0),
                end: Point::new(6.0, 2.0),
            },
            false,
        );
        chain.push(
            Command::ShorthandCubicCurve {
                control2: Point::new(7.0, 3.0),
                end: Point::new(8.0, 2.0),
            },
            false,
        );
        assert_eq!(
            chain.last().controls(),
            Controls::Cubic(Point::new(6.0, 2.0), Point::new(7.0, 3.0))
        );
    }

    #[test]
    fn test_shorthand_quadratic_chain() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(
            Command::QuadraticCurve {
                control: Point::new(1.0, 2.0),
                end: Point::new(2.0, 0.0),
            },
            false,
        );
        chain.push(Command::ShorthandQuadraticCurve { end: Point::new(2.0, 0.0) }, true);
        assert_eq!(chain.last().controls(), Controls::Quadratic(Point::new(3.0, -2.0)));
        assert_eq!(chain.current_point(), Point::new(4.0, 0.0));

        chain.push(Command::ShorthandQuadraticCurve { end: Point::new(6.0, 0.0) }, false);
        assert_eq!(chain.last().controls(), Controls::Quadratic(Point::new(5.0, 2.0)));
    }

    #[test]
    fn test_arc_radii_normalized() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(
            Command::Arc(ArcParams {
                radius_x: -1.0,
                radius_y: 1.0,
                rotation: 0.0,
                large_arc: false,
                sweep: true,
                end: Point::new(20.0, 0.0),
            }),
            false,
        );

        match chain.last().command() {
            Command::Arc(arc) => {
                assert_eq!(arc.radius_x, 10.0);
                assert_eq!(arc.radius_y, 10.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_pop_keeps_initial_move() {
        let mut chain = CommandChain::new(Point::ZERO);
        chain.push(Command::Line(Point::new(1.0, 1.0)), false);

        assert!(chain.pop_last().is_some());
        assert!(chain.pop_last().is_none());
        assert_eq!(chain.len(), 1);
        assert!(!chain.is_empty());
    }

    #[test]
    fn test_same_instruction_query() {
        let mut chain = CommandChain::new(Point::ZERO);
        let a = chain.push(Command::Line(Point::new(1.0, 0.0)), false);
        let b = chain.push(Command::Line(Point::new(2.0, 0.0)), false);
        let c = chain.push(Command::Line(Point::new(1.0, 0.0)), true);

        assert!(!chain.uses_same_instruction(chain.first_id()));
        assert!(!chain.uses_same_instruction(a));
        assert!(chain.uses_same_instruction(b));
        assert!(!chain.uses_same_instruction(c));
    }
}
