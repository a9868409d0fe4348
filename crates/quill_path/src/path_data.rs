//! SVG path data output
//!
//! Writes commands with their raw coordinates and addressing, so the output
//! reproduces the chain exactly as it was built.

use quill_core::{format_decimal, Point};

use crate::chain::{CommandChain, CommandId};
use crate::command::Command;

/// Formatting options for path data
#[derive(Clone, Debug, PartialEq)]
pub struct PathDataFormat {
    /// Maximum fractional digits per number
    pub precision: usize,
    /// Omit an instruction letter that repeats the preceding one
    pub concise: bool,
    /// Separator between the two coordinates of a point
    pub coordinate_separator: char,
}

impl Default for PathDataFormat {
    fn default() -> Self {
        Self {
            precision: 3,
            concise: true,
            coordinate_separator: ',',
        }
    }
}

impl PathDataFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_concise(mut self, concise: bool) -> Self {
        self.concise = concise;
        self
    }

    pub fn with_coordinate_separator(mut self, separator: char) -> Self {
        self.coordinate_separator = separator;
        self
    }

    fn number(&self, value: f64) -> String {
        format_decimal(value, self.precision)
    }

    fn point(&self, point: Point) -> String {
        format!(
            "{}{}{}",
            self.number(point.x),
            self.coordinate_separator,
            self.number(point.y)
        )
    }
}

/// Serialize `chain` as SVG path data
pub fn write(chain: &CommandChain, format: &PathDataFormat) -> String {
    let mut out = String::new();
    for (id, entry) in chain.iter() {
        let args = arguments(entry.command(), format);
        if !out.is_empty() {
            out.push(' ');
        }
        if needs_letter(chain, id, entry.command(), format) {
            out.push(entry.instruction());
            if !args.is_empty() {
                out.push(' ');
            }
        }
        out.push_str(&args);
    }
    out
}

fn needs_letter(chain: &CommandChain, id: CommandId, command: &Command, format: &PathDataFormat) -> bool {
    match command {
        Command::Move(_) | Command::Close => true,
        _ => !(format.concise && chain.uses_same_instruction(id)),
    }
}

fn arguments(command: &Command, format: &PathDataFormat) -> String {
    match *command {
        Command::Close => String::new(),
        Command::Move(p) | Command::Line(p) => format.point(p),
        Command::HorizontalLine(v) | Command::VerticalLine(v) => format.number(v),
        Command::CubicCurve {
            control1,
            control2,
            end,
        } => format!(
            "{} {} {}",
            format.point(control1),
            format.point(control2),
            format.point(end)
        ),
        Command::ShorthandCubicCurve { control2, end } => {
            format!("{} {}", format.point(control2), format.point(end))
        }
        Command::QuadraticCurve { control, end } => {
            format!("{} {}", format.point(control), format.point(end))
        }
        Command::ShorthandQuadraticCurve { end } => format.point(end),
        Command::Arc(arc) => format!(
            "{}{}{} {} {} {} {}",
            format.number(arc.radius_x),
            format.coordinate_separator,
            format.number(arc.radius_y),
            format.number(arc.rotation),
            u8::from(arc.large_arc),
            u8::from(arc.sweep),
            format.point(arc.end)
        ),
    }
}
