//! Quill Paths
//!
//! Vector path construction and geometry:
//!
//! - **Path**: builder for move, line, curve, arc and close commands
//! - **CommandChain**: ordered commands with resolved absolute geometry
//! - **CanonicalChain**: the same outline using only `M`, `L`, `C` and `Z`
//! - **EllipticalArc**: SVG arc to cubic Bézier subdivision
//! - **Bounds**: tight axis-aligned extents, curve bulges included
//!
//! # Example
//!
//! ```rust
//! use quill_path::{ArcOptions, Path, PathDataFormat};
//!
//! # fn main() -> quill_core::Result<()> {
//! let mut path = Path::new((0.0, 0.0))?;
//! path.quadratic_curve_to([(5.0, 10.0), (10.0, 0.0)])?
//!     .arc_to((0.0, 0.0), 5.0, 5.0, ArcOptions::default())?
//!     .close_path();
//!
//! let canonical = path.canonicalize();
//! assert!(canonical
//!     .as_chain()
//!     .entries()
//!     .iter()
//!     .all(|entry| entry.command().is_canonical()));
//!
//! let data = path.path_data(&PathDataFormat::default());
//! assert!(data.starts_with("M 0,0 Q 5,10 10,0"));
//! # Ok(())
//! # }
//! ```

pub mod arc;
pub mod bounds;
pub mod canonical;
pub mod chain;
pub mod command;
pub mod path;
pub mod path_data;

pub use arc::{ArcApproximation, CubicSegment, EllipticalArc};
pub use canonical::{CanonicalChain, Segment};
pub use chain::{ChainEntry, CommandChain, CommandId, Controls};
pub use command::{ArcParams, Command};
pub use path::{ArcOptions, Path};
pub use path_data::PathDataFormat;
