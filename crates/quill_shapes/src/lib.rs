//! Quill Shapes
//!
//! Higher-level figures that build [`Path`]s through the path builder:
//!
//! - **Rectangle**, **Line**: axis-aligned boxes and single segments
//! - **Circle**, **Ellipse**: two half-turn arcs each
//! - **Polyline**, **Polygon**: open and closed point sequences with undo
//! - **Sector**: pie slice bounded by two radii and an arc
//!
//! Every shape answers extent queries through [`Extents`].
//!
//! # Example
//!
//! ```rust
//! use quill_core::Extents;
//! use quill_shapes::{Sector, Shape};
//!
//! # fn main() -> quill_core::Result<()> {
//! let slice = Sector::new((50.0, 50.0), 40.0, 40.0, 0.0, 90.0)?;
//! let path = slice.to_path()?;
//!
//! assert!(path.is_closed());
//! assert!((slice.right() - 90.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

mod polyline;
mod primitives;
mod sector;

use quill_core::{Error, Extents, Result};
use quill_path::Path;

pub use polyline::{Polygon, Polyline};
pub use primitives::{Circle, Ellipse, Line, Rectangle};
pub use sector::Sector;

/// A figure that can be drawn as a path
pub trait Shape: Extents {
    /// Build the outline of the shape
    fn to_path(&self) -> Result<Path>;

    fn width(&self) -> f64 {
        self.right() - self.left()
    }

    fn height(&self) -> f64 {
        self.bottom() - self.top()
    }
}

pub(crate) fn finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_argument(format!("{what} {value} is not finite")))
    }
}
