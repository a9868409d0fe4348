//! Quill Core Geometry
//!
//! Value types shared by the Quill crates:
//!
//! - **Point**: immutable 2D coordinate pair in user units
//! - **Length**: unit-aware scalar distance (`px`, `pt`, `pc`, `mm`, `cm`, `in`)
//! - **Rect / Affine2D**: axis-aligned extents and 2D affine transforms
//! - **Extents**: the `left/right/top/bottom` capability shared by paths and shapes
//!
//! # Example
//!
//! ```rust
//! use quill_core::{Affine2D, Point};
//!
//! let p = Point::new(3.0, 4.0);
//! assert_eq!(p.abs(), 5.0);
//!
//! let moved = Affine2D::translation(1.0, 1.0).transform_point(p);
//! assert_eq!(moved, Point::new(4.0, 5.0));
//! ```

pub mod error;
pub mod geometry;
pub mod length;

pub use error::{Error, Result};
pub use geometry::{Affine2D, Extents, Point, Rect};
pub use length::{format_decimal, Length, Unit};
