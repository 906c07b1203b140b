//! Foundational primitives for isoline extraction.
//!
//! ## Coordinates
//! Grid samples live at integer lattice points; interpolated contour
//! coordinates are fractional in the same units, so a grid cell spans a
//! unit square between four adjacent samples.
//!
//! ## The outside sentinel
//! [`OUTSIDE`] is a reserved sample value used by boundary padding.
//! Crossing fractions computed against a sentinel endpoint pin to the
//! opposite endpoint, which is what pulls contours onto the physical
//! border of a padded grid.

mod error;
mod geom;
mod grid;

pub use error::Error;
pub use geom::{CLOSE_EPS, Contour, Point2d, Vec2d};
pub use grid::{OUTSIDE, ScalarGrid};
