//! Marching-squares isoline extraction.
//!
//! Each interior 2x2 cell of a [`ScalarGrid`](iso_core::ScalarGrid) is
//! classified against the target level into one of sixteen cases; crossed
//! cell edges get an interpolated crossing point, and per-cell segments
//! are stitched into maximal polylines by following shared lattice-edge
//! identity across adjacent cells:
//! - Adjacent cells derive identical [`EdgeKey`]s for the edge they
//!   share, so their independently computed crossing points agree.
//! - The two saddle cases are resolved by a [`SaddlePolicy`]; the default
//!   connects the below-level corners.
//! - Traces start at boundary edges when any exist, so open contours on
//!   unpadded grids begin and end at the grid border.
//!
//! Pad the grid first (`with_boundary_padding`) to force every contour
//! into a closed loop.

mod cell;
mod trace;

pub use cell::{EdgeKey, ExtractConfig, SaddlePolicy};
pub use trace::{contours, extract_contours};
