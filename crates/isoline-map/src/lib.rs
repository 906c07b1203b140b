//! Umbrella crate for the `isoline-map` workspace.
//!
//! Re-exports the scalar-field primitives and the extraction engine so
//! consumers can depend on a single crate. Level selection lives in
//! `iso-levels` and is pulled in separately when needed.

pub use iso_core::*;
pub use iso_march::*;
