//! Profile Point Generator.
//!
//! Purpose
//! - Turn `(H, resolution)` into an ordered, closed boundary in the `z = 0`
//!   plane, ready for a geometry kernel to build a wire and a face from.
//!
//! Pipeline
//! - `generate_samples`: uniform partition of `[-H, H]` with
//!   `floor(2 / resolution) + 1` points, endpoints included.
//! - `build_right_points`: per sample `a`, solve `b = (H² − a²) / (2H)` and emit
//!   `(b, −a, 0)`.
//! - `build_closed_boundary`: append the x-mirrored reverse (minus its first
//!   element) and repeat the first point to close the loop.
//!
//! All functions are pure; identical inputs give bit-identical outputs.

mod boundary;
mod samples;

pub use boundary::{build_closed_boundary, build_right_points, closed_boundary, closed_boundary_with};
pub use samples::{generate_samples, generate_samples_with, num_steps};

pub(crate) use boundary::boundary_for_steps;
pub(crate) use samples::checked_steps;
