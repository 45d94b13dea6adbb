//! Paraline: parametric lens profile generator.
//!
//! A height `H` and a resolution give an ordered closed boundary in the `z = 0`
//! plane: two parabolic arcs with focus at the origin and directrices
//! `x = ±H`, sampled uniformly in `y`. A geometry kernel turns the boundary
//! into a wire, a planar face and finally an extruded solid.
//!
//! Layout
//! - `params`: parameter set, defaults and generator limits.
//! - `profile`: the point generator (pure functions).
//! - `kernel`: the kernel trait and the reference `PolyKernel`.
//! - `feature`: the wire → face → solid pipeline with wire fallback.

pub mod error;
pub mod feature;
pub mod kernel;
pub mod params;
pub mod profile;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::ParalineError;
pub use feature::{KernelShape, ParalineFeature, Shape};
pub use nalgebra::{Point3, Vector3};
pub use params::{GenCfg, ParalineParams};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::ParalineError;
    pub use crate::feature::{KernelShape, ParalineFeature, Shape};
    pub use crate::kernel::{GeometryKernel, KernelCfg, PlanarFace, PolyKernel, Prism, Wire};
    pub use crate::params::{GenCfg, ParalineParams};
    pub use crate::profile::{
        build_closed_boundary, build_right_points, closed_boundary, closed_boundary_with,
        generate_samples, generate_samples_with, num_steps,
    };
    pub use nalgebra::{Point3, Vector3};
}
