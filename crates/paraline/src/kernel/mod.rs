//! Geometry-kernel seam.
//!
//! Purpose
//! - Describe the four kernel operations the Paraline feature consumes
//!   (polygon → wire, closed check, wire → face, face → solid) as a trait, so a
//!   real CAD kernel can be plugged in without touching the generator.
//! - Ship `PolyKernel`, a small reference kernel for straight-edged planar
//!   profiles and translational extrusion.
//!
//! Conventions
//! - Kernel failures are reported as `ParalineError::{DegenerateGeometry,
//!   FaceConstruction}`; callers decide whether to recover.

mod poly;

use nalgebra::{Point3, Vector3};

use crate::error::ParalineError;

pub use poly::{KernelCfg, PlanarFace, PolyKernel, Prism, Wire};

/// Minimal kernel interface used by `ParalineFeature`.
pub trait GeometryKernel {
    type Wire;
    type Face;
    type Solid;

    /// Straight-segment polyline through `points`.
    fn make_polygon(&self, points: &[Point3<f64>]) -> Result<Self::Wire, ParalineError>;

    fn is_closed(&self, wire: &Self::Wire) -> bool;

    /// Planar face bounded by a closed wire.
    fn face_from_wire(&self, wire: &Self::Wire) -> Result<Self::Face, ParalineError>;

    /// Sweep `face` along `direction` (magnitude = distance).
    fn extrude(
        &self,
        face: &Self::Face,
        direction: Vector3<f64>,
    ) -> Result<Self::Solid, ParalineError>;
}

#[cfg(test)]
mod tests;
