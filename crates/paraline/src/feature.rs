//! Paraline feature: boundary → wire → face → extruded solid.
//!
//! Purpose
//! - Drive a `GeometryKernel` through the four-step pipeline and hand the
//!   resulting shape back to the caller.
//!
//! Error policy
//! - Parameter errors surface immediately, with no partial result.
//! - Face and extrusion failures are best-effort: they are logged and the wire
//!   is returned instead of a solid.
//! - The kernel is passed in explicitly; there is no ambient document state.

use nalgebra::{Point3, Vector3};

use crate::error::ParalineError;
use crate::kernel::GeometryKernel;
use crate::params::{GenCfg, ParalineParams};
use crate::profile::boundary_for_steps;

/// Result of one evaluation: a solid when face and extrusion succeed, the bare
/// wire otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape<S, W> {
    Solid(S),
    Wire(W),
}

/// `Shape` produced by kernel `K`.
pub type KernelShape<K> = Shape<<K as GeometryKernel>::Solid, <K as GeometryKernel>::Wire>;

impl<S, W> Shape<S, W> {
    #[inline]
    pub fn is_solid(&self) -> bool {
        matches!(self, Shape::Solid(_))
    }

    pub fn as_solid(&self) -> Option<&S> {
        match self {
            Shape::Solid(s) => Some(s),
            Shape::Wire(_) => None,
        }
    }

    pub fn as_wire(&self) -> Option<&W> {
        match self {
            Shape::Solid(_) => None,
            Shape::Wire(w) => Some(w),
        }
    }
}

/// A validated parameter set bound to generator limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParalineFeature {
    params: ParalineParams,
    cfg: GenCfg,
    steps: usize,
}

impl ParalineFeature {
    pub fn new(params: ParalineParams) -> Result<Self, ParalineError> {
        Self::with_cfg(params, GenCfg::default())
    }

    pub fn with_cfg(params: ParalineParams, cfg: GenCfg) -> Result<Self, ParalineError> {
        let steps = params.validate(&cfg)?;
        Ok(Self { params, cfg, steps })
    }

    #[inline]
    pub fn params(&self) -> &ParalineParams {
        &self.params
    }

    #[inline]
    pub fn cfg(&self) -> &GenCfg {
        &self.cfg
    }

    /// Samples per half of the profile, fixed at validation.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.steps
    }

    /// Closed boundary points for the current parameters.
    pub fn boundary(&self) -> Result<Vec<Point3<f64>>, ParalineError> {
        boundary_for_steps(&self.params, self.steps)
    }

    /// Extrusion vector (`+Z` scaled by the extrude height).
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, self.params.extrude_height)
    }

    /// Run the pipeline against `kernel`.
    ///
    /// Errors only for invalid parameters or when the kernel cannot build a
    /// wire at all.
    pub fn execute<K: GeometryKernel>(&self, kernel: &K) -> Result<KernelShape<K>, ParalineError> {
        let points = self.boundary()?;
        self.execute_on(kernel, &points)
    }

    /// Same as [`execute`](Self::execute), reusing boundary points the caller
    /// already generated with [`boundary`](Self::boundary).
    pub fn execute_on<K: GeometryKernel>(
        &self,
        kernel: &K,
        points: &[Point3<f64>],
    ) -> Result<KernelShape<K>, ParalineError> {
        let wire = kernel.make_polygon(points)?;
        if !kernel.is_closed(&wire) {
            tracing::warn!(points = points.len(), "wire is open; returning wire");
            return Ok(Shape::Wire(wire));
        }
        let face = match kernel.face_from_wire(&wire) {
            Ok(face) => face,
            Err(err) => {
                tracing::warn!(%err, "no face from boundary; returning wire");
                return Ok(Shape::Wire(wire));
            }
        };
        match kernel.extrude(&face, self.direction()) {
            Ok(solid) => {
                tracing::debug!(
                    h = self.params.h,
                    extrude_height = self.params.extrude_height,
                    "paraline solid"
                );
                Ok(Shape::Solid(solid))
            }
            Err(err) => {
                tracing::warn!(%err, "extrusion failed; returning wire");
                Ok(Shape::Wire(wire))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{PlanarFace, PolyKernel, Prism, Wire};

    fn params(h: f64, extrude_height: f64, resolution: f64) -> ParalineParams {
        ParalineParams {
            h,
            extrude_height,
            resolution,
        }
    }

    #[test]
    fn default_feature_is_a_solid() {
        let feature = ParalineFeature::new(ParalineParams::default()).unwrap();
        let shape = feature.execute(&PolyKernel::default()).unwrap();
        let solid = shape.as_solid().expect("solid");
        // Lens between two parabolic arcs: 4H²/3 = 1200, minus the sag of 80
        // chords of Δy = 1.5, each Δy³/(12H) = 0.009375.
        let area = solid.base().area();
        assert!((area - 1199.25).abs() < 1e-6);
        assert!((solid.volume() - area * 10.0).abs() < 1e-6);
        // 82 boundary points minus the dropped duplicates.
        assert_eq!(solid.base().vertices().len(), 80);
        assert!(solid.base().centroid().coords.norm() < 1e-9);
        // Right half runs downwards, so the winding is clockwise seen from +Z.
        assert!(solid.base().normal().z < 0.0);
    }

    #[test]
    fn tiny_height_still_returns_a_shape() {
        for h in [1e-8, 1e-12] {
            let feature = ParalineFeature::new(params(h, 1.0, 0.05)).unwrap();
            let shape = feature.execute(&PolyKernel::default()).unwrap();
            let solid = shape.as_solid().expect("solid");
            // Same lens as the default case, scaled by (h / 30)².
            let expected = 1199.25 * (h / 30.0) * (h / 30.0);
            assert!((solid.base().area() / expected - 1.0).abs() < 1e-9);
            assert_eq!(solid.base().vertices().len(), 80);
        }
    }

    #[test]
    fn execute_on_reuses_the_boundary() {
        let feature = ParalineFeature::new(params(12.0, 3.0, 0.1)).unwrap();
        assert_eq!(feature.num_steps(), 21);
        let points = feature.boundary().unwrap();
        assert_eq!(points.len(), 2 * feature.num_steps());
        let kernel = PolyKernel::default();
        assert_eq!(
            feature.execute_on(&kernel, &points).unwrap(),
            feature.execute(&kernel).unwrap()
        );
    }

    #[test]
    fn coarsest_resolution_falls_back_to_wire() {
        let feature = ParalineFeature::new(params(5.0, 1.0, 2.0)).unwrap();
        let shape = feature.execute(&PolyKernel::default()).unwrap();
        let wire = shape.as_wire().expect("wire fallback");
        assert!(wire.is_closed());
        assert_eq!(wire.vertices().len(), 2);
    }

    #[test]
    fn three_samples_give_a_diamond() {
        let feature = ParalineFeature::new(params(2.0, 1.0, 1.0)).unwrap();
        let shape = feature.execute(&PolyKernel::default()).unwrap();
        let solid = shape.as_solid().expect("solid");
        // Vertices (0,±2) and (±1,0).
        assert!((solid.base().area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_extrusion_falls_back_to_wire() {
        let feature = ParalineFeature::new(params(30.0, 0.0, 0.05)).unwrap();
        let shape = feature.execute(&PolyKernel::default()).unwrap();
        assert!(!shape.is_solid());
    }

    #[test]
    fn negative_extrusion_is_a_solid() {
        let feature = ParalineFeature::new(params(30.0, -4.0, 0.1)).unwrap();
        let shape = feature.execute(&PolyKernel::default()).unwrap();
        let solid = shape.as_solid().unwrap();
        assert!((solid.height() - 4.0).abs() < 1e-12);
        assert_eq!(solid.top_vertices()[0].z, -4.0);
    }

    #[test]
    fn invalid_params_fail_fast() {
        assert!(matches!(
            ParalineFeature::new(params(0.0, 10.0, 0.05)),
            Err(ParalineError::InvalidParameter { .. })
        ));
        assert!(ParalineFeature::new(params(30.0, 10.0, 2.5)).is_err());
        assert!(ParalineFeature::with_cfg(ParalineParams::default(), GenCfg { max_steps: 8 }).is_err());
    }

    /// Kernel that builds wires but refuses every face.
    struct NoFaceKernel(PolyKernel);

    impl GeometryKernel for NoFaceKernel {
        type Wire = Wire;
        type Face = PlanarFace;
        type Solid = Prism;

        fn make_polygon(&self, points: &[Point3<f64>]) -> Result<Wire, ParalineError> {
            self.0.make_polygon(points)
        }

        fn is_closed(&self, wire: &Wire) -> bool {
            self.0.is_closed(wire)
        }

        fn face_from_wire(&self, _wire: &Wire) -> Result<PlanarFace, ParalineError> {
            Err(ParalineError::face("refused"))
        }

        fn extrude(&self, face: &PlanarFace, direction: Vector3<f64>) -> Result<Prism, ParalineError> {
            self.0.extrude(face, direction)
        }
    }

    #[test]
    fn kernel_face_failure_is_recovered() {
        let feature = ParalineFeature::new(ParalineParams::default()).unwrap();
        let shape = feature.execute(&NoFaceKernel(PolyKernel::default())).unwrap();
        assert_eq!(shape.as_wire().unwrap().vertices().len(), 80);
    }

    /// Kernel that rejects every polygon.
    struct NoWireKernel;

    impl GeometryKernel for NoWireKernel {
        type Wire = ();
        type Face = ();
        type Solid = ();

        fn make_polygon(&self, _points: &[Point3<f64>]) -> Result<(), ParalineError> {
            Err(ParalineError::degenerate("no wires here"))
        }

        fn is_closed(&self, _wire: &()) -> bool {
            false
        }

        fn face_from_wire(&self, _wire: &()) -> Result<(), ParalineError> {
            Ok(())
        }

        fn extrude(&self, _face: &(), _direction: Vector3<f64>) -> Result<(), ParalineError> {
            Ok(())
        }
    }

    #[test]
    fn wire_failure_surfaces() {
        let feature = ParalineFeature::new(ParalineParams::default()).unwrap();
        let err = feature.execute(&NoWireKernel).unwrap_err();
        assert!(matches!(err, ParalineError::DegenerateGeometry { .. }));
        assert!(err.is_recoverable());
    }
}
