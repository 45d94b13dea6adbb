use super::*;
use crate::error::ParalineError;
use nalgebra::{Point3, Vector3};

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

fn unit_square() -> Vec<Point3<f64>> {
    vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(1.0, 1.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 0.0, 0.0),
    ]
}

#[test]
fn square_face_and_prism() {
    let k = PolyKernel::default();
    let wire = k.make_polygon(&unit_square()).unwrap();
    assert!(k.is_closed(&wire));
    assert_eq!(wire.vertices().len(), 4);
    assert_eq!(wire.edge_count(), 4);
    assert!((wire.length() - 4.0).abs() < 1e-12);

    let face = k.face_from_wire(&wire).unwrap();
    assert!((face.area() - 1.0).abs() < 1e-12);
    assert!((face.normal() - Vector3::z()).norm() < 1e-12);
    assert!((face.centroid() - p(0.5, 0.5, 0.0)).norm() < 1e-12);
    assert!((face.perimeter() - 4.0).abs() < 1e-12);

    let prism = k.extrude(&face, Vector3::new(0.0, 0.0, 2.0)).unwrap();
    assert!((prism.height() - 2.0).abs() < 1e-12);
    assert!((prism.volume() - 2.0).abs() < 1e-12);
    assert!((prism.lateral_area() - 8.0).abs() < 1e-12);
    assert!((prism.surface_area() - 10.0).abs() < 1e-12);
    assert_eq!(prism.top_vertices()[2], p(1.0, 1.0, 2.0));
    // Euler characteristic of a closed genus-0 solid.
    let chi = prism.vertex_count() as i64 - prism.edge_count() as i64 + prism.face_count() as i64;
    assert_eq!(chi, 2);
}

#[test]
fn oblique_extrusion_uses_normal_component() {
    let k = PolyKernel::default();
    let face = k
        .face_from_wire(&k.make_polygon(&unit_square()).unwrap())
        .unwrap();
    let prism = k.extrude(&face, Vector3::new(3.0, 0.0, -2.0)).unwrap();
    assert!((prism.volume() - 2.0).abs() < 1e-12);
}

#[test]
fn coincident_points_are_collapsed() {
    let k = PolyKernel::default();
    let a = p(0.0, 0.0, 0.0);
    let pts = vec![a, a, p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0), p(0.0, 2.0, 1e-9), a];
    let wire = k.make_polygon(&pts).unwrap();
    assert!(wire.is_closed());
    assert_eq!(wire.points().len(), 4);
    assert_eq!(wire.vertices().len(), 3);
    let face = k.face_from_wire(&wire).unwrap();
    assert!((face.area() - 2.0).abs() < 1e-12);
}

#[test]
fn closing_point_snaps_onto_start() {
    let k = PolyKernel::default();
    let pts = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(1e-10, -1e-10, 0.0),
    ];
    let wire = k.make_polygon(&pts).unwrap();
    assert!(wire.is_closed());
    assert_eq!(wire.points()[3], wire.points()[0]);
}

#[test]
fn tolerances_follow_the_point_cloud_scale() {
    let k = PolyKernel::default();
    for s in [1e-9, 1.0, 1e7] {
        let pts: Vec<_> = unit_square().iter().map(|q| Point3::from(q.coords * s)).collect();
        let wire = k.make_polygon(&pts).unwrap();
        assert!(wire.is_closed());
        assert_eq!(wire.vertices().len(), 4);
        let face = k.face_from_wire(&wire).unwrap();
        assert!((face.area() / (s * s) - 1.0).abs() < 1e-12);
        let prism = k.extrude(&face, Vector3::new(0.0, 0.0, s)).unwrap();
        assert!((prism.volume() / (s * s * s) - 1.0).abs() < 1e-12);
    }

    // A 1e-6 step is a vertex on a unit square but noise on a 1e7 one.
    let a = p(0.0, 0.0, 0.0);
    let small = k.make_polygon(&[a, p(1e-6, 0.0, 0.0), p(1.0, 1.0, 0.0)]).unwrap();
    assert_eq!(small.points().len(), 3);
    let large = k.make_polygon(&[a, p(1e-6, 0.0, 0.0), p(1e7, 1e7, 0.0)]).unwrap();
    assert_eq!(large.points().len(), 2);
}

#[test]
fn open_wire_has_no_face() {
    let k = PolyKernel::default();
    let wire = k
        .make_polygon(&[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)])
        .unwrap();
    assert!(!k.is_closed(&wire));
    assert!(matches!(
        k.face_from_wire(&wire),
        Err(ParalineError::DegenerateGeometry { .. })
    ));
}

#[test]
fn too_few_points() {
    let k = PolyKernel::default();
    let a = p(1.0, 1.0, 0.0);
    assert!(matches!(
        k.make_polygon(&[a, a]),
        Err(ParalineError::DegenerateGeometry { .. })
    ));
    assert!(k.make_polygon(&[]).is_err());
    assert!(k.make_polygon(&[a, p(f64::NAN, 0.0, 0.0)]).is_err());

    // Closed, but only two distinct vertices.
    let wire = k.make_polygon(&[a, p(2.0, 2.0, 0.0), a]).unwrap();
    assert!(wire.is_closed());
    assert!(matches!(
        k.face_from_wire(&wire),
        Err(ParalineError::DegenerateGeometry { .. })
    ));
}

#[test]
fn self_intersecting_boundary_is_rejected() {
    let k = PolyKernel::default();
    // Edge (4,0)-(1,3) crosses edge (3,3)-(0,0) at (2,2).
    let pts = vec![
        p(0.0, 0.0, 0.0),
        p(4.0, 0.0, 0.0),
        p(1.0, 3.0, 0.0),
        p(3.0, 3.0, 0.0),
        p(0.0, 0.0, 0.0),
    ];
    let wire = k.make_polygon(&pts).unwrap();
    assert!(matches!(
        k.face_from_wire(&wire),
        Err(ParalineError::FaceConstruction { .. })
    ));
}

#[test]
fn collinear_boundary_has_no_area() {
    let k = PolyKernel::default();
    let pts = vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(2.0, 0.0, 0.0),
        p(0.0, 0.0, 0.0),
    ];
    let wire = k.make_polygon(&pts).unwrap();
    assert!(matches!(
        k.face_from_wire(&wire),
        Err(ParalineError::FaceConstruction { .. })
    ));
}

#[test]
fn non_planar_boundary_is_rejected() {
    let k = PolyKernel::default();
    let mut pts = unit_square();
    pts[2].z = 0.5;
    let wire = k.make_polygon(&pts).unwrap();
    assert!(matches!(
        k.face_from_wire(&wire),
        Err(ParalineError::FaceConstruction { .. })
    ));
}

#[test]
fn vertical_plane_face() {
    // Square in the x = 0 plane exercises the non-z projection.
    let k = PolyKernel::default();
    let pts = vec![
        p(0.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 1.0, 1.0),
        p(0.0, 0.0, 1.0),
        p(0.0, 0.0, 0.0),
    ];
    let face = k.face_from_wire(&k.make_polygon(&pts).unwrap()).unwrap();
    assert!((face.area() - 1.0).abs() < 1e-12);
    assert!((face.normal().x.abs() - 1.0).abs() < 1e-12);
}

#[test]
fn bad_extrusions_are_rejected() {
    let k = PolyKernel::default();
    let face = k
        .face_from_wire(&k.make_polygon(&unit_square()).unwrap())
        .unwrap();
    for dir in [
        Vector3::zeros(),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, f64::NAN),
    ] {
        assert!(matches!(
            k.extrude(&face, dir),
            Err(ParalineError::FaceConstruction { .. })
        ));
    }
}

#[test]
fn dense_convex_polygon_builds_quickly() {
    // 20k-gon: exercises the grid path of the crossing check.
    let k = PolyKernel::default();
    let m = 20_000;
    let mut pts: Vec<_> = (0..m)
        .map(|i| {
            let t = i as f64 / m as f64 * std::f64::consts::TAU;
            p(t.cos(), t.sin(), 0.0)
        })
        .collect();
    pts.push(pts[0]);
    let face = k.face_from_wire(&k.make_polygon(&pts).unwrap()).unwrap();
    assert!((face.area() - std::f64::consts::PI).abs() < 1e-6);
    assert!(face.centroid().coords.norm() < 1e-9);
}
