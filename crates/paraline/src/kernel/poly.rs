//! Reference kernel: polylines, planar polygon faces, straight prisms.
//!
//! Assumptions and conventions
//! - Tolerances are relative: lengths scale with the bounding-box diagonal of
//!   the points involved, areas with its square. A lens of height `1e-8`
//!   behaves like one of height `30`.
//! - Wires are straight-segment polylines. Consecutive points closer than the
//!   point tolerance are collapsed, like production polygon builders do, so
//!   the closing repeat of an already-closed point list is harmless.
//! - A wire is closed when its first and last points coincide; the last point is
//!   then snapped onto the first.
//! - Faces are planar, simple (no crossing edges) and carry the Newell normal,
//!   so orientation follows the boundary winding.
//! - Self-intersection uses a uniform grid over the projected polygon; pairs are
//!   only tested when their bounding boxes share a cell.

use std::collections::BTreeMap;

use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};

use super::GeometryKernel;
use crate::error::ParalineError;

/// Kernel tolerances, relative to the bounding-box diagonal `d`.
#[derive(Clone, Copy, Debug)]
pub struct KernelCfg {
    /// Points closer than `eps_point * d` are coincident.
    pub eps_point: f64,
    /// Max distance `eps_plane * d` of a face vertex from the face plane.
    pub eps_plane: f64,
    /// Faces with an area below `eps_area * d²` are rejected.
    pub eps_area: f64,
    /// Min `|cos|` between extrusion direction and face normal.
    pub eps_extrude: f64,
}

impl Default for KernelCfg {
    fn default() -> Self {
        Self {
            eps_point: 1e-9,
            eps_plane: 1e-7,
            eps_area: 1e-12,
            eps_extrude: 1e-9,
        }
    }
}

/// Straight-segment polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct Wire {
    points: Vec<Point3<f64>>,
    closed: bool,
}

impl Wire {
    /// Points in traversal order; closed wires repeat the first point last.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Distinct vertices (closing repeat omitted).
    pub fn vertices(&self) -> &[Point3<f64>] {
        if self.closed {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// Planar polygon face.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarFace {
    vertices: Vec<Point3<f64>>,
    normal: Unit<Vector3<f64>>,
    area: f64,
}

impl PlanarFace {
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Unit normal; right-handed with respect to the boundary winding.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal.into_inner()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn perimeter(&self) -> f64 {
        let m = self.vertices.len();
        (0..m)
            .map(|k| (self.vertices[(k + 1) % m] - self.vertices[k]).norm())
            .sum()
    }

    /// Area centroid (fan decomposition with signed triangle areas).
    pub fn centroid(&self) -> Point3<f64> {
        let v0 = self.vertices[0];
        let mut acc = Vector3::zeros();
        let mut total = 0.0;
        for w in self.vertices[1..].windows(2) {
            let a = 0.5 * (w[0] - v0).cross(&(w[1] - v0)).dot(&*self.normal);
            acc += (v0.coords + w[0].coords + w[1].coords) * (a / 3.0);
            total += a;
        }
        Point3::from(acc / total)
    }
}

/// Face swept along a straight direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Prism {
    base: PlanarFace,
    direction: Vector3<f64>,
}

impl Prism {
    #[inline]
    pub fn base(&self) -> &PlanarFace {
        &self.base
    }

    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    /// Distance between the base and top planes.
    pub fn height(&self) -> f64 {
        self.direction.dot(&*self.base.normal).abs()
    }

    pub fn volume(&self) -> f64 {
        self.base.area * self.height()
    }

    pub fn top_vertices(&self) -> Vec<Point3<f64>> {
        self.base
            .vertices
            .iter()
            .map(|v| v + self.direction)
            .collect()
    }

    pub fn lateral_area(&self) -> f64 {
        let vs = &self.base.vertices;
        let m = vs.len();
        (0..m)
            .map(|k| (vs[(k + 1) % m] - vs[k]).cross(&self.direction).norm())
            .sum()
    }

    pub fn surface_area(&self) -> f64 {
        2.0 * self.base.area + self.lateral_area()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        2 * self.base.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        3 * self.base.vertices.len()
    }

    /// Lateral quads plus the two caps.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.base.vertices.len() + 2
    }
}

/// Reference kernel (stateless apart from its tolerances).
#[derive(Clone, Copy, Debug, Default)]
pub struct PolyKernel {
    pub cfg: KernelCfg,
}

impl PolyKernel {
    pub fn new(cfg: KernelCfg) -> Self {
        Self { cfg }
    }
}

impl GeometryKernel for PolyKernel {
    type Wire = Wire;
    type Face = PlanarFace;
    type Solid = Prism;

    fn make_polygon(&self, points: &[Point3<f64>]) -> Result<Wire, ParalineError> {
        if let Some(p) = points
            .iter()
            .find(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(ParalineError::degenerate(format!(
                "non-finite polygon point {p}"
            )));
        }
        let eps = self.cfg.eps_point * bbox_diagonal(points);
        let mut pts: Vec<Point3<f64>> = Vec::with_capacity(points.len());
        for p in points {
            if let Some(last) = pts.last() {
                if (p - last).norm() <= eps {
                    continue;
                }
            }
            pts.push(*p);
        }
        if pts.len() < 2 {
            return Err(ParalineError::degenerate(format!(
                "polygon needs at least 2 distinct points, got {}",
                pts.len()
            )));
        }
        let n = pts.len();
        let closed = n >= 3 && (pts[n - 1] - pts[0]).norm() <= eps;
        if closed {
            pts[n - 1] = pts[0];
        }
        Ok(Wire {
            points: pts,
            closed,
        })
    }

    fn is_closed(&self, wire: &Wire) -> bool {
        wire.closed
    }

    fn face_from_wire(&self, wire: &Wire) -> Result<PlanarFace, ParalineError> {
        if !wire.closed {
            return Err(ParalineError::degenerate("wire is not closed"));
        }
        let verts = wire.vertices();
        if verts.len() < 3 {
            return Err(ParalineError::degenerate(format!(
                "face needs at least 3 distinct vertices, got {}",
                verts.len()
            )));
        }

        let scale = bbox_diagonal(verts);
        let newell = newell_normal(verts);
        let area = 0.5 * newell.norm();
        if !(area > self.cfg.eps_area * scale * scale) {
            return Err(ParalineError::face(format!(
                "boundary encloses no area ({area:e})"
            )));
        }
        let normal = Unit::new_normalize(newell);

        let origin = verts[0];
        for (k, v) in verts.iter().enumerate() {
            let off = normal.dot(&(v - origin));
            if off.abs() > self.cfg.eps_plane * scale {
                return Err(ParalineError::face(format!(
                    "vertex {k} lies {off:e} off the face plane"
                )));
            }
        }

        let flat = project_to_plane(verts, &normal);
        if let Some((i, j)) = find_crossing_edges(&flat, self.cfg.eps_point * scale) {
            return Err(ParalineError::face(format!(
                "boundary edges {i} and {j} intersect"
            )));
        }

        Ok(PlanarFace {
            vertices: verts.to_vec(),
            normal,
            area,
        })
    }

    fn extrude(&self, face: &PlanarFace, direction: Vector3<f64>) -> Result<Prism, ParalineError> {
        if !direction.iter().all(|c| c.is_finite()) {
            return Err(ParalineError::face("non-finite extrusion direction"));
        }
        let len = direction.norm();
        if len <= self.cfg.eps_point * bbox_diagonal(&face.vertices) {
            return Err(ParalineError::face("zero-length extrusion"));
        }
        if direction.dot(&*face.normal).abs() <= self.cfg.eps_extrude * len {
            return Err(ParalineError::face(
                "extrusion direction lies in the face plane",
            ));
        }
        Ok(Prism {
            base: face.clone(),
            direction,
        })
    }
}

/// Diagonal of the axis-aligned bounding box, floored at the smallest positive
/// normal float.
fn bbox_diagonal(points: &[Point3<f64>]) -> f64 {
    let Some(first) = points.first() else {
        return f64::MIN_POSITIVE;
    };
    let (lo, hi) = points.iter().fold((*first, *first), |(lo, hi), p| {
        (lo.inf(p), hi.sup(p))
    });
    (hi - lo).norm().max(f64::MIN_POSITIVE)
}

/// Newell's normal; its norm is twice the polygon area.
fn newell_normal(verts: &[Point3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for (k, p) in verts.iter().enumerate() {
        let q = verts[(k + 1) % verts.len()];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    n
}

/// Drop the dominant normal axis.
fn project_to_plane(verts: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<Point2<f64>> {
    let a = normal.abs();
    let (i, j) = if a.z >= a.x && a.z >= a.y {
        (0, 1)
    } else if a.y >= a.x {
        (2, 0)
    } else {
        (1, 2)
    };
    verts.iter().map(|p| Point2::new(p[i], p[j])).collect()
}

#[inline]
fn orient(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b - a).perp(&(c - a))
}

#[inline]
fn within_box(a: Point2<f64>, b: Point2<f64>, p: Point2<f64>, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Closed-segment intersection (touching counts).
fn segments_intersect(
    p1: Point2<f64>,
    p2: Point2<f64>,
    q1: Point2<f64>,
    q2: Point2<f64>,
    eps: f64,
) -> bool {
    let tq = eps * (q2 - q1).norm();
    let tp = eps * (p2 - p1).norm();
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    let straddles = |u: f64, v: f64, t: f64| (u > t && v < -t) || (u < -t && v > t);
    if straddles(d1, d2, tq) && straddles(d3, d4, tp) {
        return true;
    }
    (d1.abs() <= tq && within_box(q1, q2, p1, eps))
        || (d2.abs() <= tq && within_box(q1, q2, p2, eps))
        || (d3.abs() <= tp && within_box(p1, p2, q1, eps))
        || (d4.abs() <= tp && within_box(p1, p2, q2, eps))
}

/// First pair of non-adjacent edges that touch or cross, if any.
///
/// Edge `k` runs from `poly[k]` to `poly[(k + 1) % m]`.
fn find_crossing_edges(poly: &[Point2<f64>], eps: f64) -> Option<(usize, usize)> {
    let m = poly.len();
    if m < 4 {
        return None;
    }
    let edge = |k: usize| (poly[k], poly[(k + 1) % m]);
    let adjacent = |i: usize, j: usize| i.abs_diff(j) == 1 || i.abs_diff(j) == m - 1;

    let mut lo = poly[0];
    let mut hi = poly[0];
    for p in poly {
        lo = Point2::new(lo.x.min(p.x), lo.y.min(p.y));
        hi = Point2::new(hi.x.max(p.x), hi.y.max(p.y));
    }
    let side = ((m as f64).sqrt().ceil() as usize).max(1);
    let extent = hi - lo;
    let cell = Vector2::new(
        (extent.x / side as f64).max(eps),
        (extent.y / side as f64).max(eps),
    );
    let cell_of = |x: f64, y: f64| {
        let cx = ((x - lo.x) / cell.x).floor().max(0.0) as usize;
        let cy = ((y - lo.y) / cell.y).floor().max(0.0) as usize;
        (cx.min(side - 1), cy.min(side - 1))
    };

    let mut grid: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for k in 0..m {
        let (a, b) = edge(k);
        let (x0, y0) = cell_of(a.x.min(b.x) - eps, a.y.min(b.y) - eps);
        let (x1, y1) = cell_of(a.x.max(b.x) + eps, a.y.max(b.y) + eps);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                grid.entry((cx, cy)).or_default().push(k);
            }
        }
    }

    for bucket in grid.values() {
        for (s, &i) in bucket.iter().enumerate() {
            for &j in &bucket[s + 1..] {
                if adjacent(i, j) {
                    continue;
                }
                let (p1, p2) = edge(i);
                let (q1, q2) = edge(j);
                if segments_intersect(p1, p2, q1, q2, eps) {
                    return Some((i.min(j), i.max(j)));
                }
            }
        }
    }
    None
}
