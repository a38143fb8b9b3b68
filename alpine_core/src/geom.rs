//! Collision geometry.
//!
//! Planes, rays, and indexed polygon meshes, plus the engine's collision
//! query: polygons tested against the unit sphere at the origin. The
//! radius is a fixed convention; callers transform geometry into sphere
//! space first (see [`Polyhedron::transform`]).

use serde::{Deserialize, Serialize};

use crate::math::{Vec3, EPS};
use crate::matrix::Mat4;
use crate::solver::LinearSystem;

/// A 3D plane: unit normal plus signed offset.
///
/// Distances are only meaningful while `normal` stays unit length.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub dist: f64,
}

impl Plane {
    pub const fn new(normal: Vec3, dist: f64) -> Self {
        Self { normal, dist }
    }

    /// Signed distance from `pt`; positive on the normal side.
    pub fn distance_to(&self, pt: Vec3) -> f64 {
        self.normal.dot(pt) + self.dist
    }
}

/// A ray: origin plus direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Ordered vertex indices into an external vertex slice; at least 3.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<usize>,
}

impl Polygon {
    pub fn new(vertices: Vec<usize>) -> Self {
        debug_assert!(vertices.len() >= 3, "polygon needs at least 3 vertices");
        Self { vertices }
    }

    /// Unit normal from the winding of the first and last edges out of
    /// vertex 0. Collinear polygons yield the zero vector; callers that
    /// can hold degenerate geometry must check for it.
    pub fn normal(&self, verts: &[Vec3]) -> Vec3 {
        let v0 = verts[self.vertices[0]];
        let e1 = verts[self.vertices[1]] - v0;
        let e2 = verts[self.vertices[self.vertices.len() - 1]] - v0;
        let mut normal = e1.cross(e2);
        normal.normalize();
        normal
    }

    /// Tests the polygon against the unit sphere at the origin.
    ///
    /// Edges get a closest-point proximity check first; failing that, the
    /// origin is projected along the polygon normal onto its plane and a
    /// winding test decides containment. Degenerate polygons and planes
    /// farther than the sphere radius report no hit.
    pub fn intersects_unit_sphere(&self, verts: &[Vec3]) -> bool {
        let normal = self.normal(verts);
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: normal,
        };

        let nu_dot = normal.dot(ray.dir);
        if nu_dot.abs() < EPS {
            return false;
        }

        let d = -normal.dot(verts[self.vertices[0]]);
        if d.abs() > 1.0 {
            return false;
        }

        for i in 0..self.vertices.len() {
            let v0 = verts[self.vertices[i]];
            let v1 = verts[self.vertices[(i + 1) % self.vertices.len()]];

            let mut edge = v1 - v0;
            let edge_len = edge.normalize();

            // Clamped projection of the origin onto the edge segment.
            let t = -v0.dot(edge);
            let dist_sq = if t < 0.0 {
                v0.length_sq()
            } else if t > edge_len {
                v1.length_sq()
            } else {
                (v0 + t * edge).length_sq()
            };

            if dist_sq <= 1.0 {
                return true;
            }
        }

        let s = -(d + normal.dot(ray.origin)) / nu_dot;
        let pt = ray.origin + s * ray.dir;

        for i in 0..self.vertices.len() {
            let v0 = verts[self.vertices[i]];
            let v1 = verts[self.vertices[(i + 1) % self.vertices.len()]];

            let edge_normal = normal.cross(v1 - v0);
            if (pt - v0).dot(edge_normal) < 0.0 {
                return false;
            }
        }
        true
    }
}

/// A vertex buffer plus the polygons indexing into it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Polyhedron {
    pub vertices: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
}

impl Polyhedron {
    /// True when any polygon intersects the unit sphere at the origin.
    /// Short-circuits on the first hit.
    pub fn intersects_unit_sphere(&self) -> bool {
        self.polygons
            .iter()
            .any(|p| p.intersects_unit_sphere(&self.vertices))
    }

    /// Applies an affine transform to every vertex in place.
    pub fn transform(&mut self, mat: &Mat4) {
        for v in &mut self.vertices {
            *v = mat.transform_point(*v);
        }
    }
}

/// The unique meeting point of three planes.
///
/// `None` when the planes are near-parallel or otherwise fail to meet in
/// exactly one point.
pub fn intersect_planes(s1: &Plane, s2: &Plane, s3: &Plane) -> Option<Vec3> {
    let mut sys = LinearSystem::new(3);
    for (row, s) in [s1, s2, s3].into_iter().enumerate() {
        sys.set(row, 0, s.normal.x);
        sys.set(row, 1, s.normal.y);
        sys.set(row, 2, s.normal.z);
        sys.set(row, 3, -s.dist);
    }

    let x = sys.solve()?;
    Some(Vec3::new(x[0], x[1], x[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(verts: Vec<Vec3>) -> Polyhedron {
        Polyhedron {
            vertices: verts,
            polygons: vec![Polygon::new(vec![0, 1, 2])],
        }
    }

    #[test]
    fn orthogonal_planes_meet_at_the_origin() {
        let p1 = Plane::new(Vec3::X, 0.0);
        let p2 = Plane::new(Vec3::Y, 0.0);
        let p3 = Plane::new(Vec3::Z, 0.0);
        let pt = intersect_planes(&p1, &p2, &p3).unwrap();
        assert!((pt - Vec3::ZERO).length() < 1e-12);
    }

    #[test]
    fn offset_planes_meet_at_their_corner() {
        let p1 = Plane::new(Vec3::X, -1.0); // x = 1
        let p2 = Plane::new(Vec3::Y, -2.0); // y = 2
        let p3 = Plane::new(Vec3::Z, -3.0); // z = 3
        let pt = intersect_planes(&p1, &p2, &p3).unwrap();
        assert!((pt - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-12);
    }

    #[test]
    fn parallel_planes_have_no_unique_intersection() {
        // All three normals lie in the yz-plane: every plane is parallel
        // to the x-axis, so the intersection is never a single point.
        let p1 = Plane::new(Vec3::Y, 0.0);
        let p2 = Plane::new(Vec3::Z, 0.0);
        let p3 = Plane::new(Vec3::new(0.0, 1.0, 1.0), 0.5);
        assert!(intersect_planes(&p1, &p2, &p3).is_none());
    }

    #[test]
    fn plane_distance_is_signed() {
        let plane = Plane::new(Vec3::Y, -1.0); // y = 1
        assert_eq!(plane.distance_to(Vec3::new(0.0, 3.0, 0.0)), 2.0);
        assert_eq!(plane.distance_to(Vec3::ZERO), -1.0);
    }

    #[test]
    fn winding_gives_the_plane_normal() {
        // Counter-clockwise square in the xy-plane seen from +z.
        let verts = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let poly = Polygon::new(vec![0, 1, 2, 3]);
        let n = poly.normal(&verts);
        assert!((n - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn degenerate_polygon_has_zero_normal() {
        let verts = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let poly = Polygon::new(vec![0, 1, 2]);
        assert_eq!(poly.normal(&verts), Vec3::ZERO);
    }

    #[test]
    fn polygon_through_the_origin_hits() {
        // Triangle in the z=0 plane containing the origin projection.
        let ph = triangle(vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        assert!(ph.intersects_unit_sphere());
    }

    #[test]
    fn faraway_polygon_misses() {
        let ph = triangle(vec![
            Vec3::new(10.0, 10.0, 5.0),
            Vec3::new(12.0, 10.0, 5.0),
            Vec3::new(11.0, 12.0, 5.0),
        ]);
        assert!(!ph.intersects_unit_sphere());
    }

    #[test]
    fn near_plane_but_outside_winding_misses() {
        // The polygon plane passes within the sphere, but the projected
        // origin lies outside the triangle and no edge comes close.
        let ph = triangle(vec![
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(7.0, 0.0, 0.0),
            Vec3::new(6.0, 2.0, 0.0),
        ]);
        assert!(!ph.intersects_unit_sphere());
    }

    #[test]
    fn edge_clipping_the_sphere_hits() {
        // No vertex inside, but one edge passes through the sphere; the
        // proximity fast path must report the hit.
        let ph = triangle(vec![
            Vec3::new(-2.0, 0.5, 0.0),
            Vec3::new(2.0, 0.5, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ]);
        assert!(ph.intersects_unit_sphere());
    }

    #[test]
    fn polyhedron_reports_any_hit() {
        let mut ph = Polyhedron {
            vertices: vec![
                // Polygon 0: far away.
                Vec3::new(10.0, 10.0, 5.0),
                Vec3::new(12.0, 10.0, 5.0),
                Vec3::new(11.0, 12.0, 5.0),
                // Polygon 1: through the origin.
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            polygons: vec![Polygon::new(vec![0, 1, 2]), Polygon::new(vec![3, 4, 5])],
        };
        assert!(ph.intersects_unit_sphere());

        // Push everything out of reach and the hit disappears.
        ph.transform(&Mat4::translation(Vec3::new(100.0, 0.0, 0.0)));
        assert!(!ph.intersects_unit_sphere());
    }

    #[test]
    fn transform_moves_vertices_in_place() {
        let mut ph = triangle(vec![
            Vec3::new(99.0, 0.0, 0.0),
            Vec3::new(101.0, 0.0, 0.0),
            Vec3::new(100.0, 2.0, 0.0),
        ]);
        assert!(!ph.intersects_unit_sphere());

        ph.transform(&Mat4::translation(Vec3::new(-100.0, -0.5, 0.0)));
        assert!(ph.intersects_unit_sphere());
    }
}
