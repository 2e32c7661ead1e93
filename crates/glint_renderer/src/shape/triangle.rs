//! Triangle primitives for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use super::{Primitive, ShapeId};
use crate::Intersection;
use glint_math::{Aabb, Ray, Tuple, TupleExt, EPSILON};

/// A flat triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    pub p1: Tuple,
    pub p2: Tuple,
    pub p3: Tuple,
    /// Edges from p1
    pub e1: Tuple,
    pub e2: Tuple,
    /// Pre-computed face normal (unit length)
    pub normal: Tuple,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross3(e1).normalize();

        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal,
        }
    }

    /// Möller-Trumbore: returns `(t, u, v)` on a hit.
    fn intersect_uv(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction.cross3(self.e2);
        let det = self.e1.dot(dir_cross_e2);

        // Ray is parallel to triangle
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross3(self.e1);
        let v = f * ray.direction.dot(origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        Some((f * self.e2.dot(origin_cross_e1), u, v))
    }

    fn vertex_bounds(&self) -> Aabb {
        let mut bbox = Aabb::empty();
        bbox.add_point(self.p1);
        bbox.add_point(self.p2);
        bbox.add_point(self.p3);
        bbox
    }
}

impl Primitive for Triangle {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if let Some((t, u, v)) = self.intersect_uv(ray) {
            xs.push(Intersection::with_uv(t, id, u, v));
        }
    }

    fn local_normal_at(&self, _p: Tuple, _hit: &Intersection) -> Tuple {
        self.normal
    }

    fn bounds(&self) -> Aabb {
        self.vertex_bounds()
    }
}

/// A triangle whose normal is interpolated from per-vertex normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothTriangle {
    pub triangle: Triangle,
    pub n1: Tuple,
    pub n2: Tuple,
    pub n3: Tuple,
}

impl SmoothTriangle {
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple, n1: Tuple, n2: Tuple, n3: Tuple) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }
}

impl Primitive for SmoothTriangle {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        self.triangle.local_intersect(ray, id, xs);
    }

    fn local_normal_at(&self, _p: Tuple, hit: &Intersection) -> Tuple {
        self.n2 * hit.u + self.n3 * hit.v + self.n1 * (1.0 - hit.u - hit.v)
    }

    fn bounds(&self) -> Aabb {
        self.triangle.vertex_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{point, vector};

    fn sample() -> Triangle {
        Triangle::new(point(0.0, 1.0, 0.0), point(-1.0, 0.0, 0.0), point(1.0, 0.0, 0.0))
    }

    fn sample_smooth() -> SmoothTriangle {
        SmoothTriangle::new(
            point(0.0, 1.0, 0.0),
            point(-1.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            vector(0.0, 1.0, 0.0),
            vector(-1.0, 0.0, 0.0),
            vector(1.0, 0.0, 0.0),
        )
    }

    fn hits(shape: &dyn Primitive, origin: Tuple, direction: Tuple) -> Vec<Intersection> {
        let mut xs = Vec::new();
        shape.local_intersect(&Ray::new(origin, direction), ShapeId::default(), &mut xs);
        xs
    }

    #[test]
    fn test_triangle_construction() {
        let t = sample();
        assert_eq!(t.e1, vector(-1.0, -1.0, 0.0));
        assert_eq!(t.e2, vector(1.0, -1.0, 0.0));
        assert_eq!(t.normal, vector(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_triangle_normal_is_constant() {
        let t = sample();
        let hit = Intersection::new(0.0, ShapeId::default());
        for p in [point(0.0, 0.5, 0.0), point(-0.5, 0.75, 0.0), point(0.5, 0.25, 0.0)] {
            assert_eq!(t.local_normal_at(p, &hit), t.normal);
        }
    }

    #[test]
    fn test_triangle_misses() {
        let t = sample();
        let cases = [
            // parallel
            (point(0.0, -1.0, -2.0), vector(0.0, 1.0, 0.0)),
            // past p1-p3 edge
            (point(1.0, 1.0, -2.0), vector(0.0, 0.0, 1.0)),
            // past p1-p2 edge
            (point(-1.0, 1.0, -2.0), vector(0.0, 0.0, 1.0)),
            // past p2-p3 edge
            (point(0.0, -1.0, -2.0), vector(0.0, 0.0, 1.0)),
        ];
        for (origin, direction) in cases {
            assert!(hits(&t, origin, direction).is_empty());
        }
    }

    #[test]
    fn test_triangle_hit() {
        let xs = hits(&sample(), point(0.0, 0.5, -2.0), vector(0.0, 0.0, 1.0));
        assert_eq!(xs.len(), 1);
        assert!((xs[0].t - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_triangle_bounds() {
        let t = Triangle::new(point(-3.0, 7.0, 2.0), point(6.0, 2.0, -4.0), point(2.0, -1.0, -1.0));
        let b = t.bounds();
        assert_eq!(b.min(), point(-3.0, -1.0, -4.0));
        assert_eq!(b.max(), point(6.0, 7.0, 2.0));
    }

    #[test]
    fn test_smooth_triangle_stores_uv() {
        let xs = hits(&sample_smooth(), point(-0.2, 0.3, -2.0), vector(0.0, 0.0, 1.0));
        assert_eq!(xs.len(), 1);
        assert!((xs[0].u - 0.45).abs() < EPSILON);
        assert!((xs[0].v - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_smooth_triangle_interpolates_normal() {
        let tri = sample_smooth();
        let hit = Intersection::with_uv(1.0, ShapeId::default(), 0.45, 0.25);
        let n = tri.local_normal_at(point(0.0, 0.0, 0.0), &hit).normalize();
        assert!(n.approx_eq(vector(-0.5547, 0.83205, 0.0)));
    }
}
