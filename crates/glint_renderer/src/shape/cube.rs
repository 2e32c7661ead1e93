use super::{Primitive, ShapeId};
use crate::Intersection;
use glint_math::{point, vector, Aabb, Interval, Ray, Tuple};

/// Axis-aligned cube spanning [-1, 1] on every axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cube;

impl Primitive for Cube {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let slab = Interval::new(-1.0, 1.0);
        let (xtmin, xtmax) = glint_math::check_axis(ray.origin.x, ray.direction.x, slab);
        let (ytmin, ytmax) = glint_math::check_axis(ray.origin.y, ray.direction.y, slab);
        let (ztmin, ztmax) = glint_math::check_axis(ray.origin.z, ray.direction.z, slab);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);
        if tmin > tmax {
            return;
        }

        xs.push(Intersection::new(tmin, id));
        xs.push(Intersection::new(tmax, id));
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        let maxc = p.x.abs().max(p.y.abs()).max(p.z.abs());

        if maxc == p.x.abs() {
            vector(p.x, 0.0, 0.0)
        } else if maxc == p.y.abs() {
            vector(0.0, p.y, 0.0)
        } else {
            vector(0.0, 0.0, p.z)
        }
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(ray: Ray) -> Vec<f64> {
        let mut xs = Vec::new();
        Cube.local_intersect(&ray, ShapeId::default(), &mut xs);
        xs.iter().map(|i| i.t).collect()
    }

    #[test]
    fn test_cube_hits() {
        let cases = [
            (point(5.0, 0.5, 0.0), vector(-1.0, 0.0, 0.0), 4.0, 6.0),
            (point(-5.0, 0.5, 0.0), vector(1.0, 0.0, 0.0), 4.0, 6.0),
            (point(0.5, 5.0, 0.0), vector(0.0, -1.0, 0.0), 4.0, 6.0),
            (point(0.5, -5.0, 0.0), vector(0.0, 1.0, 0.0), 4.0, 6.0),
            (point(0.5, 0.0, 5.0), vector(0.0, 0.0, -1.0), 4.0, 6.0),
            (point(0.5, 0.0, -5.0), vector(0.0, 0.0, 1.0), 4.0, 6.0),
            (point(0.0, 0.5, 0.0), vector(0.0, 0.0, 1.0), -1.0, 1.0),
        ];
        for (origin, direction, t1, t2) in cases {
            assert_eq!(hits(Ray::new(origin, direction)), vec![t1, t2], "ray from {origin:?}");
        }
    }

    #[test]
    fn test_cube_misses() {
        let cases = [
            (point(-2.0, 0.0, 0.0), vector(0.2673, 0.5345, 0.8018)),
            (point(0.0, -2.0, 0.0), vector(0.8018, 0.2673, 0.5345)),
            (point(0.0, 0.0, -2.0), vector(0.5345, 0.8018, 0.2673)),
            (point(2.0, 0.0, 2.0), vector(0.0, 0.0, -1.0)),
            (point(0.0, 2.0, 2.0), vector(0.0, -1.0, 0.0)),
            (point(2.0, 2.0, 0.0), vector(-1.0, 0.0, 0.0)),
        ];
        for (origin, direction) in cases {
            assert!(hits(Ray::new(origin, direction)).is_empty(), "ray from {origin:?}");
        }
    }

    #[test]
    fn test_cube_behind_ray_still_reports_both() {
        assert_eq!(hits(Ray::new(point(0.0, 0.0, 5.0), vector(0.0, 0.0, 1.0))), vec![-6.0, -4.0]);
    }

    #[test]
    fn test_cube_normals() {
        let hit = Intersection::new(0.0, ShapeId::default());
        let cases = [
            (point(1.0, 0.5, -0.8), vector(1.0, 0.0, 0.0)),
            (point(-1.0, -0.2, 0.9), vector(-1.0, 0.0, 0.0)),
            (point(-0.4, 1.0, -0.1), vector(0.0, 1.0, 0.0)),
            (point(0.3, -1.0, -0.7), vector(0.0, -1.0, 0.0)),
            (point(-0.6, 0.3, 1.0), vector(0.0, 0.0, 1.0)),
            (point(0.4, 0.4, -1.0), vector(0.0, 0.0, -1.0)),
            (point(1.0, 1.0, 1.0), vector(1.0, 0.0, 0.0)),
            (point(-1.0, -1.0, -1.0), vector(-1.0, 0.0, 0.0)),
        ];
        for (p, expected) in cases {
            assert_eq!(Cube.local_normal_at(p, &hit), expected);
        }
    }
}
