//! Sphere primitive for ray tracing.

use super::{Primitive, ShapeId};
use crate::Intersection;
use glint_math::{point, Aabb, Ray, Tuple};

/// The unit sphere centered at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere;

impl Primitive for Sphere {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let sphere_to_ray = ray.origin - point(0.0, 0.0, 0.0);
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(sphere_to_ray);
        let c = sphere_to_ray.dot(sphere_to_ray) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return;
        }

        // A tangent ray reports the same root twice
        let sqrtd = discriminant.sqrt();
        xs.push(Intersection::new((-b - sqrtd) / (2.0 * a), id));
        xs.push(Intersection::new((-b + sqrtd) / (2.0 * a), id));
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        p - point(0.0, 0.0, 0.0)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
