use super::{Primitive, ShapeId};
use crate::Intersection;
use glint_math::{point, vector, Aabb, Ray, Tuple, EPSILON};

/// The xz plane through the origin, normal +y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane;

impl Primitive for Plane {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if ray.direction.y.abs() < EPSILON {
            return;
        }
        xs.push(Intersection::new(-ray.origin.y / ray.direction.y, id));
    }

    fn local_normal_at(&self, _p: Tuple, _hit: &Intersection) -> Tuple {
        vector(0.0, 1.0, 0.0)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(
            point(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
            point(f64::INFINITY, 0.0, f64::INFINITY),
        )
    }
}
