//! Test-only shape that records the last local-space ray it received.

use super::{Primitive, ShapeId};
use crate::Intersection;
use glint_math::{point, Aabb, Ray, Tuple, TupleExt};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct Probe {
    pub saved_ray: Mutex<Option<Ray>>,
}

impl Probe {
    pub fn saved_ray(&self) -> Option<Ray> {
        *self.saved_ray.lock().unwrap()
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        Self {
            saved_ray: Mutex::new(self.saved_ray()),
        }
    }
}

impl Primitive for Probe {
    fn local_intersect(&self, ray: &Ray, _id: ShapeId, _xs: &mut Vec<Intersection>) {
        *self.saved_ray.lock().unwrap() = Some(*ray);
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        p.to_vector()
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
