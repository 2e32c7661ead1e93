use super::cylinder::within_cap;
use super::{Primitive, ShapeId};
use crate::Intersection;
use glint_math::{point, vector, Aabb, Ray, Tuple, EPSILON};

/// Double-napped cone `x^2 + z^2 = y^2` around the y axis.
///
/// Truncation and caps behave like [`super::Cylinder`]; a cap's radius is
/// the absolute value of its y bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Default for Cone {
    fn default() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        }
    }
}

impl Cone {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn push_if_in_range(&self, ray: &Ray, t: f64, id: ShapeId, xs: &mut Vec<Intersection>) {
        let y = ray.origin.y + t * ray.direction.y;
        if self.minimum < y && y < self.maximum {
            xs.push(Intersection::new(t, id));
        }
    }

    fn intersect_caps(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        for y in [self.minimum, self.maximum] {
            let t = (y - ray.origin.y) / ray.direction.y;
            if within_cap(ray, t, y.abs()) {
                xs.push(Intersection::new(t, id));
            }
        }
    }
}

impl Primitive for Cone {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let d = ray.direction;
        let o = ray.origin;
        let a = d.x * d.x - d.y * d.y + d.z * d.z;
        let b = 2.0 * o.x * d.x - 2.0 * o.y * d.y + 2.0 * o.z * d.z;
        let c = o.x * o.x - o.y * o.y + o.z * o.z;

        if a.abs() < EPSILON {
            // Parallel to one nappe: at most one wall hit
            if b.abs() >= EPSILON {
                self.push_if_in_range(ray, -c / (2.0 * b), id, xs);
            }
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                let mut t0 = (-b - sqrtd) / (2.0 * a);
                let mut t1 = (-b + sqrtd) / (2.0 * a);
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                self.push_if_in_range(ray, t0, id, xs);
                self.push_if_in_range(ray, t1, id, xs);
            }
        }

        self.intersect_caps(ray, id, xs);
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        let dist = p.x * p.x + p.z * p.z;

        if dist < self.maximum * self.maximum && p.y >= self.maximum - EPSILON {
            return vector(0.0, 1.0, 0.0);
        }
        if dist < self.minimum * self.minimum && p.y <= self.minimum + EPSILON {
            return vector(0.0, -1.0, 0.0);
        }

        let mut y = dist.sqrt();
        if p.y > 0.0 {
            y = -y;
        }
        vector(p.x, y, p.z)
    }

    fn bounds(&self) -> Aabb {
        let limit = self.minimum.abs().max(self.maximum.abs());
        Aabb::new(
            point(-limit, self.minimum, -limit),
            point(limit, self.maximum, limit),
        )
    }
}
