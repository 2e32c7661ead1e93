//! Shading frame derived from a hit.

use crate::{Intersection, ShapeArena, ShapeId};
use glint_math::{Ray, Tuple, EPSILON};

/// Everything shading needs to know about one hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Computations {
    pub t: f64,
    pub object: ShapeId,
    pub point: Tuple,
    pub eyev: Tuple,
    /// Always faces the eye; see `inside`
    pub normalv: Tuple,
    /// True when the hit is on the inside of the surface and `normalv` was
    /// flipped
    pub inside: bool,
    pub reflectv: Tuple,
    /// `point` nudged along the normal, for shadow and reflection rays
    pub over_point: Tuple,
    /// `point` nudged against the normal, for refraction rays
    pub under_point: Tuple,
    /// Refractive index of the medium being exited
    pub n1: f64,
    /// Refractive index of the medium being entered
    pub n2: f64,
}

/// Build the shading frame for `hit`.
///
/// `xs` is the full sorted intersection list the hit was taken from; it is
/// walked to find which transparent volumes contain the hit.
pub fn prepare_computations(
    hit: &Intersection,
    ray: &Ray,
    xs: &[Intersection],
    shapes: &ShapeArena,
) -> Computations {
    let point = ray.at(hit.t);
    let eyev = -ray.direction;
    let mut normalv = shapes.normal_at(hit.object, point, hit);

    let inside = normalv.dot(eyev) < 0.0;
    if inside {
        normalv = -normalv;
    }

    let (n1, n2) = refractive_indices(hit, xs, shapes);

    Computations {
        t: hit.t,
        object: hit.object,
        point,
        eyev,
        normalv,
        inside,
        reflectv: ray.direction.reflect(normalv),
        over_point: point + normalv * EPSILON,
        under_point: point - normalv * EPSILON,
        n1,
        n2,
    }
}

fn refractive_indices(hit: &Intersection, xs: &[Intersection], shapes: &ShapeArena) -> (f64, f64) {
    let index_of = |containers: &[ShapeId]| {
        containers
            .last()
            .map_or(1.0, |&id| shapes[id].material().refractive_index)
    };

    let mut containers: Vec<ShapeId> = Vec::new();
    let mut n1 = 1.0;

    for i in xs {
        let is_hit = i.same_hit(hit);
        if is_hit {
            n1 = index_of(&containers);
        }

        match containers.iter().position(|&id| id == i.object) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(i.object),
        }

        if is_hit {
            return (n1, index_of(&containers));
        }
    }

    // The hit was not in the list; treat both sides as the last medium seen
    (n1, index_of(&containers))
}

impl Computations {
    /// Schlick's approximation of the Fresnel reflectance at this hit.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(self.normalv);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                // Total internal reflection
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}
