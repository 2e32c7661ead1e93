use crate::{Matrix, Tuple};

/// A ray with an origin point and a direction vector.
///
/// The direction is not normalized; after transformation into a shape's
/// local space its length carries the scale, so `t` values stay valid in
/// world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    pub fn new(origin: Tuple, direction: Tuple) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Tuple {
        self.origin + self.direction * t
    }

    /// Apply `m` to both origin and direction.
    pub fn transform(&self, m: &Matrix) -> Ray {
        Ray {
            origin: m * self.origin,
            direction: m * self.direction,
        }
    }
}
