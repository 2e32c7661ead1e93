use crate::ShapeId;
use glint_math::EPSILON;
use std::ops::Deref;

/// A ray parameter at which a ray meets a primitive.
///
/// `u` and `v` are barycentric coordinates, set only by triangle hits and
/// used to interpolate smooth-triangle normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub object: ShapeId,
    pub u: f64,
    pub v: f64,
}

impl Intersection {
    pub fn new(t: f64, object: ShapeId) -> Self {
        Self {
            t,
            object,
            u: 0.0,
            v: 0.0,
        }
    }

    pub fn with_uv(t: f64, object: ShapeId, u: f64, v: f64) -> Self {
        Self { t, object, u, v }
    }

    /// Two records describe the same hit when they share an object and
    /// their `t` values agree within [`EPSILON`].
    pub fn same_hit(&self, other: &Intersection) -> bool {
        self.object == other.object && (self.t - other.t).abs() < EPSILON
    }
}

/// Intersections sorted by ascending `t`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intersections(Vec<Intersection>);

impl Intersections {
    pub fn new(mut xs: Vec<Intersection>) -> Self {
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self(xs)
    }

    /// The lowest non-negative intersection.
    pub fn hit(&self) -> Option<&Intersection> {
        self.0.iter().find(|i| i.t >= 0.0)
    }

    pub fn into_vec(self) -> Vec<Intersection> {
        self.0
    }
}

impl Deref for Intersections {
    type Target = [Intersection];

    fn deref(&self) -> &[Intersection] {
        &self.0
    }
}

impl FromIterator<Intersection> for Intersections {
    fn from_iter<I: IntoIterator<Item = Intersection>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Intersections {
    type Item = Intersection;
    type IntoIter = std::vec::IntoIter<Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Intersection;
    type IntoIter = std::slice::Iter<'a, Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
