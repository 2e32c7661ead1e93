use crate::{point, Interval, Matrix, Ray, Tuple, EPSILON};

/// Axis-aligned bounding box used to cull rays before testing a shape's
/// children, and to partition groups when building a BVH.
///
/// An AABB is defined by three intervals (one per axis). The default box
/// is empty; extents may be infinite (a plane's box is).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from its min and max corners.
    pub fn new(min: Tuple, max: Tuple) -> Self {
        Self {
            x: Interval::new(min.x, max.x),
            y: Interval::new(min.y, max.y),
            z: Interval::new(min.z, max.z),
        }
    }

    /// Create an empty AABB (contains nothing).
    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn min(&self) -> Tuple {
        point(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Tuple {
        point(self.x.max, self.y.max, self.z.max)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Grow the box to include `p`.
    pub fn add_point(&mut self, p: Tuple) {
        self.x.include(p.x);
        self.y.include(p.y);
        self.z.include(p.z);
    }

    /// Grow the box to include `other`.
    pub fn add_box(&mut self, other: &Aabb) {
        *self = Aabb::surrounding(self, other);
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Inclusive containment test.
    pub fn contains_point(&self, p: Tuple) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.x.contains_interval(&other.x)
            && self.y.contains_interval(&other.y)
            && self.z.contains_interval(&other.z)
    }

    /// Transform the box by `m`.
    ///
    /// An axis-aligned box is not axis-aligned after rotation, so all 8
    /// corners are transformed and re-bounded.
    pub fn transform(&self, m: &Matrix) -> Aabb {
        if self.is_empty() {
            return Aabb::EMPTY;
        }
        let (lo, hi) = (self.min(), self.max());
        let corners = [
            point(lo.x, lo.y, lo.z),
            point(lo.x, lo.y, hi.z),
            point(lo.x, hi.y, lo.z),
            point(lo.x, hi.y, hi.z),
            point(hi.x, lo.y, lo.z),
            point(hi.x, lo.y, hi.z),
            point(hi.x, hi.y, lo.z),
            point(hi.x, hi.y, hi.z),
        ];

        let mut result = Aabb::EMPTY;
        for corner in corners {
            result.add_point(m.mul_tuple_sparse(corner));
        }
        result
    }

    /// True if the box contains no point on some axis.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Slab test against a ray. The ray need not start outside the box.
    pub fn intersects(&self, ray: &Ray) -> bool {
        let (xmin, xmax) = check_axis(ray.origin.x, ray.direction.x, self.x);
        let (ymin, ymax) = check_axis(ray.origin.y, ray.direction.y, self.y);
        let (zmin, zmax) = check_axis(ray.origin.z, ray.direction.z, self.z);

        let tmin = xmin.max(ymin).max(zmin);
        let tmax = xmax.min(ymax).min(zmax);
        tmin <= tmax
    }

    /// Bisect the box across its longest axis.
    ///
    /// Ties prefer X over Y over Z.
    pub fn split(&self) -> (Aabb, Aabb) {
        let axis = self.longest_axis();
        let mut left_max = self.max();
        let mut right_min = self.min();

        let mid = self.axis_interval(axis).midpoint();
        match axis {
            0 => {
                left_max.x = mid;
                right_min.x = mid;
            }
            1 => {
                left_max.y = mid;
                right_min.y = mid;
            }
            _ => {
                left_max.z = mid;
                right_min.z = mid;
            }
        }

        (Aabb::new(self.min(), left_max), Aabb::new(right_min, self.max()))
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size >= y_size && x_size >= z_size {
            0
        } else if y_size >= z_size {
            1
        } else {
            2
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Entry and exit distance of a ray against one slab.
///
/// Near-zero direction components are treated as parallel to the slab, so
/// the bounds go to +/- infinity instead of dividing.
pub fn check_axis(origin: f64, direction: f64, slab: Interval) -> (f64, f64) {
    let tmin_numerator = slab.min - origin;
    let tmax_numerator = slab.max - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}
