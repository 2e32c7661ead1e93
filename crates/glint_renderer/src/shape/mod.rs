//! Shapes and the arena that owns them.
//!
//! Every shape carries a transform (with cached inverses), a material, an
//! optional parent link and a shadow flag. The geometry lives in
//! [`ShapeKind`]: primitives implement [`Primitive`]; groups and CSG nodes
//! reference their children by [`ShapeId`] and are resolved by the arena.

mod arena;
mod cone;
mod csg;
mod cube;
mod cylinder;
mod group;
mod plane;
mod sphere;
mod triangle;

#[cfg(test)]
pub(crate) mod probe;

pub use arena::ShapeArena;
pub use cone::Cone;
pub use csg::{Csg, CsgOp};
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use group::Group;
pub use plane::Plane;
pub use sphere::Sphere;
pub use triangle::{SmoothTriangle, Triangle};

use crate::{Intersection, Material};
use glint_math::{Aabb, Matrix, Ray, Transform, Tuple};

slotmap::new_key_type! {
    /// Handle to a shape stored in a [`ShapeArena`].
    pub struct ShapeId;
}

/// Local-space geometry of a primitive shape.
///
/// Rays and points passed in are already in the shape's object space.
pub trait Primitive {
    /// Append every intersection of `ray` with this primitive to `xs`.
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>);

    /// Surface normal at `point`. `hit` carries barycentric `u`/`v` for
    /// triangles.
    fn local_normal_at(&self, point: Tuple, hit: &Intersection) -> Tuple;

    /// Untransformed bounding box.
    fn bounds(&self) -> Aabb;
}

/// The closed set of shape variants.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Group),
    Csg(Csg),
    #[cfg(test)]
    Probe(probe::Probe),
}

impl ShapeKind {
    /// The primitive geometry, or `None` for groups and CSG nodes.
    pub fn as_primitive(&self) -> Option<&dyn Primitive> {
        match self {
            ShapeKind::Sphere(s) => Some(s),
            ShapeKind::Plane(p) => Some(p),
            ShapeKind::Cube(c) => Some(c),
            ShapeKind::Cylinder(c) => Some(c),
            ShapeKind::Cone(c) => Some(c),
            ShapeKind::Triangle(t) => Some(t),
            ShapeKind::SmoothTriangle(t) => Some(t),
            ShapeKind::Group(_) | ShapeKind::Csg(_) => None,
            #[cfg(test)]
            ShapeKind::Probe(p) => Some(p),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ShapeKind::Group(_) | ShapeKind::Csg(_))
    }
}

/// A node in the scene graph.
///
/// Fields are private: once a shape is inside a [`ShapeArena`], it changes
/// only through arena methods that keep parent bounds up to date.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    transform: Transform,
    material: Material,
    parent: Option<ShapeId>,
    casts_shadow: bool,
}

impl Shape {
    /// A shape with identity transform and default material.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            transform: Transform::identity(),
            material: Material::default(),
            parent: None,
            casts_shadow: true,
        }
    }

    /// Unit sphere at the origin.
    pub fn sphere() -> Self {
        Self::new(ShapeKind::Sphere(Sphere))
    }

    /// Unit sphere with the glass material.
    pub fn glass_sphere() -> Self {
        Self::sphere().with_material(Material::glass())
    }

    /// The xz plane.
    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane(Plane))
    }

    /// Axis-aligned cube spanning [-1, 1] on every axis.
    pub fn cube() -> Self {
        Self::new(ShapeKind::Cube(Cube))
    }

    pub fn cylinder(cylinder: Cylinder) -> Self {
        Self::new(ShapeKind::Cylinder(cylinder))
    }

    pub fn cone(cone: Cone) -> Self {
        Self::new(ShapeKind::Cone(cone))
    }

    pub fn triangle(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(p1: Tuple, p2: Tuple, p3: Tuple, n1: Tuple, n2: Tuple, n3: Tuple) -> Self {
        Self::new(ShapeKind::SmoothTriangle(SmoothTriangle::new(
            p1, p2, p3, n1, n2, n3,
        )))
    }

    /// An empty group. Add children with [`ShapeArena::add_child`].
    pub fn group() -> Self {
        Self::new(ShapeKind::Group(Group::default()))
    }

    /// Set the transform before inserting the shape into an arena.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is not invertible.
    pub fn with_transform(mut self, matrix: Matrix) -> Self {
        self.transform = Transform::new(matrix);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow
    }
}
