//! Glint renderer - Whitted-style ray tracing core
//!
//! Answers "what color does this ray see?" for a scene of primitive and
//! composite shapes lit by point and area lights. Shapes live in an arena
//! and are addressed by [`ShapeId`]; groups and CSG nodes hold child ids,
//! children hold a parent id for walking transforms back to world space.
//!
//! Camera ray generation, canvases and scene file parsing live outside
//! this crate.

mod bvh;
mod computation;
mod config;
mod error;
mod intersection;
mod light;
mod material;
mod pattern;
mod shape;
mod world;

pub use bvh::{divide, make_subgroup, partition_children};
pub use computation::{prepare_computations, Computations};
pub use config::{TraceConfig, MAX_RECURSION_DEPTH};
pub use error::{SceneError, SceneResult};
pub use intersection::{Intersection, Intersections};
pub use light::{lighting, AreaLight, Light, PointLight};
pub use material::{Color, Material};
pub use pattern::{Pattern, PatternKind};
pub use shape::{
    Cone, Csg, CsgOp, Cube, Cylinder, Group, Plane, Primitive, Shape, ShapeArena, ShapeId,
    ShapeKind, SmoothTriangle, Sphere, Triangle,
};
pub use world::World;

/// Re-export the math types used throughout the public API
pub use glint_math::{point, vector, Aabb, Matrix, Ray, Transform, Tuple, TupleExt, EPSILON};
