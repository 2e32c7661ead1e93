//! Procedural color patterns.
//!
//! A pattern is evaluated in its own space: world point -> object space of
//! the shape it is painted on -> pattern space via the pattern's inverse
//! transform.

use crate::{Color, ShapeArena, ShapeId};
use glint_math::{Matrix, Transform, Tuple};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternKind {
    /// Alternates `a` and `b` on unit steps of x
    Stripe { a: Color, b: Color },
    /// Linear blend from `a` to `b` over each unit of x
    Gradient { a: Color, b: Color },
    /// Concentric rings in the xz plane
    Ring { a: Color, b: Color },
    /// 3D checkerboard
    Checkers { a: Color, b: Color },
    /// The pattern-space point itself, as a color
    Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    #[serde(default)]
    transform: Transform,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: Transform::identity(),
        }
    }

    pub fn stripe(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Stripe { a, b })
    }

    pub fn gradient(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Gradient { a, b })
    }

    pub fn ring(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Ring { a, b })
    }

    pub fn checkers(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Checkers { a, b })
    }

    pub fn coordinates() -> Self {
        Self::new(PatternKind::Coordinates)
    }

    /// Replace the pattern transform.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is not invertible.
    pub fn with_transform(mut self, matrix: Matrix) -> Self {
        self.transform = Transform::new(matrix);
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Color at a point already in pattern space.
    pub fn pattern_at(&self, p: Tuple) -> Color {
        match self.kind {
            PatternKind::Stripe { a, b } => {
                if is_even(p.x.floor()) {
                    a
                } else {
                    b
                }
            }
            PatternKind::Gradient { a, b } => {
                let fraction = p.x - p.x.floor();
                a + (b - a) * fraction
            }
            PatternKind::Ring { a, b } => {
                if is_even((p.x * p.x + p.z * p.z).sqrt().floor()) {
                    a
                } else {
                    b
                }
            }
            PatternKind::Checkers { a, b } => {
                if is_even(p.x.floor() + p.y.floor() + p.z.floor()) {
                    a
                } else {
                    b
                }
            }
            PatternKind::Coordinates => Color::new(p.x, p.y, p.z),
        }
    }

    /// Color at a world-space point on `object`.
    pub fn at_shape(&self, shapes: &ShapeArena, object: ShapeId, world_point: Tuple) -> Color {
        let object_point = shapes.world_to_object(object, world_point);
        let pattern_point = self.transform.inverse() * object_point;
        self.pattern_at(pattern_point)
    }
}

#[inline]
fn is_even(floored: f64) -> bool {
    floored.rem_euclid(2.0) == 0.0
}
