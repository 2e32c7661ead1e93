//! Constructive solid geometry node and its hit filtering rule.

use super::ShapeId;
use glint_math::Aabb;
use serde::{Deserialize, Serialize};

/// Boolean operation combining the two operands of a [`Csg`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

impl CsgOp {
    /// Whether a hit survives filtering.
    ///
    /// `lhit` is true when the hit belongs to the left operand; `inl` and
    /// `inr` track whether the ray is currently inside each operand.
    pub fn intersection_allowed(self, lhit: bool, inl: bool, inr: bool) -> bool {
        match self {
            CsgOp::Union => (lhit && !inr) || (!lhit && !inl),
            CsgOp::Intersection => (lhit && inr) || (!lhit && inl),
            CsgOp::Difference => (lhit && !inr) || (!lhit && inl),
        }
    }
}

/// Two operand shapes joined by a boolean operation.
#[derive(Debug, Clone)]
pub struct Csg {
    pub(super) op: CsgOp,
    pub(super) left: ShapeId,
    pub(super) right: ShapeId,
    pub(super) bounds: Aabb,
}

impl Csg {
    pub fn op(&self) -> CsgOp {
        self.op
    }

    pub fn left(&self) -> ShapeId {
        self.left
    }

    pub fn right(&self) -> ShapeId {
        self.right
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}
