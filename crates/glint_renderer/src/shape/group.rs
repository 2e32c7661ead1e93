use super::ShapeId;
use glint_math::Aabb;

/// An ordered collection of child shapes sharing one transform.
///
/// The bounding box is the union of the children's parent-space boxes and
/// is kept current by the arena whenever the subtree changes.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub(super) children: Vec<ShapeId>,
    pub(super) bounds: Aabb,
}

impl Group {
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
