//! Arena storage for the scene graph.
//!
//! Shapes are owned by the arena and addressed by [`ShapeId`]. Groups and
//! CSG nodes list child ids; children point back at their container. The
//! arena is the only place those links and the cached composite bounds
//! change, so during rendering it can be shared read-only.

use super::{Csg, CsgOp, Shape, ShapeId, ShapeKind};
use crate::{Color, Intersection, Intersections, Material, Pattern, SceneError, SceneResult};
use glint_math::{Aabb, Matrix, Ray, Transform, Tuple, TupleExt};
use slotmap::SlotMap;
use std::ops::Index;

#[derive(Debug, Clone, Default)]
pub struct ShapeArena {
    shapes: SlotMap<ShapeId, Shape>,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape to the arena.
    ///
    /// # Panics
    ///
    /// Groups must be inserted empty and CSG nodes are only built through
    /// [`ShapeArena::csg`]; both rules keep every child owned by exactly one
    /// container.
    pub fn insert(&mut self, mut shape: Shape) -> ShapeId {
        match &shape.kind {
            ShapeKind::Group(g) => assert!(g.is_empty(), "groups are inserted empty"),
            ShapeKind::Csg(_) => panic!("CSG nodes are created with ShapeArena::csg"),
            _ => {}
        }
        shape.parent = None;
        self.shapes.insert(shape)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter()
    }

    fn lookup(&self, id: ShapeId) -> SceneResult<&Shape> {
        self.shapes.get(id).ok_or(SceneError::UnknownShape(id))
    }

    /// Replace a shape's transform.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is singular or `id` is not in this arena.
    pub fn set_transform(&mut self, id: ShapeId, matrix: Matrix) {
        if let Err(err) = self.try_set_transform(id, matrix) {
            panic!("cannot set transform: {err}");
        }
    }

    /// Replace a shape's transform, refreshing the bounds of every ancestor.
    pub fn try_set_transform(&mut self, id: ShapeId, matrix: Matrix) -> SceneResult<()> {
        let transform = Transform::try_new(matrix)?;
        let shape = self
            .shapes
            .get_mut(id)
            .ok_or(SceneError::UnknownShape(id))?;
        shape.transform = transform;

        let parent = shape.parent;
        if let Some(parent) = parent {
            self.refresh_bounds(parent);
        }
        Ok(())
    }

    pub fn set_material(&mut self, id: ShapeId, material: Material) {
        self.shapes[id].material = material;
    }

    pub fn set_casts_shadow(&mut self, id: ShapeId, casts_shadow: bool) {
        self.shapes[id].casts_shadow = casts_shadow;
    }

    /// Append `child` to `group` and point the child back at it.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) -> SceneResult<()> {
        if !matches!(self.lookup(group)?.kind, ShapeKind::Group(_)) {
            return Err(SceneError::NotAGroup(group));
        }
        self.check_attachable(group, child)?;

        if let ShapeKind::Group(g) = &mut self.shapes[group].kind {
            g.children.push(child);
        }
        self.shapes[child].parent = Some(group);
        let added = self.parent_space_bounds_of(child);
        self.grow_bounds(group, added);
        Ok(())
    }

    /// Detach every shape in `children` that belongs to `group`, then
    /// refresh bounds once. Returns how many were detached.
    pub(crate) fn remove_children(&mut self, group: ShapeId, children: &[ShapeId]) -> usize {
        if !matches!(self.shapes[group].kind, ShapeKind::Group(_)) {
            return 0;
        }

        let mut detached = 0;
        for &child in children {
            if let Some(shape) = self.shapes.get_mut(child) {
                if shape.parent == Some(group) {
                    shape.parent = None;
                    detached += 1;
                }
            }
        }
        if detached == 0 {
            return 0;
        }

        let mut kept = match &mut self.shapes[group].kind {
            ShapeKind::Group(g) => std::mem::take(&mut g.children),
            _ => Vec::new(),
        };
        kept.retain(|&c| self.shapes[c].parent == Some(group));
        if let ShapeKind::Group(g) = &mut self.shapes[group].kind {
            g.children = kept;
        }
        self.refresh_bounds(group);
        detached
    }

    /// Combine two unparented shapes into a new CSG node.
    pub fn csg(&mut self, op: CsgOp, left: ShapeId, right: ShapeId) -> SceneResult<ShapeId> {
        if left == right {
            return Err(SceneError::SelfReference(left));
        }
        for id in [left, right] {
            if self.lookup(id)?.parent.is_some() {
                return Err(SceneError::AlreadyParented(id));
            }
        }

        let node = Shape::new(ShapeKind::Csg(Csg {
            op,
            left,
            right,
            bounds: Aabb::EMPTY,
        }));
        let id = self.shapes.insert(node);
        self.shapes[left].parent = Some(id);
        self.shapes[right].parent = Some(id);
        self.refresh_bounds(id);
        Ok(id)
    }

    fn check_attachable(&self, container: ShapeId, child: ShapeId) -> SceneResult<()> {
        if self.lookup(child)?.parent.is_some() {
            return Err(SceneError::AlreadyParented(child));
        }

        // The child may not be the container or one of its ancestors
        let mut current = Some(container);
        while let Some(id) = current {
            if id == child {
                return Err(SceneError::SelfReference(child));
            }
            current = self.shapes[id].parent;
        }
        Ok(())
    }

    /// Recompute cached bounds from `id` up to the root.
    fn refresh_bounds(&mut self, id: ShapeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            let bounds = self.composite_bounds(id);
            let shape = &mut self.shapes[id];
            match &mut shape.kind {
                ShapeKind::Group(g) => g.bounds = bounds,
                ShapeKind::Csg(c) => c.bounds = bounds,
                _ => {}
            }
            current = shape.parent;
        }
    }

    /// Extend cached bounds from `id` up to the root so they take in
    /// `added`, given in `id`'s own space. Stops once an ancestor already
    /// covers the growth.
    fn grow_bounds(&mut self, id: ShapeId, mut added: Aabb) {
        let mut current = Some(id);
        while let Some(id) = current {
            let shape = &mut self.shapes[id];
            let bounds = match &mut shape.kind {
                ShapeKind::Group(g) => &mut g.bounds,
                ShapeKind::Csg(c) => &mut c.bounds,
                _ => return,
            };
            let before = *bounds;
            bounds.add_box(&added);
            if *bounds == before {
                return;
            }
            added = bounds.transform(shape.transform.matrix());
            current = shape.parent;
        }
    }

    fn composite_bounds(&self, id: ShapeId) -> Aabb {
        let union = |children: &[ShapeId]| {
            let mut bounds = Aabb::EMPTY;
            for &child in children {
                bounds.add_box(&self.parent_space_bounds_of(child));
            }
            bounds
        };

        match &self.shapes[id].kind {
            ShapeKind::Group(g) => union(&g.children),
            ShapeKind::Csg(c) => union(&[c.left, c.right]),
            _ => self.bounds_of(id),
        }
    }

    /// Bounding box in the shape's own space.
    pub fn bounds_of(&self, id: ShapeId) -> Aabb {
        match &self.shapes[id].kind {
            ShapeKind::Group(g) => g.bounds,
            ShapeKind::Csg(c) => c.bounds,
            kind => kind.as_primitive().map_or(Aabb::EMPTY, |p| p.bounds()),
        }
    }

    /// Bounding box in the space of the shape's parent.
    pub fn parent_space_bounds_of(&self, id: ShapeId) -> Aabb {
        let shape = &self.shapes[id];
        self.bounds_of(id).transform(shape.transform.matrix())
    }

    /// Children of a group, or an empty slice for anything else.
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        match &self.shapes[id].kind {
            ShapeKind::Group(g) => &g.children,
            _ => &[],
        }
    }

    /// True if `target` is `id` or lies anywhere below it.
    pub fn includes(&self, id: ShapeId, target: ShapeId) -> bool {
        if id == target {
            return true;
        }
        match &self.shapes[id].kind {
            ShapeKind::Group(g) => g.children.iter().any(|&c| self.includes(c, target)),
            ShapeKind::Csg(c) => self.includes(c.left, target) || self.includes(c.right, target),
            _ => false,
        }
    }

    /// Intersect a world-space ray with a shape and everything below it.
    pub fn intersect(&self, id: ShapeId, ray: &Ray) -> Intersections {
        let mut xs = Vec::new();
        self.intersect_into(id, ray, &mut xs);
        Intersections::new(xs)
    }

    /// Append the hits of `ray` (in the parent's space) against `id`.
    pub(crate) fn intersect_into(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        let shape = &self.shapes[id];
        let local_ray = ray.transform(shape.transform.inverse());

        match &shape.kind {
            ShapeKind::Group(g) => {
                if !g.bounds.intersects(&local_ray) {
                    return;
                }
                for &child in &g.children {
                    self.intersect_into(child, &local_ray, xs);
                }
            }
            ShapeKind::Csg(c) => {
                if !c.bounds.intersects(&local_ray) {
                    return;
                }
                let mut operand_hits = Vec::new();
                self.intersect_into(c.left, &local_ray, &mut operand_hits);
                self.intersect_into(c.right, &local_ray, &mut operand_hits);
                operand_hits.sort_by(|a, b| a.t.total_cmp(&b.t));
                xs.extend(self.filter_intersections(id, &operand_hits));
            }
            kind => {
                if let Some(primitive) = kind.as_primitive() {
                    primitive.local_intersect(&local_ray, id, xs);
                }
            }
        }
    }

    /// Keep the sorted hits that lie on the surface of the CSG result.
    ///
    /// # Panics
    ///
    /// Panics if `csg` is not a CSG node.
    pub fn filter_intersections(&self, csg: ShapeId, xs: &[Intersection]) -> Vec<Intersection> {
        let ShapeKind::Csg(c) = &self.shapes[csg].kind else {
            panic!("shape {csg:?} is not a CSG node");
        };

        let mut inside_left = false;
        let mut inside_right = false;
        xs.iter()
            .filter(|i| {
                let lhit = self.includes(c.left, i.object);
                let keep = c.op.intersection_allowed(lhit, inside_left, inside_right);
                if lhit {
                    inside_left = !inside_left;
                } else {
                    inside_right = !inside_right;
                }
                keep
            })
            .copied()
            .collect()
    }

    /// Convert a world-space point into `id`'s object space, outermost
    /// ancestor first.
    pub fn world_to_object(&self, id: ShapeId, world_point: Tuple) -> Tuple {
        let shape = &self.shapes[id];
        let p = match shape.parent {
            Some(parent) => self.world_to_object(parent, world_point),
            None => world_point,
        };
        shape.transform.inverse() * p
    }

    /// Convert an object-space normal of `id` into a unit world-space normal.
    pub fn normal_to_world(&self, id: ShapeId, normal: Tuple) -> Tuple {
        let shape = &self.shapes[id];
        let n = (shape.transform.inverse_transpose() * normal)
            .to_vector()
            .normalize();
        match shape.parent {
            Some(parent) => self.normal_to_world(parent, n),
            None => n,
        }
    }

    /// Color of `pattern` painted on `id` at a world-space point.
    pub fn pattern_at_shape(&self, pattern: &Pattern, id: ShapeId, world_point: Tuple) -> Color {
        pattern.at_shape(self, id, world_point)
    }

    /// World-space surface normal at `world_point` on primitive `id`.
    ///
    /// # Panics
    ///
    /// Groups and CSG nodes have no surface of their own.
    pub fn normal_at(&self, id: ShapeId, world_point: Tuple, hit: &Intersection) -> Tuple {
        let local_point = self.world_to_object(id, world_point);
        let local_normal = match self.shapes[id].kind.as_primitive() {
            Some(primitive) => primitive.local_normal_at(local_point, hit),
            None => panic!("composite shape {id:?} has no surface normal"),
        };
        self.normal_to_world(id, local_normal)
    }
}

impl Index<ShapeId> for ShapeArena {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        &self.shapes[id]
    }
}
