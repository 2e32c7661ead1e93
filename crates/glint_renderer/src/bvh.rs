//! Bounding volume hierarchy construction over arena groups.
//!
//! A group's bounding box is halved along its longest axis; children that
//! fit entirely in one half are moved into a new subgroup for that half.
//! Children straddling the split stay where they are. The process recurses
//! until groups are smaller than the threshold.

use crate::{SceneResult, Shape, ShapeArena, ShapeId, ShapeKind};

/// Children of `group` that fit in the lower and upper half of its
/// bounding box, without changing the arena.
fn split_children(arena: &ShapeArena, group: ShapeId) -> (Vec<ShapeId>, Vec<ShapeId>) {
    let (left_box, right_box) = arena.bounds_of(group).split();
    let mut left = Vec::new();
    let mut right = Vec::new();

    for &child in arena.children(group) {
        let bounds = arena.parent_space_bounds_of(child);
        if left_box.contains_box(&bounds) {
            left.push(child);
        } else if right_box.contains_box(&bounds) {
            right.push(child);
        }
    }
    (left, right)
}

/// Detach the children of `group` that fit in either half of its bounds.
///
/// Returns `(left, right)`. Children that fit neither half stay in the
/// group.
pub fn partition_children(arena: &mut ShapeArena, group: ShapeId) -> (Vec<ShapeId>, Vec<ShapeId>) {
    let (left, right) = split_children(arena, group);
    let moved: Vec<ShapeId> = left.iter().chain(&right).copied().collect();
    arena.remove_children(group, &moved);
    (left, right)
}

/// Wrap `children` in a new group and add it to `group`.
pub fn make_subgroup(
    arena: &mut ShapeArena,
    group: ShapeId,
    children: &[ShapeId],
) -> SceneResult<ShapeId> {
    let subgroup = arena.insert(Shape::group());
    for &child in children {
        arena.add_child(subgroup, child)?;
    }
    arena.add_child(group, subgroup)?;
    Ok(subgroup)
}

/// Recursively subdivide every group under `id` holding at least
/// `threshold` children. CSG operands are divided in place; primitives are
/// left alone.
pub fn divide(arena: &mut ShapeArena, id: ShapeId, threshold: usize) -> SceneResult<()> {
    match arena[id].kind() {
        ShapeKind::Group(g) => {
            let len = g.len();
            if threshold <= len {
                divide_group(arena, id, len)?;
            }
            for child in arena.children(id).to_vec() {
                divide(arena, child, threshold)?;
            }
            Ok(())
        }
        ShapeKind::Csg(c) => {
            let (left, right) = (c.left(), c.right());
            divide(arena, left, threshold)?;
            divide(arena, right, threshold)
        }
        _ => Ok(()),
    }
}

fn divide_group(arena: &mut ShapeArena, group: ShapeId, len: usize) -> SceneResult<()> {
    let (left, right) = split_children(arena, group);

    // Wrapping every child in one subgroup would recurse forever
    if left.len() == len || right.len() == len {
        return Ok(());
    }

    let (left, right) = partition_children(arena, group);
    log::debug!(
        "Splitting group {:?}: {} left, {} right, {} straddling",
        group,
        left.len(),
        right.len(),
        len - left.len() - right.len()
    );

    if !left.is_empty() {
        make_subgroup(arena, group, &left)?;
    }
    if !right.is_empty() {
        make_subgroup(arena, group, &right)?;
    }
    Ok(())
}
