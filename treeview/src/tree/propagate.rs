//! Checked-state propagation over the node arena.
//!
//! Pure functions: the facade decides when to call them and handles
//! lookup failures, no-op conditions, and view invalidation.

use super::item::TriState;
use super::node::{Arena, NodeId};

/// Derived tri-state of a node: a leaf maps its own flag, an internal
/// node folds its children.
pub(crate) fn state_of<T>(arena: &Arena<T>, id: NodeId) -> TriState {
    let node = &arena[id];
    if node.is_leaf() {
        return TriState::from_flag(node.checked);
    }
    fold_children(arena, &node.children)
}

fn fold_children<T>(arena: &Arena<T>, children: &[NodeId]) -> TriState {
    let mut all = true;
    let mut none = true;
    for &child in children {
        match state_of(arena, child) {
            TriState::Checked => none = false,
            TriState::Unchecked => all = false,
            TriState::Indeterminate => {
                all = false;
                none = false;
            }
        }
        if !all && !none {
            return TriState::Indeterminate;
        }
    }
    if all {
        TriState::Checked
    } else {
        TriState::Unchecked
    }
}

/// Apply `value` at `id`, cascade it to every non-disabled descendant, and
/// recompute the stored flag of every ancestor. Returns true if any flag
/// changed.
///
/// A disabled entry node makes the whole call a no-op. Disabled
/// descendants keep their flag but do not block the cascade below them,
/// so a node with mixed disabled/enabled children may legitimately remain
/// indeterminate after being "checked".
pub(crate) fn set_checked<T>(arena: &mut Arena<T>, id: NodeId, value: bool) -> bool {
    if arena[id].disabled {
        return false;
    }
    let mut changed = cascade_down(arena, id, value);
    changed |= recompute_ancestors(arena, id);
    changed
}

fn cascade_down<T>(arena: &mut Arena<T>, id: NodeId, value: bool) -> bool {
    let mut changed = false;
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        let node = &mut arena[current];
        if !node.disabled && node.checked != value {
            node.checked = value;
            changed = true;
        }
        stack.extend(node.children.iter().copied());
    }
    changed
}

/// Walk from the mutated node's parent to the root, storing at each
/// ancestor the boolean approximation of its fold (indeterminate is
/// stored as not-fully-checked; rendering distinguishes the two through
/// [`state_of`], not the stored flag).
fn recompute_ancestors<T>(arena: &mut Arena<T>, id: NodeId) -> bool {
    let mut changed = false;
    let mut current = arena[id].parent;
    while let Some(ancestor) = current {
        let flag = fold_children(arena, &arena[ancestor].children) == TriState::Checked;
        let node = &mut arena[ancestor];
        if node.checked != flag {
            node.checked = flag;
            changed = true;
        }
        current = node.parent;
    }
    changed
}

/// Debug-build consistency sweep: every ancestor of `id` must store a flag
/// matching the fold of its children.
#[cfg(debug_assertions)]
pub(crate) fn ancestors_consistent<T>(arena: &Arena<T>, id: NodeId) -> bool {
    let mut current = arena[id].parent;
    while let Some(ancestor) = current {
        let node = &arena[ancestor];
        if node.checked != (state_of(arena, ancestor) == TriState::Checked) {
            return false;
        }
        current = node.parent;
    }
    true
}
