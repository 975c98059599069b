//! Treeview facade state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace};
use slotmap::SecondaryMap;

use crate::config::{CheckedScope, TreeviewConfig};
use crate::error::TreeviewError;

use super::filter::{self, TextFilter};
use super::item::{ItemSpec, TriState};
use super::node::{Arena, NodeId, TreeNode};
use super::propagate;

/// Unique identifier for a Treeview instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeviewId(usize);

impl TreeviewId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__treeview_{}", self.0)
    }
}

/// A visible node in the flattened view.
#[derive(Debug, Clone)]
pub struct FlatNode<T> {
    /// Arena key, usable as a mutation handle.
    pub id: NodeId,
    /// Display text.
    pub label: String,
    /// The host payload.
    pub value: T,
    /// Depth in the tree (0 = root).
    pub depth: u16,
    /// Derived tri-state at the time the view was built.
    pub state: TriState,
    /// Whether this node has children.
    pub has_children: bool,
    /// Whether this node is currently collapsed.
    pub collapsed: bool,
    /// Whether this node is excluded from checked mutations.
    pub disabled: bool,
}

/// The user's selection, split into checked and unchecked values in
/// depth-first discovery order.
#[derive(Debug, Clone)]
pub struct TreeviewSelection<T> {
    pub checked: Vec<T>,
    pub unchecked: Vec<T>,
}

impl<T> Default for TreeviewSelection<T> {
    fn default() -> Self {
        Self {
            checked: Vec::new(),
            unchecked: Vec::new(),
        }
    }
}

/// Internal state for the Treeview facade.
#[derive(Debug)]
struct TreeviewInner<T> {
    /// Node storage; parent links are keys into this arena.
    arena: Arena<T>,
    /// Top-level nodes in insertion order.
    roots: Vec<NodeId>,
    config: TreeviewConfig,
    /// Current filter text, verbatim as supplied.
    filter_text: String,
    /// Transient visibility annotation; `None` means the identity filter.
    visibility: Option<SecondaryMap<NodeId, bool>>,
    /// Cached flattened view (rebuilt lazily after mutations).
    flat: Vec<FlatNode<T>>,
    flat_stale: bool,
}

/// A hierarchical multi-select tree model with cascading tri-state
/// checkboxes, text filtering, and collapse/expand state.
///
/// `Treeview<T>` owns its forest for the lifetime of the instance: nodes
/// are built once from [`ItemSpec`] records and mutated in place, and no
/// node is ever re-parented. Mutations run to completion under one write
/// lock, so readers always observe a fully consistent model. Cloning
/// shares the same underlying state.
#[derive(Debug)]
pub struct Treeview<T: Clone + Send + Sync + 'static> {
    /// Unique identifier.
    id: TreeviewId,
    /// Internal state.
    inner: Arc<RwLock<TreeviewInner<T>>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T: Clone + Send + Sync + 'static> Treeview<T> {
    /// Create an empty treeview with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Vec::new(), TreeviewConfig::default())
    }

    /// Build a treeview from an ordered forest of specs.
    pub fn from_specs(specs: Vec<ItemSpec<T>>) -> Self {
        Self::with_config(specs, TreeviewConfig::default())
    }

    /// Build a treeview from an ordered forest of specs with an explicit
    /// configuration.
    ///
    /// An explicit `checked: true` on a branch spec seeds every descendant
    /// that does not state its own flag. After construction, internal
    /// stored flags are recomputed bottom-up from the leaves so the
    /// tri-state invariant holds before the first query.
    pub fn with_config(specs: Vec<ItemSpec<T>>, config: TreeviewConfig) -> Self {
        let mut arena = Arena::with_key();
        let mut roots = Vec::with_capacity(specs.len());
        for spec in specs {
            roots.push(build_node(&mut arena, spec, None, None));
        }
        if !config.decouple_child_from_parent {
            for &root in &roots {
                normalize(&mut arena, root);
            }
        }
        Self {
            id: TreeviewId::new(),
            inner: Arc::new(RwLock::new(TreeviewInner {
                arena,
                roots,
                config,
                filter_text: String::new(),
                visibility: None,
                flat: Vec::new(),
                flat_stale: true,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TreeviewId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Get the active configuration.
    pub fn config(&self) -> TreeviewConfig {
        self.inner
            .read()
            .map(|g| g.config)
            .unwrap_or_default()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.roots.is_empty())
            .unwrap_or(true)
    }

    /// Check whether a key belongs to this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner
            .read()
            .map(|g| g.arena.contains_key(id))
            .unwrap_or(false)
    }

    /// Find the first node (depth-first, insertion order) whose payload
    /// equals `value`.
    pub fn find_by_value(&self, value: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        let guard = self.inner.read().ok()?;
        for &root in &guard.roots {
            if let Some(found) = find_in(&guard.arena, root, value) {
                return Some(found);
            }
        }
        None
    }

    // -------------------------------------------------------------------------
    // Checked state
    // -------------------------------------------------------------------------

    /// Set the checked flag of a node, cascading to every non-disabled
    /// descendant and recomputing ancestors.
    ///
    /// Returns `Ok(true)` if any flag changed. Addressing a disabled node
    /// is a silent no-op (`Ok(false)`), matching the UI semantics of a
    /// visibly disabled control. An unknown key fails with
    /// [`TreeviewError::NotFound`] without touching state.
    pub fn set_checked(&self, id: NodeId, value: bool) -> Result<bool, TreeviewError> {
        let Ok(mut guard) = self.inner.write() else {
            return Ok(false);
        };
        if !guard.arena.contains_key(id) {
            return Err(TreeviewError::NotFound(id));
        }
        debug!("set_checked {id:?} -> {value}");
        let changed = if guard.config.decouple_child_from_parent {
            let node = &mut guard.arena[id];
            if node.disabled || node.checked == value {
                false
            } else {
                node.checked = value;
                true
            }
        } else {
            propagate::set_checked(&mut guard.arena, id, value)
        };
        #[cfg(debug_assertions)]
        {
            if !guard.config.decouple_child_from_parent {
                assert!(
                    propagate::ancestors_consistent(&guard.arena, id),
                    "tri-state invariant violated after checked mutation"
                );
            }
        }
        if changed {
            guard.flat_stale = true;
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(changed)
    }

    /// Flip a node's checked flag (cascading as [`set_checked`] does).
    ///
    /// [`set_checked`]: Self::set_checked
    pub fn toggle_checked(&self, id: NodeId) -> Result<bool, TreeviewError> {
        let current = {
            let Ok(guard) = self.inner.read() else {
                return Ok(false);
            };
            guard
                .arena
                .get(id)
                .ok_or(TreeviewError::NotFound(id))?
                .checked
        };
        self.set_checked(id, !current)
    }

    /// Derived tri-state of a node.
    pub fn state_of(&self, id: NodeId) -> Result<TriState, TreeviewError> {
        let Ok(guard) = self.inner.read() else {
            return Err(TreeviewError::NotFound(id));
        };
        if !guard.arena.contains_key(id) {
            return Err(TreeviewError::NotFound(id));
        }
        Ok(node_state(
            &guard.arena,
            id,
            guard.config.decouple_child_from_parent,
        ))
    }

    /// Check every non-disabled root (the cascade handles the rest).
    pub fn select_all(&self) -> bool {
        self.set_all(true)
    }

    /// Uncheck every non-disabled root.
    pub fn unselect_all(&self) -> bool {
        self.set_all(false)
    }

    fn set_all(&self, value: bool) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        debug!("set_all -> {value}");
        let mut changed = false;
        if guard.config.decouple_child_from_parent {
            for node in guard.arena.values_mut() {
                if !node.disabled && node.checked != value {
                    node.checked = value;
                    changed = true;
                }
            }
        } else {
            let roots = guard.roots.clone();
            for root in roots {
                if !guard.arena[root].disabled {
                    changed |= propagate::set_checked(&mut guard.arena, root, value);
                }
            }
        }
        if changed {
            guard.flat_stale = true;
            self.dirty.store(true, Ordering::SeqCst);
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Collapse / expand
    // -------------------------------------------------------------------------

    /// Set a node's collapsed flag. Pure state flip, no propagation.
    ///
    /// Collapsing a leaf or re-applying the current value is `Ok(false)`.
    pub fn set_collapsed(&self, id: NodeId, value: bool) -> Result<bool, TreeviewError> {
        let Ok(mut guard) = self.inner.write() else {
            return Ok(false);
        };
        let node = guard.arena.get_mut(id).ok_or(TreeviewError::NotFound(id))?;
        if node.is_leaf() || node.collapsed == value {
            return Ok(false);
        }
        trace!("set_collapsed {id:?} -> {value}");
        node.collapsed = value;
        guard.flat_stale = true;
        self.dirty.store(true, Ordering::SeqCst);
        Ok(true)
    }

    /// Flip a node's collapsed flag. Leaves are a silent no-op.
    pub fn toggle_collapsed(&self, id: NodeId) -> Result<bool, TreeviewError> {
        let current = {
            let Ok(guard) = self.inner.read() else {
                return Ok(false);
            };
            guard
                .arena
                .get(id)
                .ok_or(TreeviewError::NotFound(id))?
                .collapsed
        };
        self.set_collapsed(id, !current)
    }

    /// Expand every collapsible node.
    pub fn expand_all(&self) {
        self.collapse_all_to(false);
    }

    /// Collapse every collapsible node.
    pub fn collapse_all(&self) {
        self.collapse_all_to(true);
    }

    fn collapse_all_to(&self, value: bool) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let mut changed = false;
        for node in guard.arena.values_mut() {
            if !node.is_leaf() && node.collapsed != value {
                node.collapsed = value;
                changed = true;
            }
        }
        if changed {
            guard.flat_stale = true;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Set the filter text and recompute visibility.
    ///
    /// Text that trims to nothing restores the identity filter. While the
    /// filter is non-empty the flattened view ignores collapsed flags so
    /// every match stays reachable; clearing the filter restores the
    /// collapse state untouched. Re-applying the current text is a no-op.
    pub fn set_filter(&self, text: impl Into<String>) {
        let text = text.into();
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.filter_text == text {
            return;
        }
        debug!("set_filter {:?} -> {:?}", guard.filter_text, text);
        let inner = &mut *guard;
        inner.filter_text = text;
        inner.visibility = TextFilter::compile(&inner.filter_text, inner.config.filter_mode)
            .map(|f| filter::compute_visibility(&inner.arena, &inner.roots, &f));
        inner.flat_stale = true;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// The current filter text, verbatim.
    pub fn filter_text(&self) -> String {
        self.inner
            .read()
            .map(|g| g.filter_text.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Flattened view
    // -------------------------------------------------------------------------

    /// The flattened, filtered, state-annotated view: depth-first,
    /// pre-order, child-insertion order. Subtrees under a collapsed node
    /// are excluded unless a filter is active; invisible nodes are
    /// excluded while one is.
    pub fn flattened(&self) -> Vec<FlatNode<T>> {
        let Ok(mut guard) = self.inner.write() else {
            return Vec::new();
        };
        if guard.flat_stale {
            rebuild_flat(&mut guard);
        }
        guard.flat.clone()
    }

    /// Number of nodes in the flattened view.
    pub fn visible_len(&self) -> usize {
        let Ok(mut guard) = self.inner.write() else {
            return 0;
        };
        if guard.flat_stale {
            rebuild_flat(&mut guard);
        }
        guard.flat.len()
    }

    /// Get a flattened node by index.
    pub fn visible_node(&self, index: usize) -> Option<FlatNode<T>> {
        let Ok(mut guard) = self.inner.write() else {
            return None;
        };
        if guard.flat_stale {
            rebuild_flat(&mut guard);
        }
        guard.flat.get(index).cloned()
    }

    // -------------------------------------------------------------------------
    // Selection queries
    // -------------------------------------------------------------------------

    /// Values of checked nodes in depth-first discovery order: leaves by
    /// default, internal nodes too under [`CheckedScope::All`], every node
    /// independently when decoupled.
    pub fn checked_values(&self) -> Vec<T> {
        self.selection().checked
    }

    /// The full selection result, partitioned into checked and unchecked
    /// values.
    pub fn selection(&self) -> TreeviewSelection<T> {
        let Ok(guard) = self.inner.read() else {
            return TreeviewSelection::default();
        };
        let mut selection = TreeviewSelection::default();
        for &root in &guard.roots {
            collect_selection(&guard.arena, root, &guard.config, &mut selection);
        }
        selection
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the model has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for Treeview<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Treeview<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Construction helpers
// =============================================================================

fn build_node<T>(
    arena: &mut Arena<T>,
    spec: ItemSpec<T>,
    parent: Option<NodeId>,
    inherited: Option<bool>,
) -> NodeId {
    let own = spec.checked.or(inherited);
    let id = arena.insert(TreeNode {
        label: spec.label,
        value: spec.value,
        checked: own.unwrap_or(false),
        collapsed: spec.collapsed,
        disabled: spec.disabled,
        parent,
        children: Vec::new(),
    });
    let children: Vec<NodeId> = spec
        .children
        .into_iter()
        .map(|child| build_node(arena, child, Some(id), own))
        .collect();
    arena[id].children = children;
    id
}

/// Bottom-up recompute of internal stored flags so the tri-state invariant
/// holds before the first query. Leaves are the source of truth.
fn normalize<T>(arena: &mut Arena<T>, id: NodeId) {
    let children = arena[id].children.clone();
    if children.is_empty() {
        return;
    }
    for &child in &children {
        normalize(arena, child);
    }
    let state = propagate::state_of(arena, id);
    arena[id].checked = state == TriState::Checked;
}

// =============================================================================
// Query helpers
// =============================================================================

fn node_state<T>(arena: &Arena<T>, id: NodeId, decoupled: bool) -> TriState {
    if decoupled {
        TriState::from_flag(arena[id].checked)
    } else {
        propagate::state_of(arena, id)
    }
}

fn find_in<T: PartialEq>(arena: &Arena<T>, id: NodeId, value: &T) -> Option<NodeId> {
    let node = &arena[id];
    if node.value == *value {
        return Some(id);
    }
    for &child in &node.children {
        if let Some(found) = find_in(arena, child, value) {
            return Some(found);
        }
    }
    None
}

fn collect_selection<T: Clone>(
    arena: &Arena<T>,
    id: NodeId,
    config: &TreeviewConfig,
    out: &mut TreeviewSelection<T>,
) {
    let node = &arena[id];
    let decoupled = config.decouple_child_from_parent;
    let eligible = node.is_leaf() || decoupled || config.checked_scope == CheckedScope::All;
    if eligible {
        if node_state(arena, id, decoupled) == TriState::Checked {
            out.checked.push(node.value.clone());
        } else {
            out.unchecked.push(node.value.clone());
        }
    }
    for &child in &node.children {
        collect_selection(arena, child, config, out);
    }
}

// =============================================================================
// Flattening
// =============================================================================

fn rebuild_flat<T: Clone>(inner: &mut TreeviewInner<T>) {
    let filtering = inner.visibility.is_some();
    let decoupled = inner.config.decouple_child_from_parent;
    let TreeviewInner {
        arena,
        roots,
        visibility,
        flat,
        flat_stale,
        ..
    } = inner;
    flat.clear();
    for &root in roots.iter() {
        collect_flat(arena, visibility.as_ref(), root, 0, filtering, decoupled, flat);
    }
    *flat_stale = false;
}

fn collect_flat<T: Clone>(
    arena: &Arena<T>,
    visibility: Option<&SecondaryMap<NodeId, bool>>,
    id: NodeId,
    depth: u16,
    filtering: bool,
    decoupled: bool,
    out: &mut Vec<FlatNode<T>>,
) {
    // An invisible node has no visible descendants, so the whole subtree
    // can be pruned here.
    if let Some(vis) = visibility
        && !vis.get(id).copied().unwrap_or(false)
    {
        return;
    }
    let node = &arena[id];
    out.push(FlatNode {
        id,
        label: node.label.clone(),
        value: node.value.clone(),
        depth,
        state: node_state(arena, id, decoupled),
        has_children: !node.children.is_empty(),
        collapsed: node.collapsed,
        disabled: node.disabled,
    });
    // An active filter overrides collapse so matches stay reachable.
    if filtering || !node.collapsed {
        for &child in &node.children {
            collect_flat(arena, visibility, child, depth + 1, filtering, decoupled, out);
        }
    }
}
