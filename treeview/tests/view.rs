//! Flattened view ordering, collapse/expand, and selection queries.

use treeview::prelude::*;

fn spec(label: &str) -> ItemSpec<String> {
    ItemSpec::new(label, label.to_string())
}

fn id_of(tree: &Treeview<String>, value: &str) -> NodeId {
    tree.find_by_value(&value.to_string()).unwrap()
}

fn sample_tree() -> Treeview<String> {
    Treeview::from_specs(vec![
        spec("A").child(spec("A1")).child(spec("A2").child(spec("A2a"))),
        spec("B"),
    ])
}

#[test]
fn test_flattened_is_preorder_in_insertion_order() {
    let tree = sample_tree();
    let flat = tree.flattened();
    let labels: Vec<&str> = flat.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "A1", "A2", "A2a", "B"]);
    let depths: Vec<u16> = flat.iter().map(|n| n.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 0]);
}

#[test]
fn test_flat_nodes_carry_structure_flags() {
    let tree = sample_tree();
    let flat = tree.flattened();
    assert!(flat[0].has_children);
    assert!(!flat[1].has_children);
    assert!(!flat[0].collapsed);
    assert!(!flat[0].disabled);
}

#[test]
fn test_collapse_hides_subtree_but_not_state() {
    let tree = sample_tree();
    tree.set_checked(id_of(&tree, "A2a"), true).unwrap();
    tree.set_collapsed(id_of(&tree, "A"), true).unwrap();

    let labels: Vec<String> = tree.flattened().into_iter().map(|n| n.label).collect();
    assert_eq!(labels, vec!["A", "B"]);
    // Collapse affects display only; the checked query still sees A2a.
    assert_eq!(tree.checked_values(), vec!["A2a".to_string()]);
}

#[test]
fn test_collapsing_a_leaf_is_noop() {
    let tree = sample_tree();
    assert_eq!(tree.set_collapsed(id_of(&tree, "B"), true), Ok(false));
    assert_eq!(tree.toggle_collapsed(id_of(&tree, "B")), Ok(false));
    assert_eq!(tree.visible_len(), 5);
}

#[test]
fn test_toggle_collapsed_round_trip() {
    let tree = sample_tree();
    let a2 = id_of(&tree, "A2");
    assert_eq!(tree.toggle_collapsed(a2), Ok(true));
    assert_eq!(tree.visible_len(), 4);
    assert_eq!(tree.toggle_collapsed(a2), Ok(true));
    assert_eq!(tree.visible_len(), 5);
}

#[test]
fn test_collapse_all_and_expand_all() {
    let tree = sample_tree();
    tree.collapse_all();
    let labels: Vec<String> = tree.flattened().into_iter().map(|n| n.label).collect();
    assert_eq!(labels, vec!["A", "B"]);
    tree.expand_all();
    assert_eq!(tree.visible_len(), 5);
}

#[test]
fn test_visible_node_indexing() {
    let tree = sample_tree();
    assert_eq!(tree.visible_node(1).unwrap().label, "A1");
    assert!(tree.visible_node(99).is_none());
}

#[test]
fn test_checked_values_are_leaves_in_discovery_order() {
    let tree = sample_tree();
    tree.set_checked(id_of(&tree, "A"), true).unwrap();
    // A is internal: only its leaves report under the default scope.
    assert_eq!(
        tree.checked_values(),
        vec!["A1".to_string(), "A2a".to_string()]
    );
}

#[test]
fn test_checked_scope_all_includes_internal_nodes() {
    let config = TreeviewConfig {
        checked_scope: CheckedScope::All,
        ..Default::default()
    };
    let tree = Treeview::with_config(
        vec![spec("A").child(spec("A1")).child(spec("A2").child(spec("A2a"))), spec("B")],
        config,
    );
    tree.set_checked(id_of(&tree, "A"), true).unwrap();
    assert_eq!(
        tree.checked_values(),
        vec![
            "A".to_string(),
            "A1".to_string(),
            "A2".to_string(),
            "A2a".to_string()
        ]
    );
}

#[test]
fn test_selection_partitions_checked_and_unchecked() {
    let tree = sample_tree();
    tree.set_checked(id_of(&tree, "A1"), true).unwrap();
    let selection = tree.selection();
    assert_eq!(selection.checked, vec!["A1".to_string()]);
    assert_eq!(
        selection.unchecked,
        vec!["A2a".to_string(), "B".to_string()]
    );
}

#[test]
fn test_select_all_and_unselect_all() {
    let tree = Treeview::from_specs(vec![
        spec("A").child(spec("A1")),
        spec("B").disabled(true),
        spec("C"),
    ]);
    assert!(tree.select_all());
    // The disabled root is untouched by select-all.
    assert_eq!(
        tree.checked_values(),
        vec!["A1".to_string(), "C".to_string()]
    );
    assert!(tree.unselect_all());
    assert!(tree.checked_values().is_empty());
    // Nothing left to change.
    assert!(!tree.unselect_all());
}

#[test]
fn test_dirty_flag_handshake() {
    let tree = sample_tree();
    assert!(!tree.is_dirty());
    tree.set_checked(id_of(&tree, "A1"), true).unwrap();
    assert!(tree.is_dirty());
    tree.clear_dirty();
    // A no-op mutation does not re-dirty.
    tree.set_checked(id_of(&tree, "A1"), true).unwrap();
    assert!(!tree.is_dirty());
}

#[test]
fn test_clones_share_state() {
    let tree = sample_tree();
    let handle = tree.clone();
    handle.set_checked(id_of(&handle, "B"), true).unwrap();
    assert_eq!(tree.checked_values(), vec!["B".to_string()]);
    assert_eq!(tree.id(), handle.id());
}

#[test]
fn test_find_by_value_and_contains() {
    let tree = sample_tree();
    let a2a = tree.find_by_value(&"A2a".to_string()).unwrap();
    assert!(tree.contains(a2a));
    assert!(tree.find_by_value(&"missing".to_string()).is_none());
    assert!(!tree.contains(NodeId::default()));
}

#[test]
fn test_empty_tree() {
    let tree: Treeview<u32> = Treeview::new();
    assert!(tree.is_empty());
    assert!(tree.flattened().is_empty());
    assert!(tree.checked_values().is_empty());
    assert!(!tree.select_all());
}
