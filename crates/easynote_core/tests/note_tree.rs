use easynote_core::{CheckedRootPolicy, EditPhase, NoteTree, TreeError, DEFAULT_NODE_NAME};
use uuid::Uuid;

#[test]
fn add_root_appends_in_order() {
    let mut tree = NoteTree::new();
    let first = tree.add_root();
    let second = tree.add_root();
    let third = tree.add_root();

    assert_eq!(tree.roots(), &[first, second, third]);
    assert_eq!(tree.len(), 3);
    let node = tree.get(first).unwrap();
    assert_eq!(node.name, DEFAULT_NODE_NAME);
    assert!(!node.checked);
    assert_eq!(node.phase, EditPhase::Editing);
}

#[test]
fn add_child_appends_and_marks_parent_expanded() {
    let mut tree = NoteTree::new();
    let parent = tree.add_root();
    assert!(!tree.get(parent).unwrap().expanded);

    let child_a = tree.add_child(parent).unwrap();
    let child_b = tree.add_child(parent).unwrap();

    assert_eq!(tree.children(parent), &[child_a, child_b]);
    assert!(tree.get(parent).unwrap().expanded);
    assert_eq!(tree.get(child_a).unwrap().parent(), Some(parent));
}

#[test]
fn add_child_rejects_stale_parent() {
    let mut tree = NoteTree::new();
    let unknown = Uuid::new_v4();

    let err = tree.add_child(unknown).unwrap_err();
    assert!(matches!(err, TreeError::NodeNotFound(id) if id == unknown));
    assert!(tree.is_empty());
}

#[test]
fn rename_allows_empty_string() {
    let mut tree = NoteTree::new();
    let node = tree.add_root();

    tree.rename(node, "Work").unwrap();
    assert_eq!(tree.get(node).unwrap().name, "Work");

    tree.rename(node, "").unwrap();
    assert_eq!(tree.get(node).unwrap().name, "");
}

#[test]
fn rename_rejects_stale_handle() {
    let mut tree = NoteTree::new();
    let node = tree.add_root();
    tree.remove(node);

    let err = tree.rename(node, "gone").unwrap_err();
    assert!(matches!(err, TreeError::NodeNotFound(id) if id == node));
}

#[test]
fn set_checked_is_idempotent() {
    let mut tree = NoteTree::new();
    let node = tree.add_root();

    tree.set_checked(node, true).unwrap();
    let after_first = tree.get(node).unwrap().clone();
    tree.set_checked(node, true).unwrap();
    assert_eq!(tree.get(node).unwrap(), &after_first);

    tree.set_checked(node, false).unwrap();
    assert!(!tree.get(node).unwrap().checked);
}

#[test]
fn commit_finalizes_header_and_tolerates_repeat() {
    let mut tree = NoteTree::new();
    let node = tree.add_root();
    assert_eq!(tree.get(node).unwrap().phase, EditPhase::Editing);

    // Enter commits; the following focus-loss commits again with the same
    // text, as the desktop widget does.
    tree.commit(node, "Groceries").unwrap();
    assert_eq!(tree.get(node).unwrap().phase, EditPhase::Committed);
    assert_eq!(tree.get(node).unwrap().name, "Groceries");

    tree.commit(node, "Groceries").unwrap();
    assert_eq!(tree.get(node).unwrap().name, "Groceries");
}

#[test]
fn remove_discards_whole_subtree() {
    let mut tree = NoteTree::new();
    let keep = tree.add_root();
    let doomed = tree.add_root();
    let child = tree.add_child(doomed).unwrap();
    let grandchild = tree.add_child(child).unwrap();

    tree.remove(doomed);

    assert_eq!(tree.roots(), &[keep]);
    assert!(!tree.contains(doomed));
    assert!(!tree.contains(child));
    assert!(!tree.contains(grandchild));
    assert_eq!(tree.len(), 1);
}

#[test]
fn remove_of_stale_handle_is_a_no_op() {
    let mut tree = NoteTree::new();
    let a = tree.add_root();
    let b = tree.add_root();
    let before = tree.snapshot(CheckedRootPolicy::Keep);

    tree.remove(Uuid::new_v4());

    assert_eq!(tree.roots(), &[a, b]);
    assert_eq!(tree.snapshot(CheckedRootPolicy::Keep), before);
}

#[test]
fn remove_preserves_sibling_order() {
    let mut tree = NoteTree::new();
    let parent = tree.add_root();
    let a = tree.add_child(parent).unwrap();
    let b = tree.add_child(parent).unwrap();
    let c = tree.add_child(parent).unwrap();

    tree.remove(b);

    assert_eq!(tree.children(parent), &[a, c]);
}

#[test]
fn children_of_stale_handle_is_empty() {
    let tree = NoteTree::new();
    assert!(tree.children(Uuid::new_v4()).is_empty());
}
