//! In-memory note tree and structural mutation operations.
//!
//! # Responsibility
//! - Own the arena of live nodes and the ordered root sequence.
//! - Provide add/rename/check/commit/remove with stale-handle detection.
//! - Convert to and from ordered snapshot documents.
//!
//! # Invariants
//! - The tree is finite and acyclic; every non-root node has one parent.
//! - Removing a node discards its entire subtree from the arena.
//! - Sibling order is append order and survives snapshot round-trips.

use crate::model::node::{EditPhase, NodeId, NodeSnapshot, NoteNode};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Result type used by tree mutation operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from tree mutation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Mutation targeted a handle that no longer refers to a live node.
    NodeNotFound(NodeId),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "note node not found: {id}"),
        }
    }
}

impl Error for TreeError {}

/// Save-time handling of checked root nodes.
///
/// The original widget drops a checked root and its whole subtree from the
/// saved document. That behavior is preserved verbatim as the default;
/// `Keep` is the explicit opt-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckedRootPolicy {
    /// Checked roots (and their subtrees) are absent from the document.
    #[default]
    ExcludeSubtree,
    /// Checked roots are written like any other node.
    Keep,
}

/// Hierarchical note model: an arena of nodes plus an ordered root sequence.
///
/// Handles (`NodeId`) stay valid until their node is removed; every
/// operation looks the handle up first, so a stale handle is detected
/// instead of aliasing another node.
#[derive(Debug, Clone, Default)]
pub struct NoteTree {
    nodes: HashMap<NodeId, NoteNode>,
    roots: Vec<NodeId>,
}

impl NoteTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a default draft node to the end of the root sequence.
    pub fn add_root(&mut self) -> NodeId {
        let id = Uuid::new_v4();
        self.nodes.insert(id, NoteNode::new_draft(None));
        self.roots.push(id);
        id
    }

    /// Appends a default draft node under `parent` and marks the parent
    /// expanded (presentation hint, not a model invariant).
    ///
    /// # Errors
    /// - `TreeError::NodeNotFound` when `parent` is no longer live.
    pub fn add_child(&mut self, parent: NodeId) -> TreeResult<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let id = Uuid::new_v4();
        self.nodes.insert(id, NoteNode::new_draft(Some(parent)));
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(TreeError::NodeNotFound(parent))?;
        parent_node.children.push(id);
        parent_node.expanded = true;
        Ok(id)
    }

    /// Sets a node's header text. Empty strings are legal. Idempotent.
    pub fn rename(&mut self, node: NodeId, new_name: impl Into<String>) -> TreeResult<()> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(TreeError::NodeNotFound(node))?;
        entry.name = new_name.into();
        Ok(())
    }

    /// Sets a node's checked marker. Idempotent.
    pub fn set_checked(&mut self, node: NodeId, value: bool) -> TreeResult<()> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(TreeError::NodeNotFound(node))?;
        entry.checked = value;
        Ok(())
    }

    /// Finalizes a node header: sets the name and flips the phase to
    /// `Committed`.
    ///
    /// The UI fires this on Enter and again on focus loss, so committing an
    /// already committed node is a plain rename.
    pub fn commit(&mut self, node: NodeId, header_text: impl Into<String>) -> TreeResult<()> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(TreeError::NodeNotFound(node))?;
        entry.name = header_text.into();
        entry.phase = EditPhase::Committed;
        Ok(())
    }

    /// Detaches `node` and discards its entire subtree.
    ///
    /// Silent no-op when the handle is stale, mirroring the tolerant
    /// removal semantics of the UI.
    pub fn remove(&mut self, node: NodeId) {
        let Some(entry) = self.nodes.get(&node) else {
            return;
        };
        match entry.parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|child| *child != node);
                }
            }
            None => self.roots.retain(|root| *root != node),
        }
        self.discard_subtree(node);
    }

    /// Returns the node record for a live handle.
    pub fn get(&self, node: NodeId) -> Option<&NoteNode> {
        self.nodes.get(&node)
    }

    /// Returns whether the handle refers to a live node.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Ordered root node ids.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Ordered child ids of a node; empty when the handle is stale.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Produces the ordered root snapshot sequence by pre-order traversal.
    ///
    /// Under `CheckedRootPolicy::ExcludeSubtree` a checked root is skipped
    /// together with its whole subtree; non-root nodes are included
    /// regardless of their own checked state.
    ///
    /// Recursion depth is proportional to tree depth; no limit is enforced
    /// at the expected scale of a personal note tree.
    pub fn snapshot(&self, policy: CheckedRootPolicy) -> Vec<NodeSnapshot> {
        self.roots
            .iter()
            .filter(|root| match policy {
                CheckedRootPolicy::ExcludeSubtree => {
                    !self.nodes.get(*root).map(|n| n.checked).unwrap_or(false)
                }
                CheckedRootPolicy::Keep => true,
            })
            .filter_map(|root| self.snapshot_node(*root))
            .collect()
    }

    /// Reconstructs a tree from an ordered snapshot document.
    ///
    /// All reconstructed nodes are `Committed`; an empty document yields an
    /// empty tree.
    pub fn from_snapshots(doc: Vec<NodeSnapshot>) -> Self {
        let mut tree = Self::new();
        for snapshot in doc {
            tree.insert_snapshot(None, snapshot);
        }
        tree
    }

    fn snapshot_node(&self, id: NodeId) -> Option<NodeSnapshot> {
        // Ids reachable from roots/children are kept consistent with the
        // arena by every mutation; a dangling id is simply skipped.
        let node = self.nodes.get(&id)?;
        Some(NodeSnapshot {
            name: node.name.clone(),
            checked: node.checked,
            children: node
                .children
                .iter()
                .filter_map(|child| self.snapshot_node(*child))
                .collect(),
        })
    }

    fn insert_snapshot(&mut self, parent: Option<NodeId>, snapshot: NodeSnapshot) -> NodeId {
        let id = Uuid::new_v4();
        self.nodes
            .insert(id, NoteNode::from_persisted(snapshot.name, snapshot.checked, parent));
        match parent {
            Some(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                    parent_node.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        for child in snapshot.children {
            self.insert_snapshot(Some(id), child);
        }
        id
    }

    fn discard_subtree(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if let Some(entry) = self.nodes.remove(&current) {
                pending.extend(entry.children);
            }
        }
    }
}
