//! Note node record and persisted snapshot shape.
//!
//! # Responsibility
//! - Define the single domain entity (`NoteNode`) and its editing lifecycle.
//! - Define the JSON snapshot shape shared with documents written by the
//!   original desktop widget.
//!
//! # Invariants
//! - `name` is never null; the empty string is legal.
//! - `checked` defaults to `false` for nodes synthesized without data.
//! - Snapshot field names stay PascalCase for document compatibility.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a live tree node.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NodeId = Uuid;

/// Header text given to freshly created nodes.
pub const DEFAULT_NODE_NAME: &str = "New Item";

/// Editing lifecycle of a node header.
///
/// The desktop widget swapped an edit box for a label on commit; here the
/// same transition is node-local state with an explicit commit signal
/// (Enter or focus loss in the UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// Header text is still being typed.
    Editing,
    /// Header text has been finalized.
    Committed,
}

/// One live entry of the note tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteNode {
    /// User-facing header text.
    pub name: String,
    /// "Resolved/archived" marker. On save, a checked root discards its
    /// whole subtree from the document under the default policy.
    pub checked: bool,
    /// Presentation hint set when a child is added under this node.
    pub expanded: bool,
    /// Header editing lifecycle state.
    pub phase: EditPhase,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NoteNode {
    /// Creates a default node in `Editing` phase, as the UI does for a
    /// freshly added item.
    pub(crate) fn new_draft(parent: Option<NodeId>) -> Self {
        Self {
            name: DEFAULT_NODE_NAME.to_string(),
            checked: false,
            expanded: false,
            phase: EditPhase::Editing,
            parent,
            children: Vec::new(),
        }
    }

    /// Creates a committed node from persisted data.
    pub(crate) fn from_persisted(name: String, checked: bool, parent: Option<NodeId>) -> Self {
        Self {
            name,
            checked,
            expanded: false,
            phase: EditPhase::Committed,
            parent,
            children: Vec::new(),
        }
    }

    /// Ordered child ids of this node.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent id, `None` for root nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Persisted form of one node, matching the original document schema.
///
/// Unknown extra fields are ignored on read; `IsChecked` and `Children`
/// default when absent so partial documents still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Header text.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Checked marker. A malformed value loads as unchecked instead of
    /// failing the whole document.
    #[serde(rename = "IsChecked", default, deserialize_with = "lenient_bool")]
    pub checked: bool,
    /// Ordered child snapshots.
    #[serde(rename = "Children", default)]
    pub children: Vec<NodeSnapshot>,
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

impl NodeSnapshot {
    /// Creates a leaf snapshot, mostly useful in tests and fixtures.
    pub fn leaf(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EditPhase, NodeSnapshot, NoteNode, DEFAULT_NODE_NAME};

    #[test]
    fn draft_node_starts_editing_with_default_name() {
        let node = NoteNode::new_draft(None);
        assert_eq!(node.name, DEFAULT_NODE_NAME);
        assert!(!node.checked);
        assert!(!node.expanded);
        assert_eq!(node.phase, EditPhase::Editing);
    }

    #[test]
    fn snapshot_defaults_missing_fields() {
        let snap: NodeSnapshot = serde_json::from_str(r#"{"Name":"Groceries"}"#).unwrap();
        assert_eq!(snap.name, "Groceries");
        assert!(!snap.checked);
        assert!(snap.children.is_empty());
    }

    #[test]
    fn snapshot_defaults_malformed_checked_flag() {
        let snap: NodeSnapshot =
            serde_json::from_str(r#"{"Name":"x","IsChecked":"yes"}"#).unwrap();
        assert!(!snap.checked);
    }

    #[test]
    fn snapshot_ignores_unknown_fields() {
        let snap: NodeSnapshot =
            serde_json::from_str(r#"{"Name":"x","IsChecked":true,"Color":"red"}"#).unwrap();
        assert_eq!(snap.name, "x");
        assert!(snap.checked);
    }

    #[test]
    fn snapshot_uses_pascal_case_field_names() {
        let raw = serde_json::to_string(&NodeSnapshot::leaf("a", false)).unwrap();
        assert!(raw.contains("\"Name\""));
        assert!(raw.contains("\"IsChecked\""));
        assert!(raw.contains("\"Children\""));
    }
}
