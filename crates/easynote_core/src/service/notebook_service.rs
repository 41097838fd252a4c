//! Notebook use-case service.
//!
//! # Responsibility
//! - Expose the operation surface the presentation layer is permitted to
//!   call: add root, add child, rename, check, remove, exit-and-persist.
//! - Own the startup load and the shutdown save.
//!
//! # Invariants
//! - All mutations are serialized onto the single logical thread owning
//!   this service; nothing here runs concurrently with a save or load.
//! - A corrupt document at startup is quarantined, never overwritten.

use crate::model::node::NodeId;
use crate::model::tree::{NoteTree, TreeError};
use crate::store::{StoreError, TreeStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from notebook service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Mutation targeted a stale node handle.
    Tree(TreeError),
    /// Persistence failure during startup load or shutdown save.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tree(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TreeError> for ServiceError {
    fn from(value: TreeError) -> Self {
        Self::Tree(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Notebook facade owning the live tree and its store.
#[derive(Debug)]
pub struct NotebookService {
    tree: NoteTree,
    store: TreeStore,
}

impl NotebookService {
    /// Opens the notebook by loading the persisted document.
    ///
    /// A missing document yields an empty notebook. A corrupt document is
    /// set aside under a `.corrupt` sibling name and the notebook starts
    /// empty; the error is still surfaced so the UI can inform the user.
    ///
    /// # Errors
    /// - `ServiceError::Store` when the document cannot be read, or when it
    ///   is corrupt and quarantining it also fails.
    pub fn open(store: TreeStore) -> Result<Self, ServiceError> {
        match store.load() {
            Ok(tree) => {
                info!(
                    "event=notebook_open module=service status=ok nodes={}",
                    tree.len()
                );
                Ok(Self { tree, store })
            }
            Err(err) if err.is_corrupt() => {
                let quarantine_path = store.quarantine()?;
                warn!(
                    "event=notebook_open module=service status=corrupt moved_to={}",
                    quarantine_path.display()
                );
                Err(ServiceError::Store(err))
            }
            Err(err) => Err(ServiceError::Store(err)),
        }
    }

    /// Opens an empty notebook over `store` without touching the document.
    ///
    /// Used after a corrupt document has been quarantined, and by tests.
    pub fn empty(store: TreeStore) -> Self {
        Self {
            tree: NoteTree::new(),
            store,
        }
    }

    /// Appends a new draft note at root level.
    pub fn add_root_note(&mut self) -> NodeId {
        self.tree.add_root()
    }

    /// Appends a new draft note under `parent`.
    ///
    /// # Errors
    /// - `ServiceError::Tree` when the parent handle is stale.
    pub fn add_child_note(&mut self, parent: NodeId) -> Result<NodeId, ServiceError> {
        self.tree.add_child(parent).map_err(Into::into)
    }

    /// Removes a note and its subtree. No-op for a stale handle.
    pub fn remove_note(&mut self, node: NodeId) {
        self.tree.remove(node);
    }

    /// Renames a note.
    ///
    /// # Errors
    /// - `ServiceError::Tree` when the handle is stale.
    pub fn rename_note(
        &mut self,
        node: NodeId,
        text: impl Into<String>,
    ) -> Result<(), ServiceError> {
        self.tree.rename(node, text).map_err(Into::into)
    }

    /// Finalizes a note header (Enter / focus loss in the UI).
    ///
    /// # Errors
    /// - `ServiceError::Tree` when the handle is stale.
    pub fn commit_note(
        &mut self,
        node: NodeId,
        text: impl Into<String>,
    ) -> Result<(), ServiceError> {
        self.tree.commit(node, text).map_err(Into::into)
    }

    /// Sets a note's checked marker.
    ///
    /// # Errors
    /// - `ServiceError::Tree` when the handle is stale.
    pub fn set_checked(&mut self, node: NodeId, value: bool) -> Result<(), ServiceError> {
        self.tree.set_checked(node, value).map_err(Into::into)
    }

    /// Saves the notebook for orderly shutdown.
    ///
    /// The in-memory tree is untouched on failure, so the caller may retry
    /// or prompt before terminating.
    ///
    /// # Errors
    /// - `ServiceError::Store` on any persistence failure.
    pub fn exit_and_persist(&self) -> Result<(), ServiceError> {
        self.store.save(&self.tree)?;
        info!(
            "event=notebook_exit module=service status=ok nodes={}",
            self.tree.len()
        );
        Ok(())
    }

    /// Read access to the live tree for presentation.
    pub fn tree(&self) -> &NoteTree {
        &self.tree
    }

    /// Configured store, mostly useful for diagnostics.
    pub fn store(&self) -> &TreeStore {
        &self.store
    }
}
