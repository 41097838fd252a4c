//! Core domain logic for EasyNote.
//! This crate is the single source of truth for note tree invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::node::{EditPhase, NodeId, NodeSnapshot, NoteNode, DEFAULT_NODE_NAME};
pub use model::tree::{CheckedRootPolicy, NoteTree, TreeError, TreeResult};
pub use service::notebook_service::{NotebookService, ServiceError};
pub use store::{StoreError, StoreResult, TreeStore, DEFAULT_STORE_FILE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
