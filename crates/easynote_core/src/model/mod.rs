//! Note tree domain model.
//!
//! # Responsibility
//! - Define the canonical node record and its persisted snapshot shape.
//! - Own the in-memory tree structure and all structural mutations.
//!
//! # Invariants
//! - Every live node is identified by a stable `NodeId`.
//! - Sibling order is preserved through every mutation, save, and load.

pub mod node;
pub mod tree;
