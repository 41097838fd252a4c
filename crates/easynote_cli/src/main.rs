//! CLI probe entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to inspect a note document without the
//!   desktop widget: loads the store and prints the tree indented.
//! - Keep output deterministic for quick local sanity checks.

use easynote_core::{NodeId, NoteTree, TreeStore, DEFAULT_STORE_FILE};
use std::process::ExitCode;

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());

    let store = TreeStore::new(&path);
    let tree = match store.load() {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("easynote: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("easynote_core version={}", easynote_core::core_version());
    println!("document={path} nodes={}", tree.len());
    for root in tree.roots() {
        print_subtree(&tree, *root, 0);
    }
    ExitCode::SUCCESS
}

fn print_subtree(tree: &NoteTree, node: NodeId, depth: usize) {
    if let Some(entry) = tree.get(node) {
        let marker = if entry.checked { "[x]" } else { "[ ]" };
        println!("{:indent$}{marker} {}", "", entry.name, indent = depth * 2);
        for child in entry.children() {
            print_subtree(tree, *child, depth + 1);
        }
    }
}
