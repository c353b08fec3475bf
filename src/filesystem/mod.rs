//! In-memory filesystem tree built from files (leaves) and folders
//! (containers).
//!
//! A folder's size is always derived from its children, never stored, so it
//! stays consistent with whatever edits were applied to the tree.

mod demo;
mod node;
mod operations;

pub use demo::{DEMO_ROOT_NAME, create_demo_structure};
pub use node::{Container, Leaf, Node, NodeId};
pub use operations::{
    DeepClone, FolderEntry, deep_clone, enumerate_folders, find_by_path, find_by_path_mut,
    find_node_by_path, total_nodes,
};
