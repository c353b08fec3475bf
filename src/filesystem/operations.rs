//! Whole-tree helpers that need more context than a single node has:
//! structural copies, path-qualified folder enumeration and path lookups.
//!
//! Paths are the `/`-joined names from the root down to the target,
//! inclusive, so the root's own path is just its name. When siblings share a
//! name, lookups resolve to the first one in insertion order and the later
//! ones are unreachable by path, although they are still part of the tree.

use crate::filesystem::{Container, Leaf, Node};

const PATH_SEPARATOR: char = '/';

/// Structural copy with fresh identities.
///
/// The copy shares no node with the source, so either side can be mutated
/// without the other noticing.
pub trait DeepClone {
    fn deep_clone(&self) -> Self;
}

impl DeepClone for Leaf {
    fn deep_clone(&self) -> Self {
        Leaf::new(self.name(), self.size())
    }
}

impl DeepClone for Container {
    fn deep_clone(&self) -> Self {
        let mut copy = Container::new(self.name());
        for child in self.children() {
            copy.add(child.deep_clone());
        }
        copy
    }
}

impl DeepClone for Node {
    fn deep_clone(&self) -> Self {
        match self {
            Node::Leaf(leaf) => Node::Leaf(leaf.deep_clone()),
            Node::Container(container) => Node::Container(container.deep_clone()),
        }
    }
}

pub fn deep_clone<T: DeepClone>(node: &T) -> T {
    node.deep_clone()
}

/// A folder reachable from the root together with its path.
#[derive(Debug, Clone)]
pub struct FolderEntry<'a> {
    pub folder: &'a Container,
    pub path: String,
}

/// Every folder of the tree, depth-first pre-order, children in insertion
/// order. The root always comes first, leaves never appear.
pub fn enumerate_folders(root: &Container) -> Vec<FolderEntry<'_>> {
    let mut folders = Vec::new();
    collect_folders(root, root.name().to_string(), &mut folders);
    folders
}

fn collect_folders<'a>(folder: &'a Container, path: String, folders: &mut Vec<FolderEntry<'a>>) {
    let children = folder
        .children()
        .iter()
        .filter_map(Node::as_container)
        .map(|child| (child, format!("{path}{PATH_SEPARATOR}{}", child.name())))
        .collect::<Vec<_>>();

    folders.push(FolderEntry { folder, path });

    for (child, child_path) in children {
        collect_folders(child, child_path, folders);
    }
}

/// Resolves a folder path, `None` when any segment has no matching folder.
///
/// The first segment has to be the root's own name.
pub fn find_by_path<'a>(root: &'a Container, path: &str) -> Option<&'a Container> {
    if path == root.name() {
        return Some(root);
    }

    let mut segments = path.split(PATH_SEPARATOR);
    if segments.next()? != root.name() {
        return None;
    }
    segments.try_fold(root, |current, segment| child_folder(current, segment))
}

/// Mutable counterpart of [`find_by_path`], with the same first-match rule.
pub fn find_by_path_mut<'a>(root: &'a mut Container, path: &str) -> Option<&'a mut Container> {
    if path == root.name() {
        return Some(root);
    }

    let mut segments = path.split(PATH_SEPARATOR);
    if segments.next()? != root.name() {
        return None;
    }
    segments.try_fold(root, |current, segment| {
        current
            .children_mut()
            .filter_map(Node::as_container_mut)
            .find(|child| child.name() == segment)
    })
}

/// Like [`find_by_path`], but the last segment may also name a file.
pub fn find_node_by_path<'a>(root: &'a Container, path: &str) -> Option<&'a Node> {
    let (parent_path, name) = path.rsplit_once(PATH_SEPARATOR)?;
    let parent = find_by_path(root, parent_path)?;
    parent.children().iter().find(|child| child.name() == name)
}

/// Number of nodes below `root`, not counting `root` itself.
pub fn total_nodes(root: &Container) -> usize {
    root.children()
        .iter()
        .map(|child| match child {
            Node::Leaf(_) => 1,
            Node::Container(container) => 1 + total_nodes(container),
        })
        .sum()
}

fn child_folder<'a>(folder: &'a Container, name: &str) -> Option<&'a Container> {
    folder
        .children()
        .iter()
        .filter_map(Node::as_container)
        .find(|child| child.name() == name)
}
