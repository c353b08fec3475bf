use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use derive_more::{Display, From, IsVariant};

const INDENT: &str = "  ";

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a node, unique for the lifetime of the process.
///
/// Two nodes with the same name and size are still distinct nodes; removal
/// and lookup-by-identity go through this id rather than through names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A file: fixed size, no children.
#[derive(Debug)]
pub struct Leaf {
    id: NodeId,
    name: String,
    size: u64,
}

impl Leaf {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Leaf {
            id: NodeId::next(),
            name: name.into(),
            size,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn display(&self, indent: usize) -> String {
        format!("{}{} ({} KB)", INDENT.repeat(indent), self.name, self.size)
    }
}

/// A folder: an ordered sequence of children whose sizes it aggregates.
#[derive(Debug)]
pub struct Container {
    id: NodeId,
    name: String,
    children: Vec<Node>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Container {
            id: NodeId::next(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sum of the children's sizes, recomputed on every call.
    pub fn size(&self) -> u64 {
        self.children.iter().map(Node::size).sum()
    }

    /// Appends `node` after the existing children.
    ///
    /// Names are not checked for uniqueness; siblings may share a name.
    pub fn add(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Detaches the first child with the given identity.
    ///
    /// Returns the detached subtree, or `None` when no child carries `id`,
    /// in which case the container is left untouched.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let index = self.children.iter().position(|child| child.id() == id)?;
        Some(self.children.remove(index))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Snapshot of the child sequence. Changing the returned vector never
    /// changes the container.
    pub fn get_children(&self) -> Vec<&Node> {
        self.children.iter().collect()
    }

    pub(crate) fn children_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.children.iter_mut()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn display(&self, indent: usize) -> String {
        let mut rendered = format!(
            "{}{} ({} KB total)",
            INDENT.repeat(indent),
            self.name,
            self.size()
        );
        for child in &self.children {
            rendered.push('\n');
            rendered.push_str(&child.display(indent + 1));
        }
        rendered
    }
}

/// A node of the tree, either a file or a folder.
#[derive(Debug, From, IsVariant)]
pub enum Node {
    Leaf(Leaf),
    Container(Container),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Leaf(leaf) => leaf.id(),
            Node::Container(container) => container.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Leaf(leaf) => leaf.name(),
            Node::Container(container) => container.name(),
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Node::Leaf(leaf) => leaf.size(),
            Node::Container(container) => container.size(),
        }
    }

    /// Whether the node can hold children.
    pub fn is_composite(&self) -> bool {
        self.is_container()
    }

    pub fn display(&self, indent: usize) -> String {
        match self {
            Node::Leaf(leaf) => leaf.display(indent),
            Node::Container(container) => container.display(indent),
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Container(container) => Some(container),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Node::Container(container) => Some(container),
            Node::Leaf(_) => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(0))
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn components() -> Container {
        let mut components = Container::new("components");
        components.add(Leaf::new("Button.tsx", 8));
        components.add(Leaf::new("Card.tsx", 12));
        components.add(Leaf::new("Modal.tsx", 18));
        components
    }

    #[test]
    fn leaf_reports_its_stored_size() {
        let leaf = Leaf::new("index.ts", 15);
        assert_eq!(leaf.size(), 15);
        assert_eq!(Node::from(leaf).size(), 15);
    }

    #[test]
    fn empty_container_has_zero_size() {
        let folder = Container::new("empty");
        assert_eq!(folder.size(), 0);
        assert!(folder.is_empty());
    }

    #[test]
    fn container_size_is_sum_of_children() {
        let mut root = Container::new("projet");
        root.add(Leaf::new("index.ts", 15));
        root.add(Leaf::new("app.ts", 25));
        root.add(components());

        assert_eq!(root.size(), 78);
        let sum: u64 = root.get_children().iter().map(|child| child.size()).sum();
        assert_eq!(root.size(), sum);
    }

    #[test]
    fn size_follows_later_additions() {
        let mut root = Container::new("root");
        root.add(Leaf::new("a", 1));
        assert_eq!(root.size(), 1);
        root.add(Leaf::new("b", 2));
        assert_eq!(root.size(), 3);
    }

    #[rstest]
    #[case(Node::from(Leaf::new("file", 1)), false)]
    #[case(Node::from(Container::new("folder")), true)]
    fn is_composite_discriminates_variants(#[case] node: Node, #[case] expected: bool) {
        assert_eq!(node.is_composite(), expected);
        assert_eq!(node.is_leaf(), !expected);
    }

    #[test]
    fn remove_detaches_subtree_and_updates_size() {
        let mut root = Container::new("projet");
        root.add(Leaf::new("index.ts", 15));
        root.add(Leaf::new("app.ts", 25));
        let components = components();
        let components_id = components.id();
        root.add(components);

        let removed = root.remove(components_id).expect("components should be removed");
        assert_eq!(removed.name(), "components");
        assert_eq!(removed.size(), 38);
        assert_eq!(root.size(), 40);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut root = Container::new("root");
        let leaf = Leaf::new("a", 4);
        let leaf_id = leaf.id();
        root.add(leaf);
        root.add(Leaf::new("b", 6));

        assert!(root.remove(leaf_id).is_some());
        assert!(root.remove(leaf_id).is_none());
        assert_eq!(root.child_count(), 1);
        assert_eq!(root.size(), 6);

        let stranger = Leaf::new("stranger", 100);
        assert!(root.remove(stranger.id()).is_none());
        assert_eq!(root.size(), 6);
    }

    #[test]
    fn remove_distinguishes_siblings_with_the_same_name() {
        let mut root = Container::new("root");
        let first = Leaf::new("dup", 1);
        let second = Leaf::new("dup", 2);
        let second_id = second.id();
        root.add(first);
        root.add(second);

        root.remove(second_id);
        assert_eq!(root.child_count(), 1);
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn get_children_is_a_snapshot() {
        let mut root = Container::new("root");
        root.add(Leaf::new("a", 1));
        root.add(Leaf::new("b", 2));

        let mut snapshot = root.get_children();
        snapshot.clear();

        assert_eq!(root.child_count(), 2);
        assert_eq!(root.size(), 3);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut root = Container::new("root");
        for name in ["c", "a", "b"] {
            root.add(Leaf::new(name, 0));
        }
        let names: Vec<_> = root.children().iter().map(Node::name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn display_renders_nested_tree() {
        let mut root = Container::new("projet");
        root.add(Leaf::new("index.ts", 15));
        root.add(components());

        let expected = "\
projet (53 KB total)
  index.ts (15 KB)
  components (38 KB total)
    Button.tsx (8 KB)
    Card.tsx (12 KB)
    Modal.tsx (18 KB)";
        assert_eq!(root.display(0), expected);
        assert_eq!(Node::from(root).to_string(), expected);
    }

    #[test]
    fn display_honours_starting_indent() {
        let leaf = Leaf::new("README.md", 5);
        assert_eq!(leaf.display(2), "    README.md (5 KB)");
    }

    #[test]
    fn node_ids_are_unique() {
        let a = Leaf::new("same", 1);
        let b = Leaf::new("same", 1);
        assert_ne!(a.id(), b.id());
    }
}
