use derive_more::Display;
use tracing::{debug, info, warn};

use crate::filesystem::{
    Container, DeepClone, Leaf, Node, create_demo_structure, enumerate_folders, find_by_path,
    find_by_path_mut, find_node_by_path,
};

/// Size given to new files when the requested size is not a valid number.
pub const DEFAULT_FILE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EditOutcome {
    #[display("applied")]
    Applied,
    #[display("ignored, the name is empty")]
    Ignored,
    #[display("destination folder not found")]
    DestinationNotFound,
    #[display("nothing with that name to remove")]
    NothingToRemove,
}

/// Owner of the current tree.
///
/// Edits never touch the live tree: each one deep-clones the root, applies
/// the change to the copy and swaps it in. The tree that was replaced stays
/// available through [`Session::previous`] until the next edit.
#[derive(Debug)]
pub struct Session {
    root: Container,
    previous: Option<Container>,
}

impl Session {
    pub fn new(root: Container) -> Self {
        Session {
            root,
            previous: None,
        }
    }

    pub fn demo() -> Self {
        Self::new(create_demo_structure())
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    pub fn previous(&self) -> Option<&Container> {
        self.previous.as_ref()
    }

    pub fn total_size(&self) -> u64 {
        self.root.size()
    }

    pub fn reset(&mut self) {
        debug!("Resetting session to the demo structure");
        self.root = create_demo_structure();
        self.previous = None;
    }

    /// Paths of every folder an item can be added to. The first one, the
    /// root, is the default destination.
    pub fn destinations(&self) -> Vec<String> {
        enumerate_folders(&self.root)
            .into_iter()
            .map(|entry| entry.path)
            .collect()
    }

    pub fn default_destination(&self) -> String {
        self.root.name().to_string()
    }

    pub fn inspect(&self, path: &str) -> Option<&Node> {
        find_node_by_path(&self.root, path)
    }

    /// Adds a file of `size_input` KB, falling back to [`DEFAULT_FILE_SIZE`]
    /// when the input does not parse.
    pub fn add_file(&mut self, destination: &str, name: &str, size_input: &str) -> EditOutcome {
        let size = parse_size(size_input);
        self.apply(destination, name, |folder, name| {
            folder.add(Leaf::new(name, size));
            true
        })
    }

    pub fn add_folder(&mut self, destination: &str, name: &str) -> EditOutcome {
        self.apply(destination, name, |folder, name| {
            folder.add(Container::new(name));
            true
        })
    }

    /// Removes the first child of `destination` called `name`.
    pub fn remove(&mut self, destination: &str, name: &str) -> EditOutcome {
        self.apply(destination, name, |folder, name| {
            let target = folder
                .children()
                .iter()
                .find(|child| child.name() == name)
                .map(Node::id);
            target.and_then(|id| folder.remove(id)).is_some()
        })
    }

    fn apply(
        &mut self,
        destination: &str,
        name: &str,
        edit: impl FnOnce(&mut Container, &str) -> bool,
    ) -> EditOutcome {
        let name = name.trim();
        if name.is_empty() {
            info!("Ignoring edit in '{}' with an empty name", destination);
            return EditOutcome::Ignored;
        }

        if find_by_path(&self.root, destination).is_none() {
            warn!("Destination folder '{}' not found", destination);
            return EditOutcome::DestinationNotFound;
        }

        let mut next = self.root.deep_clone();
        let Some(folder) = find_by_path_mut(&mut next, destination) else {
            warn!("Destination folder '{}' vanished from the copy", destination);
            return EditOutcome::DestinationNotFound;
        };

        if !edit(folder, name) {
            info!("No child named '{}' in '{}'", name, destination);
            return EditOutcome::NothingToRemove;
        }

        debug!(
            "Applied edit on '{}' in '{}', size {} KB -> {} KB",
            name,
            destination,
            self.root.size(),
            next.size()
        );
        self.previous = Some(std::mem::replace(&mut self.root, next));
        EditOutcome::Applied
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::demo()
    }
}

fn parse_size(input: &str) -> u64 {
    input.trim().parse().unwrap_or_else(|_| {
        debug!(
            "Invalid size '{}', using {} KB instead",
            input, DEFAULT_FILE_SIZE
        );
        DEFAULT_FILE_SIZE
    })
}
