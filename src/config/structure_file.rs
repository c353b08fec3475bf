use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{borrow::Cow, path::Path};
use tracing::debug;

use crate::{
    ext::{AsyncTryFrom, BestEffortPathExt},
    filesystem::{Container, Leaf, Node, total_nodes},
};

const NAME_KEY: &str = "name";
const SIZE_KEY: &str = "size";
const CHILDREN_KEY: &str = "children";

fn key<'a>(name: &'static str) -> Yaml<'a> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

/// Reads a tree from a YAML structure file.
///
/// Every entry is a mapping with a `name` and either a `size` (a file) or a
/// `children` sequence (a folder). The top-level entry has to be a folder.
///
/// ```yaml
/// name: projet
/// children:
///   - name: README.md
///     size: 5
///   - name: src
///     children:
///       - name: index.ts
///         size: 15
/// ```
impl AsyncTryFrom<&Path> for Container {
    type Error = StructureFileError;

    async fn async_try_from(path: &Path) -> Result<Self, Self::Error> {
        debug!("Reading structure file: {}", path.best_effort_path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read structure file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }
}

impl TryFrom<&str> for Container {
    type Error = StructureFileError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedStructureSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        match parse_entry(top_level, None)? {
            Node::Container(root) => {
                debug!(
                    "Parsed structure '{}' with {} nodes",
                    root.name(),
                    total_nodes(&root)
                );
                Ok(root)
            }
            Node::Leaf(leaf) => RootNotFolderSnafu { name: leaf.name() }.fail(),
        }
    }
}

fn parse_entry(
    entry: &LinkedHashMap<Yaml<'_>, Yaml<'_>>,
    parent: Option<&str>,
) -> Result<Node, StructureFileError> {
    let parent_name = parent.unwrap_or("<top level>");
    let name = entry
        .get(&key(NAME_KEY))
        .and_then(|v| v.as_str())
        .context(MissingNameSnafu {
            parent: parent_name,
        })?;

    match (entry.get(&key(SIZE_KEY)), entry.get(&key(CHILDREN_KEY))) {
        (Some(size), None) => {
            let size = match size {
                Yaml::Value(Scalar::Integer(size)) => u64::try_from(*size).ok(),
                _ => None,
            }
            .context(InvalidSizeSnafu { name })?;
            Ok(Leaf::new(name, size).into())
        }
        (None, Some(Yaml::Value(Scalar::Null))) => Ok(Container::new(name).into()),
        (None, Some(children)) => {
            let children = children
                .as_sequence()
                .context(ChildrenNotSequenceSnafu { name })?;

            let mut folder = Container::new(name);
            for child in children {
                let child = child
                    .as_mapping()
                    .context(EntryNotMapSnafu { parent: name })?;
                folder.add(parse_entry(child, Some(name))?);
            }
            Ok(folder.into())
        }
        _ => AmbiguousEntrySnafu { name }.fail(),
    }
}

#[derive(Debug, Snafu)]
pub enum StructureFileError {
    #[snafu(display("Failed to read the structure file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Structure file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the structure file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Structure file contains no document"))]
    MalformedStructure,
    #[snafu(display("Top level of the structure file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Top level entry '{}' should be a folder", name))]
    RootNotFolder { name: String },
    #[snafu(display("Entry inside '{}' should be a map", parent))]
    EntryNotMap { parent: String },
    #[snafu(display("Entry inside '{}' has no name", parent))]
    MissingName { parent: String },
    #[snafu(display("Entry '{}' needs exactly one of 'size' or 'children'", name))]
    AmbiguousEntry { name: String },
    #[snafu(display("Size of '{}' should be a non-negative integer", name))]
    InvalidSize { name: String },
    #[snafu(display("Children of '{}' should be a list", name))]
    ChildrenNotSequence { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{create_demo_structure, find_by_path};
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DEMO_YAML: &str = r#"
name: projet
children:
  - name: src
    children:
      - name: index.ts
        size: 15
      - name: app.ts
        size: 25
      - name: components
        children:
          - name: Button.tsx
            size: 8
          - name: Card.tsx
            size: 12
          - name: Modal.tsx
            size: 18
  - name: assets
    children:
      - name: logo.png
        size: 45
      - name: styles.css
        size: 10
  - name: package.json
    size: 2
  - name: README.md
    size: 5
"#;

    #[test]
    fn parses_the_demo_structure() {
        let root: Container = DEMO_YAML.try_into().expect("valid structure");
        assert_eq!(root.display(0), create_demo_structure().display(0));
        assert_eq!(
            find_by_path(&root, "projet/src/components").map(Container::size),
            Some(38)
        );
    }

    #[test]
    fn empty_and_null_children_make_empty_folders() {
        let yaml = r#"
name: root
children:
  - name: empty
    children: []
  - name: also_empty
    children:
"#;
        let root: Container = yaml.try_into().expect("valid structure");
        assert_eq!(root.child_count(), 2);
        assert!(root.children().iter().all(|child| child.is_composite()));
        assert_eq!(root.size(), 0);
    }

    #[test]
    fn keeps_duplicate_names() {
        let yaml = r#"
name: root
children:
  - name: same
    size: 1
  - name: same
    size: 2
"#;
        let root: Container = yaml.try_into().expect("valid structure");
        assert_eq!(root.child_count(), 2);
        assert_eq!(root.size(), 3);
    }

    #[test]
    fn returns_error_on_invalid_yaml() {
        let result: Result<Container, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(StructureFileError::ParseError { .. })));
    }

    #[test]
    fn returns_error_on_empty_file() {
        let result: Result<Container, _> = "".try_into();
        assert!(matches!(result, Err(StructureFileError::MalformedStructure)));
    }

    #[rstest]
    #[case("- item1\n- item2")]
    #[case("just a string")]
    fn returns_error_when_top_level_is_not_map(#[case] yaml: &str) {
        let result: Result<Container, _> = yaml.try_into();
        assert!(matches!(result, Err(StructureFileError::TopLevelNotMap)));
    }

    #[test]
    fn returns_error_when_root_is_a_file() {
        let result: Result<Container, _> = "name: lonely.txt\nsize: 3".try_into();
        assert!(matches!(
            result,
            Err(StructureFileError::RootNotFolder { name }) if name == "lonely.txt"
        ));
    }

    #[rstest]
    #[case("name: root\nchildren:\n  - name: bad\n    size: -4")]
    #[case("name: root\nchildren:\n  - name: bad\n    size: big")]
    #[case("name: root\nchildren:\n  - name: bad\n    size: 1.5")]
    fn returns_error_on_invalid_size(#[case] yaml: &str) {
        let result: Result<Container, _> = yaml.try_into();
        assert!(matches!(
            result,
            Err(StructureFileError::InvalidSize { name }) if name == "bad"
        ));
    }

    #[rstest]
    #[case("name: root\nchildren:\n  - name: both\n    size: 1\n    children: []")]
    #[case("name: root\nchildren:\n  - name: neither")]
    fn returns_error_on_ambiguous_entry(#[case] yaml: &str) {
        let result: Result<Container, _> = yaml.try_into();
        assert!(matches!(result, Err(StructureFileError::AmbiguousEntry { .. })));
    }

    #[test]
    fn returns_error_on_missing_name() {
        let result: Result<Container, _> = "name: root\nchildren:\n  - size: 1".try_into();
        assert!(matches!(
            result,
            Err(StructureFileError::MissingName { parent }) if parent == "root"
        ));
    }

    #[test]
    fn returns_error_when_child_is_not_map() {
        let result: Result<Container, _> = "name: root\nchildren:\n  - loose".try_into();
        assert!(matches!(result, Err(StructureFileError::EntryNotMap { .. })));
    }

    #[test]
    fn returns_error_when_children_is_not_a_list() {
        let result: Result<Container, _> = "name: root\nchildren: nope".try_into();
        assert!(matches!(
            result,
            Err(StructureFileError::ChildrenNotSequence { .. })
        ));
    }

    #[compio::test]
    async fn reads_structure_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{}", DEMO_YAML).expect("Failed to write to temp file");

        let root = Container::async_try_from(file.path())
            .await
            .expect("Failed to load structure");

        assert_eq!(root.size(), 140);
    }

    #[compio::test]
    async fn returns_error_on_nonexistent_file() {
        let result = Container::async_try_from(Path::new("nonexistent.yaml")).await;
        assert!(matches!(result, Err(StructureFileError::ReadError { .. })));
    }

    #[test]
    fn error_messages_name_the_entry() {
        let error = StructureFileError::InvalidSize {
            name: "logo.png".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Size of 'logo.png' should be a non-negative integer"
        );
    }
}
