//! Terminal rendering of the tree and of edit results.

use colored::Colorize;
use composite_fs::{
    filesystem::{Container, Node},
    session::EditOutcome,
};
use supports_color::Stream;

const INDENT: &str = "  ";

/// Turns colors on only when stdout can show them.
pub fn configure_colors() {
    let enabled = supports_color::on(Stream::Stdout).is_some();
    colored::control::set_override(enabled);
}

pub fn render_tree(root: &Container) -> String {
    let mut lines = Vec::new();
    render_folder(root, 0, &mut lines);
    lines.join("\n")
}

fn render_folder(folder: &Container, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!(
        "{}{} {}",
        INDENT.repeat(depth),
        folder.name().blue().bold(),
        format!("({} KB total)", folder.size()).as_str().dimmed()
    ));
    for child in folder.children() {
        match child {
            Node::Container(container) => render_folder(container, depth + 1, lines),
            Node::Leaf(leaf) => lines.push(format!(
                "{}{} {}",
                INDENT.repeat(depth + 1),
                leaf.name().green(),
                format!("({} KB)", leaf.size()).as_str().dimmed()
            )),
        }
    }
}

pub fn print_tree(root: &Container) {
    println!("{}", render_tree(root));
    println!();
    println!("Total size: {}", format!("{} KB", root.size()).as_str().bold());
}

pub fn print_folders(paths: &[String]) {
    for (index, path) in paths.iter().enumerate() {
        if index == 0 {
            println!("{} {}", path.blue().bold(), "(default)".dimmed());
        } else {
            println!("{}", path.blue());
        }
    }
}

pub fn print_details(path: &str, node: &Node) {
    let kind = if node.is_composite() { "Folder" } else { "File" };
    println!("{:<14}{}", "Name", node.name().bold());
    println!("{:<14}{}", "Path", path);
    println!("{:<14}{}", "Kind", kind);
    println!("{:<14}{}", "isComposite", node.is_composite());
    println!("{:<14}{} KB", "Size", node.size());
    if let Node::Container(folder) = node {
        println!("{:<14}{}", "Children", folder.child_count());
    }
}

pub fn print_not_found(path: &str) {
    println!("{} {}", "Nothing found at".yellow(), path);
}

pub fn print_outcome(outcome: EditOutcome) {
    match outcome {
        EditOutcome::Applied => println!("{}", "Edit applied".green()),
        _ => println!("{} {}", "Edit not applied:".yellow(), outcome),
    }
}
