//! A file/folder tree where folders report the aggregated size of
//! everything below them.
//!
//! [`filesystem`] holds the node types and whole-tree helpers,
//! [`session`] the copy-on-write editing workflow built on top of them and
//! [`config`] the YAML structure files trees can be seeded from.

pub mod config;
pub mod ext;
pub mod filesystem;
pub mod session;
