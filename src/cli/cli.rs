use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// YAML file describing the starting tree, the demo project when omitted
    #[clap(long, short, global = true)]
    pub structure: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the whole tree with aggregated folder sizes
    Show,
    /// List every folder path, the default destination first
    Folders,
    /// Show name, kind and size of a file or folder
    Inspect { path: String },
    /// Add a file and print the resulting tree
    AddFile {
        name: String,
        /// Size in KB, anything that is not a number falls back to the default
        #[clap(long)]
        size: Option<String>,
        /// Destination folder path, the root when omitted
        #[clap(long)]
        into: Option<String>,
    },
    /// Add an empty folder and print the resulting tree
    AddFolder {
        name: String,
        #[clap(long)]
        into: Option<String>,
    },
    /// Remove the first child with the given name
    Remove {
        name: String,
        /// Folder to remove from, the root when omitted
        #[clap(long)]
        from: Option<String>,
    },
}
