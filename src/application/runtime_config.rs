use std::path::PathBuf;

use crate::cli::{Cli, Command};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub structure: Option<PathBuf>,
    pub command: Command,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            structure: cli.structure,
            command: cli.command,
        }
    }
}
