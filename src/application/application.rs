use std::path::Path;

use composite_fs::{
    config::StructureFileError,
    ext::AsyncTryInto,
    filesystem::{Container, create_demo_structure},
    session::{EditOutcome, Session},
};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;
use tracing::info;

use crate::application::RuntimeConfig;
use crate::cli::{Command, printer};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let mut session = Self::load_session(app_config.structure.as_deref()).await?;
        Self::execute(&mut session, app_config.command);

        Ok(())
    }

    async fn load_session(structure: Option<&Path>) -> Result<Session, ApplicationError> {
        let root: Container = match structure {
            Some(path) => AsyncTryInto::<Container>::async_try_into(path)
                .await
                .context(StructureSnafu)?,
            None => {
                debug!("No structure file given, using the demo project");
                create_demo_structure()
            }
        };
        info!("Loaded tree '{}' ({} KB)", root.name(), root.size());
        Ok(Session::new(root))
    }

    fn execute(session: &mut Session, command: Command) -> Option<EditOutcome> {
        let outcome = match command {
            Command::Show => None,
            Command::Folders => {
                printer::print_folders(&session.destinations());
                return None;
            }
            Command::Inspect { path } => {
                match session.inspect(&path) {
                    Some(node) => printer::print_details(&path, node),
                    None if path == session.root().name() => {
                        let root = session.root();
                        printer::print_tree(root);
                    }
                    None => printer::print_not_found(&path),
                }
                return None;
            }
            Command::AddFile { name, size, into } => {
                let destination = into.unwrap_or_else(|| session.default_destination());
                Some(session.add_file(&destination, &name, size.as_deref().unwrap_or_default()))
            }
            Command::AddFolder { name, into } => {
                let destination = into.unwrap_or_else(|| session.default_destination());
                Some(session.add_folder(&destination, &name))
            }
            Command::Remove { name, from } => {
                let destination = from.unwrap_or_else(|| session.default_destination());
                Some(session.remove(&destination, &name))
            }
        };

        if let Some(outcome) = outcome {
            printer::print_outcome(outcome);
            println!();
        }
        printer::print_tree(session.root());
        outcome
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the structure file"))]
    StructureError { source: StructureFileError },
}
