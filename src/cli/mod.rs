mod cli;
pub mod printer;

pub use cli::{Cli, Command};
