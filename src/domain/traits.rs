use super::{CommandOutput, CommandSpec};
use anyhow::Result;
use std::fmt::Debug;
use std::path::Path;

/// Trait for everything that touches the host system
pub trait HostSystem: Send + Sync + Debug {
    /// Run a command to completion.
    ///
    /// A command that cannot be spawned reports exit code 1 with the spawn
    /// error as stderr.
    fn run(&self, command: &CommandSpec) -> CommandOutput;

    /// Check whether a path exists
    fn path_exists(&self, path: &Path) -> bool;

    /// Create or truncate a file with the given contents
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Trait for the interactive side of the menu
pub trait Prompter: Send + Sync + Debug {
    /// Show text to the user
    fn show(&self, text: &str);

    /// Read one answer; end of input is an error
    fn read_line(&self, prompt: &str) -> Result<String>;
}
