pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{Catalog, CommandSpec, HostSystem, Prompter, Selection};
pub use infra::{ShellHost, TerminalPrompt};
pub use services::{Installer, InstallerOptions, RunReport};
