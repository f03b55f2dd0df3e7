pub mod config;
pub mod logging;
pub mod prompt;
pub mod shell_adapter;

pub use prompt::TerminalPrompt;
pub use shell_adapter::ShellHost;
