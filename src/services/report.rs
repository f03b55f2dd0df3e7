use crate::domain::{CommandOutput, CommandSpec, HostSystem};
use tracing::{debug, warn};

/// Outcome of a setup run.
///
/// A failed strict command sets the error flag; a failed lenient command is
/// only kept as a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub selected: usize,
    pub processed: usize,
    pub skipped: usize,
    failures: Vec<String>,
    warnings: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, command: &CommandSpec, output: &CommandOutput) {
        if output.success() {
            return;
        }

        let line = command.display();
        if command.check.is_strict() {
            self.failures.push(line);
        } else {
            warn!("Step exited with code {}: {}", output.code, line);
            self.warnings.push(line);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Runs one step and tracks its outcome
pub fn execute(
    host: &dyn HostSystem,
    command: CommandSpec,
    report: &mut RunReport,
) -> CommandOutput {
    let output = host.run(&command);
    debug!("'{}' -> {}", command, output.code);
    report.track(&command, &output);
    output
}
