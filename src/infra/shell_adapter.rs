use crate::domain::command::truncate_for_log;
use crate::domain::{CommandOutput, CommandSpec, HostSystem, Invocation};
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::Instant;
use tracing::{debug, error};

/// Runs commands on the local machine, one at a time
#[derive(Debug)]
pub struct ShellHost;

impl ShellHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShellHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSystem for ShellHost {
    fn run(&self, command: &CommandSpec) -> CommandOutput {
        let line = command.display();
        debug!(
            "Executing command: '{}', shell={}, check={}",
            line,
            command.is_shell(),
            command.check.is_strict()
        );

        if let Invocation::Exec(argv) = &command.invocation {
            debug!("Split command into: {:?}", argv);
        }

        debug!(
            "Command execution started at {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.6f")
        );
        let started = Instant::now();

        let output = match spawn(&command.invocation) {
            Ok(output) => output,
            Err(e) => {
                error!("Exception running command {}: {:#}", line, e);
                debug!("Command exception details: {:?}", e);
                return CommandOutput::failed(1, &format!("{e:#}"));
            }
        };

        let elapsed = started.elapsed().as_secs_f64();
        // Killed by a signal
        let code = output.status.code().unwrap_or(-1);
        debug!(
            "Command execution completed in {:.4} seconds with return code {}",
            elapsed, code
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !stdout.is_empty() {
            debug!("Command stdout: {}", truncate_for_log(&stdout));
        }
        if !stderr.is_empty() {
            debug!("Command stderr: {}", truncate_for_log(&stderr));
        }

        let result = CommandOutput::new(code, &stdout, &stderr);

        if command.check.is_strict() && !result.success() {
            error!("Command failed: {}", line);
            error!("Error: {}", result.stderr);
            debug!(
                "Failed command details - return code: {}, execution time: {:.4}s",
                code, elapsed
            );
        }

        result
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        debug!("Writing {:?}", path);
        fs::write(path, contents).with_context(|| format!("writing {:?}", path))
    }
}

fn spawn(invocation: &Invocation) -> Result<Output> {
    let mut cmd = match invocation {
        Invocation::Shell(line) => {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        }
        Invocation::Exec(argv) => {
            let Some((program, args)) = argv.split_first() else {
                bail!("empty command");
            };
            let mut cmd = Command::new(program);
            cmd.args(args);
            cmd
        }
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("spawning {:?}", invocation))
}
