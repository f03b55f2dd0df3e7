use crate::domain::{CommandOutput, CommandSpec, HostSystem, Prompter};
use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Host double: records every command, answers from a table keyed by the
/// exact command line, defaults to a silent success.
#[derive(Debug, Default)]
pub struct MockHost {
    commands: RwLock<Vec<String>>,
    exec_commands: RwLock<Vec<String>>,
    responses: RwLock<HashMap<String, CommandOutput>>,
    paths: RwLock<HashSet<PathBuf>>,
    files: RwLock<HashMap<PathBuf, String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `output`
    pub fn respond(&self, command: &str, output: CommandOutput) {
        self.responses
            .write()
            .unwrap()
            .insert(command.to_string(), output);
    }

    pub fn fail_command(&self, command: &str, code: i32) {
        self.respond(command, CommandOutput::failed(code, "mock failure"));
    }

    /// Make `dpkg -l <package>` report the package as installed
    pub fn mark_installed(&self, package: &str) {
        self.respond(
            &format!("dpkg -l {package}"),
            CommandOutput::ok(&format!(
                "Desired=Unknown/Install/Remove/Purge/Hold\n\
                 ||/ Name  Version  Architecture Description\n\
                 +++-=====-========-============-===========\n\
                 ii  {package}  1.0  amd64  mock package"
            )),
        );
    }

    pub fn set_docker_candidate(&self, available: bool) {
        let policy = if available {
            "docker-ce:\n  Installed: (none)\n  Candidate: 5:27.3.1-1~debian.12~bookworm"
        } else {
            ""
        };
        self.respond("apt-cache policy docker-ce", CommandOutput::ok(policy));
    }

    pub fn add_path(&self, path: &str) {
        self.paths.write().unwrap().insert(PathBuf::from(path));
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    /// Commands run as argv, without `sh -c`
    pub fn exec_commands(&self) -> Vec<String> {
        self.exec_commands.read().unwrap().clone()
    }

    pub fn ran(&self, command: &str) -> bool {
        self.commands.read().unwrap().iter().any(|c| c == command)
    }

    /// Index of the first run of `command`
    pub fn position(&self, command: &str) -> Option<usize> {
        self.commands
            .read()
            .unwrap()
            .iter()
            .position(|c| c == command)
    }

    pub fn written(&self, path: &str) -> Option<String> {
        self.files.read().unwrap().get(Path::new(path)).cloned()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl HostSystem for MockHost {
    fn run(&self, command: &CommandSpec) -> CommandOutput {
        let line = command.display();
        self.record_command(&line);
        if !command.is_shell() {
            self.exec_commands.write().unwrap().push(line.clone());
        }

        self.responses
            .read()
            .unwrap()
            .get(&line)
            .cloned()
            .unwrap_or_default()
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.paths.read().unwrap().contains(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.record_command(&format!("write:{}", path.display()));
        self.check_fail("write_file")?;

        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        self.paths.write().unwrap().insert(path.to_path_buf());
        Ok(())
    }
}

/// Prompter double fed with scripted answers
#[derive(Debug, Default)]
pub struct MockPrompter {
    answers: RwLock<VecDeque<String>>,
    shown: RwLock<Vec<String>>,
    prompts: RwLock<usize>,
}

impl MockPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RwLock::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Everything shown so far, one entry per `show` call
    pub fn shown(&self) -> Vec<String> {
        self.shown.read().unwrap().clone()
    }

    pub fn transcript(&self) -> String {
        self.shown().join("\n")
    }

    pub fn prompt_count(&self) -> usize {
        *self.prompts.read().unwrap()
    }
}

impl Prompter for MockPrompter {
    fn show(&self, text: &str) {
        self.shown.write().unwrap().push(text.to_string());
    }

    fn read_line(&self, _prompt: &str) -> Result<String> {
        *self.prompts.write().unwrap() += 1;

        match self.answers.write().unwrap().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("no more scripted answers"),
        }
    }
}
