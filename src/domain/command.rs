use std::fmt;

/// Maximum number of characters of stdout/stderr kept in debug logs
pub const LOG_OUTPUT_LIMIT: usize = 500;

/// How a command is handed to the operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Passed verbatim to `sh -c` (pipes, redirects, `&&`)
    Shell(String),
    /// Executed directly as argv, no shell involved
    Exec(Vec<String>),
}

/// Whether a non-zero exit should be reported as a run error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Strict,
    Lenient,
}

impl Check {
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub invocation: Invocation,
    pub check: Check,
}

impl CommandSpec {
    /// Builds a command from its string form.
    ///
    /// Non-shell commands are split on whitespace into argv; quoting is not
    /// interpreted, so anything needing quotes must go through the shell.
    pub fn parse(command: &str, shell: bool, check: Check) -> Self {
        let invocation = if shell {
            Invocation::Shell(command.to_string())
        } else {
            Invocation::Exec(command.split_whitespace().map(str::to_string).collect())
        };

        Self { invocation, check }
    }

    pub fn shell(command: impl Into<String>, check: Check) -> Self {
        Self {
            invocation: Invocation::Shell(command.into()),
            check,
        }
    }

    pub fn exec<I, S>(argv: I, check: Check) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            invocation: Invocation::Exec(argv.into_iter().map(Into::into).collect()),
            check,
        }
    }

    pub fn is_shell(&self) -> bool {
        matches!(self.invocation, Invocation::Shell(_))
    }

    /// Command line as it would be typed
    pub fn display(&self) -> String {
        match &self.invocation {
            Invocation::Shell(line) => line.clone(),
            Invocation::Exec(argv) => argv.join(" "),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Result of a finished command, streams already trimmed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            code,
            stdout: stdout.trim().to_string(),
            stderr: stderr.trim().to_string(),
        }
    }

    pub fn ok(stdout: &str) -> Self {
        Self::new(0, stdout, "")
    }

    pub fn failed(code: i32, stderr: &str) -> Self {
        Self::new(code, "", stderr)
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Shortens command output for the debug log.
pub fn truncate_for_log(text: &str) -> String {
    match text.char_indices().nth(LOG_OUTPUT_LIMIT) {
        Some((cut, _)) => format!("{}... [truncated]", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_non_shell_commands() {
        let spec = CommandSpec::parse("dpkg  --print-architecture", false, Check::Strict);

        assert_eq!(
            spec.invocation,
            Invocation::Exec(vec!["dpkg".into(), "--print-architecture".into()])
        );
        assert!(!spec.is_shell());
    }

    #[test]
    fn test_parse_keeps_shell_commands_verbatim() {
        let line = "curl -fsSL https://example.invalid/key | gpg --dearmor";
        let spec = CommandSpec::parse(line, true, Check::Lenient);

        assert_eq!(spec.invocation, Invocation::Shell(line.to_string()));
        assert_eq!(spec.check, Check::Lenient);
    }

    #[test]
    fn test_parse_does_not_interpret_quotes() {
        let spec = CommandSpec::parse("echo \"a b\"", false, Check::Strict);

        assert_eq!(
            spec.invocation,
            Invocation::Exec(vec!["echo".into(), "\"a".into(), "b\"".into()])
        );
    }

    #[test]
    fn test_parse_empty_command_yields_empty_argv() {
        let spec = CommandSpec::parse("   ", false, Check::Strict);
        assert_eq!(spec.invocation, Invocation::Exec(vec![]));
    }

    #[test]
    fn test_display_joins_argv() {
        let spec = CommandSpec::exec(["apt", "install", "-y", "cmake"], Check::Lenient);
        assert_eq!(spec.display(), "apt install -y cmake");
        assert_eq!(spec.to_string(), "apt install -y cmake");
    }

    #[test]
    fn test_output_is_trimmed() {
        let out = CommandOutput::new(0, "  bookworm\n", "\n");
        assert_eq!(out.stdout, "bookworm");
        assert_eq!(out.stderr, "");
        assert!(out.success());
    }

    #[test]
    fn test_truncate_for_log_short_text_untouched() {
        assert_eq!(truncate_for_log("hello"), "hello");
    }

    #[test]
    fn test_truncate_for_log_long_text() {
        let long = "x".repeat(LOG_OUTPUT_LIMIT + 20);
        let cut = truncate_for_log(&long);

        assert!(cut.ends_with("... [truncated]"));
        assert_eq!(cut.len(), LOG_OUTPUT_LIMIT + "... [truncated]".len());
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let long = "é".repeat(LOG_OUTPUT_LIMIT + 1);
        let cut = truncate_for_log(&long);
        assert_eq!(cut.chars().filter(|c| *c == 'é').count(), LOG_OUTPUT_LIMIT);
    }
}
