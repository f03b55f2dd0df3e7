use crate::domain::Prompter;
use anyhow::{Context, Result, bail};
use console::{Term, style};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use std::io::{BufRead, IsTerminal};

/// Menu prompt on the controlling terminal, falling back to plain stdin
/// when either end is not a terminal.
#[derive(Debug)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// dialoguer reads keys from the terminal, not stdin, so piped answers
/// need the plain path even when stdout is a terminal.
fn interactive(stdin_tty: bool, stdout_tty: bool) -> bool {
    stdin_tty && stdout_tty
}

impl Prompter for TerminalPrompt {
    fn show(&self, text: &str) {
        println!("{text}");
    }

    fn read_line(&self, prompt: &str) -> Result<String> {
        let term = Term::stdout();

        if interactive(std::io::stdin().is_terminal(), term.is_term()) {
            let theme = prompt_theme();
            return Input::<String>::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text_on(&term)
                .context("reading package selection");
        }

        term.write_str(&format!("{prompt}: ")).context("writing prompt")?;

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("reading package selection")?;

        if read == 0 {
            bail!("no package selection given (end of input)");
        }

        Ok(line)
    }
}
