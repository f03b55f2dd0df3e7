use crate::domain::{Catalog, Prompter, Selection};
use anyhow::Result;
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

pub const SELECTION_PROMPT: &str = "Your selection";

/// Numbered package menu
pub struct PackageMenu {
    prompter: Arc<dyn Prompter>,
}

impl PackageMenu {
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self { prompter }
    }

    /// Shows the menu until a valid answer is given, then resolves it.
    pub fn choose(&self, catalog: &Catalog) -> Result<Vec<String>> {
        let selection = loop {
            self.prompter.show(&render(catalog.entries()));

            let answer = self.prompter.read_line(SELECTION_PROMPT)?;
            debug!("Menu answer: {:?}", answer.trim());

            match Selection::parse(&answer, catalog.len()) {
                Ok(selection) => break selection,
                Err(e) => self.prompter.show(&e.to_string()),
            }
        };

        Ok(self.resolve(catalog, &selection))
    }

    /// Resolves an answer given up front; invalid input is an error.
    pub fn choose_preset(&self, catalog: &Catalog, answer: &str) -> Result<Vec<String>> {
        let selection = Selection::parse(answer, catalog.len())?;
        Ok(self.resolve(catalog, &selection))
    }

    fn resolve(&self, catalog: &Catalog, selection: &Selection) -> Vec<String> {
        let packages = catalog.expand(selection);
        self.prompter.show(&render_selected(&packages));
        packages
    }
}

pub fn render(entries: &[String]) -> String {
    let mut out = String::from("\nPackage Selection Menu\n");
    out.push_str("----------------------\n");
    out.push_str("Available packages:\n");

    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{}) {}", i + 1, entry);
    }

    out.push_str("\nEnter package numbers to install (comma-separated, e.g., '1,3,5')\n");
    out.push_str("Type 'all' to select all packages or 'none' to select none");
    out
}

pub fn render_selected(packages: &[String]) -> String {
    let mut out = String::from("\nSelected packages:");

    if packages.is_empty() {
        out.push_str("\n- None");
    }
    for package in packages {
        let _ = write!(out, "\n- {package}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DOCKER_COMPONENTS;
    use crate::test_support::MockPrompter;

    fn menu(answers: &[&str]) -> (PackageMenu, Arc<MockPrompter>) {
        let prompter = Arc::new(MockPrompter::new(answers.iter().copied()));
        (PackageMenu::new(prompter.clone()), prompter)
    }

    #[test]
    fn test_render_numbers_entries_from_one() {
        let text = render(&["cmake".to_string(), "nginx".to_string()]);

        assert!(text.contains("Package Selection Menu"));
        assert!(text.contains("1) cmake\n2) nginx\n"));
        assert!(text.ends_with("Type 'all' to select all packages or 'none' to select none"));
    }

    #[test]
    fn test_render_selected() {
        assert_eq!(render_selected(&[]), "\nSelected packages:\n- None");
        assert_eq!(
            render_selected(&["cmake".to_string(), "nginx".to_string()]),
            "\nSelected packages:\n- cmake\n- nginx"
        );
    }

    #[test]
    fn test_choose_valid_answer() -> Result<()> {
        let catalog = Catalog::build(&[], &[], false);
        let (menu, prompter) = menu(&["3,4"]);

        let packages = menu.choose(&catalog)?;

        assert_eq!(packages, vec!["certbot".to_string(), "cmake".to_string()]);
        assert_eq!(prompter.prompt_count(), 1);
        assert!(prompter.transcript().contains("- certbot\n- cmake"));
        Ok(())
    }

    #[test]
    fn test_choose_reprompts_on_bad_input() -> Result<()> {
        let catalog = Catalog::build(&[], &[], false);
        let (menu, prompter) = menu(&["abc", "99", "", "none"]);

        let packages = menu.choose(&catalog)?;

        assert!(packages.is_empty());
        assert_eq!(prompter.prompt_count(), 4);

        let transcript = prompter.transcript();
        assert_eq!(transcript.matches("Package Selection Menu").count(), 4);
        assert!(transcript.contains("Invalid selection format."));
        assert!(transcript.contains("99 is not between 1 and"));
        assert!(transcript.contains("- None"));
        Ok(())
    }

    #[test]
    fn test_choose_all_with_docker() -> Result<()> {
        let catalog = Catalog::build(&[], &[], true);
        let (menu, _) = menu(&["all"]);

        let packages = menu.choose(&catalog)?;

        assert!(!packages.contains(&"docker".to_string()));
        for component in DOCKER_COMPONENTS {
            assert!(packages.contains(&component.to_string()));
        }
        assert_eq!(packages.len(), catalog.len() - 1 + DOCKER_COMPONENTS.len());
        Ok(())
    }

    #[test]
    fn test_choose_fails_when_input_ends() {
        let catalog = Catalog::build(&[], &[], false);
        let (menu, _) = menu(&["nope"]);

        assert!(menu.choose(&catalog).is_err());
    }

    #[test]
    fn test_choose_preset() -> Result<()> {
        let catalog = Catalog::build(&[], &[], false);
        let (menu, prompter) = menu(&[]);

        let packages = menu.choose_preset(&catalog, "1")?;

        assert_eq!(packages, vec!["1password-cli".to_string()]);
        assert_eq!(prompter.prompt_count(), 0);
        Ok(())
    }

    #[test]
    fn test_choose_preset_rejects_invalid() {
        let catalog = Catalog::build(&[], &[], false);
        let (menu, _) = menu(&[]);

        assert!(menu.choose_preset(&catalog, "0").is_err());
    }
}
