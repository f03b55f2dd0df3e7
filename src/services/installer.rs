use super::report::{RunReport, execute};
use super::{AptService, PackageMenu, RepositoryService};
use crate::domain::{Catalog, Check, CommandSpec, HostSystem, PackageKind, Prompter};
use crate::infra::logging::milestone;
use anyhow::Result;
use chrono::Local;
use console::Color;
use std::sync::Arc;
use tracing::info;

const PLEX_PACKAGE: &str = "plexmediaserver";
const ONEPASSWORD_DEPENDENCIES: &str =
    "gnupg2 apt-transport-https ca-certificates software-properties-common";

/// Catalog adjustments and the optional up-front menu answer
#[derive(Debug, Clone, Default)]
pub struct InstallerOptions {
    pub extra: Vec<String>,
    pub exclude: Vec<String>,
    pub preset: Option<String>,
}

/// Runs the whole setup: catalog, Docker repository, menu, installs
pub struct Installer {
    host: Arc<dyn HostSystem>,
    apt: AptService,
    repos: RepositoryService,
    menu: PackageMenu,
    options: InstallerOptions,
}

impl Installer {
    pub fn new(
        host: Arc<dyn HostSystem>,
        prompter: Arc<dyn Prompter>,
        options: InstallerOptions,
    ) -> Self {
        Self {
            apt: AptService::new(host.clone()),
            repos: RepositoryService::new(host.clone()),
            menu: PackageMenu::new(prompter),
            host,
            options,
        }
    }

    pub fn run(&self) -> Result<RunReport> {
        info!(
            "Starting optional packages setup at {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        milestone("Starting optional packages setup...", Color::Blue);

        let mut report = RunReport::new();
        self.install_packages(&mut report)?;
        Ok(report)
    }

    fn install_packages(&self, report: &mut RunReport) -> Result<()> {
        let docker_available = self.apt.docker_candidate_available();
        let catalog = Catalog::build(&self.options.extra, &self.options.exclude, docker_available);

        self.repos.setup_docker(report)?;

        info!("Displaying package selection menu...");
        let selected = match &self.options.preset {
            Some(answer) => self.menu.choose_preset(&catalog, answer)?,
            None => self.menu.choose(&catalog)?,
        };

        report.selected = selected.len();
        info!("Selected {} packages for installation.", selected.len());

        for package in &selected {
            self.install_one(package, report);
        }

        Ok(())
    }

    pub fn install_one(&self, package: &str, report: &mut RunReport) {
        match PackageKind::of(package) {
            PackageKind::Plex => self.install_plex(report),
            PackageKind::BitwardenCli => self.install_bitwarden(report),
            PackageKind::OnePasswordCli => self.install_onepassword(report),
            PackageKind::Nvm => {
                info!("Installing NVM (Node Version Manager)...");
                self.apt.install("nvm", report);
                info!("NVM installation completed.");
                report.processed += 1;
            }
            PackageKind::Apt => {
                if self.apt.is_installed(package) {
                    info!("{} is already installed, skipping.", package);
                    report.skipped += 1;
                    return;
                }
                info!("Installing {}...", package);
                self.apt.install(package, report);
                report.processed += 1;
            }
        }
    }

    fn install_plex(&self, report: &mut RunReport) {
        if self.apt.is_installed(PLEX_PACKAGE) {
            info!("Plex Media Server is already installed, skipping.");
            report.skipped += 1;
            return;
        }

        info!("Installing Plex Media Server...");
        self.repos.add_plex(report);
        self.apt.update_quiet(report);
        self.apt.install(PLEX_PACKAGE, report);

        self.lenient(&format!("systemctl enable {PLEX_PACKAGE}"), report);
        self.lenient(&format!("systemctl start {PLEX_PACKAGE}"), report);
        report.processed += 1;
    }

    fn install_bitwarden(&self, report: &mut RunReport) {
        info!("Installing Bitwarden CLI...");

        if !self.apt.is_installed("build-essential") {
            info!("Installing build-essential package for Bitwarden CLI...");
            self.apt.install("build-essential", report);
        }

        if !self.apt.is_installed("npm") {
            info!("Installing npm for Bitwarden CLI...");
            self.apt.install("npm", report);
        }

        info!("Installing Bitwarden CLI using npm...");
        self.lenient("npm install -g @bitwarden/cli", report);
        info!("Bitwarden CLI installation completed.");
        report.processed += 1;
    }

    fn install_onepassword(&self, report: &mut RunReport) {
        info!("Installing 1Password CLI...");

        self.apt.update(report);
        self.apt.install(ONEPASSWORD_DEPENDENCIES, report);
        self.repos.add_onepassword(report);
        self.lenient("apt update > /dev/null && apt install -y 1password-cli", report);

        info!("1Password CLI installation completed.");
        report.processed += 1;
    }

    fn lenient(&self, command: &str, report: &mut RunReport) {
        execute(
            self.host.as_ref(),
            CommandSpec::shell(command, Check::Lenient),
            report,
        );
    }
}
