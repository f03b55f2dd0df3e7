use super::report::{RunReport, execute};
use crate::domain::{Check, CommandSpec, HostSystem};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub const APT_KEYRINGS_DIR: &str = "/etc/apt/keyrings";
pub const DOCKER_KEYRING: &str = "/etc/apt/keyrings/docker.gpg";
pub const DOCKER_SOURCE_LIST: &str = "/etc/apt/sources.list.d/docker.list";
const DOCKER_GPG_URL: &str = "https://download.docker.com/linux/debian/gpg";
const DOCKER_REPO_URL: &str = "https://download.docker.com/linux/debian";

pub const PLEX_KEYRING: &str = "/usr/share/keyrings/plex.gpg";
pub const PLEX_SOURCE_LIST: &str = "/etc/apt/sources.list.d/plexmediaserver.list";
const PLEX_KEY_URL: &str = "https://downloads.plex.tv/plex-keys/PlexSign.key";
const PLEX_REPO_URL: &str = "https://downloads.plex.tv/repo/deb";

pub const ONEPASSWORD_KEYRING: &str = "/usr/share/keyrings/1password-archive-keyring.gpg";
pub const ONEPASSWORD_SOURCE_LIST: &str = "/etc/apt/sources.list.d/1password.list";
const ONEPASSWORD_KEY_URL: &str = "https://downloads.1password.com/linux/keys/1password.asc";
const ONEPASSWORD_REPO_URL: &str = "https://downloads.1password.com/linux/debian/amd64";
const ONEPASSWORD_POLICY_URL: &str =
    "https://downloads.1password.com/linux/debian/debsig/1password.pol";
/// Key id used by debsig-verify for 1Password packages
const ONEPASSWORD_DEBSIG_ID: &str = "AC2D62742012EA22";

/// Third-party APT repositories and their signing keys
pub struct RepositoryService {
    host: Arc<dyn HostSystem>,
}

impl RepositoryService {
    pub fn new(host: Arc<dyn HostSystem>) -> Self {
        Self { host }
    }

    fn step(&self, command: &str, check: Check, report: &mut RunReport) -> String {
        execute(
            self.host.as_ref(),
            CommandSpec::shell(command, check),
            report,
        )
        .stdout
    }

    /// Keyring, source list and index refresh for Docker's repository.
    ///
    /// Steps are strict: failures set the run's error flag. Writing the
    /// source list is the only step that aborts the run.
    pub fn setup_docker(&self, report: &mut RunReport) -> Result<()> {
        info!("Setting up Docker repository...");

        self.step(
            &format!("install -m 0755 -d {APT_KEYRINGS_DIR}"),
            Check::Strict,
            report,
        );

        if !self.host.path_exists(Path::new(DOCKER_KEYRING)) {
            info!("Adding Docker's official GPG key...");
            self.step(
                &format!("curl -fsSL {DOCKER_GPG_URL} | gpg --dearmor -o {DOCKER_KEYRING}"),
                Check::Strict,
                report,
            );
            self.step(&format!("chmod a+r {DOCKER_KEYRING}"), Check::Strict, report);
        }

        info!("Adding Docker repository to apt sources...");
        let codename = self.step(
            ". /etc/os-release && echo \"$VERSION_CODENAME\"",
            Check::Strict,
            report,
        );
        let arch = execute(
            self.host.as_ref(),
            CommandSpec::parse("dpkg --print-architecture", false, Check::Strict),
            report,
        )
        .stdout;

        self.host
            .write_file(
                Path::new(DOCKER_SOURCE_LIST),
                &format!("{}\n", docker_source_line(&arch, &codename)),
            )
            .context("adding Docker repository")?;

        self.step("apt update", Check::Strict, report);

        Ok(())
    }

    pub fn add_plex(&self, report: &mut RunReport) {
        info!("Adding Plex repository...");
        self.step(
            &format!("curl -fsSL {PLEX_KEY_URL} | gpg --dearmor | tee {PLEX_KEYRING} > /dev/null"),
            Check::Lenient,
            report,
        );
        self.step(
            &format!(
                "echo \"deb [signed-by={PLEX_KEYRING}] {PLEX_REPO_URL} public main\" | tee {PLEX_SOURCE_LIST} > /dev/null"
            ),
            Check::Lenient,
            report,
        );
    }

    /// Signing key, source list and debsig policy for 1Password
    pub fn add_onepassword(&self, report: &mut RunReport) {
        self.step(
            &format!(
                "curl -fsSL {ONEPASSWORD_KEY_URL} | gpg --dearmor --output {ONEPASSWORD_KEYRING}"
            ),
            Check::Lenient,
            report,
        );
        self.step(
            &format!(
                "echo \"deb [arch=amd64 signed-by={ONEPASSWORD_KEYRING}] {ONEPASSWORD_REPO_URL} stable main\" | tee {ONEPASSWORD_SOURCE_LIST} > /dev/null"
            ),
            Check::Lenient,
            report,
        );

        let policy_dir = format!("/etc/debsig/policies/{ONEPASSWORD_DEBSIG_ID}");
        let keyring_dir = format!("/usr/share/debsig/keyrings/{ONEPASSWORD_DEBSIG_ID}");

        self.step(&format!("mkdir -p {policy_dir}/"), Check::Lenient, report);
        self.step(
            &format!(
                "curl -fsSL {ONEPASSWORD_POLICY_URL} | tee {policy_dir}/1password.pol > /dev/null"
            ),
            Check::Lenient,
            report,
        );
        self.step(&format!("mkdir -p {keyring_dir}/"), Check::Lenient, report);
        self.step(
            &format!(
                "curl -fsSL {ONEPASSWORD_KEY_URL} | gpg --dearmor --output {keyring_dir}/debsig.gpg"
            ),
            Check::Lenient,
            report,
        );
    }
}

pub fn docker_source_line(arch: &str, codename: &str) -> String {
    format!("deb [arch={arch} signed-by={DOCKER_KEYRING}] {DOCKER_REPO_URL} {codename} stable")
}
