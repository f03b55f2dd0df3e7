use super::report::{RunReport, execute};
use crate::domain::{Check, CommandSpec, HostSystem};
use std::sync::Arc;

/// Queries and installs through dpkg/apt
pub struct AptService {
    host: Arc<dyn HostSystem>,
}

impl AptService {
    pub fn new(host: Arc<dyn HostSystem>) -> Self {
        Self { host }
    }

    /// True when dpkg lists the package with `ii` (installed) status
    pub fn is_installed(&self, package: &str) -> bool {
        let out = self.host.run(&CommandSpec::shell(
            format!("dpkg -l {package}"),
            Check::Lenient,
        ));
        out.success() && dpkg_reports_installed(&out.stdout)
    }

    /// True when the configured sources offer a `docker-ce` candidate
    pub fn docker_candidate_available(&self) -> bool {
        let out = self.host.run(&CommandSpec::shell(
            "apt-cache policy docker-ce",
            Check::Lenient,
        ));
        policy_has_candidate(&out.stdout)
    }

    pub fn install(&self, package: &str, report: &mut RunReport) {
        execute(
            self.host.as_ref(),
            CommandSpec::shell(format!("apt install -y {package}"), Check::Lenient),
            report,
        );
    }

    pub fn update(&self, report: &mut RunReport) {
        execute(
            self.host.as_ref(),
            CommandSpec::shell("apt update", Check::Lenient),
            report,
        );
    }

    pub fn update_quiet(&self, report: &mut RunReport) {
        execute(
            self.host.as_ref(),
            CommandSpec::shell("apt update > /dev/null", Check::Lenient),
            report,
        );
    }
}

pub fn dpkg_reports_installed(listing: &str) -> bool {
    listing.lines().any(|line| line.trim().starts_with("ii"))
}

/// `Candidate: (none)` means the package is known but not installable.
pub fn policy_has_candidate(policy: &str) -> bool {
    policy.lines().any(|line| {
        line.trim()
            .strip_prefix("Candidate:")
            .map(|value| {
                let value = value.trim();
                !value.is_empty() && value != "(none)"
            })
            .unwrap_or(false)
    })
}
