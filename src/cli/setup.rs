use crate::domain::{HostSystem, Prompter};
use crate::infra::config::AppConfig;
use crate::infra::logging::milestone;
use crate::infra::{ShellHost, TerminalPrompt};
use crate::services::{Installer, InstallerOptions, RunReport};
use anyhow::Result;
use chrono::Local;
use console::Color;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

pub fn run(config: &AppConfig, preset: Option<String>) -> Result<RunReport> {
    run_with(
        Arc::new(ShellHost::new()),
        Arc::new(TerminalPrompt::new()),
        config,
        preset,
    )
}

pub fn run_with(
    host: Arc<dyn HostSystem>,
    prompter: Arc<dyn Prompter>,
    config: &AppConfig,
    preset: Option<String>,
) -> Result<RunReport> {
    let options = InstallerOptions {
        extra: config.extra_packages().to_vec(),
        exclude: config.excluded_packages().to_vec(),
        preset,
    };

    Installer::new(host, prompter, options).run()
}

/// Prints the closing summary and returns the process exit code.
pub fn finalize(report: &RunReport, log_file: &Path) -> u8 {
    info!("{}", "-".repeat(40));
    info!("Script completed at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!(
        "Packages: {} selected, {} processed, {} already installed",
        report.selected, report.processed, report.skipped
    );

    if !report.warnings().is_empty() {
        warn!(
            "{} installation step(s) exited with an error, see the log for details.",
            report.warnings().len()
        );
    }

    if report.has_errors() {
        for failure in report.failures() {
            error!("Failed: {}", failure);
        }
        milestone("ERROR: There were errors during script execution.", Color::Red);
        error!("Please check the log file at {} for details.", log_file.display());
        return 1;
    }

    milestone("SUCCESS: Optional packages configured successfully.", Color::Green);
    info!("Log file is available at {}", log_file.display());
    0
}
