use clap::Parser;
use debsetup::cli::setup;
use debsetup::infra::config::{default_config_dir, expand_path, load_app_config};
use debsetup::infra::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    name = "debsetup",
    version,
    about = "Interactive installer for optional Debian packages"
)]
struct Cli {
    /// Extra config file, merged over /etc/debsetup/debsetup.toml and ./debsetup.toml
    #[arg(long, env = "DEBSETUP_CONFIG")]
    config: Option<PathBuf>,

    /// Log file (default: optional-packages.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Answer the package menu up front: "all", "none" or "1,3,5"
    #[arg(long, value_name = "SELECTION")]
    select: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_app_config(
        &default_config_dir(),
        &PathBuf::from("."),
        cli.config.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = cli
        .log_file
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(|| config.log_file());

    if let Err(e) = init_logging(&log_file, config.logging.level.as_deref()) {
        eprintln!("Error setting up logging: {e:#}");
        return ExitCode::FAILURE;
    }

    debug!("Starting with {:?}", cli);

    match setup::run(&config, cli.select) {
        Ok(report) => ExitCode::from(setup::finalize(&report, &log_file)),
        Err(e) => {
            error!("Error in main execution: {e:#}");
            debug!("Error details: {e:?}");
            ExitCode::FAILURE
        }
    }
}
