use crate::domain::package::is_valid_package_name;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "debsetup.toml";
pub const DEFAULT_LOG_FILE: &str = "optional-packages.log";

pub fn default_config_dir() -> PathBuf {
    PathBuf::from("/etc/debsetup")
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log file path, `~` is expanded
    pub file: Option<PathBuf>,
    /// Filter directive for the file log (e.g. "debug", "info")
    pub level: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    /// Additional apt packages offered in the menu
    pub extra: Option<Vec<String>>,
    /// Catalog entries hidden from the menu
    pub exclude: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub packages: PackagesConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Scalars from `other` win; package lists are unioned.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(file) = other.logging.file {
            self.logging.file = Some(file);
        }
        if let Some(level) = other.logging.level {
            self.logging.level = Some(level);
        }

        merge_list(&mut self.packages.extra, other.packages.extra);
        merge_list(&mut self.packages.exclude, other.packages.exclude);
    }

    pub fn validate(&self) -> Result<()> {
        for name in self.extra_packages() {
            if !is_valid_package_name(name) {
                bail!("Invalid package name '{}' in [packages].extra", name);
            }
        }
        Ok(())
    }

    pub fn extra_packages(&self) -> &[String] {
        self.packages.extra.as_deref().unwrap_or_default()
    }

    pub fn excluded_packages(&self) -> &[String] {
        self.packages.exclude.as_deref().unwrap_or_default()
    }

    pub fn log_file(&self) -> PathBuf {
        match &self.logging.file {
            Some(path) => expand_path(path),
            None => PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn merge_list(current: &mut Option<Vec<String>>, incoming: Option<Vec<String>>) {
    let Some(incoming) = incoming else {
        return;
    };

    let list = current.get_or_insert_with(Vec::new);
    for item in incoming {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}

pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.to_string_lossy().as_ref()).into_owned())
}

pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("parsing {:?}", path))
}

/// Loads `<global_dir>/debsetup.toml`, then `<local_dir>/debsetup.toml`, then
/// an explicit file, each merged over the previous one. Only the explicit
/// file is required to exist.
pub fn load_app_config(
    global_dir: &Path,
    local_dir: &Path,
    explicit: Option<&Path>,
) -> Result<AppConfig> {
    let mut app_config = AppConfig::default();

    for candidate in [
        global_dir.join(DEFAULT_CONFIG_NAME),
        local_dir.join(DEFAULT_CONFIG_NAME),
    ] {
        if candidate.exists() {
            debug!("Loading config from {:?}", candidate);
            app_config.merge(load_config_file(&candidate)?);
        }
    }

    if let Some(path) = explicit {
        let path = expand_path(path);
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        debug!("Loading config from {:?}", path);
        app_config.merge(load_config_file(&path)?);
    }

    app_config.validate()?;
    Ok(app_config)
}
