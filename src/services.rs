mod apt_service;
mod installer;
pub mod menu;
mod report;
pub mod repository_service;

pub use apt_service::AptService;
pub use installer::{Installer, InstallerOptions};
pub use menu::PackageMenu;
pub use report::RunReport;
pub use repository_service::RepositoryService;
