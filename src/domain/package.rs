use super::Selection;

/// Packages offered on every host
pub const BASE_PACKAGES: &[&str] = &[
    "1password-cli",
    "bitwarden-cli",
    "certbot",
    "cmake",
    "cockpit",
    "fail2ban",
    "fdupes",
    "ffmpeg",
    "nginx",
    "nodejs",
    "npm",
    "nvm",
    "pandoc",
    "rclone",
    "timeshift",
];

/// What the `docker` menu entry installs
pub const DOCKER_COMPONENTS: [&str; 5] = [
    "containerd.io",
    "docker-buildx-plugin",
    "docker-ce",
    "docker-ce-cli",
    "docker-compose-plugin",
];

pub const DOCKER_ENTRY: &str = "docker";
pub const PLEX_ENTRY: &str = "plex";

/// Install strategy for a resolved package name.
///
/// `docker` never reaches the installer as itself when Docker is offered;
/// it is expanded into [`DOCKER_COMPONENTS`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Apt,
    Plex,
    BitwardenCli,
    OnePasswordCli,
    Nvm,
}

impl PackageKind {
    pub fn of(name: &str) -> Self {
        match name {
            PLEX_ENTRY => Self::Plex,
            "bitwarden-cli" => Self::BitwardenCli,
            "1password-cli" => Self::OnePasswordCli,
            "nvm" => Self::Nvm,
            _ => Self::Apt,
        }
    }
}

/// The sorted list of menu entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<String>,
    docker_available: bool,
}

impl Catalog {
    pub fn build(extra: &[String], exclude: &[String], docker_available: bool) -> Self {
        let mut entries: Vec<String> = BASE_PACKAGES.iter().map(|p| p.to_string()).collect();
        entries.extend(extra.iter().cloned());

        if docker_available {
            entries.push(DOCKER_ENTRY.to_string());
        }
        entries.push(PLEX_ENTRY.to_string());

        entries.retain(|name| !exclude.contains(name));
        entries.sort();
        entries.dedup();

        Self {
            entries,
            docker_available,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn docker_available(&self) -> bool {
        self.docker_available
    }

    /// Resolves a selection into package names, in menu order.
    ///
    /// `docker` is replaced in place by its components.
    pub fn expand(&self, selection: &Selection) -> Vec<String> {
        let mut resolved: Vec<String> = Vec::new();

        for index in selection.iter() {
            let Some(entry) = self.entries.get(index) else {
                continue;
            };

            if entry == DOCKER_ENTRY && self.docker_available {
                for component in DOCKER_COMPONENTS {
                    push_unique(&mut resolved, component);
                }
            } else {
                push_unique(&mut resolved, entry);
            }
        }

        resolved
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

/// Debian policy: lowercase alphanumerics plus `+ - .`, starting with an
/// alphanumeric, at least two characters long.
pub fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return false;
    }

    name.len() >= 2
        && chars.all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_without_docker() {
        let catalog = Catalog::build(&[], &[], false);

        assert_eq!(catalog.len(), BASE_PACKAGES.len() + 1);
        assert!(catalog.entries().contains(&"plex".to_string()));
        assert!(!catalog.entries().contains(&"docker".to_string()));
    }

    #[test]
    fn test_catalog_is_sorted() {
        let catalog = Catalog::build(&[], &[], true);
        let entries = catalog.entries();

        assert_eq!(entries.first().map(String::as_str), Some("1password-cli"));
        assert_eq!(entries.last().map(String::as_str), Some("timeshift"));
        assert!(entries.windows(2).all(|w| w[0] < w[1]));

        let docker = entries.iter().position(|e| e == "docker").unwrap();
        assert_eq!(entries[docker - 1], "cockpit");
    }

    #[test]
    fn test_catalog_extra_and_exclude() {
        let catalog = Catalog::build(
            &["htop".to_string(), "cmake".to_string()],
            &["timeshift".to_string(), "plex".to_string()],
            false,
        );
        let entries = catalog.entries();

        assert!(entries.contains(&"htop".to_string()));
        assert!(!entries.contains(&"timeshift".to_string()));
        assert!(!entries.contains(&"plex".to_string()));
        assert_eq!(entries.iter().filter(|e| *e == "cmake").count(), 1);
    }

    #[test]
    fn test_exclude_removes_docker_entry() {
        let catalog = Catalog::build(&[], &["docker".to_string()], true);

        assert!(catalog.docker_available());
        assert!(!catalog.entries().contains(&"docker".to_string()));
        assert!(catalog.entries().contains(&"plex".to_string()));
    }

    #[test]
    fn test_expand_docker_umbrella() {
        let catalog = Catalog::build(&[], &[], true);
        let docker = catalog.entries().iter().position(|e| e == "docker").unwrap();

        let selection = Selection::parse(&(docker + 1).to_string(), catalog.len()).unwrap();
        let resolved = catalog.expand(&selection);

        assert_eq!(resolved, DOCKER_COMPONENTS.map(String::from).to_vec());
    }

    #[test]
    fn test_expand_keeps_menu_order() {
        let catalog = Catalog::build(&[], &[], true);
        // 3 = certbot, 6 = docker, 1 = 1password-cli
        let selection = Selection::parse("6,3,1", catalog.len()).unwrap();
        let resolved = catalog.expand(&selection);

        assert_eq!(resolved[0], "1password-cli");
        assert_eq!(resolved[1], "certbot");
        assert_eq!(&resolved[2..], DOCKER_COMPONENTS.map(String::from).as_slice());
    }

    #[test]
    fn test_expand_all_without_docker() {
        let catalog = Catalog::build(&[], &[], false);
        let resolved = catalog.expand(&Selection::all(catalog.len()));

        assert_eq!(resolved, catalog.entries().to_vec());
    }

    #[test]
    fn test_expand_none() {
        let catalog = Catalog::build(&[], &[], true);
        assert!(catalog.expand(&Selection::none()).is_empty());
    }

    #[test]
    fn test_docker_component_listed_as_extra_is_not_duplicated() {
        let catalog = Catalog::build(&["docker-ce".to_string()], &[], true);
        let resolved = catalog.expand(&Selection::all(catalog.len()));

        assert_eq!(resolved.iter().filter(|p| *p == "docker-ce").count(), 1);
    }

    #[test]
    fn test_package_kind() {
        assert_eq!(PackageKind::of("plex"), PackageKind::Plex);
        assert_eq!(PackageKind::of("bitwarden-cli"), PackageKind::BitwardenCli);
        assert_eq!(PackageKind::of("1password-cli"), PackageKind::OnePasswordCli);
        assert_eq!(PackageKind::of("nvm"), PackageKind::Nvm);
        assert_eq!(PackageKind::of("docker"), PackageKind::Apt);
        assert_eq!(PackageKind::of("docker-ce"), PackageKind::Apt);
        assert_eq!(PackageKind::of("nginx"), PackageKind::Apt);
    }

    #[test]
    fn test_package_name_validation() {
        assert!(is_valid_package_name("htop"));
        assert!(is_valid_package_name("g++"));
        assert!(is_valid_package_name("containerd.io"));
        assert!(is_valid_package_name("1password-cli"));

        assert!(!is_valid_package_name(""));
        assert!(!is_valid_package_name("a"));
        assert!(!is_valid_package_name("Htop"));
        assert!(!is_valid_package_name("-htop"));
        assert!(!is_valid_package_name("htop; rm -rf /"));
    }
}
