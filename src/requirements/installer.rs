//! Package installation.
//!
//! The installer bootstraps the configured package manager and installs
//! Python packages with it, falling back to a plain pip invocation when the
//! manager is unavailable. Every action returns an [`InstallOutcome`];
//! deciding whether a failed install is fatal is left to the runner.
//!
//! Install commands take the form `<install> [<system_flag>] <package>`.
//! The system flag is only passed when none of the configured environment
//! markers (e.g. `.venv`) exist under the project root, so packages land in
//! the project environment when there is one.

use crate::config::PackageManagerConfig;
use crate::shell::CommandOptions;

use super::host::Host;
use super::status::InstallOutcome;

/// Installs packages through a [`Host`].
#[derive(Debug, Clone)]
pub struct Installer {
    manager: Option<PackageManagerConfig>,
    fallback: String,
}

impl Installer {
    /// Create an installer for an optional package manager.
    ///
    /// Without a configured fallback, `<interpreter> -m pip install --quiet`
    /// is used when the manager is unavailable.
    pub fn new(manager: Option<PackageManagerConfig>, interpreter: &str) -> Self {
        let fallback = manager
            .as_ref()
            .and_then(|m| m.fallback.clone())
            .unwrap_or_else(|| format!("{} -m pip install --quiet", interpreter));
        Self { manager, fallback }
    }

    /// The configured package manager, if any.
    pub fn manager(&self) -> Option<&PackageManagerConfig> {
        self.manager.as_ref()
    }

    /// Whether the package manager binary is on the (augmented) search path.
    pub fn is_manager_available(&self, host: &mut dyn Host) -> bool {
        match &self.manager {
            Some(manager) => {
                host.add_search_paths(&manager.extra_paths);
                host.find_binary(&manager.name).is_some()
            }
            None => false,
        }
    }

    /// The installer used when the package manager is unavailable.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Make sure the package manager binary is available.
    ///
    /// The manager's extra paths are added to the search path first, so a
    /// manager bootstrapped by an earlier run is found without reinstalling.
    pub fn ensure_package_manager(&self, host: &mut dyn Host) -> InstallOutcome {
        let Some(manager) = &self.manager else {
            return InstallOutcome::Skipped {
                reason: "no package manager configured".to_string(),
            };
        };

        host.add_search_paths(&manager.extra_paths);
        if host.find_binary(&manager.name).is_some() {
            tracing::debug!("Package manager {} already present", manager.name);
            return InstallOutcome::AlreadyPresent;
        }

        let Some(bootstrap) = &manager.bootstrap else {
            return InstallOutcome::Skipped {
                reason: format!("{} is not installed and has no bootstrap command", manager.name),
            };
        };

        tracing::debug!("Bootstrapping {} with: {}", manager.name, bootstrap);
        let (code, output) = match host.execute(bootstrap, &CommandOptions::captured()) {
            Ok(result) if result.success => (None, result.combined_output()),
            Ok(result) => (result.exit_code.or(Some(-1)), result.combined_output()),
            Err(e) => {
                tracing::debug!("Bootstrap could not start: {}", e);
                (Some(-1), e.to_string())
            }
        };

        // The bootstrap script may have written to a directory not yet on PATH
        host.add_search_paths(&manager.extra_paths);

        match (code, host.find_binary(&manager.name)) {
            (None, Some(_)) => InstallOutcome::Installed {
                command: bootstrap.clone(),
            },
            (None, None) => InstallOutcome::Failed {
                command: bootstrap.clone(),
                code: Some(0),
                output,
            },
            (Some(code), _) => InstallOutcome::Failed {
                command: bootstrap.clone(),
                code: (code >= 0).then_some(code),
                output,
            },
        }
    }

    /// Whether installs through the manager pass the system flag.
    pub fn uses_system_flag(&self, host: &dyn Host) -> bool {
        let Some(manager) = &self.manager else {
            return false;
        };
        if manager.system_flag.is_none() {
            return false;
        }
        let marker = manager
            .environment_markers
            .iter()
            .find(|m| host.project_path_exists(m));
        if let Some(marker) = marker {
            tracing::debug!("Found environment marker {}", marker.display());
        }
        marker.is_none()
    }

    /// The command that would install `package` right now.
    pub fn install_command(&self, host: &dyn Host, package: &str) -> String {
        match &self.manager {
            Some(manager) if host.find_binary(&manager.name).is_some() => {
                let mut parts = vec![manager.install.clone()];
                if self.uses_system_flag(host) {
                    if let Some(flag) = &manager.system_flag {
                        parts.push(flag.clone());
                    }
                }
                parts.push(package.to_string());
                parts.join(" ")
            }
            _ => format!("{} {}", self.fallback, package),
        }
    }

    /// Install `package`, capturing the installer's output.
    pub fn install(&self, host: &mut dyn Host, package: &str) -> InstallOutcome {
        let command = self.install_command(host, package);
        tracing::debug!("Installing {} with: {}", package, command);

        match host.execute(&command, &CommandOptions::captured()) {
            Ok(result) if result.success => InstallOutcome::Installed { command },
            Ok(result) => {
                tracing::debug!(
                    "Install of {} failed with {:?}: {}",
                    package,
                    result.exit_code,
                    result.combined_output().trim()
                );
                InstallOutcome::Failed {
                    command,
                    code: result.exit_code,
                    output: result.combined_output(),
                }
            }
            Err(e) => {
                tracing::debug!("Install of {} could not start: {}", package, e);
                InstallOutcome::Failed {
                    command,
                    code: None,
                    output: e.to_string(),
                }
            }
        }
    }
}
