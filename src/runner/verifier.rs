//! The prerequisite verifier.
//!
//! Evaluates the checklist strictly in order, one check at a time. A failed
//! mandatory check stops the run immediately; optional checks only warn.
//! Nothing is rolled back: packages installed before a failure stay
//! installed.

use std::time::Instant;

use crate::config::{ArtifactConfig, LibraryConfig, PrereqConfig, Settings, ToolConfig};
use crate::error::{describe_exit, PrereqError, Result};
use crate::requirements::{
    extract_version, Check, CheckKind, CheckOutcome, Checklist, Host, InstallOutcome, Installer,
    Version,
};
use crate::shell::CommandOptions;
use crate::ui::UserInterface;

use super::report::{CheckRecord, RunReport};

/// Options for a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Install missing libraries and bootstrap the package manager.
    pub auto_install: bool,
    /// Treat a failed install as fatal immediately.
    pub strict_installs: bool,
    /// Capture upstream verifier output instead of passing it through.
    pub capture_upstream: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            auto_install: true,
            strict_installs: false,
            capture_upstream: false,
        }
    }
}

impl RunOptions {
    /// Options as configured in the checklist settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            auto_install: settings.auto_install,
            strict_installs: settings.strict_installs,
            capture_upstream: false,
        }
    }
}

/// Runs a checklist against a [`Host`].
pub struct Verifier<'a> {
    config: &'a PrereqConfig,
    checklist: Checklist,
    installer: Installer,
    options: RunOptions,
}

impl<'a> Verifier<'a> {
    /// Create a verifier for `config`.
    pub fn new(config: &'a PrereqConfig, options: RunOptions) -> Result<Self> {
        let checklist = Checklist::from_config(config)?;
        let installer = Installer::new(config.package_manager.clone(), config.interpreter());
        Ok(Self {
            config,
            checklist,
            installer,
            options,
        })
    }

    /// The checks this verifier evaluates, in order.
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Evaluate every check until the first fatal failure.
    pub fn run(&self, host: &mut dyn Host, ui: &mut dyn UserInterface) -> RunReport {
        let title = self.config.title();
        let mut report = RunReport::new(title);
        ui.show_header(title);

        tracing::debug!(
            "Verifying {} checks in {}",
            self.checklist.len(),
            host.project_root().display()
        );

        for check in self.checklist.iter() {
            let start = Instant::now();
            let outcome = self.evaluate(check, host, ui);
            let elapsed = start.elapsed().as_millis() as u64;
            tracing::debug!("{} -> {} in {}ms", check.name, outcome.label(), elapsed);

            self.render(check, &outcome, ui);
            report
                .records
                .push(CheckRecord::new(check, &outcome, elapsed));

            if let CheckOutcome::Failed { error } = &outcome {
                report.exit_code = error.exit_code();
                return report;
            }
        }

        self.show_banner(ui);
        report
    }

    /// Evaluate a single check.
    pub fn evaluate(
        &self,
        check: &Check,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> CheckOutcome {
        match &check.kind {
            CheckKind::Binary { tool } => self.check_binary(tool, host),
            CheckKind::VersionedBinary { tool, minimum } => {
                self.check_versioned_binary(tool, minimum, host)
            }
            CheckKind::PackageManager { .. } => self.check_package_manager(host, ui),
            CheckKind::Library { library } => self.check_library(library, host, ui),
            CheckKind::Upstream { upstream } => {
                self.check_upstream(&upstream.phase, &upstream.command, host, ui)
            }
            CheckKind::Artifact { artifact } => self.check_artifact(artifact, host),
            CheckKind::EnvVar { var } => match host.env_var(&var.name) {
                Some(value) if !value.trim().is_empty() => CheckOutcome::Passed {
                    detail: "set".to_string(),
                },
                _ => CheckOutcome::Warned {
                    message: format!("{} is not set", var.name),
                    hint: var.hint.clone(),
                },
            },
            CheckKind::OptionalLibrary { library } => {
                self.check_optional_library(library, host, ui)
            }
        }
    }

    fn check_binary(&self, tool: &ToolConfig, host: &mut dyn Host) -> CheckOutcome {
        match host.find_binary(tool.binary()) {
            Some(path) => CheckOutcome::Passed {
                detail: path.display().to_string(),
            },
            None => CheckOutcome::Failed {
                error: PrereqError::ToolMissing {
                    tool: tool.name.clone(),
                    hint: tool.install_hint.clone(),
                },
            },
        }
    }

    fn check_versioned_binary(
        &self,
        tool: &ToolConfig,
        minimum: &Version,
        host: &mut dyn Host,
    ) -> CheckOutcome {
        if host.find_binary(tool.binary()).is_none() {
            return self.check_binary(tool, host);
        }

        let command = tool
            .version_command
            .clone()
            .unwrap_or_else(|| format!("{} --version", tool.binary()));
        let output = match host.execute(&command, &CommandOptions::captured()) {
            Ok(result) => result.combined_output(),
            Err(e) => {
                tracing::debug!("Version command failed to start: {}", e);
                String::new()
            }
        };

        let Some(found) = extract_version(&output) else {
            return CheckOutcome::Failed {
                error: PrereqError::VersionUnparseable {
                    tool: tool.name.clone(),
                    output: output.trim().lines().next().unwrap_or("").to_string(),
                },
            };
        };

        if found.meets(minimum) {
            CheckOutcome::Passed {
                detail: found.to_string(),
            }
        } else {
            CheckOutcome::Failed {
                error: PrereqError::VersionTooOld {
                    tool: tool.name.clone(),
                    found: found.to_string(),
                    required: minimum.to_string(),
                },
            }
        }
    }

    fn check_package_manager(
        &self,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> CheckOutcome {
        let Some(manager) = self.installer.manager() else {
            return CheckOutcome::Passed {
                detail: "not configured".to_string(),
            };
        };
        let name = manager.name.clone();

        if self.installer.is_manager_available(host) {
            return CheckOutcome::Passed {
                detail: "available".to_string(),
            };
        }
        if !self.options.auto_install {
            return CheckOutcome::Warned {
                message: format!("{} is not installed", name),
                hint: Some(format!("Installs will use: {}", self.installer.fallback())),
            };
        }

        let mut spinner = ui.start_spinner(&format!("Installing {}...", name));
        match self.installer.ensure_package_manager(host) {
            InstallOutcome::AlreadyPresent => {
                spinner.finish_clear();
                CheckOutcome::Passed {
                    detail: "available".to_string(),
                }
            }
            InstallOutcome::Installed { command } => {
                spinner.finish_clear();
                CheckOutcome::Installed { detail: command }
            }
            InstallOutcome::Failed { code, output, .. } => {
                spinner.finish_error(&format!("{} bootstrap failed", name));
                show_command_output(&output, ui);
                CheckOutcome::Warned {
                    message: format!("Could not install {} ({})", name, describe_exit(&code)),
                    hint: Some(format!("Installs will use: {}", self.installer.fallback())),
                }
            }
            InstallOutcome::Skipped { reason } => {
                spinner.finish_clear();
                CheckOutcome::Warned {
                    message: reason,
                    hint: Some(format!("Installs will use: {}", self.installer.fallback())),
                }
            }
        }
    }

    fn check_library(
        &self,
        library: &LibraryConfig,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> CheckOutcome {
        let missing = |attempted: bool| CheckOutcome::Failed {
            error: PrereqError::LibraryMissing {
                module: library.module.clone(),
                package: library.package().to_string(),
                attempted,
            },
        };

        if self.can_import(&library.module, &[], host) {
            return CheckOutcome::Passed {
                detail: "importable".to_string(),
            };
        }
        if !self.options.auto_install {
            return missing(false);
        }

        let outcome = self.install_with_spinner(library.package(), host, ui);
        if let InstallOutcome::Failed { command, code, .. } = &outcome {
            if self.options.strict_installs {
                return CheckOutcome::Failed {
                    error: PrereqError::InstallFailed {
                        package: library.package().to_string(),
                        command: command.clone(),
                        code: *code,
                    },
                };
            }
        }

        if !self.can_import(&library.module, &[], host) {
            return missing(true);
        }
        match outcome {
            InstallOutcome::Installed { command } => CheckOutcome::Installed { detail: command },
            _ => CheckOutcome::Passed {
                detail: "importable".to_string(),
            },
        }
    }

    fn check_upstream(
        &self,
        phase: &str,
        command: &str,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> CheckOutcome {
        let options = if self.options.capture_upstream {
            CommandOptions::captured()
        } else {
            ui.message(&format!("Verifying {}...", phase));
            CommandOptions::inherited()
        };

        match host.execute(command, &options) {
            Ok(result) if result.success => CheckOutcome::Passed {
                detail: "verified".to_string(),
            },
            Ok(result) => {
                tracing::debug!(
                    "{} verifier exited with {:?}: {}",
                    phase,
                    result.exit_code,
                    result.combined_output().trim()
                );
                CheckOutcome::Failed {
                    error: PrereqError::UpstreamFailed {
                        phase: phase.to_string(),
                        code: result.exit_code,
                    },
                }
            }
            Err(error) => CheckOutcome::Failed { error },
        }
    }

    fn check_artifact(&self, artifact: &ArtifactConfig, host: &mut dyn Host) -> CheckOutcome {
        if self.can_import(&artifact.module, &artifact.symbols, host) {
            return CheckOutcome::Passed {
                detail: "importable".to_string(),
            };
        }

        let symbols = if artifact.symbols.is_empty() {
            artifact.module.clone()
        } else {
            artifact.symbols.join(", ")
        };
        CheckOutcome::Failed {
            error: PrereqError::ArtifactMissing {
                module: artifact.module.clone(),
                symbols,
                phase: artifact.phase.clone(),
                hint: artifact.hint.clone(),
            },
        }
    }

    fn check_optional_library(
        &self,
        library: &LibraryConfig,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> CheckOutcome {
        if self.can_import(&library.module, &[], host) {
            return CheckOutcome::Passed {
                detail: "importable".to_string(),
            };
        }

        if self.options.auto_install {
            let outcome = self.install_with_spinner(library.package(), host, ui);
            if let InstallOutcome::Installed { command } = outcome {
                if self.can_import(&library.module, &[], host) {
                    return CheckOutcome::Installed { detail: command };
                }
            }
        }

        CheckOutcome::Warned {
            message: format!("Optional module {} is not available", library.module),
            hint: Some(self.installer.install_command(host, library.package())),
        }
    }

    fn install_with_spinner(
        &self,
        package: &str,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> InstallOutcome {
        let mut spinner = ui.start_spinner(&format!("Installing {}...", package));
        let outcome = self.installer.install(host, package);
        match &outcome {
            InstallOutcome::Failed { code, output, .. } => {
                spinner.finish_error(&format!(
                    "Installing {} failed ({})",
                    package,
                    describe_exit(code)
                ));
                show_command_output(output, ui);
            }
            _ => spinner.finish_clear(),
        }
        outcome
    }

    fn can_import(&self, module: &str, symbols: &[String], host: &mut dyn Host) -> bool {
        let command = import_command(self.config.interpreter(), module, symbols);
        host.execute(&command, &CommandOptions::captured())
            .map(|r| r.success)
            .unwrap_or(false)
    }

    fn render(&self, check: &Check, outcome: &CheckOutcome, ui: &mut dyn UserInterface) {
        let mode = ui.output_mode();
        match outcome {
            CheckOutcome::Passed { detail } => {
                if mode.shows_passed_checks() {
                    ui.success(&format!("{} ({})", check.name, detail));
                }
            }
            CheckOutcome::Installed { detail } => {
                ui.success(&format!("{} installed ({})", check.name, detail));
            }
            CheckOutcome::Warned { message, hint } => {
                ui.warning(message);
                if let Some(hint) = hint {
                    if mode.shows_status() {
                        ui.show_hint(hint);
                    }
                }
            }
            CheckOutcome::Failed { error } => {
                ui.error(&error.to_string());
                if let Some(hint) = error.hint() {
                    ui.show_hint(&hint);
                }
            }
        }
    }

    fn show_banner(&self, ui: &mut dyn UserInterface) {
        match &self.config.banner {
            Some(banner) => {
                ui.show_header(&banner.title);
                for line in &banner.lines {
                    ui.message(line);
                }
            }
            None => ui.success("All prerequisites satisfied"),
        }
    }
}

/// Echo captured installer output in verbose mode.
fn show_command_output(output: &str, ui: &mut dyn UserInterface) {
    if !ui.output_mode().shows_command_output() {
        return;
    }
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        ui.message(&format!("    {}", line));
    }
}

/// The interpreter invocation that imports `symbols` from `module`.
///
/// Module and symbol names are validated as dotted identifiers when the
/// configuration is loaded, so they are safe to place inside the quotes.
pub fn import_command(interpreter: &str, module: &str, symbols: &[String]) -> String {
    if symbols.is_empty() {
        format!("{} -c \"import {}\"", interpreter, module)
    } else {
        format!(
            "{} -c \"from {} import {}\"",
            interpreter,
            module,
            symbols.join(", ")
        )
    }
}
