//! Check command implementation.
//!
//! The `prereq check` command (also the default) evaluates the checklist
//! and exits non-zero on the first unmet mandatory prerequisite.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::PrereqConfig;
use crate::error::Result;
use crate::requirements::{Host, SystemHost};
use crate::runner::{RunOptions, RunReport, Verifier};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{load_checklist_config, Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Run options after applying command-line overrides to `config`.
    pub fn run_options(&self, config: &PrereqConfig) -> RunOptions {
        let mut options = RunOptions::from_settings(&config.settings);
        if self.args.no_install {
            options.auto_install = false;
        }
        if self.args.strict_installs {
            options.strict_installs = true;
        }
        options.capture_upstream = self.args.json;
        options
    }

    /// Run the checklist against an explicit host.
    pub fn run_with_host(
        &self,
        config: &PrereqConfig,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> Result<RunReport> {
        if self.args.json {
            // Keep stdout for the report
            ui.set_output_mode(OutputMode::Silent);
        } else if ui.output_mode() == OutputMode::Normal {
            // Apply config default_output when no CLI flag was explicitly set
            ui.set_output_mode(config.settings.default_output.into());
        }

        let verifier = Verifier::new(config, self.run_options(config))?;
        Ok(verifier.run(host, ui))
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_checklist_config(&self.project_root, self.config_override.as_deref())?;
        let mut host = SystemHost::new(&self.project_root);

        let report = self.run_with_host(&config, &mut host, ui)?;
        if self.args.json {
            println!("{}", report.to_json()?);
        }

        if report.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::requirements::MockHost;
    use crate::ui::MockUI;

    fn config(yaml: &str) -> PrereqConfig {
        parse_config(yaml, Path::new("test.yml")).unwrap()
    }

    #[test]
    fn flags_override_settings() {
        let cmd = CheckCommand::new(
            Path::new("/p"),
            None,
            CheckArgs {
                json: true,
                no_install: true,
                strict_installs: true,
            },
        );
        let options = cmd.run_options(&config("settings:\n  auto_install: true\n"));
        assert!(!options.auto_install);
        assert!(options.strict_installs);
        assert!(options.capture_upstream);
    }

    #[test]
    fn settings_apply_without_flags() {
        let cmd = CheckCommand::new(Path::new("/p"), None, CheckArgs::default());
        let options = cmd.run_options(&config("settings:\n  strict_installs: true\n"));
        assert!(options.auto_install);
        assert!(options.strict_installs);
    }

    #[test]
    fn json_silences_ui() {
        let cmd = CheckCommand::new(
            Path::new("/p"),
            None,
            CheckArgs {
                json: true,
                ..Default::default()
            },
        );
        let mut host = MockHost::new("/p");
        let mut ui = MockUI::new();

        let report = cmd
            .run_with_host(&config("app_name: Demo\n"), &mut host, &mut ui)
            .unwrap();
        assert!(report.success());
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }

    #[test]
    fn default_output_applies_in_normal_mode() {
        let cmd = CheckCommand::new(Path::new("/p"), None, CheckArgs::default());
        let mut host = MockHost::new("/p");
        let mut ui = MockUI::new();

        cmd.run_with_host(
            &config("settings:\n  default_output: quiet\n"),
            &mut host,
            &mut ui,
        )
        .unwrap();
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn explicit_mode_wins_over_config() {
        let cmd = CheckCommand::new(Path::new("/p"), None, CheckArgs::default());
        let mut host = MockHost::new("/p");
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        cmd.run_with_host(
            &config("settings:\n  default_output: quiet\n"),
            &mut host,
            &mut ui,
        )
        .unwrap();
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn failing_run_reports_exit_code() {
        let cmd = CheckCommand::new(Path::new("/p"), None, CheckArgs::default());
        let mut host = MockHost::new("/p");
        host.respond("./verify.sh", 4, "");
        let mut ui = MockUI::new();

        let report = cmd
            .run_with_host(
                &config("upstream:\n  - phase: Phase 1\n    command: ./verify.sh\n"),
                &mut host,
                &mut ui,
            )
            .unwrap();
        assert_eq!(report.exit_code, 4);
    }
}
