//! List command implementation.
//!
//! The `prereq list` command prints the checklist in evaluation order
//! without running anything.

use std::path::{Path, PathBuf};

use crate::error::{PrereqError, Result};
use crate::requirements::{Check, Checklist};
use crate::ui::{OutputMode, PrereqTheme, UserInterface};

use super::dispatcher::{load_checklist_config, Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_override: Option<&Path>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
        }
    }

    fn format_check(theme: &PrereqTheme, index: usize, check: &Check) -> String {
        let severity = if check.is_mandatory() {
            theme.dim.apply_to("required")
        } else {
            theme.warning.apply_to("optional")
        };
        format!(
            "  {:>2}. {} {} {}",
            index + 1,
            theme.highlight.apply_to(&check.name),
            theme.dim.apply_to(format!("[{}]", check.kind.label())),
            severity
        )
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config =
            match load_checklist_config(&self.project_root, self.config_override.as_deref()) {
                Ok(c) => c,
                Err(PrereqError::ConfigNotFound { .. }) => {
                    ui.error("No configuration found. Run 'prereq init' first.");
                    return Ok(CommandResult::failure(2));
                }
                Err(e) => return Err(e),
            };

        // Apply config default_output when no CLI flag was explicitly set
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(config.settings.default_output.into());
        }

        let checklist = Checklist::from_config(&config)?;
        let theme = PrereqTheme::new();

        ui.show_header(config.title());
        if checklist.is_empty() {
            ui.message("  No checks configured.");
            return Ok(CommandResult::success());
        }

        for (index, check) in checklist.iter().enumerate() {
            ui.message(&Self::format_check(&theme, index, check));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".prereq");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    #[test]
    fn lists_checks_in_order() {
        let temp = setup_project(
            r#"
app_name: Phase 4
env:
  - name: ANTHROPIC_API_KEY
tools:
  - name: claude
"#,
        );
        let mut ui = MockUI::new();
        let result = ListCommand::new(temp.path(), None).execute(&mut ui).unwrap();

        assert!(result.success);
        let messages = ui.messages();
        let claude = messages.iter().position(|m| m.contains("claude")).unwrap();
        let key = messages
            .iter()
            .position(|m| m.contains("ANTHROPIC_API_KEY"))
            .unwrap();
        assert!(claude < key);
        assert!(messages[claude].contains("1."));
        assert!(messages[claude].contains("required"));
        assert!(messages[key].contains("optional"));
    }

    #[test]
    fn empty_checklist_says_so() {
        let temp = setup_project("app_name: Empty\n");
        let mut ui = MockUI::new();
        ListCommand::new(temp.path(), None).execute(&mut ui).unwrap();
        assert!(ui.has_message("No checks configured"));
    }

    #[test]
    fn missing_config_exits_2() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = ListCommand::new(temp.path(), None).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("prereq init"));
    }
}
