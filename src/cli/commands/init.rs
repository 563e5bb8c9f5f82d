//! Init command implementation.
//!
//! The `prereq init` command writes `.prereq/config.yml` from a built-in
//! template.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::loader::LOCAL_CONFIG_FILE;
use crate::config::{
    project_config_path, template_names, template_source, CONFIG_DIR, DEFAULT_TEMPLATE,
};
use crate::error::{PrereqError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InitArgs {
        &self.args
    }

    fn template_name(&self) -> &str {
        self.args.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    /// Update gitignore to exclude local overrides.
    fn update_gitignore(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let gitignore_entry = format!("{}/{}", CONFIG_DIR, LOCAL_CONFIG_FILE);
        let gitignore_path = self.project_root.join(".gitignore");

        if gitignore_path.exists() {
            let content = fs::read_to_string(&gitignore_path)?;
            if !content.lines().any(|line| line.trim() == gitignore_entry) {
                let new_content = if content.is_empty() || content.ends_with('\n') {
                    format!("{}{}\n", content, gitignore_entry)
                } else {
                    format!("{}\n{}\n", content, gitignore_entry)
                };
                fs::write(&gitignore_path, new_content)?;
                ui.message(&format!("Added {} to .gitignore", gitignore_entry));
            }
        }

        Ok(())
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config_path = project_config_path(&self.project_root);
        if config_path.exists() && !self.args.force {
            ui.warning("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        let name = self.template_name();
        let source = match template_source(name) {
            Ok(source) => source,
            Err(PrereqError::ConfigNotFound { .. }) => {
                ui.error(&format!(
                    "Unknown template '{}'. Available: {}",
                    name,
                    template_names().join(", ")
                ));
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&config_path, source)?;
        tracing::debug!("Wrote {} from template {}", config_path.display(), name);

        self.update_gitignore(ui)?;

        ui.success(&format!("Created {}/config.yml ({} template)", CONFIG_DIR, name));
        ui.message("Run 'prereq check' to verify the environment.");

        Ok(CommandResult::success())
    }
}
