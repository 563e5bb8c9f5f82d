//! Schema command implementation.
//!
//! The `prereq schema` command prints the JSON Schema of the checklist
//! file so editors can validate and complete it.

use crate::config::PrereqConfig;
use crate::error::{PrereqError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl SchemaCommand {
    /// The schema as pretty-printed JSON.
    pub fn render() -> Result<String> {
        let schema = schemars::schema_for!(PrereqConfig);
        serde_json::to_string_pretty(&schema)
            .map_err(|e| PrereqError::Other(anyhow::anyhow!("Failed to render schema: {}", e)))
    }
}

impl Command for SchemaCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        println!("{}", Self::render()?);
        Ok(CommandResult::success())
    }
}
