//! Configuration validation rules.
//!
//! This module validates a checklist for correctness:
//! - Tools need a name, unique names and a parseable minimum version
//! - Module and symbol names must be plain identifiers (they end up in `-c` code)
//! - Package manager, upstream and env entries need their required fields

use crate::config::schema::PrereqConfig;
use crate::error::{PrereqError, Result};
use crate::requirements::version::Version;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static MODULE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("MODULE_PATH must compile")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("IDENTIFIER must compile"));

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every error rather than stopping at the first one, so users
/// can fix multiple issues at once.
pub fn validate_config(config: &PrereqConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_tools(config));
    errors.extend(validate_package_manager(config));
    errors.extend(validate_modules(config));
    errors.extend(validate_upstream(config));
    errors.extend(validate_env(config));

    errors
}

fn validate_tools(config: &PrereqConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for tool in &config.tools {
        if tool.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "tool-name-empty",
                "Every tool needs a 'name'".to_string(),
            ));
            continue;
        }

        if !seen.insert(tool.name.as_str()) {
            errors.push(ValidationError::new(
                "duplicate-tool",
                format!("Tool '{}' is declared more than once", tool.name),
            ));
        }

        if let Some(minimum) = &tool.minimum_version {
            if let Err(e) = minimum.parse::<Version>() {
                errors.push(ValidationError::new(
                    "invalid-minimum-version",
                    format!("Tool '{}' has {}", tool.name, e),
                ));
            }
        }
    }

    errors
}

fn validate_package_manager(config: &PrereqConfig) -> Vec<ValidationError> {
    let Some(pm) = &config.package_manager else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    if pm.name.trim().is_empty() {
        errors.push(ValidationError::new(
            "package-manager-name-empty",
            "package_manager needs a 'name'".to_string(),
        ));
    }
    if pm.install.trim().is_empty() {
        errors.push(ValidationError::new(
            "package-manager-install-empty",
            format!("package_manager '{}' needs an 'install' command", pm.name),
        ));
    }
    errors
}

fn validate_modules(config: &PrereqConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let libraries = config.libraries.iter().chain(&config.optional_libraries);
    for lib in libraries {
        if !MODULE_PATH.is_match(&lib.module) {
            errors.push(ValidationError::new(
                "invalid-module",
                format!("'{}' is not a valid module name", lib.module),
            ));
        }
    }

    for artifact in &config.artifacts {
        if !MODULE_PATH.is_match(&artifact.module) {
            errors.push(ValidationError::new(
                "invalid-module",
                format!("'{}' is not a valid module name", artifact.module),
            ));
        }
        for symbol in &artifact.symbols {
            if !IDENTIFIER.is_match(symbol) {
                errors.push(ValidationError::new(
                    "invalid-symbol",
                    format!(
                        "'{}' in artifact '{}' is not a valid symbol name",
                        symbol, artifact.module
                    ),
                ));
            }
        }
        if artifact.phase.trim().is_empty() {
            errors.push(ValidationError::new(
                "artifact-phase-empty",
                format!("Artifact '{}' must name the phase that produces it", artifact.module),
            ));
        }
    }

    errors
}

fn validate_upstream(config: &PrereqConfig) -> Vec<ValidationError> {
    config
        .upstream
        .iter()
        .filter(|u| u.command.trim().is_empty())
        .map(|u| {
            ValidationError::new(
                "upstream-command-empty",
                format!("Upstream verifier '{}' needs a 'command'", u.phase),
            )
        })
        .collect()
}

fn validate_env(config: &PrereqConfig) -> Vec<ValidationError> {
    config
        .env
        .iter()
        .filter(|e| !IDENTIFIER.is_match(&e.name))
        .map(|e| {
            ValidationError::new(
                "invalid-env-name",
                format!("'{}' is not a valid environment variable name", e.name),
            )
        })
        .collect()
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &PrereqConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PrereqError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{
        ArtifactConfig, EnvVarConfig, LibraryConfig, PackageManagerConfig, ToolConfig,
        UpstreamConfig,
    };

    fn tool(name: &str, minimum: Option<&str>) -> ToolConfig {
        ToolConfig {
            name: name.to_string(),
            minimum_version: minimum.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(validate(&PrereqConfig::default()).is_ok());
    }

    #[test]
    fn rejects_unparseable_minimum_version() {
        let config = PrereqConfig {
            tools: vec![tool("python3", Some("newest"))],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "invalid-minimum-version"));
    }

    #[test]
    fn rejects_duplicate_tools() {
        let config = PrereqConfig {
            tools: vec![tool("git", None), tool("git", None)],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "duplicate-tool"));
    }

    #[test]
    fn rejects_empty_tool_name() {
        let config = PrereqConfig {
            tools: vec![tool("", None)],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "tool-name-empty"));
    }

    #[test]
    fn rejects_module_names_that_are_code() {
        let config = PrereqConfig {
            libraries: vec![LibraryConfig {
                module: "os; os.system('rm -rf /')".to_string(),
                package: None,
            }],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "invalid-module"));
    }

    #[test]
    fn accepts_dotted_modules_and_symbols() {
        let config = PrereqConfig {
            artifacts: vec![ArtifactConfig {
                module: "src.personas.generator".to_string(),
                symbols: vec!["PersonaGenerator".to_string(), "load_panel".to_string()],
                phase: "Phase 2".to_string(),
                hint: None,
            }],
            ..Default::default()
        };
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn rejects_bad_symbol_and_missing_phase() {
        let config = PrereqConfig {
            artifacts: vec![ArtifactConfig {
                module: "src.app".to_string(),
                symbols: vec!["*".to_string()],
                phase: String::new(),
                hint: None,
            }],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "invalid-symbol"));
        assert!(errors.iter().any(|e| e.rule == "artifact-phase-empty"));
    }

    #[test]
    fn rejects_package_manager_without_install() {
        let config = PrereqConfig {
            package_manager: Some(PackageManagerConfig {
                name: "uv".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| e.rule == "package-manager-install-empty"));
    }

    #[test]
    fn rejects_upstream_without_command() {
        let config = PrereqConfig {
            upstream: vec![UpstreamConfig {
                phase: "Phase 3".to_string(),
                command: " ".to_string(),
            }],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "upstream-command-empty"));
    }

    #[test]
    fn rejects_invalid_env_names() {
        let config = PrereqConfig {
            env: vec![EnvVarConfig {
                name: "ANTHROPIC-API-KEY".to_string(),
                hint: None,
            }],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "invalid-env-name"));
    }

    #[test]
    fn validate_joins_all_messages() {
        let config = PrereqConfig {
            tools: vec![tool("a", Some("x")), tool("b", Some("y"))],
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'a'"));
        assert!(msg.contains("'b'"));
    }
}
