//! Configuration file discovery and loading.
//!
//! This module handles finding and loading checklist files from
//! various locations in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::PrereqConfig;
use crate::error::{PrereqError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".prereq";

/// Project checklist file name.
pub const CONFIG_FILE: &str = "config.yml";

/// Local override file name.
pub const LOCAL_CONFIG_FILE: &str = "config.local.yml";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.prereq/config.yml`)
/// 2. Project config (`.prereq/config.yml`)
/// 3. Local overrides (`.prereq/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config: ~/.prereq/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .prereq/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .prereq/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: dirs::home_dir()
                .and_then(|home| existing(home.join(CONFIG_DIR).join(CONFIG_FILE))),
            project: existing(project_config_path(project_root)),
            project_local: existing(project_root.join(CONFIG_DIR).join(LOCAL_CONFIG_FILE)),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Location of the project checklist under `project_root`.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.prereq` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into PrereqConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PrereqConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into PrereqConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PrereqConfig> {
    if content.trim().is_empty() {
        return Ok(PrereqConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PrereqError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }
    serde_yaml::from_str(&content).map_err(|e| PrereqError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PrereqError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PrereqError::Io(e)
        }
    })
}

/// Load and merge all config files for a project.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<PrereqConfig> {
    let paths = ConfigPaths::discover(project_root);

    if !paths.has_project_config() {
        return Err(PrereqError::ConfigNotFound {
            path: project_config_path(project_root),
        });
    }

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config layer {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| PrereqError::ConfigParseError {
        path: project_config_path(project_root),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PrereqConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project_config(root: &Path, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn discover_finds_project_config() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "app_name: test");

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.has_project_config());
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
        assert!(!paths.has_project_config());
    }

    #[test]
    fn find_project_root_finds_config_dir() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("foo").join("bar");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_prefers_config_dir_over_git() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("nested").join("project");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::create_dir_all(subdir.join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&subdir), Some(subdir));
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/config.yml"));
        assert!(matches!(result, Err(PrereqError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let result = parse_config("invalid: yaml: content: [", Path::new("test.yml"));
        assert!(matches!(result, Err(PrereqError::ConfigParseError { .. })));
    }

    #[test]
    fn load_config_file_handles_empty_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yml");
        fs::write(&config_path, "").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.app_name.is_none());
        assert!(config.tools.is_empty());
    }

    #[test]
    fn load_merged_config_merges_project_and_local() {
        use crate::config::schema::OutputMode;

        let temp = TempDir::new().unwrap();
        write_project_config(
            temp.path(),
            r#"
app_name: TestApp
settings:
  default_output: verbose
tools:
  - name: git
"#,
        );
        fs::write(
            temp.path().join(CONFIG_DIR).join(LOCAL_CONFIG_FILE),
            "settings:\n  default_output: quiet\n",
        )
        .unwrap();

        let config = load_merged_config(temp.path()).unwrap();

        assert_eq!(config.app_name, Some("TestApp".to_string()));
        assert_eq!(config.settings.default_output, OutputMode::Quiet);
        assert_eq!(config.tools.len(), 1);
    }

    #[test]
    fn local_override_replaces_tool_list() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "tools:\n  - name: git\n  - name: claude\n");
        fs::write(
            temp.path().join(CONFIG_DIR).join(LOCAL_CONFIG_FILE),
            "tools:\n  - name: git\n",
        )
        .unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.tools.len(), 1);
        assert_eq!(config.tools[0].name, "git");
    }

    #[test]
    fn empty_local_override_keeps_project_config() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "app_name: Kept\n");
        fs::write(temp.path().join(CONFIG_DIR).join(LOCAL_CONFIG_FILE), "").unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.app_name.as_deref(), Some("Kept"));
    }

    #[test]
    fn load_merged_config_fails_without_project_config() {
        let temp = TempDir::new().unwrap();
        let result = load_merged_config(temp.path());
        assert!(matches!(result, Err(PrereqError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_with_override_skips_merge() {
        let temp = TempDir::new().unwrap();
        let override_path = temp.path().join("custom.yml");
        fs::write(&override_path, "app_name: CustomApp").unwrap();

        let config = load_config(temp.path(), Some(&override_path)).unwrap();
        assert_eq!(config.app_name, Some("CustomApp".to_string()));
    }
}
