//! Configuration loading, parsing, and validation for prereq.
//!
//! This module handles all aspects of the checklist configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - Built-in templates in [`templates`]
//!
//! # Example
//!
//! ```
//! use prereq::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".prereq");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "app_name: test").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.app_name, Some("test".to_string()));
//! ```
//!
//! # Configuration File Locations
//!
//! prereq discovers and merges configuration in this order:
//! 1. User global config (`~/.prereq/config.yml`)
//! 2. Project config (`.prereq/config.yml`)
//! 3. Local overrides (`.prereq/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod templates;
pub mod validator;

pub use schema::{
    ArtifactConfig, BannerConfig, EnvVarConfig, LibraryConfig, OutputMode, PackageManagerConfig,
    PrereqConfig, Settings, ToolConfig, UpstreamConfig,
};

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, project_config_path, ConfigPaths, CONFIG_DIR, CONFIG_FILE,
};

pub use merger::{deep_merge, merge_configs};

pub use validator::{validate, validate_config, ValidationError};

pub use templates::{template_names, template_source, DEFAULT_TEMPLATE};
