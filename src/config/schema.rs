//! Configuration schema definitions for prereq.
//!
//! This module contains all the struct definitions that map to
//! the YAML checklist file format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.prereq/config.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PrereqConfig {
    /// Application name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Phase title shown in the header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Runtime used for import checks (default: python3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Global settings
    pub settings: Settings,

    /// Required binaries, checked in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolConfig>,

    /// Package manager bootstrapped before library installs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManagerConfig>,

    /// Libraries that must be importable
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<LibraryConfig>,

    /// Upstream phase verifiers, run in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upstream: Vec<UpstreamConfig>,

    /// Application modules and symbols produced by earlier phases
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactConfig>,

    /// Environment variables that should be set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVarConfig>,

    /// Libraries installed best-effort; failures only warn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_libraries: Vec<LibraryConfig>,

    /// Banner printed after every check passed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<BannerConfig>,
}

impl PrereqConfig {
    /// Interpreter for import checks.
    pub fn interpreter(&self) -> &str {
        self.interpreter.as_deref().unwrap_or(DEFAULT_INTERPRETER)
    }

    /// Header title: the phase, then the app name, then a generic title.
    pub fn title(&self) -> &str {
        self.phase
            .as_deref()
            .or(self.app_name.as_deref())
            .unwrap_or("Prerequisites")
    }
}

/// Interpreter used when the config names none.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Global settings that apply to the whole run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Default output mode
    #[serde(default)]
    pub default_output: OutputMode,

    /// Treat a failed install as fatal instead of deferring to the re-check
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict_installs: bool,

    /// Install missing packages automatically
    #[serde(default = "default_true")]
    pub auto_install: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_output: OutputMode::default(),
            strict_installs: false,
            auto_install: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn is_false(v: &bool) -> bool {
    !v
}

/// Output mode in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

/// A required binary, optionally version-gated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ToolConfig {
    /// Display name
    pub name: String,

    /// Binary to look up on PATH (defaults to `name`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Minimum `major.minor[.patch]` version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<String>,

    /// Command printing the version (defaults to `<command> --version`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_command: Option<String>,

    /// How to install the tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,
}

impl ToolConfig {
    /// Binary name looked up on PATH.
    pub fn binary(&self) -> &str {
        self.command.as_deref().unwrap_or(&self.name)
    }
}

/// Package manager used to install libraries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PackageManagerConfig {
    /// Binary name (e.g. `uv`)
    pub name: String,

    /// Command that installs the manager itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<String>,

    /// Install command prefix (e.g. `uv pip install`)
    pub install: String,

    /// Installer used when the manager is unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    /// Flag added when no project environment exists (e.g. `--system`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_flag: Option<String>,

    /// Project paths whose presence means a project environment exists
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_markers: Vec<PathBuf>,

    /// Directories the bootstrap may install into (`~` is expanded)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_paths: Vec<String>,
}

/// An importable module and the package that provides it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LibraryConfig {
    /// Module name passed to `import`
    pub module: String,

    /// Package name to install (defaults to `module`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl LibraryConfig {
    /// Package to install when the import fails.
    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or(&self.module)
    }
}

/// An upstream phase verifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Phase name used in messages
    pub phase: String,

    /// Command to run from the project root
    pub command: String,
}

/// Application module and symbols required by the next phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Dotted module path
    pub module: String,

    /// Symbols imported from the module
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,

    /// Phase that produces this module
    pub phase: String,

    /// Remediation hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// An environment variable that should be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EnvVarConfig {
    /// Variable name
    pub name: String,

    /// How to set it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Final success banner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BannerConfig {
    /// Banner headline
    pub title: String,

    /// Lines describing what the next phase adds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
}
