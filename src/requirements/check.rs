//! Check descriptors.

use serde::Serialize;

use crate::config::{
    ArtifactConfig, EnvVarConfig, LibraryConfig, PackageManagerConfig, ToolConfig, UpstreamConfig,
};

use super::version::Version;

/// Whether an unmet check halts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Failure halts the run.
    Mandatory,
    /// Failure only produces a warning.
    Optional,
}

/// What a check verifies, with the configuration it needs.
#[derive(Debug, Clone)]
pub enum CheckKind {
    /// A binary must be on PATH.
    Binary { tool: ToolConfig },
    /// A binary must be on PATH and at least `minimum`.
    VersionedBinary { tool: ToolConfig, minimum: Version },
    /// The package manager is bootstrapped if absent.
    PackageManager { manager: PackageManagerConfig },
    /// A runtime library must be importable, installing it if needed.
    Library { library: LibraryConfig },
    /// An upstream phase verifier must exit 0.
    Upstream { upstream: UpstreamConfig },
    /// Symbols produced by an earlier phase must be importable.
    Artifact { artifact: ArtifactConfig },
    /// An environment variable should be set.
    EnvVar { var: EnvVarConfig },
    /// A library that is installed when possible but never required.
    OptionalLibrary { library: LibraryConfig },
}

impl CheckKind {
    /// Short machine-readable label, used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Binary { .. } => "binary",
            Self::VersionedBinary { .. } => "versioned_binary",
            Self::PackageManager { .. } => "package_manager",
            Self::Library { .. } => "library",
            Self::Upstream { .. } => "upstream",
            Self::Artifact { .. } => "artifact",
            Self::EnvVar { .. } => "env_var",
            Self::OptionalLibrary { .. } => "optional_library",
        }
    }

    /// Severity implied by the kind.
    pub fn severity(&self) -> Severity {
        match self {
            Self::PackageManager { .. } | Self::EnvVar { .. } | Self::OptionalLibrary { .. } => {
                Severity::Optional
            }
            _ => Severity::Mandatory,
        }
    }
}

/// One entry of the checklist.
#[derive(Debug, Clone)]
pub struct Check {
    /// Display name.
    pub name: String,
    /// Whether failure halts the run.
    pub severity: Severity,
    /// What is verified.
    pub kind: CheckKind,
}

impl Check {
    /// Create a check, deriving its name and severity from the kind.
    pub fn new(kind: CheckKind) -> Self {
        let name = match &kind {
            CheckKind::Binary { tool } => tool.name.clone(),
            CheckKind::VersionedBinary { tool, minimum } => format!("{} >= {}", tool.name, minimum),
            CheckKind::PackageManager { manager } => manager.name.clone(),
            CheckKind::Library { library } | CheckKind::OptionalLibrary { library } => {
                library.module.clone()
            }
            CheckKind::Upstream { upstream } => upstream.phase.clone(),
            CheckKind::Artifact { artifact } => {
                if artifact.symbols.is_empty() {
                    artifact.module.clone()
                } else {
                    format!("{}: {}", artifact.module, artifact.symbols.join(", "))
                }
            }
            CheckKind::EnvVar { var } => var.name.clone(),
        };

        Self {
            name,
            severity: kind.severity(),
            kind,
        }
    }

    /// Whether failure halts the run.
    pub fn is_mandatory(&self) -> bool {
        self.severity == Severity::Mandatory
    }
}
