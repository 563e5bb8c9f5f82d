//! Building the ordered checklist from configuration.
//!
//! The evaluation order is fixed regardless of the order of sections in
//! the YAML file: tools, package manager, libraries, upstream verifiers,
//! artifacts, environment variables, optional libraries.

use std::str::FromStr;

use crate::config::PrereqConfig;
use crate::error::{PrereqError, Result};

use super::check::{Check, CheckKind};
use super::version::Version;

/// Ordered list of checks.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    checks: Vec<Check>,
}

impl Checklist {
    /// Build the checklist for `config`.
    pub fn from_config(config: &PrereqConfig) -> Result<Self> {
        let mut checks = Vec::new();

        for tool in &config.tools {
            let kind = match &tool.minimum_version {
                Some(raw) => {
                    let minimum = Version::from_str(raw).map_err(|message| {
                        PrereqError::ConfigValidationError {
                            message: format!("tool '{}': {}", tool.name, message),
                        }
                    })?;
                    CheckKind::VersionedBinary {
                        tool: tool.clone(),
                        minimum,
                    }
                }
                None => CheckKind::Binary { tool: tool.clone() },
            };
            checks.push(Check::new(kind));
        }

        if let Some(manager) = &config.package_manager {
            checks.push(Check::new(CheckKind::PackageManager {
                manager: manager.clone(),
            }));
        }

        checks.extend(config.libraries.iter().map(|library| {
            Check::new(CheckKind::Library {
                library: library.clone(),
            })
        }));

        checks.extend(config.upstream.iter().map(|upstream| {
            Check::new(CheckKind::Upstream {
                upstream: upstream.clone(),
            })
        }));

        checks.extend(config.artifacts.iter().map(|artifact| {
            Check::new(CheckKind::Artifact {
                artifact: artifact.clone(),
            })
        }));

        checks.extend(
            config
                .env
                .iter()
                .map(|var| Check::new(CheckKind::EnvVar { var: var.clone() })),
        );

        checks.extend(config.optional_libraries.iter().map(|library| {
            Check::new(CheckKind::OptionalLibrary {
                library: library.clone(),
            })
        }));

        tracing::debug!("Built checklist with {} checks", checks.len());
        Ok(Self { checks })
    }

    /// Checks in evaluation order.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether there are no checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Iterate checks in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }
}
