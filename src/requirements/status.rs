//! Check and install outcomes.
//!
//! Each evaluated check produces a [`CheckOutcome`]; each installation the
//! [`Installer`](super::installer::Installer) performs produces an
//! [`InstallOutcome`]. Whether an outcome is fatal is decided by the runner.

use crate::error::PrereqError;

/// The result of evaluating one check.
#[derive(Debug)]
pub enum CheckOutcome {
    /// Already satisfied.
    Passed { detail: String },
    /// Satisfied after an install.
    Installed { detail: String },
    /// Not satisfied, but the check is optional.
    Warned {
        message: String,
        hint: Option<String>,
    },
    /// Not satisfied; halts the run.
    Failed { error: PrereqError },
}

impl CheckOutcome {
    /// Status label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed { .. } => "passed",
            Self::Installed { .. } => "installed",
            Self::Warned { .. } => "warned",
            Self::Failed { .. } => "failed",
        }
    }

    /// Human-readable detail line.
    pub fn detail(&self) -> String {
        match self {
            Self::Passed { detail } | Self::Installed { detail } => detail.clone(),
            Self::Warned { message, .. } => message.clone(),
            Self::Failed { error } => error.to_string(),
        }
    }
}

/// The result of one installation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing to do.
    AlreadyPresent,
    /// The install command succeeded.
    Installed { command: String },
    /// The install command exited non-zero or could not be started.
    Failed {
        command: String,
        code: Option<i32>,
        /// Captured stdout and stderr of the command.
        output: String,
    },
    /// No installer was available or installs are disabled.
    Skipped { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(
            CheckOutcome::Passed {
                detail: "3.12.1".to_string()
            }
            .label(),
            "passed"
        );
        assert_eq!(
            CheckOutcome::Warned {
                message: "ANTHROPIC_API_KEY is not set".to_string(),
                hint: None,
            }
            .label(),
            "warned"
        );
    }

    #[test]
    fn failed_detail_is_error_message() {
        let outcome = CheckOutcome::Failed {
            error: PrereqError::VersionTooOld {
                tool: "python3".to_string(),
                found: "3.9.0".to_string(),
                required: "3.11".to_string(),
            },
        };
        assert_eq!(outcome.label(), "failed");
        assert!(outcome.detail().contains("3.9.0"));
    }
}
