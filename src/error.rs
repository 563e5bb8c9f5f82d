//! Error types for prereq operations.
//!
//! This module defines [`PrereqError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Check failures carry enough context to print an actionable hint
//! - Use `anyhow::Error` (via `PrereqError::Other`) for unexpected errors
//! - [`PrereqError::exit_code`] decides the process status for fatal errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for prereq operations.
#[derive(Debug, Error)]
pub enum PrereqError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A required binary is not on PATH.
    #[error("Required tool '{tool}' not found")]
    ToolMissing { tool: String, hint: Option<String> },

    /// A required binary is present but older than the minimum.
    #[error("'{tool}' version {found} is below the required {required}")]
    VersionTooOld {
        tool: String,
        found: String,
        required: String,
    },

    /// The version command produced nothing that looks like a version.
    #[error("Could not determine the version of '{tool}' from: {output}")]
    VersionUnparseable { tool: String, output: String },

    /// A runtime library is not importable, with or without an install attempt.
    #[error("Module '{module}' is not importable ({})", describe_install(.package, .attempted))]
    LibraryMissing {
        module: String,
        package: String,
        attempted: bool,
    },

    /// Installing a package failed (only fatal with strict installs).
    #[error("Installing '{package}' failed ({}): {command}", describe_exit(.code))]
    InstallFailed {
        package: String,
        command: String,
        code: Option<i32>,
    },

    /// An upstream phase verifier exited non-zero.
    #[error("{phase} verification failed ({})", describe_exit(.code))]
    UpstreamFailed { phase: String, code: Option<i32> },

    /// A module or symbol produced by an earlier phase cannot be imported.
    #[error("Cannot import {symbols} from '{module}': {phase} appears incomplete")]
    ArtifactMissing {
        module: String,
        symbols: String,
        phase: String,
        hint: Option<String>,
    },

    /// Shell command could not be run.
    #[error("Command failed ({}): {command}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrereqError {
    /// Remediation hint to print under the error line, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::ToolMissing { hint, .. } | Self::ArtifactMissing { hint, .. } => hint.clone(),
            Self::VersionTooOld { tool, required, .. } => {
                Some(format!("Upgrade {} to {} or newer", tool, required))
            }
            Self::LibraryMissing { package, .. } => {
                Some(format!("Install it manually: pip install {}", package))
            }
            Self::UpstreamFailed { phase, .. } => {
                Some(format!("Fix the issues reported above and complete {} first", phase))
            }
            Self::ConfigNotFound { .. } => {
                Some("Run 'prereq init' to create a checklist".to_string())
            }
            _ => None,
        }
    }

    /// Process exit code for this error.
    ///
    /// Upstream failures propagate the upstream's own status; a missing
    /// configuration exits 2; everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UpstreamFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            Self::ConfigNotFound { .. } => 2,
            _ => 1,
        }
    }
}

/// Describe a process exit status for messages.
pub fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn describe_install(package: &str, attempted: &bool) -> String {
    if *attempted {
        format!("package '{}' could not be installed", package)
    } else {
        format!("package '{}' is not installed and installs are disabled", package)
    }
}

/// Result type alias for prereq operations.
pub type Result<T> = std::result::Result<T, PrereqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = PrereqError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PrereqError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn tool_missing_carries_hint() {
        let err = PrereqError::ToolMissing {
            tool: "claude".into(),
            hint: Some("npm install -g @anthropic-ai/claude-code".into()),
        };
        assert!(err.to_string().contains("claude"));
        assert_eq!(
            err.hint().as_deref(),
            Some("npm install -g @anthropic-ai/claude-code")
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn version_too_old_reports_found_and_required() {
        let err = PrereqError::VersionTooOld {
            tool: "python3".into(),
            found: "3.9.0".into(),
            required: "3.11".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("3.9.0"));
        assert!(msg.contains("3.11"));
        assert!(err.hint().unwrap().contains("3.11"));
    }

    #[test]
    fn upstream_failed_propagates_exit_code() {
        let err = PrereqError::UpstreamFailed {
            phase: "Phase 3".into(),
            code: Some(7),
        };
        assert_eq!(err.exit_code(), 7);
        assert_eq!(
            err.to_string(),
            "Phase 3 verification failed (exit code 7)"
        );
    }

    #[test]
    fn upstream_killed_by_signal_exits_one() {
        let err = PrereqError::UpstreamFailed {
            phase: "Phase 1".into(),
            code: None,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn library_missing_says_whether_install_ran() {
        let attempted = PrereqError::LibraryMissing {
            module: "pydantic".into(),
            package: "pydantic".into(),
            attempted: true,
        };
        let skipped = PrereqError::LibraryMissing {
            module: "pydantic".into(),
            package: "pydantic".into(),
            attempted: false,
        };
        assert!(attempted.to_string().contains("could not be installed"));
        assert!(skipped.to_string().contains("installs are disabled"));
        assert!(!skipped.to_string().contains("could not be installed"));
    }

    #[test]
    fn artifact_missing_names_phase() {
        let err = PrereqError::ArtifactMissing {
            module: "src.personas".into(),
            symbols: "PersonaGenerator".into(),
            phase: "Phase 2".into(),
            hint: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("PersonaGenerator"));
        assert!(msg.contains("Phase 2"));
        assert!(err.hint().is_none());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PrereqError = io_err.into();
        assert!(matches!(err, PrereqError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PrereqError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
