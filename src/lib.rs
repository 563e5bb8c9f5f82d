//! prereq - Declarative prerequisite verification.
//!
//! prereq reads a YAML checklist of the binaries, libraries, upstream phase
//! verifiers, application artifacts and environment variables a phase of
//! work depends on, installs what it can, and stops at the first unmet
//! mandatory requirement with an actionable hint.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Checklist loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Checks, probes, and package installation
//! - [`runner`] - Fail-fast checklist evaluation and run reports
//! - [`shell`] - Shell command execution
//! - [`ui`] - Spinners, themes, and terminal output
//!
//! # Example
//!
//! ```
//! use prereq::config::parse_config;
//! use prereq::requirements::{Checklist, MockHost};
//! use prereq::runner::{RunOptions, Verifier};
//! use prereq::ui::MockUI;
//! use std::path::Path;
//!
//! let yaml = "tools:\n  - name: claude\n";
//! let config = parse_config(yaml, Path::new("checklist.yml")).unwrap();
//! assert_eq!(Checklist::from_config(&config).unwrap().len(), 1);
//!
//! let mut host = MockHost::new("/project");
//! host.add_binary("claude");
//! let mut ui = MockUI::new();
//!
//! let verifier = Verifier::new(&config, RunOptions::default()).unwrap();
//! let report = verifier.run(&mut host, &mut ui);
//! assert!(report.success());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{PrereqError, Result};
