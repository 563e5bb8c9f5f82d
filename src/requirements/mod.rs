//! Prerequisite checks and the machinery they run on.
//!
//! # Modules
//!
//! - [`check`] - Check descriptors and severities
//! - [`checklist`] - Ordered checklist built from configuration
//! - [`host`] - The [`Host`] seam and the real [`SystemHost`]
//! - [`installer`] - Package manager bootstrap and package installs
//! - [`mock`] - [`MockHost`] for tests
//! - [`probe`] - PATH probing with extra search directories
//! - [`status`] - Check and install outcomes
//! - [`version`] - Version extraction and comparison

pub mod check;
pub mod checklist;
pub mod host;
pub mod installer;
pub mod mock;
pub mod probe;
pub mod status;
pub mod version;

pub use check::{Check, CheckKind, Severity};
pub use checklist::Checklist;
pub use host::{Host, SystemHost};
pub use installer::Installer;
pub use mock::MockHost;
pub use probe::SearchPath;
pub use status::{CheckOutcome, InstallOutcome};
pub use version::{extract_version, Version};
