//! Checklist evaluation.

pub mod report;
pub mod verifier;

pub use report::{CheckRecord, RunReport};
pub use verifier::{import_command, RunOptions, Verifier};
