//! Mock host for testing.
//!
//! `MockHost` implements the [`Host`] trait, records every executed
//! command and answers from scripted tables.
//!
//! # Example
//!
//! ```
//! use prereq::requirements::{Host, MockHost};
//! use prereq::shell::CommandOptions;
//!
//! let mut host = MockHost::new("/project");
//! host.add_binary("python3");
//! host.respond("python3 --version", 0, "Python 3.12.1");
//!
//! let result = host.execute("python3 --version", &CommandOptions::captured()).unwrap();
//! assert!(result.stdout.contains("3.12.1"));
//! assert_eq!(host.executed(), &["python3 --version".to_string()]);
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::shell::{CommandOptions, CommandResult};

use super::host::Host;

/// A scripted command response.
#[derive(Debug, Clone)]
struct MockResponse {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

/// Mock host implementation for testing.
///
/// Unscripted commands exit with the default code (127 unless changed),
/// like a missing program would.
#[derive(Debug)]
pub struct MockHost {
    project_root: PathBuf,
    binaries: HashSet<String>,
    responses: HashMap<String, MockResponse>,
    queues: HashMap<String, VecDeque<MockResponse>>,
    installs_binary: HashMap<String, String>,
    env: HashMap<String, String>,
    project_paths: HashSet<PathBuf>,
    search_additions: Vec<String>,
    executed: Vec<String>,
    default_exit: i32,
}

impl MockHost {
    /// Create a mock host rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            binaries: HashSet::new(),
            responses: HashMap::new(),
            queues: HashMap::new(),
            installs_binary: HashMap::new(),
            env: HashMap::new(),
            project_paths: HashSet::new(),
            search_additions: Vec::new(),
            executed: Vec::new(),
            default_exit: 127,
        }
    }

    /// Make a binary resolvable.
    pub fn add_binary(&mut self, name: &str) {
        self.binaries.insert(name.to_string());
    }

    /// Always answer `command` with this exit code and stdout.
    pub fn respond(&mut self, command: &str, exit_code: i32, stdout: &str) {
        self.responses.insert(
            command.to_string(),
            MockResponse {
                exit_code,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    /// Always answer `command` with this exit code and stderr.
    pub fn respond_stderr(&mut self, command: &str, exit_code: i32, stderr: &str) {
        self.responses.insert(
            command.to_string(),
            MockResponse {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Answer `command` with these exit codes in order, then fall back to
    /// [`respond`](Self::respond) or the default.
    pub fn queue_exit_codes(&mut self, command: &str, codes: &[i32]) {
        let queue = codes
            .iter()
            .map(|code| MockResponse {
                exit_code: *code,
                stdout: String::new(),
                stderr: String::new(),
            })
            .collect();
        self.queues.insert(command.to_string(), queue);
    }

    /// When `command` succeeds, `binary` becomes resolvable.
    pub fn installs_binary(&mut self, command: &str, binary: &str) {
        self.installs_binary
            .insert(command.to_string(), binary.to_string());
    }

    /// Exit code for unscripted commands.
    pub fn set_default_exit(&mut self, code: i32) {
        self.default_exit = code;
    }

    /// Set an environment variable.
    pub fn set_env(&mut self, name: &str, value: &str) {
        self.env.insert(name.to_string(), value.to_string());
    }

    /// Mark a project-relative path as existing.
    pub fn add_project_path(&mut self, relative: &str) {
        self.project_paths.insert(PathBuf::from(relative));
    }

    /// Every command executed so far, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Whether any executed command contains `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.executed.iter().any(|c| c.contains(needle))
    }

    /// Directories added through [`Host::add_search_paths`].
    pub fn search_additions(&self) -> &[String] {
        &self.search_additions
    }

    /// Forget executed commands (e.g. between two runs).
    pub fn clear_executed(&mut self) {
        self.executed.clear();
    }
}

impl Host for MockHost {
    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn find_binary(&self, name: &str) -> Option<PathBuf> {
        if self.binaries.contains(name) {
            Some(PathBuf::from("/mock/bin").join(name))
        } else {
            None
        }
    }

    fn execute(&mut self, command: &str, _options: &CommandOptions) -> Result<CommandResult> {
        self.executed.push(command.to_string());

        let queued = self
            .queues
            .get_mut(command)
            .and_then(|queue| queue.pop_front());
        let response = queued
            .or_else(|| self.responses.get(command).cloned())
            .unwrap_or(MockResponse {
                exit_code: self.default_exit,
                stdout: String::new(),
                stderr: String::new(),
            });

        if response.exit_code == 0 {
            if let Some(binary) = self.installs_binary.get(command).cloned() {
                self.binaries.insert(binary);
            }
            Ok(CommandResult::success(
                response.stdout,
                response.stderr,
                Duration::ZERO,
            ))
        } else {
            Ok(CommandResult::failure(
                Some(response.exit_code),
                response.stdout,
                response.stderr,
                Duration::ZERO,
            ))
        }
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn project_path_exists(&self, relative: &Path) -> bool {
        self.project_paths.contains(relative)
    }

    fn add_search_paths(&mut self, dirs: &[String]) {
        self.search_additions.extend(dirs.iter().cloned());
    }
}
