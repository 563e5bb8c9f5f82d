//! The host system the checks run against.
//!
//! Every side effect of a check (binary lookup, subprocesses, environment
//! reads, project file probes) goes through [`Host`], so the runner can be
//! driven by [`MockHost`](super::mock::MockHost) in tests.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::{execute, CommandOptions, CommandResult};

use super::probe::SearchPath;

/// Collaborator interface for the machine being verified.
pub trait Host {
    /// Root of the project being verified.
    fn project_root(&self) -> &Path;

    /// Locate a binary on the search path.
    fn find_binary(&self, name: &str) -> Option<PathBuf>;

    /// Run a shell command.
    ///
    /// Commands run from the project root unless `options.cwd` says otherwise.
    fn execute(&mut self, command: &str, options: &CommandOptions) -> Result<CommandResult>;

    /// Read an environment variable.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Whether `relative` exists under the project root.
    fn project_path_exists(&self, relative: &Path) -> bool;

    /// Add directories to the binary search path (e.g. after a bootstrap install).
    fn add_search_paths(&mut self, dirs: &[String]);
}

/// The real machine.
#[derive(Debug, Clone)]
pub struct SystemHost {
    project_root: PathBuf,
    search: SearchPath,
}

impl SystemHost {
    /// Create a host rooted at `project_root` using the process PATH.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            search: SearchPath::from_system(),
        }
    }

    /// The current search path.
    pub fn search_path(&self) -> &SearchPath {
        &self.search
    }
}

impl Host for SystemHost {
    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn find_binary(&self, name: &str) -> Option<PathBuf> {
        let found = self.search.resolve(name);
        tracing::debug!("Resolved {} to {:?}", name, found);
        found
    }

    fn execute(&mut self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        let mut options = options.clone();
        if options.cwd.is_none() {
            options.cwd = Some(self.project_root.clone());
        }
        // Children must see binaries from the augmented search path too
        if !self.search.augmented().is_empty() {
            options.env.insert(
                "PATH".to_string(),
                self.search.to_env_value().to_string_lossy().to_string(),
            );
        }
        execute(command, &options)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn project_path_exists(&self, relative: &Path) -> bool {
        self.project_root.join(relative).exists()
    }

    fn add_search_paths(&mut self, dirs: &[String]) {
        self.search.augment(dirs);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn commands_run_from_project_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pyproject.toml"), "").unwrap();
        let mut host = SystemHost::new(temp.path());

        let result = host.execute("ls", &CommandOptions::captured()).unwrap();
        assert!(result.stdout.contains("pyproject.toml"));
    }

    #[test]
    fn project_path_exists_is_relative_to_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".venv")).unwrap();
        let host = SystemHost::new(temp.path());

        assert!(host.project_path_exists(Path::new(".venv")));
        assert!(!host.project_path_exists(Path::new("venv")));
    }

    #[test]
    fn augmented_paths_reach_children() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let tool = bin.join("prereq-fake-tool");
        fs::write(&tool, "#!/bin/sh\necho fake-tool-ran\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let mut host = SystemHost::new(temp.path());
        assert!(host.find_binary("prereq-fake-tool").is_none());

        host.add_search_paths(&[bin.to_string_lossy().to_string()]);
        assert_eq!(host.find_binary("prereq-fake-tool"), Some(tool));

        let result = host
            .execute("prereq-fake-tool", &CommandOptions::captured())
            .unwrap();
        assert!(result.stdout.contains("fake-tool-ran"));
    }
}
