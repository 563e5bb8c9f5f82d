//! PATH probing for required binaries.
//!
//! Installers such as uv drop their binaries in `~/.local/bin` or
//! `~/.cargo/bin`, which a fresh process often does not have on PATH. The
//! [`SearchPath`] keeps those extra directories ahead of the system PATH so
//! that a tool installed a moment ago is found by the very next check.
//!
//! # Example
//!
//! ```no_run
//! use prereq::requirements::probe::SearchPath;
//!
//! let mut search = SearchPath::from_system();
//! search.augment(&["~/.local/bin".to_string()]);
//! if let Some(uv) = search.resolve("uv") {
//!     println!("uv at {}", uv.display());
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        for candidate in candidates(dir, tool) {
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidates(dir: &Path, tool: &str) -> Vec<PathBuf> {
    vec![dir.join(tool), dir.join(format!("{}.exe", tool))]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, tool: &str) -> Vec<PathBuf> {
    vec![dir.join(tool)]
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, dirs::home_dir())
}

fn expand_home_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

/// Directories searched for binaries: extra entries first, then the system PATH.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    augmented: Vec<PathBuf>,
    system: Vec<PathBuf>,
}

impl SearchPath {
    /// Start from the current process PATH.
    pub fn from_system() -> Self {
        Self::from_entries(parse_system_path())
    }

    /// Start from explicit entries (for testing).
    pub fn from_entries(system: Vec<PathBuf>) -> Self {
        Self {
            augmented: Vec::new(),
            system,
        }
    }

    /// Prepend directories, skipping any already searched.
    pub fn augment(&mut self, dirs: &[String]) {
        for dir in dirs {
            let path = expand_home(dir);
            if !self.augmented.contains(&path) && !self.system.contains(&path) {
                tracing::debug!("Adding {} to the search path", path.display());
                self.augmented.push(path);
            }
        }
    }

    /// Entries added on top of the system PATH.
    pub fn augmented(&self) -> &[PathBuf] {
        &self.augmented
    }

    /// Combined PATH: augmented entries prepended to the system PATH.
    pub fn full_path(&self) -> Vec<PathBuf> {
        let mut result = self.augmented.clone();
        result.extend(self.system.iter().cloned());
        result
    }

    /// The combined PATH as an environment variable value.
    pub fn to_env_value(&self) -> OsString {
        std::env::join_paths(self.full_path()).unwrap_or_default()
    }

    /// Find `tool` on the combined PATH.
    pub fn resolve(&self, tool: &str) -> Option<PathBuf> {
        resolve_tool_path(tool, &self.full_path())
    }
}
