//! Version extraction and comparison for version-gated tools.
//!
//! Tools print versions in many shapes (`Python 3.11.4`, `v20.1.0`,
//! `uv 0.4.18 (Homebrew 2024-10-01)`). The first `major.minor[.patch]`
//! triple in the output wins.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// First dotted version in free-form tool output.
static VERSION_IN_OUTPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("VERSION_IN_OUTPUT must compile")
});

/// A version requirement as written in config (`3`, `3.11`, `v3.11.2`).
static VERSION_REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*v?(\d+)(?:\.(\d+))?(?:\.(\d+))?\s*$")
        .expect("VERSION_REQUIREMENT must compile")
});

/// A `major.minor[.patch]` version.
///
/// Missing components compare as zero, so `3.11` equals `3.11.0`.
#[derive(Debug, Clone, Copy)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl Version {
    /// Create a version from its components.
    pub fn new(major: u32, minor: u32, patch: Option<u32>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    fn key(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch.unwrap_or(0))
    }

    /// Whether this version satisfies `minimum`.
    pub fn meets(&self, minimum: &Version) -> bool {
        self >= minimum
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_REQUIREMENT
            .captures(s)
            .ok_or_else(|| format!("invalid version: {}", s))?;
        let part = |i: usize| -> Result<Option<u32>, String> {
            caps.get(i)
                .map(|m| m.as_str().parse::<u32>())
                .transpose()
                .map_err(|e| format!("invalid version component in {}: {}", s, e))
        };
        Ok(Version::new(
            part(1)?.unwrap_or(0),
            part(2)?.unwrap_or(0),
            part(3)?,
        ))
    }
}

/// Extract the first version from tool output.
pub fn extract_version(output: &str) -> Option<Version> {
    let caps = VERSION_IN_OUTPUT.captures(output)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps.get(3).and_then(|m| m.as_str().parse().ok());
    Some(Version::new(major, minor, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_python_version() {
        let v = extract_version("Python 3.11.4").unwrap();
        assert_eq!(v, Version::new(3, 11, Some(4)));
        assert_eq!(v.to_string(), "3.11.4");
    }

    #[test]
    fn extracts_first_version_only() {
        let v = extract_version("uv 0.4.18 (Homebrew 2024.10.01)").unwrap();
        assert_eq!(v.to_string(), "0.4.18");
    }

    #[test]
    fn extracts_two_component_version() {
        let v = extract_version("tool version 2.7\n").unwrap();
        assert_eq!(v.to_string(), "2.7");
        assert!(v.patch.is_none());
    }

    #[test]
    fn no_version_in_output() {
        assert!(extract_version("command not found").is_none());
        assert!(extract_version("").is_none());
    }

    #[test]
    fn parses_requirements() {
        assert_eq!("3.11".parse::<Version>().unwrap(), Version::new(3, 11, None));
        assert_eq!("v20".parse::<Version>().unwrap(), Version::new(20, 0, None));
        assert_eq!(
            " 1.2.3 ".parse::<Version>().unwrap(),
            Version::new(1, 2, Some(3))
        );
        assert!("latest".parse::<Version>().is_err());
        assert!("3.11-beta".parse::<Version>().is_err());
    }

    #[test]
    fn older_minor_fails_minimum() {
        let found = extract_version("Python 3.9.0").unwrap();
        let minimum: Version = "3.11".parse().unwrap();
        assert!(!found.meets(&minimum));
    }

    #[test]
    fn equal_and_newer_meet_minimum() {
        let minimum: Version = "3.11".parse().unwrap();
        assert!(Version::new(3, 11, Some(0)).meets(&minimum));
        assert!(Version::new(3, 12, Some(1)).meets(&minimum));
        assert!(Version::new(4, 0, None).meets(&minimum));
    }

    #[test]
    fn minor_compares_numerically() {
        // 3.9 must sort below 3.11, not above it
        assert!(Version::new(3, 9, None) < Version::new(3, 11, None));
    }

    #[test]
    fn missing_patch_equals_zero() {
        assert_eq!(Version::new(3, 11, None), Version::new(3, 11, Some(0)));
    }
}
