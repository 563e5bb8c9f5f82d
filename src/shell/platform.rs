//! Platform detection.

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ci_from_env(|key| std::env::var(key).ok())
}

/// CI detection against an arbitrary env lookup.
pub fn ci_from_env<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    const CI_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
    ];
    CI_VARS.iter().any(|var| lookup(var).is_some())
}
