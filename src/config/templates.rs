//! Built-in checklist templates embedded at compile time.

use crate::error::{PrereqError, Result};
use include_dir::{include_dir, Dir};
use std::path::PathBuf;

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Template written by `prereq init` when none is named.
pub const DEFAULT_TEMPLATE: &str = "phase4";

/// Names of all built-in templates, sorted.
pub fn template_names() -> Vec<String> {
    let mut names: Vec<String> = TEMPLATES_DIR
        .files()
        .filter(|f| f.path().extension().is_some_and(|ext| ext == "yml"))
        .filter_map(|f| f.path().file_stem()?.to_str().map(String::from))
        .collect();
    names.sort();
    names
}

/// Raw YAML of a built-in template.
///
/// # Errors
///
/// Returns `ConfigNotFound` for an unknown template name.
pub fn template_source(name: &str) -> Result<&'static str> {
    let path = format!("{}.yml", name);
    let file = TEMPLATES_DIR
        .get_file(&path)
        .ok_or_else(|| PrereqError::ConfigNotFound {
            path: PathBuf::from("templates").join(&path),
        })?;

    file.contents_utf8()
        .ok_or_else(|| PrereqError::ConfigParseError {
            path: PathBuf::from("templates").join(&path),
            message: "Invalid UTF-8".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, validate};
    use std::path::Path;

    #[test]
    fn lists_builtin_templates() {
        let names = template_names();
        assert!(names.contains(&"phase4".to_string()));
        assert!(names.contains(&"minimal".to_string()));
    }

    #[test]
    fn every_template_parses_and_validates() {
        for name in template_names() {
            let source = template_source(&name).unwrap();
            let config = parse_config(source, Path::new(&name)).unwrap();
            validate(&config).unwrap();
        }
    }

    #[test]
    fn phase4_template_covers_every_section() {
        let config = parse_config(template_source("phase4").unwrap(), Path::new("phase4")).unwrap();
        assert!(config.tools.iter().any(|t| t.minimum_version.is_some()));
        assert!(config.package_manager.is_some());
        assert!(!config.libraries.is_empty());
        assert_eq!(config.upstream.len(), 3);
        assert!(!config.artifacts.is_empty());
        assert!(config.env.iter().any(|e| e.name == "ANTHROPIC_API_KEY"));
        assert!(!config.optional_libraries.is_empty());
        assert!(config.banner.is_some());
    }

    #[test]
    fn unknown_template_is_not_found() {
        assert!(matches!(
            template_source("nope"),
            Err(PrereqError::ConfigNotFound { .. })
        ));
    }
}
