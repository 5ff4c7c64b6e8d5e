//! Configuration loading from constify.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Main configuration structure for constify.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConstifyConfig {
    /// Analysis mode name (see [`crate::analysis::AnalysisMode`]).
    pub mode: Option<String>,
    /// Declaration names or patterns whose findings are suppressed.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Loads configuration from constify.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<ConstifyConfig>> {
    let path = root.join("constify.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let cfg = toml::from_str(&content).context("Invalid constify.toml")?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path());
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_load_config_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("constify.toml"), "").unwrap();

        let cfg = load_config(dir.path()).unwrap().unwrap();
        assert!(cfg.mode.is_none());
        assert!(cfg.ignore.is_none());
        assert!(cfg.output.is_none());
    }

    #[test]
    fn test_load_config_full() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("constify.toml"),
            r#"
mode = "pseudo-const"
ignore = ["detail", "impl_"]

[output]
format = "json"
"#,
        )
        .unwrap();

        let cfg = load_config(dir.path()).unwrap().unwrap();
        assert_eq!(cfg.mode.as_deref(), Some("pseudo-const"));
        assert_eq!(cfg.ignore.as_ref().unwrap().len(), 2);
        assert_eq!(
            cfg.output.as_ref().unwrap().format.as_deref(),
            Some("json")
        );
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("constify.toml"), "not valid toml {{{").unwrap();
        assert!(load_config(dir.path()).is_err());
    }
}
