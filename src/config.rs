use crate::error::Result;
use crate::types::config::{FormulaConfig, FormulaDocument, ProjectConfig};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_PROJECT_CONFIG_FILE: &str = "confgate.toml";

/// Load the calibrated formula constants. Missing document means built-in
/// defaults; a document that fails to parse or violates the formula
/// invariants is logged and ignored. Loading must never be fatal to scoring.
pub fn load_formula_config(path: Option<&Path>) -> FormulaConfig {
    let mut config = FormulaConfig::default();
    let Some(path) = path else {
        return config;
    };
    if !path.exists() {
        return config;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("could not read formula config {}: {}", path.display(), e);
            return config;
        }
    };

    let document: FormulaDocument = match serde_json::from_str(&content) {
        Ok(document) => document,
        Err(e) => {
            warn!("could not parse formula config {}: {}", path.display(), e);
            return config;
        }
    };

    if let Some(overlay) = document.confidence_formula {
        overlay.apply(&mut config);
    }

    if let Err(e) = config.validate() {
        warn!(
            "formula config {} is invalid ({}); using defaults",
            path.display(),
            e
        );
        return FormulaConfig::default();
    }

    config
}

/// Load the optional project config from `<root>/confgate.toml`.
pub fn load_project_config(root: &Path) -> Result<Option<ProjectConfig>> {
    let path = root.join(DEFAULT_PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn formula_config_defaults_when_no_path_given() {
        let config = load_formula_config(None);
        assert_eq!(config, FormulaConfig::default());
    }

    #[test]
    fn formula_config_defaults_when_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let config = load_formula_config(Some(&dir.path().join("absent.json")));
        assert_eq!(config, FormulaConfig::default());
    }

    #[test]
    fn formula_config_merges_per_field() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("formula.json");
        fs::write(
            &path,
            r#"{
                "confidence_formula": {
                    "K": 45.0,
                    "penalty_caps": { "severity": 40.0 },
                    "thresholds": { "fix_rate_target": 0.8 }
                }
            }"#,
        )
        .expect("formula config should write");

        let config = load_formula_config(Some(&path));
        assert_eq!(config.k, 45.0);
        assert_eq!(config.cap_severity, 40.0);
        assert_eq!(config.fix_target, 0.8);
        // Fields absent in a present section keep their defaults.
        assert_eq!(config.cap_doc, 10.0);
        assert_eq!(config.doc_target, 0.90);
    }

    #[test]
    fn malformed_formula_config_falls_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("formula.json");
        fs::write(&path, "{ not json").expect("file should write");

        let config = load_formula_config(Some(&path));
        assert_eq!(config, FormulaConfig::default());
    }

    #[test]
    fn invalid_formula_values_fall_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("formula.json");
        fs::write(
            &path,
            r#"{"confidence_formula": {"severity_weights": {"p0_k": -1.0}}}"#,
        )
        .expect("file should write");

        let config = load_formula_config(Some(&path));
        assert_eq!(config, FormulaConfig::default());
    }

    #[test]
    fn project_config_none_when_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let config = load_project_config(dir.path()).expect("load should not fail");
        assert!(config.is_none());
    }

    #[test]
    fn project_config_loads_from_root() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join(DEFAULT_PROJECT_CONFIG_FILE),
            r#"
[code]
root = "lib"
"#,
        )
        .expect("project config should write");

        let config = load_project_config(dir.path())
            .expect("load should succeed")
            .expect("config should exist");
        assert_eq!(config.code_root(), "lib");
    }
}
