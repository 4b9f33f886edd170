//! Unit configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use adlift_core::AdUnitConfig;

/// Returns the default unit configuration file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adlift")
        .join("unit.json")
}

/// Loads a unit configuration.
///
/// An explicit path must exist; the default path falls back to a
/// test-mode demo unit when missing.
pub fn load(path: Option<&Path>) -> Result<AdUnitConfig> {
    match path {
        Some(path) => read_config(path),
        None => {
            let path = default_path();
            if path.exists() {
                read_config(&path)
            } else {
                debug!(path = %path.display(), "Config file not found, using demo unit");
                Ok(demo_config())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<AdUnitConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = AdUnitConfig::from_json(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    info!(path = %path.display(), unit = %config.id, "Loaded unit configuration");
    Ok(config)
}

fn demo_config() -> AdUnitConfig {
    let mut config = AdUnitConfig::new("sim-demo-unit");
    config.test_mode = true;
    config
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_default_falls_back_to_demo_unit() {
        let config = load(None).unwrap_or_else(|_| demo_config());
        assert!(!config.id.is_empty());
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        let result = load(Some(Path::new("/nonexistent/adlift-unit.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_id_config_file_is_rejected() {
        let path = std::env::temp_dir().join("adlift-blank-id-test.json");
        std::fs::write(&path, r#"{"id": "   "}"#).unwrap();
        let result = load(Some(&path));
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }
}
