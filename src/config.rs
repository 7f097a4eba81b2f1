//! View configuration - template locations and engine behavior
//!
//! Configuration is a small TOML document listing the locations templates are
//! resolved from, in probe order, plus engine strictness:
//!
//! ```toml
//! [engine]
//! strict = true
//!
//! [[locations]]
//! root = "templates"
//! patterns = ["{name}.html", "shared/{name}.html"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::DEFAULT_PATTERN;
use crate::error::ConfigError;

/// Loaded view configuration
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Whether undefined template variables are render errors
    pub strict: bool,
    /// Template locations in probe order
    pub locations: Vec<LocationConfig>,
}

/// One configured template location
#[derive(Debug, Clone)]
pub struct LocationConfig {
    /// Directory the patterns are rooted at
    pub root: PathBuf,
    /// Filename patterns with a `{name}` placeholder
    pub patterns: Vec<String>,
}

/// TOML structure for deserializing view configurations
#[derive(Deserialize)]
struct TomlConfig {
    engine: Option<TomlEngine>,
    #[serde(default)]
    locations: Vec<TomlLocation>,
}

#[derive(Deserialize)]
struct TomlEngine {
    strict: Option<bool>,
}

#[derive(Deserialize)]
struct TomlLocation {
    root: PathBuf,
    patterns: Option<Vec<String>>,
}

/// Default configuration: strict engine, templates under `templates/`
const DEFAULT_CONFIG: &str = r#"
[engine]
strict = true

[[locations]]
root = "templates"
patterns = ["{name}.html", "shared/{name}.html"]
"#;

impl ViewConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;

        Ok(ViewConfig {
            strict: parsed
                .engine
                .and_then(|e| e.strict)
                .unwrap_or(true),
            locations: parsed
                .locations
                .into_iter()
                .map(|loc| LocationConfig {
                    root: loc.root,
                    patterns: loc
                        .patterns
                        .unwrap_or_else(|| vec![DEFAULT_PATTERN.to_string()]),
                })
                .collect(),
        })
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::from_str(DEFAULT_CONFIG).expect("Default view configuration should be valid TOML")
    }
}
