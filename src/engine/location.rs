//! Template locations - where logical template names are looked up

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::RenderError;

/// A template source found by a location probe
#[derive(Debug, Clone)]
pub struct FoundTemplate {
    /// Human-readable origin (file path or memory key) for diagnostics
    pub origin: String,
    /// Raw template source text
    pub source: String,
}

/// A place where templates can be looked up by logical name.
///
/// Locations are probed in registration order; the first hit wins. Every
/// probed candidate is recorded so a failed resolution can enumerate them.
#[derive(Debug, Clone)]
pub enum ViewLocation {
    /// A directory probed through filename patterns.
    ///
    /// Patterns substitute `{name}` with the logical template name, e.g.
    /// `"{name}.html"` or `"shared/{name}.html"`.
    Directory {
        root: PathBuf,
        patterns: Vec<String>,
    },
    /// An in-memory map of template sources (tests, embedded defaults)
    Memory {
        label: String,
        templates: HashMap<String, String>,
    },
}

/// Pattern used when a directory location is registered without explicit ones
pub const DEFAULT_PATTERN: &str = "{name}.html";

impl ViewLocation {
    /// A directory location with the default `{name}.html` pattern
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        Self::directory_with_patterns(root, vec![DEFAULT_PATTERN.to_string()])
    }

    /// A directory location with explicit filename patterns
    pub fn directory_with_patterns(root: impl Into<PathBuf>, patterns: Vec<String>) -> Self {
        ViewLocation::Directory {
            root: root.into(),
            patterns,
        }
    }

    /// An in-memory location holding the given name/source pairs
    pub fn memory<I, K, V>(label: impl Into<String>, templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ViewLocation::Memory {
            label: label.into(),
            templates: templates
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Every candidate this location would probe for `name`, in probe order
    pub fn candidates(&self, name: &str) -> Vec<String> {
        match self {
            ViewLocation::Directory { root, patterns } => patterns
                .iter()
                .map(|pattern| root.join(pattern.replace("{name}", name)).display().to_string())
                .collect(),
            ViewLocation::Memory { label, .. } => vec![format!("{}:{}", label, name)],
        }
    }

    /// Probe this location for `name`.
    ///
    /// Returns `Ok(None)` when the template simply isn't here; an `Err` means
    /// a candidate file exists but could not be read.
    pub fn lookup(&self, name: &str) -> Result<Option<FoundTemplate>, RenderError> {
        match self {
            ViewLocation::Directory { root, patterns } => {
                for pattern in patterns {
                    let path = root.join(pattern.replace("{name}", name));
                    if !path.is_file() {
                        continue;
                    }
                    let source =
                        std::fs::read_to_string(&path).map_err(|e| RenderError::FileRead {
                            path: path.clone(),
                            message: e.to_string(),
                        })?;
                    return Ok(Some(FoundTemplate {
                        origin: path.display().to_string(),
                        source,
                    }));
                }
                Ok(None)
            }
            ViewLocation::Memory { label, templates } => {
                Ok(templates.get(name).map(|source| FoundTemplate {
                    origin: format!("{}:{}", label, name),
                    source: source.clone(),
                }))
            }
        }
    }
}
