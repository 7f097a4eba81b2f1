//! Error types for template resolution and rendering

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or rendering a partial template
#[derive(Debug, Error)]
pub enum RenderError {
    /// The caller passed an empty or blank template name
    #[error("template name must not be empty")]
    EmptyTemplateName,

    /// No registered location contains the requested template.
    ///
    /// The message enumerates every candidate that was probed so the caller
    /// can see exactly where the template was expected to live.
    #[error(
        "partial template '{name}' was not found in any registered location; \
         the following locations were searched:{}",
        format_searched(.searched)
    )]
    TemplateNotFound {
        name: String,
        searched: Vec<String>,
    },

    /// The host engine failed to compile or render the template
    #[error("template '{name}' failed to render: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// A template file exists but could not be read
    #[error("error reading template file {path}: {message}")]
    FileRead { path: PathBuf, message: String },
}

/// Errors that can occur when loading or parsing a view configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read view configuration file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse view configuration TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

fn format_searched(searched: &[String]) -> String {
    searched
        .iter()
        .map(|candidate| format!("\n  {}", candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_enumerates_candidates() {
        let err = RenderError::TemplateNotFound {
            name: "Missing".to_string(),
            searched: vec![
                "views/Missing.html".to_string(),
                "views/shared/Missing.html".to_string(),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("'Missing'"));
        assert!(message.contains("views/Missing.html"));
        assert!(message.contains("views/shared/Missing.html"));
    }

    #[test]
    fn test_not_found_message_with_no_candidates() {
        let err = RenderError::TemplateNotFound {
            name: "Missing".to_string(),
            searched: vec![],
        };

        // Degenerate case: an engine with no locations still reports the name
        assert!(err.to_string().contains("'Missing'"));
    }
}
