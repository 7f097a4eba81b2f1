//! Partial Guard - guarded partial-template rendering
//!
//! This library wraps a host template engine's "resolve a template by name
//! and render it against a model" primitive with guard policies for absent
//! models and empty sequences: render-or-null, render-or-discard, and
//! render-or-discard-if-empty, each with a wrapped variant.
//!
//! # Example
//!
//! ```rust
//! use partial_guard::{ContextScope, PartialRenderer, Rendered, ViewEngine, ViewLocation};
//!
//! let engine = ViewEngine::new(vec![ViewLocation::memory(
//!     "builtin",
//!     [("greeting", "<p>Hello {{ model }}!</p>")],
//! )]);
//! let partials = PartialRenderer::new(&engine);
//!
//! let html = partials
//!     .partial("greeting", &"world", ContextScope::Ambient)
//!     .unwrap();
//! assert_eq!(html, "<p>Hello world!</p>");
//!
//! // The guard decides: no model, no output.
//! let skipped = partials
//!     .partial_or_discard::<String>("greeting", None, ContextScope::Ambient)
//!     .unwrap();
//! assert_eq!(skipped, Rendered::Suppressed);
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod partial;

pub use config::{LocationConfig, ViewConfig};
pub use context::{ContextScope, ViewData};
pub use engine::{ViewEngine, ViewLocation};
pub use error::{ConfigError, RenderError};
pub use partial::{PartialRenderer, Rendered};
