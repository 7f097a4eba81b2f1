//! Guarded partial rendering
//!
//! A [`PartialRenderer`] wraps the engine's resolve-and-render primitive with
//! guard policies for absent models and empty sequences:
//!
//! - [`partial_or_null`](PartialRenderer::partial_or_null) always renders,
//!   passing an absent model through as an explicit `none` - the template can
//!   tell "no model" apart from whatever the ambient context carries.
//! - [`partial_or_discard`](PartialRenderer::partial_or_discard) skips
//!   rendering entirely when the model is absent.
//! - [`partial_or_discard_if_empty`](PartialRenderer::partial_or_discard_if_empty)
//!   skips rendering when the sequence is absent or has no elements.
//!
//! The discard variants come with wrapped counterparts that pass the fully
//! rendered partial through a caller-supplied wrapper. An absent model or
//! empty sequence is the designed no-op path, never an error.
//!
//! Every operation builds its render context from the scoped view data with
//! the `model` key explicitly set to the given model - even when that model
//! is `none` - so a null model is never silently replaced by a contextual
//! fallback model.

use std::fmt;

use minijinja::Value;
use serde::Serialize;
use tracing::debug;

use crate::context::{ContextScope, ViewData};
use crate::engine::ViewEngine;
use crate::error::RenderError;

/// The outcome of a guarded render: encoded output, or a deliberate no-op.
///
/// `Suppressed` is distinct from rendered-but-empty output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Encoded output produced by the template
    Content(String),
    /// The guard decided not to render at all
    Suppressed,
}

impl Rendered {
    /// True when the guard suppressed rendering
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Rendered::Suppressed)
    }

    /// The rendered output, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Rendered::Content(html) => Some(html),
            Rendered::Suppressed => None,
        }
    }

    /// Consume into the rendered output, if any
    pub fn into_content(self) -> Option<String> {
        match self {
            Rendered::Content(html) => Some(html),
            Rendered::Suppressed => None,
        }
    }
}

impl fmt::Display for Rendered {
    /// Suppressed output displays as nothing; the variant still records that
    /// no render happened.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Content(html) => f.write_str(html),
            Rendered::Suppressed => Ok(()),
        }
    }
}

/// Renders named partial templates with null/empty guards.
///
/// Holds a borrow of the shared [`ViewEngine`] and the per-request ambient
/// [`ViewData`]; it owns no other state, and every call is single-shot and
/// synchronous.
#[derive(Debug)]
pub struct PartialRenderer<'e> {
    engine: &'e ViewEngine,
    ambient: ViewData,
}

impl<'e> PartialRenderer<'e> {
    /// Create a renderer with an empty ambient bag
    pub fn new(engine: &'e ViewEngine) -> Self {
        Self {
            engine,
            ambient: ViewData::new(),
        }
    }

    /// Set the ambient view data
    pub fn with_ambient(mut self, ambient: ViewData) -> Self {
        self.ambient = ambient;
        self
    }

    /// The ambient view data
    pub fn ambient(&self) -> &ViewData {
        &self.ambient
    }

    /// Mutable access to the ambient view data
    pub fn ambient_mut(&mut self) -> &mut ViewData {
        &mut self.ambient
    }

    /// Standard partial render: the template sees the scoped view data with
    /// `model` explicitly set to the given model.
    pub fn partial<T: Serialize>(
        &self,
        name: &str,
        model: &T,
        scope: ContextScope<'_>,
    ) -> Result<String, RenderError> {
        self.render_with_model(name, Value::from_serialize(model), scope)
    }

    /// Render the partial even when the model is absent.
    ///
    /// An absent model reaches the template as an explicit `none`, overriding
    /// any `model` the scoped view data carries - the template can branch on
    /// `model is none` instead of picking up a fallback value.
    pub fn partial_or_null<T: Serialize>(
        &self,
        name: &str,
        model: Option<&T>,
        scope: ContextScope<'_>,
    ) -> Result<String, RenderError> {
        let value = match model {
            Some(model) => Value::from_serialize(model),
            None => Value::from(()),
        };
        self.render_with_model(name, value, scope)
    }

    /// Render the partial, or produce no output when the model is absent
    pub fn partial_or_discard<T: Serialize>(
        &self,
        name: &str,
        model: Option<&T>,
        scope: ContextScope<'_>,
    ) -> Result<Rendered, RenderError> {
        match model {
            None => {
                debug!(template = name, "model absent, partial suppressed");
                Ok(Rendered::Suppressed)
            }
            Some(model) => self.partial(name, model, scope).map(Rendered::Content),
        }
    }

    /// Render the partial and pass its output through `wrapper`, or produce
    /// no output when the model is absent.
    ///
    /// The partial is rendered to completion before the wrapper runs; the
    /// wrapper receives the partial's full output. When the model is absent
    /// the wrapper is never invoked.
    pub fn partial_or_discard_with<T, F>(
        &self,
        name: &str,
        model: Option<&T>,
        wrapper: F,
        scope: ContextScope<'_>,
    ) -> Result<Rendered, RenderError>
    where
        T: Serialize,
        F: FnOnce(String) -> Result<String, RenderError>,
    {
        match model {
            None => {
                debug!(template = name, "model absent, partial and wrapper suppressed");
                Ok(Rendered::Suppressed)
            }
            Some(model) => {
                let inner = self.partial(name, model, scope)?;
                wrapper(inner).map(Rendered::Content)
            }
        }
    }

    /// Render the partial with the full sequence, or produce no output when
    /// the sequence is absent or has no elements.
    ///
    /// The sequence is an eagerly materialized slice, so the emptiness probe
    /// cannot re-run any producer logic. A sequence with at least one element
    /// counts as non-empty even if every element is `None`, and is passed
    /// through intact - no filtering.
    pub fn partial_or_discard_if_empty<T: Serialize>(
        &self,
        name: &str,
        model: Option<&[T]>,
        scope: ContextScope<'_>,
    ) -> Result<Rendered, RenderError> {
        match model {
            None => {
                debug!(template = name, "sequence absent, partial suppressed");
                Ok(Rendered::Suppressed)
            }
            Some([]) => {
                debug!(template = name, "sequence empty, partial suppressed");
                Ok(Rendered::Suppressed)
            }
            Some(items) => self.partial(name, &items, scope).map(Rendered::Content),
        }
    }

    /// Emptiness-guarded render with a wrapper; same guard as
    /// [`partial_or_discard_if_empty`](PartialRenderer::partial_or_discard_if_empty),
    /// same partial-before-wrapper ordering as
    /// [`partial_or_discard_with`](PartialRenderer::partial_or_discard_with).
    pub fn partial_or_discard_if_empty_with<T, F>(
        &self,
        name: &str,
        model: Option<&[T]>,
        wrapper: F,
        scope: ContextScope<'_>,
    ) -> Result<Rendered, RenderError>
    where
        T: Serialize,
        F: FnOnce(String) -> Result<String, RenderError>,
    {
        match model {
            None | Some([]) => {
                debug!(template = name, "sequence absent or empty, partial and wrapper suppressed");
                Ok(Rendered::Suppressed)
            }
            Some(items) => {
                let inner = self.partial(name, &items, scope)?;
                wrapper(inner).map(Rendered::Content)
            }
        }
    }

    /// Render a wrapper template with `item` bound to already-encoded output.
    ///
    /// Adapts a template into the wrapper-function shape the wrapped variants
    /// take: the template sees the ambient view data plus `item`, which is
    /// passed through without re-encoding.
    pub fn wrap(&self, name: &str, item: String) -> Result<String, RenderError> {
        let mut context = self.ambient.to_context();
        context.insert("item".to_string(), Value::from_safe_string(item));
        self.engine.render(name, &context)
    }

    /// Render with the scoped view data as-is, without setting `model`.
    ///
    /// This is the fallback-prone primitive the guards exist to avoid: the
    /// template's `model` resolves to whatever the scoped bag happens to
    /// carry, or to nothing at all.
    pub fn partial_with_ambient(
        &self,
        name: &str,
        scope: ContextScope<'_>,
    ) -> Result<String, RenderError> {
        let context = scope.select(&self.ambient).to_context();
        self.engine.render(name, &context)
    }

    fn render_with_model(
        &self,
        name: &str,
        model: Value,
        scope: ContextScope<'_>,
    ) -> Result<String, RenderError> {
        let mut context = scope.select(&self.ambient).to_context();
        // Explicit overwrite: the model the caller gave is the model the
        // template sees, none included.
        context.insert("model".to_string(), model);
        self.engine.render(name, &context)
    }
}
